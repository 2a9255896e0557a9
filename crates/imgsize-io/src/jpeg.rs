//! JPEG format support.
//!
//! Decoding yields 8-bit gray or RGB (CMYK is converted to RGB, 16-bit
//! lossless gray stays 16-bit). Encoding writes Luma for one- and
//! two-channel images and RGB otherwise; alpha is dropped and 16-bit
//! samples are narrowed to 8 bits.

use crate::{ImageData, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Largest dimension a baseline JPEG can describe.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Reads a JPEG image from memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    decode(data)
}

fn decode<R: Read>(reader: R) -> IoResult<ImageData> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (channels, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (3, PixelData::U8(pixels)),
        jpeg_decoder::PixelFormat::L8 => (1, PixelData::U8(pixels)),
        jpeg_decoder::PixelFormat::L16 => {
            let samples = pixels
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            (1, PixelData::U16(samples))
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            // Approximate, no color management
            let rgb: Vec<u8> = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let c = cmyk[0] as f32 / 255.0;
                    let m = cmyk[1] as f32 / 255.0;
                    let y = cmyk[2] as f32 / 255.0;
                    let k = cmyk[3] as f32 / 255.0;

                    let r = ((1.0 - c) * (1.0 - k) * 255.0) as u8;
                    let g = ((1.0 - m) * (1.0 - k) * 255.0) as u8;
                    let b = ((1.0 - y) * (1.0 - k) * 255.0) as u8;

                    [r, g, b]
                })
                .collect();
            (3, PixelData::U8(rgb))
        }
    };

    Ok(ImageData {
        width,
        height,
        channels,
        data,
    })
}

/// Encodes an image as JPEG into memory.
pub fn encode(image: &ImageData, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    if image.width > MAX_DIMENSION || image.height > MAX_DIMENSION {
        return Err(IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG limit of {} pixels per side",
            image.width, image.height, MAX_DIMENSION
        )));
    }

    let u8_data = image.to_u8();
    let (color_type, pixel_data) = match image.channels {
        1 => (ColorType::Luma, u8_data),
        // Drop alpha
        2 => (ColorType::Luma, u8_data.chunks_exact(2).map(|ga| ga[0]).collect()),
        3 => (ColorType::Rgb, u8_data),
        4 => (
            ColorType::Rgb,
            u8_data
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect(),
        ),
        n => {
            return Err(IoError::EncodeError(format!("unsupported channel count: {}", n)));
        }
    };

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(&pixel_data, image.width as u16, image.height as u16, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}
