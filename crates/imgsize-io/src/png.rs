//! PNG format support.
//!
//! Palette and sub-byte images are expanded on read, so every decoded
//! image is gray, gray+alpha, RGB or RGBA at 8 or 16 bits. Channel layout
//! and bit depth are kept on write.
//!
//! # Example
//!
//! ```rust,ignore
//! use imgsize_io::png::{read, encode};
//!
//! let image = read("input.png")?;
//! let bytes = encode(&image)?;
//! ```

use crate::{ImageData, IoError, IoResult, PixelData};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Reads a PNG image from memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    decode(Cursor::new(data))
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<ImageData> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader.output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader.next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(IoError::UnsupportedBitDepth("unexpanded palette image".into()));
        }
    };

    let data = match info.bit_depth {
        png::BitDepth::Eight => PixelData::U8(buf),
        png::BitDepth::Sixteen => PixelData::U16(bytes_to_u16(&buf)),
        depth => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, depth
            )));
        }
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        channels,
        data,
    })
}

/// Encodes an image as PNG into memory.
pub fn encode(image: &ImageData) -> IoResult<Vec<u8>> {
    let color_type = match image.channels {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let (depth, bytes) = match &image.data {
        PixelData::U8(data) => (png::BitDepth::Eight, data.clone()),
        PixelData::U16(data) => (png::BitDepth::Sixteen, u16_to_bytes(data)),
    };

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, image.width, image.height);
        encoder.set_color(color_type);
        encoder.set_depth(depth);
        encoder.set_compression(png::Compression::default());

        let mut writer = encoder.write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer.write_image_data(&bytes)
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer.finish()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
    }

    Ok(buffer)
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

/// Converts u16 samples to big-endian bytes.
fn u16_to_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|v| v.to_be_bytes()).collect()
}
