//! # imgsize-io
//!
//! Image decode/encode for the `imgsize` resizer.
//!
//! - **PNG** - Gray, gray+alpha, RGB, RGBA at 8 or 16 bits
//! - **JPEG** - 8-bit Luma and RGB
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use imgsize_io::{read, write, WriteOptions};
//!
//! let image = read("input.png")?;
//! write("output.jpg", &image, &WriteOptions::default())?;
//! ```
//!
//! Reading detects the format from magic bytes first and the extension
//! second. Writing picks the format from the output extension.
//!
//! [`write`] never leaves a partially written file behind: the image is
//! encoded in memory, written to a temporary file next to the destination
//! and renamed into place.
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};

use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Reads an image from a file, auto-detecting the format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "decoding");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(IoError::UnsupportedFormat(extension_of(path))),
    }
}

/// Encodes an image into memory in the given format.
#[cfg_attr(not(feature = "jpeg"), allow(unused_variables))]
pub fn encode(format: Format, image: &ImageData, options: &WriteOptions) -> IoResult<Vec<u8>> {
    image.check_len()?;

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::encode(image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::encode(image, options.jpeg_quality),

        _ => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}

/// Returns true if images can be written to this path's extension.
pub fn can_write<P: AsRef<Path>>(path: P) -> bool {
    match Format::from_extension(path) {
        #[cfg(feature = "png")]
        Format::Png => true,
        #[cfg(feature = "jpeg")]
        Format::Jpeg => true,
        _ => false,
    }
}

/// Writes an image to a file, detecting format from extension.
///
/// The destination is replaced atomically: on any failure no file is
/// created (or an existing file is left untouched).
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not a writable format
/// - Encoding fails
/// - The destination directory cannot be written
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData, options: &WriteOptions) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    if !can_write(path) {
        return Err(IoError::UnsupportedFormat(extension_of(path)));
    }

    let bytes = encode(format, image, options)?;
    write_atomic(path, &bytes)?;

    debug!(path = %path.display(), bytes = bytes.len(), "written");
    Ok(())
}

/// Writes bytes to a temporary file in the destination directory, then
/// renames it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> IoResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".imgsize-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }

    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    // Dropping the temp file on the error path removes it.
    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Decoded image.
///
/// Samples are interleaved, row-major, `channels` per pixel:
/// 1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of interleaved channels.
    pub channels: u32,
    /// Raw pixel data.
    pub data: PixelData,
}

/// Pixel data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit unsigned integer per channel.
    U8,
    /// 16-bit unsigned integer per channel.
    U16,
}

/// Raw pixel data storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// 8-bit unsigned data.
    U8(Vec<u8>),
    /// 16-bit unsigned data.
    U16(Vec<u16>),
}

impl ImageData {
    /// Creates ImageData from u8 pixel data.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::U8(data),
        }
    }

    /// Creates ImageData from u16 pixel data.
    pub fn from_u16(width: u32, height: u32, channels: u32, data: Vec<u16>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::U16(data),
        }
    }

    /// Creates ImageData by quantizing normalized `[0, 1]` samples.
    ///
    /// Values are rounded to nearest and clamped.
    pub fn from_f32(width: u32, height: u32, channels: u32, format: PixelFormat, data: &[f32]) -> Self {
        let data = match format {
            PixelFormat::U8 => PixelData::U8(
                data.iter()
                    .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
                    .collect(),
            ),
            PixelFormat::U16 => PixelData::U16(
                data.iter()
                    .map(|&v| (v * 65535.0).round().clamp(0.0, 65535.0) as u16)
                    .collect(),
            ),
        };
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the sample format.
    pub fn format(&self) -> PixelFormat {
        match self.data {
            PixelData::U8(_) => PixelFormat::U8,
            PixelData::U16(_) => PixelFormat::U16,
        }
    }

    /// Returns the total number of samples (pixels * channels).
    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    /// Converts samples to normalized f32 (for processing).
    pub fn to_f32(&self) -> Vec<f32> {
        match &self.data {
            PixelData::U8(data) => data.iter().map(|&v| v as f32 / 255.0).collect(),
            PixelData::U16(data) => data.iter().map(|&v| v as f32 / 65535.0).collect(),
        }
    }

    /// Converts samples to u8, keeping the high byte of 16-bit data.
    pub fn to_u8(&self) -> Vec<u8> {
        match &self.data {
            PixelData::U8(data) => data.clone(),
            PixelData::U16(data) => data.iter().map(|&v| (v >> 8) as u8).collect(),
        }
    }

    /// Checks the buffer length against the declared dimensions.
    pub fn check_len(&self) -> IoResult<()> {
        let actual = match &self.data {
            PixelData::U8(d) => d.len(),
            PixelData::U16(d) => d.len(),
        };
        let expected = self.sample_count();
        if actual != expected {
            return Err(IoError::DimensionMismatch {
                expected: format!("{} samples ({}x{}x{})", expected, self.width, self.height, self.channels),
                actual: format!("{} samples", actual),
            });
        }
        Ok(())
    }
}
