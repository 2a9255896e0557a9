//! Resize runner.
//!
//! Decodes the source, computes the target size, resamples and writes the
//! result. Output is written atomically by [`imgsize_io::write`], so a
//! failed run leaves no file behind.

use crate::dimensions::{calculate, TargetSize};
use crate::resize::{resize, Filter};
use crate::{OpsError, OpsResult};
use imgsize_core::ResizeRequest;
use imgsize_io::{IoError, WriteOptions};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default cap on the resample working set, in pixels (16384 x 16384).
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 28;

/// Settings that do not change what size is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Resampling filter.
    pub filter: Filter,
    /// Encoder settings.
    pub write: WriteOptions,
    /// Largest pixel count any resample buffer may hold.
    pub max_pixels: u64,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            write: WriteOptions::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// Where the image was written.
    pub output: PathBuf,
    /// Size of the decoded source.
    pub source_size: (u32, u32),
    /// Size that was written.
    pub target: TargetSize,
}

/// Resolves the output path.
///
/// An explicit output is used verbatim. Otherwise the result goes next to
/// the source as `<stem>__<width>x<height>.<ext>`, keeping the source
/// extension as written.
///
/// # Example
///
/// ```rust
/// use imgsize_ops::resolve_output_path;
/// use std::path::Path;
///
/// let out = resolve_output_path(Path::new("pics/photo.jpg"), None, (200, 100));
/// assert_eq!(out, Path::new("pics/photo__200x100.jpg"));
/// ```
pub fn resolve_output_path(source: &Path, output: Option<&Path>, size: (u32, u32)) -> PathBuf {
    if let Some(output) = output {
        return output.to_path_buf();
    }

    let stem = source.file_stem().unwrap_or_default();
    let mut name = OsString::from(stem);
    name.push(format!("__{}x{}", size.0, size.1));
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

/// Runs a validated request end to end.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] if the output extension cannot be
///   encoded (checked before decoding)
/// - [`IoError::DecodeError`] / [`IoError::Io`] if the source cannot be read
/// - [`OpsError::DegenerateDimensions`] if the computed size is empty
/// - [`OpsError::InvalidDimensions`] if the target exceeds
///   [`ResizeOptions::max_pixels`] or the output format's side limit
/// - [`IoError::EncodeError`] / [`IoError::Io`] if the output cannot be written
pub fn run(request: &ResizeRequest, options: &ResizeOptions) -> OpsResult<ResizeOutcome> {
    let source = request
        .source
        .as_deref()
        .ok_or_else(|| OpsError::InvalidParameter("no source image".into()))?;

    // The synthesized name keeps the source extension, so either path tells
    // us the output format before any decoding work.
    let format_probe = request.output.as_deref().unwrap_or(source);
    if !imgsize_io::can_write(format_probe) {
        let ext = format_probe
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("none");
        return Err(IoError::UnsupportedFormat(format!("cannot write {:?} files", ext)).into());
    }

    let image = imgsize_io::read(source)?;
    let source_size = image.dimensions();
    debug!(
        path = %source.display(),
        width = source_size.0,
        height = source_size.1,
        channels = image.channels,
        "decoded"
    );

    let target = calculate(source_size, request)?;
    let output = resolve_output_path(source, request.output.as_deref(), target.dimensions());
    check_target(source_size, image.channels, &target, &output, options)?;

    let resized = resize(&image, target.width, target.height, options.filter)?;
    drop(image);

    imgsize_io::write(&output, &resized, &options.write)?;

    info!(
        "wrote {} ({}x{} -> {}x{}, {})",
        output.display(),
        source_size.0,
        source_size.1,
        target.width,
        target.height,
        options.filter
    );

    Ok(ResizeOutcome {
        output,
        source_size,
        target,
    })
}

/// Rejects targets the resampler or the output encoder cannot handle,
/// before any buffer is allocated.
///
/// The horizontal pass holds `target_w x source_h` samples and the result
/// holds `target_w x target_h`; both must fit `max_pixels`.
fn check_target(
    source: (u32, u32),
    channels: u32,
    target: &TargetSize,
    output: &Path,
    options: &ResizeOptions,
) -> OpsResult<()> {
    let rows = source.1.max(target.height) as u64;
    let pixels = (target.width as u64)
        .checked_mul(rows)
        .filter(|&p| p <= options.max_pixels)
        .ok_or_else(|| {
            OpsError::InvalidDimensions(format!(
                "{}x{} needs more than {} pixels of working memory",
                target.width, target.height, options.max_pixels
            ))
        })?;
    let samples = pixels.checked_mul(channels as u64).and_then(|n| usize::try_from(n).ok());
    if samples.is_none() {
        return Err(OpsError::InvalidDimensions(format!(
            "{}x{}x{} samples do not fit in memory",
            target.width, target.height, channels
        )));
    }

    if imgsize_io::Format::from_extension(output) == imgsize_io::Format::Jpeg {
        let max = imgsize_io::jpeg::MAX_DIMENSION;
        if target.width > max || target.height > max {
            return Err(OpsError::InvalidDimensions(format!(
                "{}x{} exceeds the JPEG limit of {} pixels per side",
                target.width, target.height, max
            )));
        }
    }

    Ok(())
}
