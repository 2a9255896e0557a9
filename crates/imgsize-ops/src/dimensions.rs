//! Target size calculation.
//!
//! Derives the output size from the source size and a validated request.
//! Exactly one branch applies:
//!
//! | Given           | Target                                         |
//! |-----------------|------------------------------------------------|
//! | width + height  | `(width, height)`, advisory if aspect differs  |
//! | width           | `(width, trunc(src_h * width / src_w))`        |
//! | height          | `(trunc(src_w * height / src_h), height)`      |
//! | scale           | `(trunc(src_w * scale), trunc(src_h * scale))` |
//!
//! Computed sides are truncated toward zero, never rounded.

use crate::{OpsError, OpsResult};
use imgsize_core::{Mode, ResizeRequest};
use tracing::{debug, warn};

/// Computed output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// True when both sides were given and their ratio differs from the source.
    pub aspect_changed: bool,
}

impl TargetSize {
    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Computes the target size for a validated request.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if the request specifies no usable
/// dimension (validation rejects such requests), and the errors of
/// [`target_size`].
pub fn calculate(source: (u32, u32), request: &ResizeRequest) -> OpsResult<TargetSize> {
    let mode = request
        .mode()
        .ok_or_else(|| OpsError::InvalidDimensions("request has no usable width, height or scale".into()))?;
    target_size(source, mode)
}

/// Computes the target size for a source size and dispatch mode.
///
/// # Errors
///
/// [`OpsError::DegenerateDimensions`] if the source is empty or a computed
/// side truncates to zero or overflows `u32`.
///
/// # Example
///
/// ```rust
/// use imgsize_core::Mode;
/// use imgsize_ops::dimensions::target_size;
///
/// let size = target_size((100, 50), Mode::Width(33)).unwrap();
/// assert_eq!(size.dimensions(), (33, 16));
/// ```
pub fn target_size(source: (u32, u32), mode: Mode) -> OpsResult<TargetSize> {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::DegenerateDimensions {
            width: src_w as f64,
            height: src_h as f64,
        });
    }
    let (sw, sh) = (src_w as f64, src_h as f64);

    let (width, height, aspect_changed) = match mode {
        Mode::Exact { width, height } => {
            let changed = src_w as u64 * height as u64 != src_h as u64 * width as u64;
            (width as f64, height as f64, changed)
        }
        Mode::Width(width) => {
            let factor = width as f64 / sw;
            (width as f64, (sh * factor).trunc(), false)
        }
        Mode::Height(height) => {
            let factor = height as f64 / sh;
            ((sw * factor).trunc(), height as f64, false)
        }
        Mode::Scale(scale) => ((sw * scale).trunc(), (sh * scale).trunc(), false),
    };

    let (Some(w), Some(h)) = (to_pixels(width), to_pixels(height)) else {
        return Err(OpsError::DegenerateDimensions { width, height });
    };

    if aspect_changed {
        warn!(
            "aspect ratio will differ from original ({}x{} -> {}x{})",
            src_w, src_h, w, h
        );
    }
    debug!(?mode, width = w, height = h, "target size");

    Ok(TargetSize {
        width: w,
        height: h,
        aspect_changed,
    })
}

fn to_pixels(v: f64) -> Option<u32> {
    if v >= 1.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}
