//! Image resize and resampling operations.
//!
//! Separable two-pass convolution: rows are resampled horizontally into a
//! temporary buffer, which is then resampled vertically. Filter weights for
//! each output column/row are computed once per pass and normalized.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::Bicubic`] - Catmull-Rom cubic (sharper than bilinear)
//! - [`Filter::Lanczos3`] - High-quality sinc-based (best for downscaling)
//!
//! # Example
//!
//! ```rust
//! use imgsize_ops::resize::{resize_f32, Filter};
//!
//! let src = vec![0.5f32; 16 * 16 * 4];
//! let dst = resize_f32(&src, 16, 16, 4, 32, 32, Filter::Bilinear).unwrap();
//! assert_eq!(dst.len(), 32 * 32 * 4);
//! ```

use crate::{OpsError, OpsResult};
use imgsize_io::ImageData;
use std::fmt;
use std::str::FromStr;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    #[default]
    Bicubic,
    /// Lanczos-3 (high quality, best for downscaling).
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bc_cubic_weight(0.0, 0.5, x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" | "box" => Ok(Filter::Nearest),
            "bilinear" | "linear" | "triangle" => Ok(Filter::Bilinear),
            "bicubic" | "cubic" | "catrom" => Ok(Filter::Bicubic),
            "lanczos" | "lanczos3" => Ok(Filter::Lanczos3),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown filter {:?} (expected nearest, bilinear, bicubic or lanczos3)",
                other
            ))),
        }
    }
}

#[inline]
fn nearest_weight(x: f32) -> f32 {
    if x.abs() < 0.5 { 1.0 } else { 0.0 }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Mitchell-Netravali family; B=0, C=0.5 is Catmull-Rom.
#[inline]
fn bc_cubic_weight(b: f32, c: f32, x: f32) -> f32 {
    let ax = x.abs();
    let k = if ax < 1.0 {
        (12.0 - 9.0 * b - 6.0 * c) * ax * ax * ax
            + (-18.0 + 12.0 * b + 6.0 * c) * ax * ax
            + (6.0 - 2.0 * b)
    } else if ax < 2.0 {
        (-b - 6.0 * c) * ax * ax * ax
            + (6.0 * b + 30.0 * c) * ax * ax
            + (-12.0 * b - 48.0 * c) * ax
            + (8.0 * b + 24.0 * c)
    } else {
        0.0
    };
    k / 6.0
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Normalized weights contributing to one output sample.
#[derive(Debug)]
struct Coeffs {
    left: usize,
    weights: Vec<f32>,
}

/// Computes the contributing source range and weights for every output
/// position along one axis.
fn coefficients(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Coeffs> {
    let ratio = src_len as f32 / dst_len as f32;
    // Widen the kernel when downsampling
    let filter_scale = ratio.max(1.0);
    let support = filter.support() * filter_scale;
    let last = src_len as isize - 1;

    (0..dst_len)
        .map(|x| {
            let center = (x as f32 + 0.5) * ratio - 0.5;
            let left = ((center - support).floor() as isize).clamp(0, last) as usize;
            let right = ((center + support).ceil() as isize).clamp(0, last) as usize;

            let mut weights: Vec<f32> = (left..=right)
                .map(|i| filter.weight((i as f32 - center) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();

            if sum.abs() > f32::EPSILON {
                weights.iter_mut().for_each(|w| *w /= sum);
            } else {
                // Center sits exactly between taps; take the nearest one.
                weights.iter_mut().for_each(|w| *w = 0.0);
                let nearest = (center.round() as isize).clamp(left as isize, right as isize) as usize;
                weights[nearest - left] = 1.0;
            }

            Coeffs { left, weights }
        })
        .collect()
}

/// Resizes interleaved f32 image data.
///
/// # Arguments
///
/// * `src` - Source samples, row-major, `channels` per pixel
/// * `src_w` / `src_h` - Source size
/// * `channels` - Samples per pixel
/// * `dst_w` / `dst_h` - Destination size
/// * `filter` - Resampling filter
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<f32>> {
    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidDimensions("source size must be > 0".into()));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, filter);
    Ok(resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter))
}

/// Horizontal pass: `src_w x src_h` to `dst_w x src_h`.
fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let coeffs = coefficients(src_w, dst_w, filter);
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    for y in 0..src_h {
        let row = &src[y * src_w * channels..(y + 1) * src_w * channels];
        let out = &mut dst[y * dst_w * channels..(y + 1) * dst_w * channels];
        for (x, line) in coeffs.iter().enumerate() {
            let px = &mut out[x * channels..(x + 1) * channels];
            for (i, &w) in line.weights.iter().enumerate() {
                let base = (line.left + i) * channels;
                for c in 0..channels {
                    px[c] += row[base + c] * w;
                }
            }
        }
    }

    dst
}

/// Vertical pass: `width x src_h` to `width x dst_h`.
fn resize_vertical(
    src: &[f32],
    width: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let coeffs = coefficients(src_h, dst_h, filter);
    let stride = width * channels;
    let mut dst = vec![0.0f32; stride * dst_h];

    for (y, line) in coeffs.iter().enumerate() {
        let out = &mut dst[y * stride..(y + 1) * stride];
        for (i, &w) in line.weights.iter().enumerate() {
            let row = &src[(line.left + i) * stride..(line.left + i + 1) * stride];
            for (o, &s) in out.iter_mut().zip(row) {
                *o += s * w;
            }
        }
    }

    dst
}

/// Resizes a decoded image to exactly `dst_w x dst_h`.
///
/// Channel count and sample format are preserved. Resizing to the current
/// size returns an identical copy without resampling.
pub fn resize(image: &ImageData, dst_w: u32, dst_h: u32, filter: Filter) -> OpsResult<ImageData> {
    if (image.width, image.height) == (dst_w, dst_h) {
        return Ok(image.clone());
    }

    let resized = resize_f32(
        &image.to_f32(),
        image.width as usize,
        image.height as usize,
        image.channels as usize,
        dst_w as usize,
        dst_h as usize,
        filter,
    )?;

    Ok(ImageData::from_f32(dst_w, dst_h, image.channels, image.format(), &resized))
}
