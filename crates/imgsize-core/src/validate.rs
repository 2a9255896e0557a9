//! Request validation.
//!
//! Rules are checked in a fixed order and the first failure wins:
//!
//! 1. source path given and non-empty
//! 2. source path exists
//! 3. source path is not a directory
//! 4. source extension accepted (when a whitelist is configured)
//! 5. at least one of width/height/scale
//! 6. scale not combined with width/height
//! 7. numeric values positive and within the bound (width, height, scale)
//!
//! The only filesystem access is a single metadata lookup on the source path.

use crate::{Limits, ResizeRequest, ValidationError, ValidationResult};
use std::io;
use tracing::debug;

/// Validates a request against the given limits.
///
/// Returns the request unchanged on success.
///
/// # Example
///
/// ```rust,ignore
/// use imgsize_core::{validate, Limits, ResizeRequest};
///
/// let request = ResizeRequest::new("photo.jpg").with_scale(0.5);
/// let request = validate(request, &Limits::default())?;
/// ```
pub fn validate(request: ResizeRequest, limits: &Limits) -> ValidationResult<ResizeRequest> {
    let source = match &request.source {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => return Err(ValidationError::MissingImage),
    };

    match std::fs::metadata(source) {
        Ok(meta) if meta.is_dir() => {
            return Err(ValidationError::InvalidTarget(source.clone()));
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ValidationError::FileNotFound(source.clone()));
        }
        // Permission problems and the like surface again as decode errors.
        Err(e) => {
            debug!(path = %source.display(), error = %e, "source metadata unavailable");
        }
    }

    if !limits.accepts_extension(source) {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        return Err(ValidationError::UnsupportedFormat(ext, limits.describe_extensions()));
    }

    if request.width.is_none() && request.height.is_none() && request.scale.is_none() {
        return Err(ValidationError::NoDimensionGiven);
    }

    if request.scale.is_some() && (request.width.is_some() || request.height.is_some()) {
        return Err(ValidationError::IncompatibleOptions);
    }

    if let Some(width) = request.width {
        check_value("width", width as f64, limits)?;
    }
    if let Some(height) = request.height {
        check_value("height", height as f64, limits)?;
    }
    if let Some(scale) = request.scale {
        check_value("scale", scale, limits)?;
    }

    debug!(path = %source.display(), "request validated");
    Ok(request)
}

/// Positivity first, then the upper bound. NaN fails positivity.
fn check_value(name: &'static str, value: f64, limits: &Limits) -> ValidationResult<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { name, value });
    }
    if !value.is_finite() || value > limits.max_value {
        return Err(ValidationError::OutOfRange {
            name,
            value,
            max: limits.max_value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"not decoded during validation").unwrap();
        path
    }

    fn kind(result: ValidationResult<ResizeRequest>) -> &'static str {
        result.expect_err("expected a validation error").kind()
    }

    #[test]
    fn test_missing_image() {
        let limits = Limits::default();
        assert_eq!(kind(validate(ResizeRequest::default().with_width(10), &limits)), "MissingImage");
        assert_eq!(kind(validate(ResizeRequest::new("").with_width(10), &limits)), "MissingImage");
    }

    #[test]
    fn test_file_not_found() {
        let dir = TempDir::new().unwrap();
        let request = ResizeRequest::new(dir.path().join("nope.png")).with_width(10);
        assert_eq!(kind(validate(request, &Limits::default())), "FileNotFound");
    }

    #[test]
    fn test_directory_is_invalid_target() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("album.png");
        fs::create_dir(&sub).unwrap();
        let request = ResizeRequest::new(&sub).with_width(10);
        assert_eq!(kind(validate(request, &Limits::default())), "InvalidTarget");
    }

    #[test]
    fn test_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "anim.gif");
        let request = ResizeRequest::new(&path).with_width(10);
        assert_eq!(kind(validate(request.clone(), &Limits::default())), "UnsupportedFormat");

        // Whitelist disabled
        assert!(validate(request, &Limits::any_format()).is_ok());
    }

    #[test]
    fn test_no_dimension_given() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "a.png");
        assert_eq!(kind(validate(ResizeRequest::new(&path), &Limits::default())), "NoDimensionGiven");
    }

    #[test]
    fn test_incompatible_options() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "a.png");
        let limits = Limits::default();

        let request = ResizeRequest::new(&path).with_scale(2.0).with_width(100);
        assert_eq!(kind(validate(request, &limits)), "IncompatibleOptions");

        let request = ResizeRequest::new(&path).with_scale(2.0).with_height(100);
        assert_eq!(kind(validate(request, &limits)), "IncompatibleOptions");

        // Incompatibility is reported before the values are inspected
        let request = ResizeRequest::new(&path).with_scale(-2.0).with_width(0);
        assert_eq!(kind(validate(request, &limits)), "IncompatibleOptions");
    }

    #[test]
    fn test_non_positive_values() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "a.png");
        let limits = Limits::default();

        assert_eq!(kind(validate(ResizeRequest::new(&path).with_width(0), &limits)), "NonPositiveValue");
        assert_eq!(kind(validate(ResizeRequest::new(&path).with_height(-5), &limits)), "NonPositiveValue");
        assert_eq!(kind(validate(ResizeRequest::new(&path).with_scale(0.0), &limits)), "NonPositiveValue");
        assert_eq!(kind(validate(ResizeRequest::new(&path).with_scale(f64::NAN), &limits)), "NonPositiveValue");
    }

    #[test]
    fn test_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "a.png");
        let limits = Limits::default();

        assert_eq!(kind(validate(ResizeRequest::new(&path).with_width(10001), &limits)), "OutOfRange");
        assert_eq!(kind(validate(ResizeRequest::new(&path).with_scale(f64::INFINITY), &limits)), "OutOfRange");
        assert!(validate(ResizeRequest::new(&path).with_width(10000), &limits).is_ok());

        let tight = Limits::default().with_max_value(100.0);
        assert_eq!(kind(validate(ResizeRequest::new(&path).with_height(101), &tight)), "OutOfRange");
    }

    #[test]
    fn test_width_checked_before_height() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "a.png");
        let request = ResizeRequest::new(&path).with_width(20000).with_height(-1);
        match validate(request, &Limits::default()) {
            Err(ValidationError::OutOfRange { name, .. }) => assert_eq!(name, "width"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_valid_request_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "a.PNG");
        let request = ResizeRequest::new(&path).with_width(50).with_height(25).with_output("out.png");
        let validated = validate(request.clone(), &Limits::default()).unwrap();
        assert_eq!(validated, request);
    }
}
