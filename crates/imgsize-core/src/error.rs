//! Validation error types.
//!
//! Every [`ValidationError`] names exactly one violated rule. The validator
//! checks rules in a fixed order and stops at the first failure, so a request
//! with several problems always reports the same one.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for request validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A request rule that was not satisfied.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No source image path was given, or it was empty.
    #[error("no source image given")]
    MissingImage,

    /// The source path does not exist.
    #[error("image file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The source path exists but is not a regular file.
    #[error("not an image file: {} is a directory", .0.display())]
    InvalidTarget(PathBuf),

    /// The source extension is not in the accepted set.
    #[error("unsupported image format: {0:?} (accepted: {1})")]
    UnsupportedFormat(String, String),

    /// None of width, height or scale was given.
    #[error("specify at least one of --width, --height or --scale")]
    NoDimensionGiven,

    /// Scale was combined with width and/or height.
    #[error("use either width and height or scale, not both")]
    IncompatibleOptions,

    /// A numeric option was zero or negative.
    #[error("{name} must be a positive number, got {value}")]
    NonPositiveValue {
        /// Option name (`width`, `height` or `scale`).
        name: &'static str,
        /// Value as given.
        value: f64,
    },

    /// A numeric option was above the configured bound, or not finite.
    #[error("{name} should not be more than {max}, got {value}")]
    OutOfRange {
        /// Option name (`width`, `height` or `scale`).
        name: &'static str,
        /// Value as given.
        value: f64,
        /// Configured upper bound.
        max: f64,
    },
}

impl ValidationError {
    /// Short stable identifier of the violated rule.
    ///
    /// Useful in log fields and tests, where the display text is too verbose.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingImage => "MissingImage",
            Self::FileNotFound(_) => "FileNotFound",
            Self::InvalidTarget(_) => "InvalidTarget",
            Self::UnsupportedFormat(..) => "UnsupportedFormat",
            Self::NoDimensionGiven => "NoDimensionGiven",
            Self::IncompatibleOptions => "IncompatibleOptions",
            Self::NonPositiveValue { .. } => "NonPositiveValue",
            Self::OutOfRange { .. } => "OutOfRange",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_single_line() {
        let errors = [
            ValidationError::MissingImage,
            ValidationError::FileNotFound(PathBuf::from("missing.png")),
            ValidationError::InvalidTarget(PathBuf::from("dir")),
            ValidationError::UnsupportedFormat("gif".into(), "png, jpg".into()),
            ValidationError::NoDimensionGiven,
            ValidationError::IncompatibleOptions,
            ValidationError::NonPositiveValue { name: "width", value: -3.0 },
            ValidationError::OutOfRange { name: "scale", value: 20000.0, max: 10000.0 },
        ];
        for err in errors {
            assert!(!err.to_string().contains('\n'), "{}", err.kind());
        }
    }

    #[test]
    fn test_display_includes_values() {
        let err = ValidationError::OutOfRange { name: "width", value: 10001.0, max: 10000.0 };
        assert_eq!(err.to_string(), "width should not be more than 10000, got 10001");

        let err = ValidationError::FileNotFound(PathBuf::from("a/b.png"));
        assert!(err.to_string().contains("b.png"));
    }
}
