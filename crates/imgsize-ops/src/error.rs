//! Error types for resize operations.

use imgsize_io::IoError;
use thiserror::Error;

/// Error type for resize operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The computed target size cannot be represented as an image.
    #[error("computed size {width}x{height} is not a valid image size")]
    DegenerateDimensions {
        /// Computed width, before conversion to pixels.
        width: f64,
        /// Computed height, before conversion to pixels.
        height: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Decode, encode or file error.
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Result type for resize operations.
pub type OpsResult<T> = Result<T, OpsError>;
