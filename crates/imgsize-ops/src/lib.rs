//! # imgsize-ops
//!
//! Resize operations for the `imgsize` tool.
//!
//! # Modules
//!
//! - [`dimensions`] - Target size from a request and the source size
//! - [`resize`] - Separable resampling with selectable filters
//! - [`runner`] - Decode, resample, encode; output path resolution
//!
//! # Example
//!
//! ```rust,ignore
//! use imgsize_core::{validate, Limits, ResizeRequest};
//! use imgsize_ops::runner::{run, ResizeOptions};
//!
//! let request = validate(ResizeRequest::new("photo.jpg").with_width(640), &Limits::default())?;
//! let outcome = run(&request, &ResizeOptions::default())?;
//! println!("wrote {}", outcome.output.display());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod dimensions;
pub mod resize;
pub mod runner;

pub use dimensions::{calculate, target_size, TargetSize};
pub use error::{OpsError, OpsResult};
pub use resize::Filter;
pub use runner::{resolve_output_path, run, ResizeOptions, ResizeOutcome, DEFAULT_MAX_PIXELS};
