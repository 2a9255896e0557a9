//! # imgsize-core
//!
//! Request model and validation for the `imgsize` resizer.
//!
//! This crate has no codec dependencies. It describes *what* the user asked
//! for and decides whether that request is acceptable:
//!
//! - [`ResizeRequest`] - Source path, optional width/height/scale, optional output
//! - [`Limits`] - Upper bound for numeric values and the accepted source extensions
//! - [`validate`] - Ordered rule checks, first failure wins
//! - [`ValidationError`] - One variant per violated rule
//!
//! ## Crate Structure
//!
//! ```text
//! imgsize-core (this crate)
//!    ^
//!    |
//!    +-- imgsize-ops (dimension calculator, resize runner)
//!    +-- imgsize-cli (argument parser, entry point)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use imgsize_core::{validate, Limits, ResizeRequest};
//!
//! let request = ResizeRequest::new("photo.jpg").with_width(640);
//! let request = validate(request, &Limits::default())?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod limits;
pub mod request;
pub mod validate;

pub use error::{ValidationError, ValidationResult};
pub use limits::{Limits, DEFAULT_EXTENSIONS, DEFAULT_MAX_VALUE};
pub use request::{Mode, ResizeRequest};
pub use validate::validate;
