//! Resize command
//!
//! Validates the request, then hands it to the runner. Validation failures
//! are reported before any image is decoded.

use anyhow::{Context, Result};
use imgsize_core::{validate, Limits, ResizeRequest};
use imgsize_ops::{ResizeOptions, ResizeOutcome};
use tracing::debug;

pub fn run(request: ResizeRequest, limits: &Limits, options: &ResizeOptions) -> Result<ResizeOutcome> {
    let request = validate(request, limits)?;
    debug!(?request, "validated");

    let source = request.source.clone().unwrap_or_default();
    let outcome = imgsize_ops::run(&request, options)
        .with_context(|| format!("failed to resize {}", source.display()))?;

    Ok(outcome)
}
