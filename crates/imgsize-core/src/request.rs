//! The resize request.

use std::path::PathBuf;

/// What the user asked for, as parsed from the command line.
///
/// Numeric fields keep the sign and range they were given with; it is the
/// validator's job to reject zero, negative and oversized values so that
/// those failures carry a precise error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizeRequest {
    /// Source image path.
    pub source: Option<PathBuf>,
    /// Target width in pixels.
    pub width: Option<i64>,
    /// Target height in pixels.
    pub height: Option<i64>,
    /// Uniform scale factor.
    pub scale: Option<f64>,
    /// Explicit output path.
    pub output: Option<PathBuf>,
}

/// Which dimensions a request specifies.
///
/// Exactly one mode applies to a validated request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Both width and height; the aspect ratio may change.
    Exact {
        /// Target width.
        width: u32,
        /// Target height.
        height: u32,
    },
    /// Width only; height follows the source aspect ratio.
    Width(u32),
    /// Height only; width follows the source aspect ratio.
    Height(u32),
    /// Uniform scale factor.
    Scale(f64),
}

impl ResizeRequest {
    /// Creates a request for the given source with no dimensions set.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Sets the target width.
    pub fn with_width(mut self, width: i64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the target height.
    pub fn with_height(mut self, height: i64) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Returns the dispatch mode of this request.
    ///
    /// Returns `None` when no dimension is set, or when a width/height value
    /// does not fit `u32`. Both cases are rejected by
    /// [`validate`](crate::validate), so a validated request always has a mode.
    pub fn mode(&self) -> Option<Mode> {
        let width = self.width.map(u32::try_from);
        let height = self.height.map(u32::try_from);
        match (width, height, self.scale) {
            (Some(Ok(w)), Some(Ok(h)), _) => Some(Mode::Exact { width: w, height: h }),
            (Some(Ok(w)), None, _) => Some(Mode::Width(w)),
            (None, Some(Ok(h)), _) => Some(Mode::Height(h)),
            (None, None, Some(s)) => Some(Mode::Scale(s)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_dispatch() {
        let base = ResizeRequest::new("a.png");
        assert_eq!(base.clone().with_width(10).with_height(20).mode(), Some(Mode::Exact { width: 10, height: 20 }));
        assert_eq!(base.clone().with_width(10).mode(), Some(Mode::Width(10)));
        assert_eq!(base.clone().with_height(20).mode(), Some(Mode::Height(20)));
        assert_eq!(base.clone().with_scale(0.5).mode(), Some(Mode::Scale(0.5)));
        assert_eq!(base.mode(), None);
    }

    #[test]
    fn test_mode_rejects_negative() {
        assert_eq!(ResizeRequest::new("a.png").with_width(-1).mode(), None);
    }
}
