//! Configurable validation limits.

use std::path::Path;

/// Default upper bound for width, height and scale.
pub const DEFAULT_MAX_VALUE: f64 = 10000.0;

/// Source extensions accepted by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Bounds applied by [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct Limits {
    /// Inclusive upper bound for every numeric option.
    pub max_value: f64,
    /// Accepted source extensions, lowercase and without the dot.
    /// `None` accepts any extension.
    pub allowed_extensions: Option<Vec<String>>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            allowed_extensions: Some(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()),
        }
    }
}

impl Limits {
    /// Limits with no extension whitelist.
    pub fn any_format() -> Self {
        Self {
            allowed_extensions: None,
            ..Self::default()
        }
    }

    /// Sets the numeric upper bound.
    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = max_value;
        self
    }

    /// Replaces the accepted extensions.
    ///
    /// Leading dots are stripped and case is folded, so `".PNG"` and `"png"`
    /// are the same entry.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self.allowed_extensions = Some(list);
        self
    }

    /// Returns true if the path's extension passes the whitelist.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        let Some(allowed) = &self.allowed_extensions else {
            return true;
        };
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext {
            Some(ext) => allowed.iter().any(|a| *a == ext),
            None => false,
        }
    }

    /// Human-readable list of accepted extensions.
    pub fn describe_extensions(&self) -> String {
        match &self.allowed_extensions {
            Some(list) if !list.is_empty() => list.join(", "),
            Some(_) => "none".to_string(),
            None => "any".to_string(),
        }
    }
}
