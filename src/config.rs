//! Parse configuration.

use serde::{Deserialize, Serialize};

/// Default limit on nested expressions.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling a single parse.
///
/// # Examples
///
/// ```rust
/// use minimodelica::{parse_with, ParseOptions};
/// let options = ParseOptions::default().with_source_name("model.mo");
/// assert!(parse_with("x + 1", &options).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Name shown in diagnostics.
    pub source_name: String,
    /// Maximum nesting of expressions inside parentheses, subscripts,
    /// call arguments and conditional branches.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_name: "<input>".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
