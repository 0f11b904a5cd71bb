//! Error types for envbuild-renderer.

use thiserror::Error;

/// All errors that can arise from rendering a template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A value holds characters that would break out of its double quotes.
    #[error("value for %{key}% contains {found}; refusing to insert it unescaped")]
    UnsafeValue { key: String, found: &'static str },

    /// The template references tokens with no matching parameter.
    #[error("unresolved template tokens: {}", .names.join(", "))]
    Unresolved { names: Vec<String> },
}
