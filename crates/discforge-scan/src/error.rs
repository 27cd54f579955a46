//! Error types for discforge-scan.

/// Result type alias using [`ScanError`].
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors raised while turning scan output into a [`Disc`](crate::Disc).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// A required field could not be found in otherwise well-formed output.
    ///
    /// This usually means the HandBrakeCLI version produces a dialect this
    /// crate does not understand. `text` holds the raw node (or line) that
    /// was expected to carry the field.
    #[error("unrecognized scan output: no {field} in {text:?}")]
    UnrecognizedFormat { field: &'static str, text: String },
}

impl ScanError {
    /// Create an unrecognized format error.
    pub fn unrecognized(field: &'static str, text: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            field,
            text: text.into(),
        }
    }

    /// The raw text that failed to match.
    pub fn text(&self) -> &str {
        match self {
            Self::UnrecognizedFormat { text, .. } => text,
        }
    }
}
