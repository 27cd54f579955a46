//! Error types for discforge-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving HandBrakeCLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HandBrakeCLI executable could not be found.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// HandBrakeCLI exited with a non-zero status.
    ///
    /// `output` holds the combined stdout and stderr of the run. Invalid
    /// switch names end up here too, since they are only rejected by the tool.
    #[error("HandBrakeCLI execution failed (status {status})")]
    ProcessFailed { status: i32, output: String },

    /// The output file already exists and the overwrite policy rejects it.
    #[error("target already exists: {}", path.display())]
    TargetExists { path: PathBuf },

    /// Scan output could not be interpreted.
    #[error(transparent)]
    Scan(#[from] discforge_scan::ScanError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse classification of an [`Error`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ToolNotFound,
    ProcessFailed,
    TargetExists,
    UnrecognizedFormat,
    Io,
    InvalidInput,
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a process failure error.
    pub fn process_failed(status: i32, output: impl Into<String>) -> Self {
        Self::ProcessFailed {
            status,
            output: output.into(),
        }
    }

    /// Create a target exists error.
    pub fn target_exists(path: impl Into<PathBuf>) -> Self {
        Self::TargetExists { path: path.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ToolNotFound { .. } => ErrorKind::ToolNotFound,
            Self::ProcessFailed { .. } => ErrorKind::ProcessFailed,
            Self::TargetExists { .. } => ErrorKind::TargetExists,
            Self::Scan(_) => ErrorKind::UnrecognizedFormat,
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Captured tool output, for failures that have one.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::ProcessFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discforge_scan::ScanError;

    #[test]
    fn test_kind() {
        assert_eq!(
            Error::tool_not_found("HandBrakeCLI").kind(),
            ErrorKind::ToolNotFound
        );
        assert_eq!(
            Error::process_failed(3, "boom").kind(),
            ErrorKind::ProcessFailed
        );
        assert_eq!(
            Error::target_exists("/tmp/a.mp4").kind(),
            ErrorKind::TargetExists
        );
        assert_eq!(
            Error::from(ScanError::unrecognized("title number", "x")).kind(),
            ErrorKind::UnrecognizedFormat
        );
        assert_eq!(
            Error::from(std::io::Error::other("disk")).kind(),
            ErrorKind::Io
        );
        assert_eq!(
            Error::InvalidInput("bad".into()).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_output_is_attached() {
        let err = Error::process_failed(1, "Invalid option --bogus");
        assert_eq!(err.output(), Some("Invalid option --bogus"));
        assert_eq!(err.to_string(), "HandBrakeCLI execution failed (status 1)");
        assert!(Error::target_exists("/x").output().is_none());
    }

    #[test]
    fn test_target_exists_display() {
        let err = Error::target_exists("/movies/a.mp4");
        assert_eq!(err.to_string(), "target already exists: /movies/a.mp4");
    }
}
