use std::path::PathBuf;

use routegen_ir::HttpMethod;
use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors raised while building, rendering or merging generated files.
///
/// Every variant is fatal to the current run: nothing is written to disk
/// once one of these has been returned.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("duplicate route: {method} {path} is declared more than once")]
    DuplicateRoute { method: HttpMethod, path: String },

    #[error("invalid operation #{index}: {reason}")]
    InvalidDescriptor { index: usize, reason: String },

    #[error("failed to render template '{template}': {message}")]
    Render { template: String, message: String },

    #[error("insertion marker not found in '{}'", path.display())]
    MarkerNotFound { path: PathBuf },

    #[error("cannot merge '{}': {reason}", path.display())]
    MergeConflict { path: PathBuf, reason: String },

    #[error("failed to access '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn render(template: impl Into<String>, err: minijinja::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        GenerateError::Render {
            template: template.into(),
            message,
        }
    }

    pub(crate) fn conflict(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        GenerateError::MergeConflict {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Path of the file the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            GenerateError::MarkerNotFound { path }
            | GenerateError::MergeConflict { path, .. }
            | GenerateError::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}
