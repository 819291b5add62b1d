use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, warn};

/// Error severity for display by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
}

/// Domain-specific errors for the catalog
#[derive(Error, Debug)]
pub enum StorybookError {
    #[error("Storage I/O failed for '{path}': {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize catalog data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid manifest '{path}': {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("Unknown page id {0}")]
    UnknownPage(u64),
}

impl StorybookError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Storage { .. } => ErrorSeverity::Warning,
            Self::Serialization(_) => ErrorSeverity::Warning,
            Self::Manifest { .. } => ErrorSeverity::Error,
            Self::UnknownPage(_) => ErrorSeverity::Info,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Storage { path, .. } => format!("Could not access {}", path.display()),
            Self::Serialization(e) => format!("Stored data is unreadable: {}", e),
            Self::Manifest { path, message } => {
                format!("Could not load previews from {}: {}", path.display(), message)
            }
            Self::UnknownPage(id) => format!("No page with id {}", id),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorybookError>;

/// Why a preview payload could not be adapted.
///
/// Never surfaces as a failure of the catalog build; the adapter turns it into
/// a diagnostic page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdaptError {
    #[error("instantiation failed: {0}")]
    Instantiation(String),

    #[error("missing field `{path}`")]
    MissingField { path: String },

    #[error("field `{path}` is a {found}, expected a {expected}")]
    FieldType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use storybook_catalog::error::ResultExt;
///
/// // Keep the in-memory history even if it could not be written out
/// storage.set(HISTORY_KEY, value).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_and_message() {
        let err = StorybookError::storage(
            "/tmp/x.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.user_message().contains("/tmp/x.json"));

        let err = StorybookError::Manifest {
            path: "previews.json".into(),
            message: "bad".into(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Error);

        let err = StorybookError::UnknownPage(42);
        assert_eq!(err.severity(), ErrorSeverity::Info);
        assert_eq!(err.user_message(), "No page with id 42");
    }

    #[test]
    fn test_result_ext_returns_value_or_none() {
        let ok: std::result::Result<u8, String> = Ok(3);
        assert_eq!(ok.warn_on_err(), Some(3));
        let err: std::result::Result<u8, String> = Err("bad".into());
        assert_eq!(err.log_err(), None);
    }

    #[test]
    fn test_adapt_error_display_names_path() {
        let err = AdaptError::FieldType {
            path: "preview.structure".into(),
            expected: "record",
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "field `preview.structure` is a string, expected a record"
        );
    }
}
