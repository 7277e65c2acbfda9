//! Error types for walk operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while inspecting or walking.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// A path could not be stat'ed.
    #[error("Could not stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed.
    #[error("Could not list directory {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walk root is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The ignore pattern is not a valid regular expression.
    #[error("Invalid ignore pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl WalkError {
    /// Create a stat error with path context.
    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Stat { path, source },
        }
    }

    /// Create a listing error with path context.
    pub fn list(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::List {
            path: path.into(),
            source,
        }
    }
}

/// Kind of walk warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// An entry could not be stat'ed mid-walk.
    Stat,
    /// A directory could not be listed mid-walk.
    List,
}

/// Non-fatal condition recorded during a walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkWarning {
    /// Path where the condition occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl WalkWarning {
    /// Create a new walk warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a stat warning from an I/O error.
    pub fn stat(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Stat failed: {error}"), WarningKind::Stat)
    }

    /// Create a listing warning from an I/O error.
    pub fn list(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Listing failed: {error}"), WarningKind::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_error_maps_kind() {
        let err = WalkError::stat(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, WalkError::PermissionDenied { .. }));

        let err = WalkError::stat(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, WalkError::NotFound { .. }));

        let err = WalkError::stat(
            "/test/path",
            std::io::Error::other("weird"),
        );
        assert!(matches!(err, WalkError::Stat { .. }));
    }

    #[test]
    fn test_warning_constructors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let warning = WalkWarning::stat("/test/path", &io);
        assert_eq!(warning.kind, WarningKind::Stat);
        assert!(warning.message.contains("Stat failed"));

        let warning = WalkWarning::list("/test/dir", &io);
        assert_eq!(warning.kind, WarningKind::List);
    }
}
