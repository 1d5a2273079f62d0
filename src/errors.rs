//! Fatal error type for tplcheck operations.
//!
//! Compile failures and lint findings are *not* errors in this sense: they
//! are expected outcomes of a check and are collected into a
//! [`Report`](crate::core::Report). A `CheckError` means the environment
//! itself is unusable, such as a broken bootstrap file or a missing tool
//! binary, and the run is aborted before any report is produced.
//!
//! # Example
//!
//! ```rust
//! use tplcheck::errors::CheckError;
//!
//! let err = CheckError::bootstrap("tplcheck.toml", "compiler.program must not be empty");
//! assert!(err.to_string().contains("tplcheck.toml"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Unrecoverable error that aborts a check run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// File system related errors
    #[error("I/O error: {message} ({})", .path.display())]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bootstrap file could not be loaded or does not yield a usable compiler
    #[error("Bootstrap error in {}: {message}", .path.display())]
    Bootstrap { path: PathBuf, message: String },

    /// External compiler or linter program could not be started
    #[error("Failed to run `{program}`")]
    Tool {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid exclude glob
    #[error(transparent)]
    Glob(#[from] glob::PatternError),

    /// Directory traversal errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),

    /// JSON report serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Writing the report failed
    #[error("Failed to write report")]
    Output(#[source] std::io::Error),
}

impl CheckError {
    /// Create an I/O error with path context.
    pub fn io(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a bootstrap error for the given file.
    pub fn bootstrap(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Bootstrap {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an error for a tool that could not be spawned.
    pub fn tool(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Tool {
            program: program.into(),
            source,
        }
    }

    /// Get the associated path, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::Bootstrap { path, .. } => Some(path),
            _ => None,
        }
    }
}
