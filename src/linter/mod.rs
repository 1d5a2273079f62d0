//! Syntax linter capability for compiled artifacts.

pub mod command;

pub use command::CommandLinter;

use crate::errors::CheckError;
use std::path::{Path, PathBuf};

/// One syntax problem reported by a linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    pub file: PathBuf,
    pub line: usize,
    pub error: String,
}

impl LintFinding {
    pub fn new(file: impl Into<PathBuf>, line: usize, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            error: error.into(),
        }
    }
}

pub trait Linter {
    /// Every lintable file under `root`, in a stable order.
    fn files(&self, root: &Path) -> Result<Vec<PathBuf>, CheckError>;

    /// Check `files` in one batch, returning findings in report order.
    fn lint(&self, files: &[PathBuf]) -> Result<Vec<LintFinding>, CheckError>;
}

impl<T: Linter + ?Sized> Linter for Box<T> {
    fn files(&self, root: &Path) -> Result<Vec<PathBuf>, CheckError> {
        (**self).files(root)
    }

    fn lint(&self, files: &[PathBuf]) -> Result<Vec<LintFinding>, CheckError> {
        (**self).lint(files)
    }
}
