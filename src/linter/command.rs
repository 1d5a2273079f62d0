use super::{LintFinding, Linter};
use crate::errors::CheckError;
use crate::io::FileWalker;
use crate::tool::{ErrorPattern, ToolCommand};
use std::path::{Path, PathBuf};

/// Linter that runs an external syntax checker once per file.
///
/// A zero exit status means the file is clean. Otherwise a single finding is
/// built from the first `error_pattern` match in the checker's output. The
/// finding always names the file that was checked; a `file` group in the
/// pattern is ignored.
#[derive(Debug, Clone)]
pub struct CommandLinter {
    command: ToolCommand,
    error_pattern: ErrorPattern,
    extension: String,
}

impl CommandLinter {
    pub fn new(
        command: ToolCommand,
        error_pattern: ErrorPattern,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            command,
            error_pattern,
            extension: extension.into(),
        }
    }

    fn lint_file(&self, file: &Path) -> Result<Option<LintFinding>, CheckError> {
        let output = self.command.run(file)?;
        if output.success {
            return Ok(None);
        }

        let diagnostics = output.diagnostics();
        let finding = match self.error_pattern.find(&diagnostics) {
            Some(found) => LintFinding::new(file, found.line.unwrap_or(1).max(1), found.message),
            None => {
                let message = match diagnostics.trim() {
                    "" => format!("{} exited with {}", self.command.program, output.status),
                    text => text.to_string(),
                };
                LintFinding::new(file, 1, message)
            }
        };
        Ok(Some(finding))
    }
}

impl Linter for CommandLinter {
    fn files(&self, root: &Path) -> Result<Vec<PathBuf>, CheckError> {
        FileWalker::new(vec![root.to_path_buf()], self.extension.clone()).walk()
    }

    fn lint(&self, files: &[PathBuf]) -> Result<Vec<LintFinding>, CheckError> {
        let mut findings = Vec::new();
        for file in files {
            if let Some(finding) = self.lint_file(file)? {
                log::debug!("Lint error in {}: {}", file.display(), finding.error);
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
