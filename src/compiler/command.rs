use super::{CompileError, CompileFailure, TemplateCompiler};
use crate::io;
use crate::tool::{ErrorPattern, ToolCommand};
use std::path::Path;

/// Compiler backed by an external program.
///
/// The program receives the template path through the `{file}` placeholder
/// and prints the generated code on stdout. A non-zero exit status is a
/// compile failure; its location is extracted from the diagnostics with
/// `error_pattern`. A reported file that does not exist is replaced by the
/// template being compiled.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    command: ToolCommand,
    error_pattern: ErrorPattern,
}

impl CommandCompiler {
    pub fn new(command: ToolCommand, error_pattern: ErrorPattern) -> Self {
        Self {
            command,
            error_pattern,
        }
    }
}

impl TemplateCompiler for CommandCompiler {
    fn compile(&self, path: &Path) -> Result<String, CompileFailure> {
        let output = self.command.run(path)?;
        if output.success {
            return Ok(output.stdout);
        }

        let diagnostics = output.diagnostics();
        let error = match self.error_pattern.find(&diagnostics) {
            Some(found) => CompileError::new(
                found.message,
                found
                    .file
                    .filter(|file| io::file_exists(file))
                    .unwrap_or_else(|| path.to_path_buf()),
                found.line.unwrap_or(1).max(1),
            ),
            None => {
                let message = match diagnostics.trim() {
                    "" => format!("{} exited with {}", self.command.program, output.status),
                    text => text.to_string(),
                };
                CompileError::new(message, path, 1)
            }
        };

        Err(error.into())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bootstrap::DEFAULT_COMPILER_ERROR_PATTERN;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn sh(script: &str) -> ToolCommand {
        ToolCommand::new(
            "sh",
            vec!["-c".into(), script.into(), "sh".into(), "{file}".into()],
        )
    }

    fn pattern() -> ErrorPattern {
        ErrorPattern::new(r"(?P<message>.+?) on line (?P<line>\d+)").unwrap()
    }

    #[test]
    fn test_successful_compile_returns_stdout() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("ok.latte");
        fs::write(&template, "<p>{$name}</p>\n").unwrap();

        let compiler = CommandCompiler::new(sh(r#"cat "$1""#), pattern());
        assert_eq!(compiler.compile(&template).unwrap(), "<p>{$name}</p>\n");
    }

    #[test]
    fn test_failure_is_located_with_pattern() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("bad.latte");
        fs::write(&template, "x").unwrap();

        let compiler = CommandCompiler::new(
            sh(r#"echo "Unknown tag {foo} on line 4" >&2; exit 1"#),
            pattern(),
        );
        match compiler.compile(&template) {
            Err(CompileFailure::Template(err)) => {
                assert_eq!(err, CompileError::new("Unknown tag {foo}", &template, 4));
            }
            other => panic!("expected template failure, got {:?}", other),
        }
    }

    #[test]
    fn test_default_pattern_handles_spaces_in_template_path() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("my templates");
        fs::create_dir_all(&dir).unwrap();
        let template = dir.join("bad.latte");
        fs::write(&template, "x").unwrap();

        let compiler = CommandCompiler::new(
            sh(r#"echo "Unexpected '{/if}' in $1 on line 3" >&2; exit 1"#),
            ErrorPattern::new(DEFAULT_COMPILER_ERROR_PATTERN).unwrap(),
        );
        match compiler.compile(&template) {
            Err(CompileFailure::Template(err)) => {
                assert_eq!(err, CompileError::new("Unexpected '{/if}'", &template, 3));
            }
            other => panic!("expected template failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_reported_file_falls_back_to_template() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("bad.latte");
        fs::write(&template, "x").unwrap();

        let compiler = CommandCompiler::new(
            sh(r#"echo "Unknown macro in layout.latte on line 7" >&2; exit 1"#),
            ErrorPattern::new(DEFAULT_COMPILER_ERROR_PATTERN).unwrap(),
        );
        match compiler.compile(&template) {
            Err(CompileFailure::Template(err)) => {
                assert_eq!(err.source_file, template);
                assert_eq!(err.source_line, 7);
                assert_eq!(err.message, "Unknown macro");
            }
            other => panic!("expected template failure, got {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_failure_defaults_to_first_line() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("bad.latte");
        fs::write(&template, "x").unwrap();

        let compiler = CommandCompiler::new(sh("exit 3"), pattern());
        match compiler.compile(&template) {
            Err(CompileFailure::Template(err)) => {
                assert_eq!(err.source_line, 1);
                assert_eq!(err.source_file, template);
                assert!(err.message.starts_with("sh exited with"));
            }
            other => panic!("expected template failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_is_fatal() {
        let compiler = CommandCompiler::new(
            ToolCommand::new("definitely-not-a-real-compiler", vec!["{file}".into()]),
            pattern(),
        );
        assert!(matches!(
            compiler.compile(Path::new("/tmp/x.latte")),
            Err(CompileFailure::Fatal(_))
        ));
    }
}
