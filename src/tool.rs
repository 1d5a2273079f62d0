//! External program invocation shared by the command-backed compiler and linter.

use crate::errors::CheckError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Placeholder in argument lists that is replaced by the file being processed.
pub const FILE_PLACEHOLDER: &str = "{file}";

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap());

/// A program plus argument template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Argument list with every `{file}` placeholder substituted.
    pub fn args_for(&self, file: &Path) -> Vec<String> {
        let file = file.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, &file))
            .collect()
    }

    /// Run the program for one file and capture its output.
    pub fn run(&self, file: &Path) -> Result<ToolOutput, CheckError> {
        let args = self.args_for(file);
        log::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| CheckError::tool(&self.program, e))?;

        Ok(ToolOutput::from(output))
    }
}

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Stderr followed by stdout, colour codes removed; tools disagree on
    /// where diagnostics go.
    pub fn diagnostics(&self) -> String {
        let text = match (self.stderr.trim().is_empty(), self.stdout.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stderr, self.stdout),
            (false, true) => self.stderr.clone(),
            _ => self.stdout.clone(),
        };
        ANSI_ESCAPE.replace_all(&text, "").into_owned()
    }
}

impl From<Output> for ToolOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Location and message extracted from tool diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
}

/// Regex with named groups `message`, `line` and optionally `file`.
#[derive(Debug, Clone)]
pub struct ErrorPattern {
    regex: Regex,
}

impl ErrorPattern {
    /// Compile a pattern, checking that the required capture groups exist.
    pub fn new(pattern: &str) -> Result<Self, String> {
        let regex = Regex::new(pattern).map_err(|e| e.to_string())?;
        let names: Vec<&str> = regex.capture_names().flatten().collect();
        for required in ["message", "line"] {
            if !names.contains(&required) {
                return Err(format!("missing named group `{}`", required));
            }
        }
        Ok(Self { regex })
    }

    /// First match in `text`, if any.
    pub fn find(&self, text: &str) -> Option<Diagnostic> {
        let caps = self.regex.captures(text)?;
        Some(Diagnostic {
            message: caps
                .name("message")
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
            file: caps
                .name("file")
                .map(|m| PathBuf::from(m.as_str().trim())),
            line: caps.name("line").and_then(|m| m.as_str().parse().ok()),
        })
    }
}
