//! Core data model shared by every pipeline stage.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical absolute path to an original template file.
pub type SourceFile = PathBuf;

/// Canonical absolute path to a generated artifact under the compiled-output root.
pub type CompiledFile = PathBuf;

/// Run-scoped lookup from compiled artifact back to the template it was generated from.
///
/// Populated by the compile stage, read by the lint stage. Every key refers
/// to a file that has already been written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    entries: HashMap<CompiledFile, SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, compiled: CompiledFile, source: SourceFile) {
        self.entries.insert(compiled, source);
    }

    /// Look up the template a compiled artifact was produced from.
    ///
    /// The path is canonicalized first so relative or symlinked spellings of
    /// the same artifact resolve to the same entry. `None` means the artifact
    /// was not produced by this run.
    pub fn resolve(&self, compiled: &Path) -> Option<&SourceFile> {
        match compiled.canonicalize() {
            Ok(canonical) => self.entries.get(&canonical),
            Err(_) => self.entries.get(compiled),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which stage produced an error record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A template failed to compile
    Compile,
    /// A compiled artifact failed the syntax check
    Lint,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile => write!(f, "compile"),
            Self::Lint => write!(f, "lint"),
        }
    }
}

/// Unified representation of a compile-time or lint-time defect.
///
/// `content` is the full text of `file` as it was when the record was built,
/// so the reporter can render an excerpt without touching the disk again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub file: PathBuf,
    pub error: String,
    pub source: Option<PathBuf>,
    #[serde(skip)]
    pub content: String,
    pub line: usize,
}

impl ErrorRecord {
    /// Record for a template that failed to compile; the source is the file itself.
    pub fn compile(
        file: impl Into<PathBuf>,
        error: impl Into<String>,
        line: usize,
        content: String,
    ) -> Self {
        let file = file.into();
        Self {
            kind: ErrorKind::Compile,
            source: Some(file.clone()),
            file,
            error: error.into(),
            content,
            line,
        }
    }

    /// Record for a lint finding on a compiled artifact.
    pub fn lint(
        file: impl Into<PathBuf>,
        error: impl Into<String>,
        line: usize,
        source: Option<PathBuf>,
        content: String,
    ) -> Self {
        Self {
            kind: ErrorKind::Lint,
            file: file.into(),
            error: error.into(),
            source,
            content,
            line,
        }
    }

    /// True when the record points at a generated file whose origin differs
    /// from the file itself (or could not be resolved at all).
    pub fn has_distinct_source(&self) -> bool {
        self.source.as_deref() != Some(self.file.as_path())
    }
}

/// Ordered error list: compile errors in discovery order, then lint errors
/// in the order the linter reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub errors: Vec<ErrorRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ErrorRecord) {
        self.errors.push(record);
    }

    /// Append all records of `other`, keeping their order after the existing ones.
    pub fn extend(&mut self, other: Report) {
        self.errors.extend(other.errors);
    }

    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn count_by_kind(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compile_record_uses_file_as_source() {
        let record = ErrorRecord::compile("/app/bad.latte", "Unknown tag {foo}", 4, String::new());
        assert_eq!(record.source, Some(PathBuf::from("/app/bad.latte")));
        assert!(!record.has_distinct_source());
    }

    #[test]
    fn test_lint_record_with_unresolved_source_is_distinct() {
        let record = ErrorRecord::lint("/tmp/c/x.php", "syntax error", 2, None, String::new());
        assert!(record.has_distinct_source());
    }

    #[test]
    fn test_source_map_resolves_canonical_and_relative_spellings() {
        let temp = TempDir::new().unwrap();
        let compiled = temp.path().join("out").join("x.php");
        fs::create_dir_all(compiled.parent().unwrap()).unwrap();
        fs::write(&compiled, "<?php").unwrap();
        let canonical = compiled.canonicalize().unwrap();

        let mut map = SourceMap::new();
        map.insert(canonical.clone(), PathBuf::from("/src/x.latte"));

        let dotted = temp.path().join("out").join(".").join("x.php");
        assert_eq!(map.resolve(&canonical), Some(&PathBuf::from("/src/x.latte")));
        assert_eq!(map.resolve(&dotted), Some(&PathBuf::from("/src/x.latte")));
        assert_eq!(map.resolve(&temp.path().join("stray.php")), None);
    }

    #[test]
    fn test_report_keeps_insertion_order_across_extend() {
        let mut report = Report::new();
        report.push(ErrorRecord::compile("/a.latte", "first", 1, String::new()));
        let mut lint = Report::new();
        lint.push(ErrorRecord::lint("/c/a.php", "second", 1, None, String::new()));
        report.extend(lint);

        let messages: Vec<&str> = report.iter().map(|e| e.error.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(report.count(), 2);
        assert_eq!(report.count_by_kind(ErrorKind::Compile), 1);
        assert_eq!(report.count_by_kind(ErrorKind::Lint), 1);
    }
}
