use crate::errors::CheckError;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Recursive file enumerator filtering by extension and exclude globs.
///
/// Results are canonical, sorted and de-duplicated: a symlinked file is
/// reported under its target, and overlapping roots never yield the same
/// file twice.
pub struct FileWalker {
    roots: Vec<PathBuf>,
    extension: String,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(roots: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            roots,
            extension: extension.into(),
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self, CheckError> {
        self.ignore_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>, CheckError> {
        let mut files = BTreeSet::new();

        for root in &self.roots {
            // Every file counts, including hidden and VCS-ignored ones
            let walker = WalkBuilder::new(root).standard_filters(false).build();

            for entry in walker {
                let entry = entry?;
                let path = entry.path();

                if path.is_file() && self.should_process(path) {
                    files.insert(super::canonicalize(path)?);
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    fn should_process(&self, path: &Path) -> bool {
        let matches_extension = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension);
        if !matches_extension {
            return false;
        }

        let path_str = path.to_string_lossy();
        !self.ignore_patterns.iter().any(|p| p.matches(&path_str))
    }
}
