//! Template discovery.
//!
//! Input directories that cannot be resolved are skipped with a warning
//! rather than aborting: a typo in one argument should not hide errors in
//! the others.

use crate::core::SourceFile;
use crate::errors::CheckError;
use crate::io::{self, FileWalker};
use crate::observability::{set_phase, CheckPhase};
use std::path::PathBuf;

/// Outcome of resolving the input directories and walking them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Canonical directories that were searched
    pub source_dirs: Vec<PathBuf>,
    /// Arguments that did not resolve to a directory
    pub skipped: Vec<PathBuf>,
    /// Templates found, sorted and unique
    pub files: Vec<SourceFile>,
}

/// Canonicalize every input directory, splitting usable from unusable ones.
pub fn resolve_source_dirs(dirs: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut resolved: Vec<PathBuf> = Vec::new();
    let mut skipped = Vec::new();

    for dir in dirs {
        match dir.canonicalize() {
            Ok(path) if io::dir_exists(&path) => {
                if !resolved.contains(&path) {
                    resolved.push(path);
                }
            }
            Ok(_) => {
                log::warn!("Skipping {}: not a directory", dir.display());
                skipped.push(dir.clone());
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", dir.display(), e);
                skipped.push(dir.clone());
            }
        }
    }

    (resolved, skipped)
}

/// Find every `*.<extension>` template below the given directories.
pub fn discover_templates(
    dirs: &[PathBuf],
    extension: &str,
    exclude: &[String],
) -> Result<Discovery, CheckError> {
    let _phase = set_phase(CheckPhase::Discovery);

    let (source_dirs, skipped) = resolve_source_dirs(dirs);
    let files = if source_dirs.is_empty() {
        Vec::new()
    } else {
        FileWalker::new(source_dirs.clone(), extension)
            .with_ignore_patterns(exclude)?
            .walk()?
    };

    log::info!(
        "Discovered {} template(s) in {} director{}",
        files.len(),
        source_dirs.len(),
        if source_dirs.len() == 1 { "y" } else { "ies" }
    );

    Ok(Discovery {
        source_dirs,
        skipped,
        files,
    })
}
