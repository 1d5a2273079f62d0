//! Lint stage: check every artifact under the compiled-output root and map
//! findings back to their templates.

use crate::core::{ErrorRecord, Report, SourceMap};
use crate::errors::CheckError;
use crate::io;
use crate::linter::Linter;
use crate::observability::{set_current_file, set_phase, CheckPhase};
use std::path::Path;

/// Lint everything present under `compiled_root`, not only this run's output.
///
/// Findings on files that are not in `source_map` (leftovers from earlier
/// runs, files placed there by hand) are still reported, with no source.
pub fn lint_compiled<L>(
    compiled_root: &Path,
    linter: &L,
    source_map: &SourceMap,
) -> Result<Report, CheckError>
where
    L: Linter + ?Sized,
{
    let _phase = set_phase(CheckPhase::Lint);

    let files = linter.files(compiled_root)?;
    log::info!("Linting {} compiled file(s)", files.len());
    let findings = linter.lint(&files)?;

    let mut report = Report::new();
    for finding in findings {
        let _file = set_current_file(&finding.file);
        let source = source_map.resolve(&finding.file).cloned();
        if source.is_none() {
            log::debug!("{} was not compiled by this run", finding.file.display());
        }
        let content = io::read_file(&finding.file)?;
        report.push(ErrorRecord::lint(
            finding.file,
            finding.error,
            finding.line.max(1),
            source,
            content,
        ));
    }

    Ok(report)
}
