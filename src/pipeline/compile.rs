//! Compile stage: templates in, artifacts and compile errors out.

use crate::compiler::{compiled_path, CompileFailure, TemplateCompiler};
use crate::core::{CompiledFile, ErrorRecord, Report, SourceFile, SourceMap};
use crate::errors::CheckError;
use crate::io;
use crate::observability::{
    increment_processed, set_current_file, set_phase, set_progress, CheckPhase,
};
use std::path::Path;

/// Everything the compile stage hands to the lint stage.
#[derive(Debug, Clone, Default)]
pub struct CompileOutcome {
    pub source_map: SourceMap,
    /// Compile errors in discovery order
    pub report: Report,
    /// Artifacts written by this run
    pub compiled: Vec<CompiledFile>,
}

/// Compile every source into `compiled_root`.
///
/// A template that fails to compile becomes an [`ErrorRecord`] and leaves no
/// artifact behind; the remaining templates are still compiled. File system
/// failures abort the stage.
pub fn compile_templates<C>(
    compiled_root: &Path,
    sources: &[SourceFile],
    compiler: &C,
    target_extension: &str,
) -> Result<CompileOutcome, CheckError>
where
    C: TemplateCompiler + ?Sized,
{
    let _phase = set_phase(CheckPhase::Compile);
    set_progress(0, sources.len());
    io::ensure_dir(compiled_root)?;

    let mut outcome = CompileOutcome::default();
    for source in sources {
        let _file = set_current_file(source);
        let target = compiled_path(compiled_root, source, target_extension);
        if let Some(parent) = target.parent() {
            io::ensure_dir(parent)?;
        }

        log::debug!("Compiling {} -> {}", source.display(), target.display());
        match compiler.compile(source) {
            Ok(code) => {
                io::write_file(&target, &code)?;
                let target = io::canonicalize(&target)?;
                outcome.source_map.insert(target.clone(), source.clone());
                outcome.compiled.push(target);
            }
            Err(CompileFailure::Template(err)) => {
                log::debug!("Compile error in {}: {}", source.display(), err);
                let content = io::read_file(&err.source_file)?;
                outcome.report.push(ErrorRecord::compile(
                    err.source_file,
                    err.message,
                    err.source_line.max(1),
                    content,
                ));
            }
            Err(CompileFailure::Fatal(err)) => return Err(err),
        }
        increment_processed();
    }

    Ok(outcome)
}
