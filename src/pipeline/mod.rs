//! The check pipeline: discovery, compile, lint.
//!
//! Each stage runs to completion before the next starts and hands its
//! results on explicitly, so every stage can be exercised on its own.

pub mod compile;
pub mod discovery;
pub mod lint;

pub use compile::{compile_templates, CompileOutcome};
pub use discovery::{discover_templates, resolve_source_dirs, Discovery};
pub use lint::lint_compiled;

use crate::compiler::TemplateCompiler;
use crate::core::Report;
use crate::errors::CheckError;
use crate::io;
use crate::linter::Linter;
use std::path::{Path, PathBuf};

/// Settings that do not depend on which compiler or linter is used.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub template_extension: String,
    pub target_extension: String,
    pub exclude: Vec<String>,
}

/// Run discovery, compilation and linting, returning the merged report.
///
/// Compile errors come first in discovery order, followed by lint errors in
/// the order the linter reported them.
pub fn run_pipeline<C, L>(
    dirs: &[PathBuf],
    compiled_root: &Path,
    compiler: &C,
    linter: &L,
    options: &PipelineOptions,
) -> Result<Report, CheckError>
where
    C: TemplateCompiler + ?Sized,
    L: Linter + ?Sized,
{
    let discovery = discover_templates(dirs, &options.template_extension, &options.exclude)?;
    if !discovery.skipped.is_empty() {
        log::warn!(
            "Skipped {} of {} input path(s)",
            discovery.skipped.len(),
            dirs.len()
        );
    }

    io::ensure_dir(compiled_root)?;
    let compiled_root = io::canonicalize(compiled_root)?;

    let CompileOutcome {
        source_map,
        mut report,
        compiled,
    } = compile_templates(
        &compiled_root,
        &discovery.files,
        compiler,
        &options.target_extension,
    )?;

    log::info!(
        "Compiled {} of {} template(s) into {}",
        compiled.len(),
        discovery.files.len(),
        compiled_root.display()
    );

    report.extend(lint_compiled(&compiled_root, linter, &source_map)?);
    Ok(report)
}
