use crate::bootstrap::{Bootstrap, CompilerFactory};
use crate::core::ErrorKind;
use crate::formatting::FormattingConfig;
use crate::observability::{set_phase, CheckPhase};
use crate::pipeline::{run_pipeline, PipelineOptions};
use crate::report::{create_writer, ReportFormat, Verbosity};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Largest exit status a shell reliably reports.
const MAX_EXIT_CODE: usize = 255;

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub dirs: Vec<PathBuf>,
    pub bootstrap: Option<PathBuf>,
    pub compiled_dir: PathBuf,
    pub format: ReportFormat,
    pub verbosity: Verbosity,
    pub formatting: FormattingConfig,
}

/// Run a check and print the report to stdout. Returns the error count.
pub fn run_check(config: &CheckConfig) -> Result<usize> {
    let stdout = std::io::stdout();
    run_check_to(config, stdout.lock())
}

/// Run a check, writing the report to `out`. Returns the error count.
pub fn run_check_to<W: Write>(config: &CheckConfig, out: W) -> Result<usize> {
    anyhow::ensure!(!config.dirs.is_empty(), "At least one directory is required");

    let bootstrap = Bootstrap::resolve(config.bootstrap.as_deref())
        .context("Failed to obtain a template compiler")?;
    let compiler = bootstrap.create_compiler();
    let linter = bootstrap.create_linter();
    let options = PipelineOptions {
        template_extension: bootstrap.template_extension().to_string(),
        target_extension: bootstrap.target_extension().to_string(),
        exclude: bootstrap.exclude_patterns().to_vec(),
    };

    let report = run_pipeline(
        &config.dirs,
        &config.compiled_dir,
        &compiler,
        &linter,
        &options,
    )
    .context("Check aborted")?;
    log::info!(
        "{} compile error(s), {} lint error(s)",
        report.count_by_kind(ErrorKind::Compile),
        report.count_by_kind(ErrorKind::Lint)
    );

    let _phase = set_phase(CheckPhase::Report);
    let mut writer = create_writer(config.format, out, config.verbosity, config.formatting);
    writer.write_report(&report)?;

    Ok(report.count())
}

/// Process exit status for an error count: zero iff there were no errors.
pub fn exit_code(count: usize) -> i32 {
    count.min(MAX_EXIT_CODE) as i32
}
