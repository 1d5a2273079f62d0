// Export modules for library usage
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod linter;
pub mod observability;
pub mod pipeline;
pub mod report;
pub mod tool;

// Re-export commonly used types
pub use crate::core::{CompiledFile, ErrorKind, ErrorRecord, Report, SourceFile, SourceMap};

pub use crate::compiler::{compiled_path, CompileError, CompileFailure, TemplateCompiler};

pub use crate::linter::{LintFinding, Linter};

pub use crate::errors::CheckError;

pub use crate::pipeline::{
    compile_templates, discover_templates, lint_compiled, run_pipeline, CompileOutcome,
    Discovery, PipelineOptions,
};

pub use crate::report::{ReportFormat, ReportWriter, Verbosity};
