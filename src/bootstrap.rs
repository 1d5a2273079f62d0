//! Bootstrap file loading.
//!
//! A bootstrap file is a TOML document describing how to obtain a configured
//! compiler (and the linter run over its output). Without one, the defaults
//! below are used. Any problem with an explicitly requested bootstrap file is
//! fatal: the run cannot meaningfully continue with a half-configured
//! compiler.

use crate::compiler::{CommandCompiler, TemplateCompiler};
use crate::errors::CheckError;
use crate::linter::{CommandLinter, Linter};
use crate::tool::{ErrorPattern, ToolCommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File written by `tplcheck init` when no path is given.
pub const DEFAULT_BOOTSTRAP_FILE: &str = "tplcheck.toml";
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "latte";
pub const DEFAULT_TARGET_EXTENSION: &str = "php";
pub const DEFAULT_COMPILER_PROGRAM: &str = "latte-compile";
pub const DEFAULT_COMPILER_ERROR_PATTERN: &str =
    r"(?P<message>.+) in (?P<file>.+?) on line (?P<line>\d+)";
pub const DEFAULT_LINTER_PROGRAM: &str = "php";
pub const DEFAULT_LINTER_ERROR_PATTERN: &str =
    r"(?:Parse|Fatal) error:\s*(?P<message>.+) in .+ on line (?P<line>\d+)";

/// Root of the bootstrap file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub linter: LinterConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub program: String,
    pub args: Vec<String>,
    pub template_extension: String,
    pub target_extension: String,
    pub error_pattern: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_COMPILER_PROGRAM.to_string(),
            args: vec!["{file}".to_string()],
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            error_pattern: DEFAULT_COMPILER_ERROR_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LinterConfig {
    pub program: String,
    pub args: Vec<String>,
    pub error_pattern: String,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_LINTER_PROGRAM.to_string(),
            args: ["-l", "-d", "display_errors=1", "{file}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            error_pattern: DEFAULT_LINTER_ERROR_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Glob patterns excluded from template discovery
    pub exclude: Vec<String>,
}

/// Builds compilers from a validated configuration.
pub trait CompilerFactory {
    fn create_compiler(&self) -> Box<dyn TemplateCompiler>;
}

/// Validated bootstrap: everything needed to run a check.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    config: BootstrapConfig,
    compiler_pattern: ErrorPattern,
    linter_pattern: ErrorPattern,
}

impl Bootstrap {
    /// Load the bootstrap file if one is given, otherwise the defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, CheckError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::debug!("No bootstrap file given, using default compiler");
                Self::from_config(BootstrapConfig::default(), Path::new("<default>"))
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CheckError::io("Failed to read bootstrap file", path, e))?;
        let config = parse_bootstrap(&contents).map_err(|e| CheckError::bootstrap(path, e))?;
        log::debug!("Loaded bootstrap from {}", path.display());
        Self::from_config(config, path)
    }

    /// Validate a parsed configuration; `origin` names it in error messages.
    pub fn from_config(config: BootstrapConfig, origin: &Path) -> Result<Self, CheckError> {
        validate_config(&config).map_err(|e| CheckError::bootstrap(origin, e))?;

        let compiler_pattern = ErrorPattern::new(&config.compiler.error_pattern)
            .map_err(|e| CheckError::bootstrap(origin, format!("compiler.error_pattern: {}", e)))?;
        let linter_pattern = ErrorPattern::new(&config.linter.error_pattern)
            .map_err(|e| CheckError::bootstrap(origin, format!("linter.error_pattern: {}", e)))?;
        for pattern in &config.discovery.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                CheckError::bootstrap(origin, format!("discovery.exclude `{}`: {}", pattern, e))
            })?;
        }

        Ok(Self {
            config,
            compiler_pattern,
            linter_pattern,
        })
    }

    pub fn template_extension(&self) -> &str {
        &self.config.compiler.template_extension
    }

    pub fn target_extension(&self) -> &str {
        &self.config.compiler.target_extension
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.config.discovery.exclude
    }

    pub fn create_linter(&self) -> Box<dyn Linter> {
        let linter = &self.config.linter;
        Box::new(CommandLinter::new(
            ToolCommand::new(&linter.program, linter.args.clone()),
            self.linter_pattern.clone(),
            self.target_extension(),
        ))
    }
}

impl CompilerFactory for Bootstrap {
    fn create_compiler(&self) -> Box<dyn TemplateCompiler> {
        let compiler = &self.config.compiler;
        Box::new(CommandCompiler::new(
            ToolCommand::new(&compiler.program, compiler.args.clone()),
            self.compiler_pattern.clone(),
        ))
    }
}

pub fn parse_bootstrap(contents: &str) -> Result<BootstrapConfig, String> {
    toml::from_str::<BootstrapConfig>(contents).map_err(|e| format!("Failed to parse: {}", e))
}

fn validate_config(config: &BootstrapConfig) -> Result<(), String> {
    let checks = [
        (config.compiler.program.trim().is_empty(), "compiler.program must not be empty"),
        (config.linter.program.trim().is_empty(), "linter.program must not be empty"),
        (
            !is_valid_extension(&config.compiler.template_extension),
            "compiler.template_extension must be a bare extension such as `latte`",
        ),
        (
            !is_valid_extension(&config.compiler.target_extension),
            "compiler.target_extension must be a bare extension such as `php`",
        ),
        (
            config.compiler.template_extension == config.compiler.target_extension,
            "compiler.template_extension and compiler.target_extension must differ",
        ),
    ];

    match checks.iter().find(|(failed, _)| *failed) {
        Some((_, message)) => Err(message.to_string()),
        None => Ok(()),
    }
}

fn is_valid_extension(ext: &str) -> bool {
    !ext.is_empty() && !ext.contains(['.', '/', '\\'])
}
