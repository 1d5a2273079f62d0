use crate::bootstrap::DEFAULT_BOOTSTRAP_FILE;
use crate::formatting::ColorMode;
use crate::report::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tplcheck")]
#[command(
    about = "Compiles templates and checks the syntax of the generated code",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile all templates, then syntax-check every compiled file
    Check {
        /// Directories to search for templates
        #[arg(required = true, num_args = 1..)]
        dirs: Vec<PathBuf>,

        /// Bootstrap file describing the compiler and linter to use
        #[arg(short = 'b', long = "bootstrap", env = "TPLCHECK_BOOTSTRAP")]
        bootstrap: Option<PathBuf>,

        /// Directory for compiled files
        #[arg(short = 'c', long = "compiled-dir", default_value = "tmp/compiled")]
        compiled_dir: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: ReportFormat,

        /// When to color output
        #[arg(long, value_enum)]
        color: Option<ColorMode>,

        /// Plain output (no colors)
        #[arg(long)]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        /// -v: Show each error with its location and original source
        /// -vv: Also show a source excerpt around each error
        /// -vvv: Also enable debug logging
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a starter bootstrap file
    Init {
        /// Where to write the bootstrap file
        #[arg(default_value = DEFAULT_BOOTSTRAP_FILE)]
        path: PathBuf,

        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}
