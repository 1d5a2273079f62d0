use anyhow::Result;
use clap::Parser;
use tplcheck::cli::{Cli, Commands};
use tplcheck::commands::check::{exit_code, run_check, CheckConfig};
use tplcheck::formatting::{ColorMode, FormattingConfig};
use tplcheck::observability::install_panic_hook;
use tplcheck::report::Verbosity;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            dirs,
            bootstrap,
            compiled_dir,
            format,
            color,
            plain,
            verbosity,
        } => {
            let verbosity = Verbosity::from_occurrences(verbosity);
            init_logging(verbosity);

            let config = CheckConfig {
                dirs,
                bootstrap,
                compiled_dir,
                format,
                verbosity,
                formatting: create_formatting_config(color, plain),
            };
            let count = run_check(&config)?;
            std::process::exit(exit_code(count));
        }
        Commands::Init { path, force } => {
            init_logging(Verbosity::Normal);
            tplcheck::commands::init::init_bootstrap(&path, force)
        }
    }
}

// RUST_LOG, when set, wins over the -v derived level
fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .format_timestamp(None)
    .init();
}

// Pure function to create formatting configuration
fn create_formatting_config(color: Option<ColorMode>, plain: bool) -> FormattingConfig {
    match (plain, color) {
        (true, _) => FormattingConfig::plain(),
        (false, Some(mode)) => FormattingConfig::new(mode),
        (false, None) => FormattingConfig::from_env(),
    }
}
