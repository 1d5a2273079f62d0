//! Error reporting.
//!
//! The summary line is always printed. Per-error details are disclosed
//! progressively: location and source at [`Verbosity::Verbose`], the source
//! excerpt from [`Verbosity::VeryVerbose`] on.

pub mod excerpt;
pub mod json;
pub mod terminal;

pub use excerpt::{excerpt_window, render_excerpt};
pub use json::JsonWriter;
pub use terminal::TerminalWriter;

use crate::core::Report;
use crate::errors::CheckError;
use crate::formatting::FormattingConfig;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Summary count only
    Normal,
    /// Adds message, location and original source per error
    Verbose,
    /// Adds a source excerpt per error
    VeryVerbose,
    /// Like `VeryVerbose`, plus debug logging
    Debug,
}

impl Verbosity {
    /// Map a `-v` occurrence count to a level.
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::VeryVerbose,
            _ => Self::Debug,
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self {
            Self::Normal | Self::Verbose => "warn",
            Self::VeryVerbose => "info",
            Self::Debug => "debug",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &Report) -> Result<(), CheckError>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: ReportFormat,
    writer: W,
    verbosity: Verbosity,
    formatting: FormattingConfig,
) -> Box<dyn ReportWriter + 'a> {
    match format {
        ReportFormat::Terminal => Box::new(TerminalWriter::new(writer, verbosity, formatting)),
        ReportFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels_are_ordered() {
        assert_eq!(Verbosity::from_occurrences(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_occurrences(2), Verbosity::VeryVerbose);
        assert_eq!(Verbosity::from_occurrences(9), Verbosity::Debug);
        assert!(Verbosity::Debug >= Verbosity::VeryVerbose);
        assert!(Verbosity::Verbose < Verbosity::VeryVerbose);
    }
}
