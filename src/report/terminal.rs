use super::excerpt::render_excerpt;
use super::{ReportWriter, Verbosity};
use crate::core::{ErrorRecord, Report};
use crate::errors::CheckError;
use crate::formatting::{ColoredFormatter, FormattingConfig, OutputFormatter};
use std::io::Write;

/// Human-readable report.
pub struct TerminalWriter<W: Write> {
    writer: W,
    verbosity: Verbosity,
    formatter: ColoredFormatter,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, verbosity: Verbosity, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            verbosity,
            formatter: ColoredFormatter::new(formatting),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_summary(&mut self, count: usize) -> std::io::Result<()> {
        let summary = format!("Errors found: {}", count);
        let summary = if count == 0 {
            self.formatter.success(&summary)
        } else {
            self.formatter.error(&summary)
        };
        writeln!(self.writer, "{}", summary)?;
        writeln!(self.writer)
    }

    fn write_error(&mut self, record: &ErrorRecord) -> std::io::Result<()> {
        writeln!(self.writer, "{} {}", self.formatter.error("Error:"), record.error)?;
        writeln!(self.writer, "{}:{}", record.file.display(), record.line)?;
        if record.has_distinct_source() {
            let source = match &record.source {
                Some(source) => source.display().to_string(),
                None => self.formatter.dim("<unknown>"),
            };
            writeln!(self.writer, "Source: {}", source)?;
        }

        if self.verbosity >= Verbosity::VeryVerbose {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", self.formatter.header("Content:"))?;
            for row in render_excerpt(&record.content, record.line, &self.formatter) {
                writeln!(self.writer, "{}", row)?;
            }
        }

        writeln!(self.writer)
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> Result<(), CheckError> {
        self.write_summary(report.count())
            .map_err(CheckError::Output)?;

        if self.verbosity >= Verbosity::Verbose {
            for record in report.iter() {
                self.write_error(record).map_err(CheckError::Output)?;
            }
        }

        self.writer.flush().map_err(CheckError::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.push(ErrorRecord::compile(
            "/app/templates/bad.latte",
            "Unexpected tag {/if}",
            2,
            "<ul>\n{/if}\n</ul>\n".to_string(),
        ));
        report.push(ErrorRecord::lint(
            "/tmp/compiled/app/templates/ok.php",
            "syntax error, unexpected end of file",
            1,
            Some("/app/templates/ok.latte".into()),
            "<?php echo (\n".to_string(),
        ));
        report
    }

    fn render(report: &Report, verbosity: Verbosity) -> String {
        let mut writer = TerminalWriter::new(Vec::new(), verbosity, FormattingConfig::plain());
        writer.write_report(report).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_normal_verbosity_prints_only_summary() {
        assert_eq!(render(&sample_report(), Verbosity::Normal), "Errors found: 2\n\n");
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render(&Report::new(), Verbosity::Debug), "Errors found: 0\n\n");
    }

    #[test]
    fn test_verbose_adds_locations_and_mapped_source() {
        assert_eq!(
            render(&sample_report(), Verbosity::Verbose),
            indoc! {"
                Errors found: 2

                Error: Unexpected tag {/if}
                /app/templates/bad.latte:2

                Error: syntax error, unexpected end of file
                /tmp/compiled/app/templates/ok.php:1
                Source: /app/templates/ok.latte

            "}
        );
    }

    #[test]
    fn test_very_verbose_adds_marked_excerpt() {
        let output = render(&sample_report(), Verbosity::VeryVerbose);
        assert!(output.contains(indoc! {"
            Content:
            1: <ul>
            2: <error>{/if}</error>
            3: </ul>
        "}));
        assert!(output.contains("1: <error><?php echo (</error>\n"));
    }

    #[test]
    fn test_unresolved_source_is_labelled() {
        let mut report = Report::new();
        report.push(ErrorRecord::lint("/tmp/c/stray.php", "oops", 1, None, "x".into()));
        let output = render(&report, Verbosity::Verbose);
        assert!(output.contains("Source: <unknown>\n"));
    }
}
