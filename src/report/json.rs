use super::ReportWriter;
use crate::core::{ErrorRecord, Report};
use crate::errors::CheckError;
use serde::Serialize;
use std::io::Write;

/// Machine-readable report; file contents are left out.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    count: usize,
    errors: &'a [ErrorRecord],
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> Result<(), CheckError> {
        let json = serde_json::to_string_pretty(&JsonReport {
            count: report.count(),
            errors: &report.errors,
        })?;
        writeln!(self.writer, "{}", json).map_err(CheckError::Output)?;
        self.writer.flush().map_err(CheckError::Output)
    }
}
