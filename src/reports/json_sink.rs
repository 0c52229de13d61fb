use std::io::Write;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::section::ReportSection;
use super::sink::ReportSink;
use crate::errors::SinkError;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    generated_at: Option<NaiveDateTime>,
    currency: &'a str,
    sections: &'a [ReportSection],
}

/// Buffers every section and writes a single pretty-printed document on
/// `finish`.
pub struct JsonSink<W: Write> {
    writer: W,
    currency: String,
    title: String,
    generated_at: Option<NaiveDateTime>,
    sections: Vec<ReportSection>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W, currency: impl Into<String>) -> Self {
        Self {
            writer,
            currency: currency.into(),
            title: String::new(),
            generated_at: None,
            sections: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn begin(&mut self, title: &str, generated_at: NaiveDateTime) -> Result<(), SinkError> {
        self.title = title.to_string();
        self.generated_at = Some(generated_at);
        self.sections.clear();
        Ok(())
    }

    fn write_section(&mut self, section: &ReportSection) -> Result<(), SinkError> {
        self.sections.push(section.clone());
        Ok(())
    }

    fn section_break(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        let report = JsonReport {
            title: &self.title,
            generated_at: self.generated_at,
            currency: &self.currency,
            sections: &self.sections,
        };
        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn abort(&mut self) {
        self.sections.clear();
    }
}
