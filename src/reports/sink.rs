use chrono::NaiveDateTime;

use super::section::ReportSection;
use crate::errors::SinkError;

/// Destination receiving an exported report, one section per user.
///
/// The exporter drives a sink through `begin`, `write_section` (with
/// `section_break` between sections) and `finish`. When any step fails the
/// exporter calls `abort` so the sink can release whatever it staged.
pub trait ReportSink {
    fn begin(&mut self, title: &str, generated_at: NaiveDateTime) -> Result<(), SinkError>;

    fn write_section(&mut self, section: &ReportSection) -> Result<(), SinkError>;

    fn section_break(&mut self) -> Result<(), SinkError>;

    fn finish(&mut self) -> Result<(), SinkError>;

    fn abort(&mut self) {}
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn begin(&mut self, title: &str, generated_at: NaiveDateTime) -> Result<(), SinkError> {
        (**self).begin(title, generated_at)
    }

    fn write_section(&mut self, section: &ReportSection) -> Result<(), SinkError> {
        (**self).write_section(section)
    }

    fn section_break(&mut self) -> Result<(), SinkError> {
        (**self).section_break()
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }

    fn abort(&mut self) {
        (**self).abort()
    }
}

/// Shared header line: `Generated: dd.mm.yyyy HH:MM`.
pub(crate) fn generated_line(generated_at: NaiveDateTime) -> String {
    format!("Generated: {}", generated_at.format("%d.%m.%Y %H:%M"))
}
