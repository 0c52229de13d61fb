//! Document export of per-user payment summaries.

pub mod csv_sink;
pub mod exporter;
pub mod file_sink;
pub mod json_sink;
pub mod section;
pub mod sink;
pub mod table;
pub mod text_sink;

use std::{fmt, io::Write, str::FromStr};

use crate::currency::AmountFormatter;
use crate::errors::ReportError;

pub use csv_sink::CsvWorkbookSink;
pub use exporter::{export, export_with, ExportOptions, DEFAULT_TITLE};
pub use file_sink::FileSink;
pub use json_sink::JsonSink;
pub use section::{build_sections, Highlight, HighlightKind, ReportRow, ReportSection};
pub use sink::ReportSink;
pub use text_sink::TextDocumentSink;

/// Document flavours a report can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Builds the matching sink over `writer`.
    pub fn open<W: Write + 'static>(
        self,
        writer: W,
        formatter: AmountFormatter,
    ) -> Box<dyn ReportSink> {
        match self {
            ExportFormat::Text => Box::new(TextDocumentSink::new(writer, formatter)),
            ExportFormat::Csv => Box::new(CsvWorkbookSink::new(writer, formatter)),
            ExportFormat::Json => Box::new(JsonSink::new(writer, formatter.currency())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" | "doc" | "word" => Ok(ExportFormat::Text),
            "csv" | "excel" | "xlsx" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ReportError::InvalidInput(format!(
                "unknown export format `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_aliases() {
        assert_eq!("TXT".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
