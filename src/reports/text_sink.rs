use std::io::Write;

use chrono::NaiveDateTime;

use super::section::{Highlight, ReportSection};
use super::sink::{generated_line, ReportSink};
use super::table::{Alignment, Table, TableColumn};
use crate::currency::{format_date, format_percent, AmountFormatter};
use crate::errors::SinkError;

const FORM_FEED: char = '\u{000C}';

/// Word-processor style document: one heading and table per user, pages
/// separated by form feeds.
pub struct TextDocumentSink<W: Write> {
    writer: W,
    formatter: AmountFormatter,
}

impl<W: Write> TextDocumentSink<W> {
    pub fn new(writer: W, formatter: AmountFormatter) -> Self {
        Self { writer, formatter }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn highlight_line(&self, highlight: &Highlight) -> String {
        format!(
            "{}: {} - {} (date: {})",
            highlight.kind,
            highlight.name,
            self.formatter.money_cents(highlight.amount),
            format_date(highlight.date)
        )
    }
}

impl<W: Write> ReportSink for TextDocumentSink<W> {
    fn begin(&mut self, title: &str, generated_at: NaiveDateTime) -> Result<(), SinkError> {
        writeln!(self.writer, "{title}")?;
        writeln!(self.writer, "{}", generated_line(generated_at))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_section(&mut self, section: &ReportSection) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", section.title)?;
        writeln!(self.writer)?;

        let mut table = Table::new(vec![
            TableColumn::new("Category", Alignment::Left).max_width(40),
            TableColumn::new("Amount", Alignment::Right),
            TableColumn::new("Share", Alignment::Right),
        ]);
        for row in &section.rows {
            table.push_row(vec![
                row.category.clone(),
                self.formatter.money_cents(row.amount),
                format_percent(row.percent),
            ]);
        }
        writeln!(self.writer, "{}", table.render())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Total: {}",
            self.formatter.money_cents(section.total)
        )?;

        for highlight in &section.highlights {
            let line = self.highlight_line(highlight);
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }

    fn section_break(&mut self) -> Result<(), SinkError> {
        writeln!(self.writer, "{FORM_FEED}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
