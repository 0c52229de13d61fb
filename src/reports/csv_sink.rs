use std::io::Write;

use chrono::NaiveDateTime;

use super::section::ReportSection;
use super::sink::{generated_line, ReportSink};
use crate::currency::{format_date, format_percent, AmountFormatter};
use crate::errors::SinkError;

/// Spreadsheet style export. Only categories with spend get a row, followed
/// by a `TOTAL` row and the highlighted payments.
pub struct CsvWorkbookSink<W: Write> {
    out: W,
    formatter: AmountFormatter,
}

impl<W: Write> CsvWorkbookSink<W> {
    pub fn new(out: W, formatter: AmountFormatter) -> Self {
        Self { out, formatter }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs `write` against a csv writer over the output and flushes it.
    fn records<F>(&mut self, write: F) -> Result<(), SinkError>
    where
        F: FnOnce(&mut csv::Writer<&mut W>, &AmountFormatter) -> Result<(), SinkError>,
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut self.out);
        write(&mut writer, &self.formatter)?;
        writer.flush()?;
        Ok(())
    }

    /// An empty row; the csv writer would quote it as `""`.
    fn blank_row(&mut self) -> Result<(), SinkError> {
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> ReportSink for CsvWorkbookSink<W> {
    fn begin(&mut self, title: &str, generated_at: NaiveDateTime) -> Result<(), SinkError> {
        self.records(|writer, _| {
            writer.write_record([title])?;
            writer.write_record([generated_line(generated_at)])?;
            Ok(())
        })?;
        self.blank_row()
    }

    fn write_section(&mut self, section: &ReportSection) -> Result<(), SinkError> {
        self.records(|writer, formatter| {
            writer.write_record([section.title.as_str()])?;
            writer.write_record(["Category", "Amount", "Share"])?;
            for row in section.spent_rows() {
                let amount = formatter.cents(row.amount);
                let share = format_percent(row.percent);
                writer.write_record([row.category.as_str(), amount.as_str(), share.as_str()])?;
            }
            let total = formatter.cents(section.total);
            writer.write_record(["TOTAL", total.as_str()])?;

            for highlight in &section.highlights {
                writer.write_record([
                    highlight.kind.to_string(),
                    highlight.name.clone(),
                    formatter.money_cents(highlight.amount),
                    format_date(highlight.date),
                ])?;
            }
            Ok(())
        })
    }

    fn section_break(&mut self) -> Result<(), SinkError> {
        self.blank_row()?;
        self.blank_row()
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
