use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::section::ReportSection;
use super::sink::ReportSink;
use super::ExportFormat;
use crate::core::utils::{ensure_dir, tmp_path};
use crate::currency::AmountFormatter;
use crate::errors::SinkError;

/// Writes a report to disk through a staged `<path>.tmp` file.
///
/// The staged file is created on `begin`, renamed into place on `finish`
/// and removed on `abort`, so a failed export never leaves a half-written
/// report at `path`.
pub struct FileSink {
    path: PathBuf,
    staged: PathBuf,
    format: ExportFormat,
    formatter: AmountFormatter,
    inner: Option<Box<dyn ReportSink>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat, formatter: AmountFormatter) -> Self {
        let path = path.into();
        let staged = tmp_path(&path);
        Self {
            path,
            staged,
            format,
            formatter,
            inner: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staged_path(&self) -> &Path {
        &self.staged
    }

    fn inner(&mut self) -> Result<&mut Box<dyn ReportSink>, SinkError> {
        self.inner
            .as_mut()
            .ok_or_else(|| SinkError::Unavailable(format!("{} is not open", self.path.display())))
    }
}

impl ReportSink for FileSink {
    fn begin(&mut self, title: &str, generated_at: NaiveDateTime) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        let file = File::create(&self.staged)?;
        debug!(staged = %self.staged.display(), "opened staged report file");
        let mut inner = self
            .format
            .open(BufWriter::new(file), self.formatter.clone());
        inner.begin(title, generated_at)?;
        self.inner = Some(inner);
        Ok(())
    }

    fn write_section(&mut self, section: &ReportSection) -> Result<(), SinkError> {
        self.inner()?.write_section(section)
    }

    fn section_break(&mut self) -> Result<(), SinkError> {
        self.inner()?.section_break()
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.inner()?.finish()?;
        // close the handle before moving the file into place
        self.inner = None;
        fs::rename(&self.staged, &self.path)?;
        Ok(())
    }

    fn abort(&mut self) {
        if let Some(mut inner) = self.inner.take() {
            inner.abort();
        }
        match fs::remove_file(&self.staged) {
            Ok(()) => debug!(staged = %self.staged.display(), "removed staged report file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(staged = %self.staged.display(), %err, "could not remove staged report file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn section() -> ReportSection {
        ReportSection {
            user_id: Uuid::new_v4(),
            title: "Anna Ivanova".into(),
            rows: Vec::new(),
            total: Decimal::ZERO,
            highlights: Vec::new(),
        }
    }

    #[test]
    fn finish_moves_staged_file_into_place() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("report.txt");
        let mut sink = FileSink::new(&path, ExportFormat::Text, AmountFormatter::default());

        sink.begin("Report", generated()).unwrap();
        assert!(sink.staged_path().exists());
        sink.write_section(&section()).unwrap();
        sink.finish().unwrap();

        assert!(!sink.staged_path().exists());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Anna Ivanova"));
    }

    #[test]
    fn abort_removes_staged_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.csv");
        let mut sink = FileSink::new(&path, ExportFormat::Csv, AmountFormatter::default());

        sink.begin("Report", generated()).unwrap();
        sink.write_section(&section()).unwrap();
        sink.abort();

        assert!(!sink.staged_path().exists());
        assert!(!path.exists());
    }

    #[test]
    fn writing_before_begin_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let mut sink = FileSink::new(
            temp.path().join("report.json"),
            ExportFormat::Json,
            AmountFormatter::default(),
        );
        assert!(matches!(
            sink.write_section(&section()),
            Err(SinkError::Unavailable(_))
        ));
    }
}
