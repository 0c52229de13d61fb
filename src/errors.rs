use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Error type that captures failures of the reporting core.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("User not found: {0}")]
    UnknownUser(Uuid),
    #[error("No user matches `{0}`")]
    UserNotMatched(String),
    #[error("Unknown chart style `{0}`")]
    UnknownChartStyle(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Storage(err.to_string())
    }
}

/// Failure raised by a report sink while it is being populated.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Point of the export protocol at which a sink failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Begin,
    Section,
    SectionBreak,
    Finish,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportStage::Begin => "opening the report",
            ExportStage::Section => "writing a section",
            ExportStage::SectionBreak => "inserting a section break",
            ExportStage::Finish => "finalizing the report",
        };
        f.write_str(label)
    }
}

/// Consolidated export failure reported once per export call.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed while {stage}{}: {source}", section_suffix(.section))]
    Sink {
        stage: ExportStage,
        section: Option<String>,
        #[source]
        source: SinkError,
    },
    #[error("Export failed while reading report data: {0}")]
    Source(String),
}

fn section_suffix(section: &Option<String>) -> String {
    section
        .as_deref()
        .map(|name| format!(" for `{name}`"))
        .unwrap_or_default()
}

impl ExportError {
    pub fn stage(&self) -> Option<ExportStage> {
        match self {
            ExportError::Sink { stage, .. } => Some(*stage),
            ExportError::Source(_) => None,
        }
    }
}
