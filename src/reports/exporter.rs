use chrono::{Local, NaiveDateTime};
use tracing::{error, info};

use super::section::{build_sections, ReportSection};
use super::sink::ReportSink;
use crate::domain::{Category, Payment, User};
use crate::errors::{ExportError, ExportStage, SinkError};

pub const DEFAULT_TITLE: &str = "User payments report";

/// Settings for a single export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub title: String,
    pub generated_at: NaiveDateTime,
}

impl ExportOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Local::now().naive_local(),
        }
    }

    pub fn generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

/// Exports one section per user with default options.
///
/// Returns the number of sections written.
pub fn export<S>(
    users: &[User],
    categories: &[Category],
    payments: &[Payment],
    sink: &mut S,
) -> Result<usize, ExportError>
where
    S: ReportSink + ?Sized,
{
    export_with(users, categories, payments, sink, &ExportOptions::default())
}

pub fn export_with<S>(
    users: &[User],
    categories: &[Category],
    payments: &[Payment],
    sink: &mut S,
    options: &ExportOptions,
) -> Result<usize, ExportError>
where
    S: ReportSink + ?Sized,
{
    let sections = build_sections(users, categories, payments);
    info!(sections = sections.len(), title = %options.title, "starting report export");

    match drive(&sections, sink, options) {
        Ok(()) => {
            info!(sections = sections.len(), "report export finished");
            Ok(sections.len())
        }
        Err(err) => {
            error!(%err, "report export aborted");
            sink.abort();
            Err(err)
        }
    }
}

fn drive<S>(sections: &[ReportSection], sink: &mut S, options: &ExportOptions) -> Result<(), ExportError>
where
    S: ReportSink + ?Sized,
{
    sink.begin(&options.title, options.generated_at)
        .map_err(|source| sink_error(ExportStage::Begin, None, source))?;

    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            sink.section_break().map_err(|source| {
                sink_error(ExportStage::SectionBreak, Some(section), source)
            })?;
        }
        sink.write_section(section)
            .map_err(|source| sink_error(ExportStage::Section, Some(section), source))?;
    }

    sink.finish()
        .map_err(|source| sink_error(ExportStage::Finish, None, source))
}

fn sink_error(stage: ExportStage, section: Option<&ReportSection>, source: SinkError) -> ExportError {
    ExportError::Sink {
        stage,
        section: section.map(|section| section.title.clone()),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
        fail_on_section: Option<usize>,
        aborted: bool,
    }

    impl ReportSink for RecordingSink {
        fn begin(&mut self, title: &str, _generated_at: NaiveDateTime) -> Result<(), SinkError> {
            self.events.push(format!("begin {title}"));
            Ok(())
        }

        fn write_section(&mut self, section: &ReportSection) -> Result<(), SinkError> {
            let written = self.events.iter().filter(|e| e.starts_with("section")).count();
            if self.fail_on_section == Some(written) {
                return Err(SinkError::Unavailable("disk full".into()));
            }
            self.events.push(format!("section {}", section.title));
            Ok(())
        }

        fn section_break(&mut self) -> Result<(), SinkError> {
            self.events.push("break".into());
            Ok(())
        }

        fn finish(&mut self) -> Result<(), SinkError> {
            self.events.push("finish".into());
            Ok(())
        }

        fn abort(&mut self) {
            self.aborted = true;
        }
    }

    fn users() -> Vec<User> {
        vec![
            User::new("anna", "Anna Ivanova", UserRole::User),
            User::new("bob", "Bob Petrov", UserRole::Admin),
        ]
    }

    #[test]
    fn breaks_go_between_sections_only() {
        let mut sink = RecordingSink::default();
        let written = export(&users(), &[], &[], &mut sink).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            sink.events,
            vec![
                format!("begin {DEFAULT_TITLE}"),
                "section Anna Ivanova".to_string(),
                "break".to_string(),
                "section Bob Petrov".to_string(),
                "finish".to_string(),
            ]
        );
        assert!(!sink.aborted);
    }

    #[test]
    fn failure_aborts_sink_and_names_the_section() {
        let mut sink = RecordingSink {
            fail_on_section: Some(1),
            ..RecordingSink::default()
        };
        let err = export(&users(), &[], &[], &mut sink).unwrap_err();
        assert!(sink.aborted);
        assert_eq!(err.stage(), Some(ExportStage::Section));
        assert!(err.to_string().contains("Bob Petrov"));
        assert!(!sink.events.contains(&"finish".to_string()));
    }

    #[test]
    fn no_users_still_begins_and_finishes() {
        let mut sink = RecordingSink::default();
        assert_eq!(export(&[], &[], &[], &mut sink).unwrap(), 0);
        assert_eq!(sink.events.len(), 2);
    }
}
