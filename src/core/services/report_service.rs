use tracing::debug;

use crate::errors::{ExportError, ReportError};
use crate::reports::{self, ExportOptions, ReportSink};
use crate::storage::ExpenseRepository;

pub struct ReportService;

impl ReportService {
    pub fn export<R, S>(repository: &R, sink: &mut S) -> Result<usize, ExportError>
    where
        R: ExpenseRepository + ?Sized,
        S: ReportSink + ?Sized,
    {
        Self::export_with(repository, sink, &ExportOptions::default())
    }

    /// Reads a fresh snapshot from `repository` and exports it into `sink`.
    pub fn export_with<R, S>(
        repository: &R,
        sink: &mut S,
        options: &ExportOptions,
    ) -> Result<usize, ExportError>
    where
        R: ExpenseRepository + ?Sized,
        S: ReportSink + ?Sized,
    {
        let source = |err: ReportError| ExportError::Source(err.to_string());
        let data = repository.snapshot().map_err(source)?;
        debug!(
            users = data.users.len(),
            categories = data.categories.len(),
            payments = data.payments.len(),
            "loaded export data"
        );
        reports::export_with(&data.users, &data.categories, &data.payments, sink, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Payment, User, UserRole};
    use crate::errors::Result;
    use crate::reports::JsonSink;
    use crate::storage::Dataset;

    struct BrokenRepository;

    impl ExpenseRepository for BrokenRepository {
        fn users(&self) -> Result<Vec<User>> {
            Err(ReportError::Storage("database offline".into()))
        }

        fn categories(&self) -> Result<Vec<Category>> {
            Ok(Vec::new())
        }

        fn payments(&self) -> Result<Vec<Payment>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn repository_failure_is_a_source_error() {
        let mut sink = JsonSink::new(Vec::new(), "RUB");
        let err = ReportService::export(&BrokenRepository, &mut sink).unwrap_err();
        assert!(matches!(err, ExportError::Source(ref message) if message.contains("database offline")));
        assert!(sink.into_inner().is_empty());
    }

    struct SnapshotOnly(Dataset);

    impl ExpenseRepository for SnapshotOnly {
        fn users(&self) -> Result<Vec<User>> {
            Err(ReportError::Storage("per-collection read".into()))
        }

        fn categories(&self) -> Result<Vec<Category>> {
            Err(ReportError::Storage("per-collection read".into()))
        }

        fn payments(&self) -> Result<Vec<Payment>> {
            Err(ReportError::Storage("per-collection read".into()))
        }

        fn snapshot(&self) -> Result<Dataset> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn export_reads_repository_through_one_snapshot() {
        let users = vec![
            User::new("anna", "Anna Ivanova", UserRole::User),
            User::new("boris", "Boris Petrov", UserRole::Admin),
        ];
        let repository = SnapshotOnly(Dataset::new(users, vec![Category::new("Food")], Vec::new()));
        let mut sink = JsonSink::new(Vec::new(), "RUB");
        let written = ReportService::export(&repository, &mut sink).expect("export");
        assert_eq!(written, 2);
    }
}
