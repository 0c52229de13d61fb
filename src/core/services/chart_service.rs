use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::charts::{self, ChartGeometry, ChartStyle, LayoutOptions};
use crate::errors::{ReportError, Result};
use crate::storage::ExpenseRepository;

use super::AggregationService;

/// A laid out chart together with the captions shown around it.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPage {
    pub user_id: Uuid,
    pub title: String,
    pub style_caption: String,
    pub total: Decimal,
    pub total_caption: String,
    pub geometry: ChartGeometry,
}

pub struct ChartService;

impl ChartService {
    pub fn chart_for_user<R>(repository: &R, user_id: Uuid, style: ChartStyle) -> Result<ChartPage>
    where
        R: ExpenseRepository + ?Sized,
    {
        Self::chart_for_user_with(repository, user_id, style, &LayoutOptions::default())
    }

    /// Aggregates the user's payments and lays them out in `style`.
    pub fn chart_for_user_with<R>(
        repository: &R,
        user_id: Uuid,
        style: ChartStyle,
        options: &LayoutOptions,
    ) -> Result<ChartPage>
    where
        R: ExpenseRepository + ?Sized,
    {
        let data = repository.snapshot()?;
        let user = data.user(user_id).ok_or(ReportError::UnknownUser(user_id))?;

        let totals = AggregationService::aggregate(user.id, &data.categories, &data.payments);
        let geometry = if totals.is_empty() {
            ChartGeometry::no_data(style, format!("User {} has no payments", user.full_name))
        } else {
            charts::layout_with(style, &totals.totals, totals.total, options)
        };
        debug!(%user_id, style = style.key(), primitives = geometry.primitives.len(), "built chart page");

        Ok(ChartPage {
            user_id,
            title: format!("Payments of {}", user.full_name),
            style_caption: style.label().to_string(),
            total: totals.total,
            total_caption: format!("Total: {}", options.formatter.money(totals.total)),
            geometry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Payment, User, UserRole};
    use crate::storage::Dataset;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn dataset() -> (Dataset, Uuid) {
        let user = User::new("anna", "Anna Ivanova", UserRole::User);
        let food = Category::new("Food");
        let transport = Category::new("Transport");
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let payments = vec![
            Payment::new("Groceries", user.id, food.id, date, dec!(20)),
            Payment::new("Bus", user.id, transport.id, date, dec!(5)),
        ];
        let id = user.id;
        (Dataset::new(vec![user], vec![food, transport], payments), id)
    }

    #[test]
    fn page_carries_title_and_total_caption() {
        let (data, user_id) = dataset();
        let page = ChartService::chart_for_user(&data, user_id, ChartStyle::Pie).unwrap();
        assert_eq!(page.title, "Payments of Anna Ivanova");
        assert_eq!(page.style_caption, "Pie chart");
        assert_eq!(page.total, dec!(25));
        assert_eq!(page.total_caption, "Total: 25 RUB");
        assert_eq!(page.geometry.wedges().count(), 2);
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
    fn page_reads_repository_through_one_snapshot() {
        let (data, user_id) = dataset();
        let page = ChartService::chart_for_user(&SnapshotOnly(data), user_id, ChartStyle::HorizontalBar)
            .expect("page");
        assert_eq!(page.total, dec!(25));
        assert_eq!(page.geometry.rects().count(), 2);
    }

    #[test]
    fn placeholder_names_user_without_payments() {
        let user = User::new("boris", "Boris Petrov", UserRole::User);
        let id = user.id;
        let data = Dataset::new(vec![user], vec![Category::new("Food")], Vec::new());
        let page = ChartService::chart_for_user(&data, id, ChartStyle::Line).unwrap();
        let placeholder = page.geometry.placeholder().expect("placeholder");
        assert_eq!(placeholder.message, "User Boris Petrov has no payments");
        assert_eq!(page.total_caption, "Total: 0 RUB");
    }

    #[test]
    fn huge_payments_still_chart() {
        let user = User::new("oleg", "Oleg Sidorov", UserRole::User);
        let food = Category::new("Food");
        let rent = Category::new("Rent");
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let half = Decimal::MAX / dec!(2) + Decimal::ONE;
        let payments = vec![
            Payment::new("Caviar", user.id, food.id, date, half),
            Payment::new("Penthouse", user.id, rent.id, date, half),
        ];
        let id = user.id;
        let data = Dataset::new(vec![user], vec![food, rent], payments);
        for style in ChartStyle::ALL {
            let page = ChartService::chart_for_user(&data, id, style).unwrap();
            assert_eq!(page.total, Decimal::MAX);
            assert!(page.geometry.placeholder().is_none());
        }
    }

    #[test]
    fn unknown_user_is_an_error() {
        let (data, _) = dataset();
        let missing = Uuid::new_v4();
        let err = ChartService::chart_for_user(&data, missing, ChartStyle::Line).unwrap_err();
        assert!(matches!(err, ReportError::UnknownUser(id) if id == missing));
    }
}
