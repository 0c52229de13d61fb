use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::core::services::aggregation_service::saturating_sum;
use crate::core::services::{AggregationService, PaymentExtremes};
use crate::domain::{Category, Payment, User};

/// One category line of a user's section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub category: String,
    pub amount: Decimal,
    /// Share of the user's total, 0..=100.
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    MostExpensive,
    Cheapest,
}

impl fmt::Display for HighlightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightKind::MostExpensive => f.write_str("Most expensive payment"),
            HighlightKind::Cheapest => f.write_str("Cheapest payment"),
        }
    }
}

/// A notable single payment called out below the category table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub kind: HighlightKind,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Highlight {
    fn from_payment(kind: HighlightKind, payment: &Payment) -> Self {
        Self {
            kind,
            name: payment.name.clone(),
            amount: payment.line_total(),
            date: payment.date,
        }
    }
}

/// Everything exported for a single user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub user_id: Uuid,
    pub title: String,
    pub rows: Vec<ReportRow>,
    pub total: Decimal,
    pub highlights: Vec<Highlight>,
}

impl ReportSection {
    /// Builds the section for `user`; every category gets a row, spent or not.
    pub fn for_user(user: &User, categories: &[Category], payments: &[Payment]) -> Self {
        let breakdown = AggregationService::breakdown(user.id, categories, payments);
        let total = saturating_sum(breakdown.iter().map(|row| row.amount));
        let rows = breakdown
            .into_iter()
            .map(|row| ReportRow {
                percent: AggregationService::percent_of(row.amount, total),
                category: row.category_name,
                amount: row.amount,
            })
            .collect();

        let PaymentExtremes {
            most_expensive,
            cheapest,
        } = AggregationService::extremes(user.id, payments);
        let highlights = most_expensive
            .iter()
            .map(|payment| Highlight::from_payment(HighlightKind::MostExpensive, payment))
            .chain(
                cheapest
                    .iter()
                    .map(|payment| Highlight::from_payment(HighlightKind::Cheapest, payment)),
            )
            .collect();

        Self {
            user_id: user.id,
            title: user.full_name.clone(),
            rows,
            total,
            highlights,
        }
    }

    /// Rows with a positive amount, as spreadsheet output lists them.
    pub fn spent_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| row.amount > Decimal::ZERO)
    }

    pub fn highlight(&self, kind: HighlightKind) -> Option<&Highlight> {
        self.highlights.iter().find(|highlight| highlight.kind == kind)
    }
}

/// Sections for every user in repository order.
pub fn build_sections(
    users: &[User],
    categories: &[Category],
    payments: &[Payment],
) -> Vec<ReportSection> {
    users
        .iter()
        .map(|user| ReportSection::for_user(user, categories, payments))
        .collect()
}
