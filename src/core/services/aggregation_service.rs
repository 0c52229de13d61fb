use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Category, Identifiable, NamedEntity, Payment};

/// Summed spend of one user within one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category_id: Uuid,
    pub category_name: String,
    pub amount: Decimal,
}

impl CategoryTotal {
    pub fn new<C: Identifiable + NamedEntity>(category: &C, amount: Decimal) -> Self {
        Self {
            category_id: category.id(),
            category_name: category.name().to_string(),
            amount,
        }
    }
}

/// Per-category totals of one user plus their grand total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserTotals {
    pub user_id: Uuid,
    pub totals: Vec<CategoryTotal>,
    pub total: Decimal,
}

impl UserTotals {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Most and least expensive payments of one user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentExtremes {
    pub most_expensive: Option<Payment>,
    pub cheapest: Option<Payment>,
}

pub struct AggregationService;

impl AggregationService {
    /// Totals of the categories in which `user_id` spent a positive amount.
    ///
    /// Categories keep the order of `categories`; `total` is the sum of the
    /// emitted amounts.
    pub fn aggregate(user_id: Uuid, categories: &[Category], payments: &[Payment]) -> UserTotals {
        let totals: Vec<CategoryTotal> = Self::breakdown(user_id, categories, payments)
            .into_iter()
            .filter(|row| row.amount > Decimal::ZERO)
            .collect();
        let total = saturating_sum(totals.iter().map(|row| row.amount));
        debug!(%user_id, categories = totals.len(), %total, "aggregated user payments");
        UserTotals {
            user_id,
            totals,
            total,
        }
    }

    /// One row per category, zero rows included.
    pub fn breakdown(
        user_id: Uuid,
        categories: &[Category],
        payments: &[Payment],
    ) -> Vec<CategoryTotal> {
        categories
            .iter()
            .map(|category| {
                let amount = saturating_sum(
                    payments
                        .iter()
                        .filter(|payment| payment.belongs_to(user_id, category.id))
                        .map(Payment::line_total),
                );
                CategoryTotal::new(category, amount)
            })
            .collect()
    }

    /// Finds the largest payment and the smallest strictly positive one.
    ///
    /// Ties resolve to the payment that comes first in `payments`.
    pub fn extremes(user_id: Uuid, payments: &[Payment]) -> PaymentExtremes {
        let mut extremes = PaymentExtremes::default();
        for payment in payments.iter().filter(|payment| payment.user_id == user_id) {
            let amount = payment.line_total();
            let is_larger = extremes
                .most_expensive
                .as_ref()
                .map_or(true, |current| amount > current.line_total());
            if is_larger {
                extremes.most_expensive = Some(payment.clone());
            }
            if amount > Decimal::ZERO {
                let is_smaller = extremes
                    .cheapest
                    .as_ref()
                    .map_or(true, |current| amount < current.line_total());
                if is_smaller {
                    extremes.cheapest = Some(payment.clone());
                }
            }
        }
        extremes
    }

    /// `amount / total × 100`, or zero when there is no total.
    pub fn percent_of(amount: Decimal, total: Decimal) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        match amount
            .checked_div(total)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        {
            Some(percent) => percent.to_f64().unwrap_or(0.0),
            None => match (amount.to_f64(), total.to_f64()) {
                (Some(amount), Some(total)) => amount / total * 100.0,
                _ => 0.0,
            },
        }
    }
}

/// Sums amounts, clamping at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}
