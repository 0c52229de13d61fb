//! Payment records owned by the expense store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single purchase made by a user within a category.
///
/// Price and quantity are nullable in the store; see [`Payment::line_total`]
/// for the defaults applied when either is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub date: NaiveDate,
    pub user_id: Uuid,
    pub category_id: Uuid,
}

impl Payment {
    pub fn new(
        name: impl Into<String>,
        user_id: Uuid,
        category_id: Uuid,
        date: NaiveDate,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            unit_price: Some(unit_price),
            quantity: Some(1),
            date,
            user_id,
            category_id,
        }
    }

    pub fn with_quantity(mut self, quantity: Option<u32>) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, unit_price: Option<Decimal>) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Unit price, treating a missing value as zero.
    pub fn effective_price(&self) -> Decimal {
        self.unit_price.unwrap_or(Decimal::ZERO)
    }

    /// Quantity, treating a missing value as one.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// `price × quantity` with defaults applied, clamped to the `Decimal` range.
    pub fn line_total(&self) -> Decimal {
        self.effective_price()
            .saturating_mul(Decimal::from(self.effective_quantity()))
    }

    pub fn belongs_to(&self, user_id: Uuid, category_id: Uuid) -> bool {
        self.user_id == user_id && self.category_id == category_id
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Payment {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Payment {
        Payment::new(
            "Bread",
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            dec!(2.50),
        )
    }

    #[test]
    fn missing_quantity_counts_as_one() {
        let payment = sample().with_quantity(None);
        assert_eq!(payment.line_total(), dec!(2.50));
    }

    #[test]
    fn missing_price_counts_as_zero() {
        let payment = sample().with_unit_price(None).with_quantity(Some(4));
        assert_eq!(payment.line_total(), Decimal::ZERO);
    }

    #[test]
    fn line_total_multiplies_price_and_quantity() {
        let payment = sample().with_quantity(Some(3));
        assert_eq!(payment.line_total(), dec!(7.50));
    }

    #[test]
    fn line_total_clamps_at_decimal_max() {
        let payment = sample().with_unit_price(Some(Decimal::MAX)).with_quantity(Some(2));
        assert_eq!(payment.line_total(), Decimal::MAX);
    }

    #[test]
    fn deserializes_nullable_fields() {
        let json = format!(
            r#"{{"id":"{}","name":"Tea","date":"2024-01-02","user_id":"{}","category_id":"{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let payment: Payment = serde_json::from_str(&json).expect("payment json");
        assert_eq!(payment.unit_price, None);
        assert_eq!(payment.effective_quantity(), 1);
    }
}
