//! Locale-aware presentation of amounts, shares and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Separators applied when rendering numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

/// Formats amounts with a currency label using one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormatter {
    locale: LocaleConfig,
    currency: String,
}

impl AmountFormatter {
    pub fn new(locale: LocaleConfig, currency: impl Into<String>) -> Self {
        Self {
            locale,
            currency: currency.into(),
        }
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Whole units with grouping, e.g. `12,345`.
    pub fn whole(&self, amount: Decimal) -> String {
        format_number(amount, 0, &self.locale)
    }

    /// Two decimals with grouping, e.g. `12,345.60`.
    pub fn cents(&self, amount: Decimal) -> String {
        format_number(amount, 2, &self.locale)
    }

    /// Whole units followed by the currency label.
    pub fn money(&self, amount: Decimal) -> String {
        format!("{} {}", self.whole(amount), self.currency)
    }

    /// Two decimals followed by the currency label.
    pub fn money_cents(&self, amount: Decimal) -> String {
        format!("{} {}", self.cents(amount), self.currency)
    }
}

impl Default for AmountFormatter {
    fn default() -> Self {
        Self::new(LocaleConfig::default(), "RUB")
    }
}

/// Rounds half away from zero and groups the integer digits in threes.
pub fn format_number(amount: Decimal, decimals: u32, locale: &LocaleConfig) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let rendered = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(locale.grouping_separator);
        }
        grouped.push(*digit);
    }

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// One-decimal percentage, e.g. `80.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Truncates long labels to `max_len` characters ending in `...`.
pub fn shorten_label(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut short: String = name.chars().take(keep).collect();
    short.push_str("...");
    short
}
