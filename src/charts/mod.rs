//! Chart layout engine.
//!
//! Each [`ChartStyle`] maps a list of category totals to a [`ChartGeometry`]
//! made of plain primitives. Layouts are pure: they never touch the inputs
//! and never fail; empty input yields a placeholder and zero maxima or totals
//! collapse to zero-length shapes.

pub mod bar;
pub mod geometry;
pub mod line;
pub mod palette;
pub mod pie;
pub mod scatter;

use std::{fmt, str::FromStr};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::{ConfigError, ReportConfig},
    core::services::CategoryTotal,
    currency::AmountFormatter,
    errors::ReportError,
};

pub use geometry::{
    ChartGeometry, Circle, Label, LabelRole, LegendEntry, Placeholder, Point, Polyline, Primitive,
    Rect, Segment, TextAnchor, Wedge,
};
pub use palette::{Color, Palette};

pub const NO_DATA_MESSAGE: &str = "No payments recorded for this user";

/// The supported chart variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartStyle {
    HorizontalBar,
    Pie,
    Line,
    Scatter,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 4] = [
        ChartStyle::HorizontalBar,
        ChartStyle::Pie,
        ChartStyle::Line,
        ChartStyle::Scatter,
    ];

    /// Stable identifier used on the command line and in JSON.
    pub fn key(self) -> &'static str {
        match self {
            ChartStyle::HorizontalBar => "horizontal-bar",
            ChartStyle::Pie => "pie",
            ChartStyle::Line => "line",
            ChartStyle::Scatter => "scatter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::HorizontalBar => "Horizontal bar chart",
            ChartStyle::Pie => "Pie chart",
            ChartStyle::Line => "Line chart",
            ChartStyle::Scatter => "Scatter chart",
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartStyle {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace(['_', ' '], "-");
        let style = match normalized.as_str() {
            "bar" | "hbar" | "horizontal-bar" | "horizontal-bar-chart" => ChartStyle::HorizontalBar,
            "pie" | "donut" | "pie-chart" => ChartStyle::Pie,
            "line" | "line-chart" => ChartStyle::Line,
            "scatter" | "point" | "dot" | "scatter-chart" => ChartStyle::Scatter,
            _ => return Err(ReportError::UnknownChartStyle(value.to_string())),
        };
        Ok(style)
    }
}

/// Presentation settings shared by every layout.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub formatter: AmountFormatter,
    pub palette: Palette,
    pub short_label_len: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            formatter: AmountFormatter::default(),
            palette: Palette::default(),
            short_label_len: 8,
        }
    }
}

impl LayoutOptions {
    pub fn from_config(config: &ReportConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            formatter: config.formatter(),
            palette: config.palette()?,
            short_label_len: config.short_label_len,
        })
    }
}

/// Lays out `totals` with default presentation settings.
pub fn layout(style: ChartStyle, totals: &[CategoryTotal], total: Decimal) -> ChartGeometry {
    layout_with(style, totals, total, &LayoutOptions::default())
}

pub fn layout_with(
    style: ChartStyle,
    totals: &[CategoryTotal],
    total: Decimal,
    options: &LayoutOptions,
) -> ChartGeometry {
    debug!(style = style.key(), rows = totals.len(), %total, "laying out chart");
    if totals.is_empty() {
        return ChartGeometry::no_data(style, NO_DATA_MESSAGE);
    }
    match style {
        ChartStyle::HorizontalBar => bar::layout(totals, total, options),
        ChartStyle::Pie => pie::layout(totals, total, options),
        ChartStyle::Line => line::layout(totals, options),
        ChartStyle::Scatter => scatter::layout(totals, options),
    }
}

/// `category: amount` text attached to line and scatter markers.
pub(crate) fn marker_tooltip(row: &CategoryTotal, options: &LayoutOptions) -> String {
    format!("{}: {}", row.category_name, options.formatter.money(row.amount))
}

/// `part / whole` as a float, zero when `whole` is not positive.
pub(crate) fn ratio(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    match part.checked_div(whole) {
        Some(share) => share.to_f64().unwrap_or(0.0),
        None => match (part.to_f64(), whole.to_f64()) {
            (Some(part), Some(whole)) => part / whole,
            _ => 0.0,
        },
    }
}

pub(crate) fn max_amount(totals: &[CategoryTotal]) -> Decimal {
    totals
        .iter()
        .map(|row| row.amount)
        .max()
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn min_amount(totals: &[CategoryTotal]) -> Decimal {
    totals
        .iter()
        .map(|row| row.amount)
        .min()
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_style_names_and_aliases() {
        assert_eq!("bar".parse::<ChartStyle>().unwrap(), ChartStyle::HorizontalBar);
        assert_eq!("Horizontal bar chart".parse::<ChartStyle>().unwrap(), ChartStyle::HorizontalBar);
        assert_eq!(" PIE ".parse::<ChartStyle>().unwrap(), ChartStyle::Pie);
        assert_eq!("line".parse::<ChartStyle>().unwrap(), ChartStyle::Line);
        assert_eq!("scatter_chart".parse::<ChartStyle>().unwrap(), ChartStyle::Scatter);
        assert!(matches!(
            "radar".parse::<ChartStyle>(),
            Err(ReportError::UnknownChartStyle(name)) if name == "radar"
        ));
    }

    #[test]
    fn keys_parse_back() {
        for style in ChartStyle::ALL {
            assert_eq!(style.key().parse::<ChartStyle>().unwrap(), style);
        }
    }

    #[test]
    fn empty_totals_yield_placeholder_for_every_style() {
        for style in ChartStyle::ALL {
            let geometry = layout(style, &[], Decimal::ZERO);
            let placeholder = geometry.placeholder().expect("placeholder");
            assert_eq!(placeholder.message, NO_DATA_MESSAGE);
            assert_eq!(geometry.primitives.len(), 1);
        }
    }

    #[test]
    fn ratio_guards_non_positive_denominator() {
        assert_eq!(ratio(Decimal::ONE, Decimal::ZERO), 0.0);
        assert_eq!(ratio(Decimal::ONE, Decimal::NEGATIVE_ONE), 0.0);
        assert_eq!(ratio(Decimal::ONE, Decimal::TWO), 0.5);
        assert!(ratio(Decimal::MAX, Decimal::new(5, 1)) > 1e28);
    }
}
