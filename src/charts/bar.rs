//! Horizontal bars, widest first.

use rust_decimal::Decimal;

use super::{
    max_amount, ratio, ChartGeometry, ChartStyle, Label, LabelRole, LayoutOptions, Point, Primitive,
    Rect, TextAnchor,
};
use crate::core::services::{AggregationService, CategoryTotal};
use crate::currency::format_percent;

pub const WIDTH: f64 = 700.0;
pub const MARGIN_LEFT: f64 = 150.0;
pub const MARGIN_RIGHT: f64 = 50.0;
pub const MARGIN_TOP: f64 = 50.0;
pub const ROW_STEP: f64 = 60.0;
pub const BAR_HEIGHT: f64 = 40.0;
/// Room kept right of the longest bar for its value labels.
const VALUE_COLUMN: f64 = 100.0;
pub const MAX_BAR_WIDTH: f64 = WIDTH - MARGIN_LEFT - MARGIN_RIGHT - VALUE_COLUMN;

pub fn layout(totals: &[CategoryTotal], total: Decimal, options: &LayoutOptions) -> ChartGeometry {
    let height = totals.len() as f64 * ROW_STEP + 100.0;
    let mut geometry = ChartGeometry::new(ChartStyle::HorizontalBar, WIDTH, height);

    let mut rows: Vec<&CategoryTotal> = totals.iter().collect();
    // stable: equal amounts keep category order
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    let max = max_amount(totals);

    for (idx, row) in rows.iter().enumerate() {
        let bar_width = ratio(row.amount, max) * MAX_BAR_WIDTH;
        let y = MARGIN_TOP + idx as f64 * ROW_STEP;
        let x = MARGIN_LEFT;

        geometry.push(Primitive::Rect(Rect {
            x,
            y,
            width: bar_width,
            height: BAR_HEIGHT,
            fill: options.palette.color(idx),
            category: row.category_name.clone(),
        }));
        geometry.push(Primitive::Label(Label::new(
            Point::new(MARGIN_LEFT - 10.0, y + 12.0),
            row.category_name.clone(),
            TextAnchor::End,
            LabelRole::Category,
        )));
        geometry.push(Primitive::Label(Label::new(
            Point::new(x + bar_width + 10.0, y + 12.0),
            options.formatter.money(row.amount),
            TextAnchor::Start,
            LabelRole::Amount,
        )));
        let percent = AggregationService::percent_of(row.amount, total);
        geometry.push(Primitive::Label(Label::new(
            Point::new(x + bar_width + 10.0, y + 28.0),
            format_percent(percent),
            TextAnchor::Start,
            LabelRole::Percent,
        )));
    }

    geometry.push(Primitive::Label(Label::new(
        Point::new(MARGIN_LEFT + MAX_BAR_WIDTH / 2.0, height - 25.0),
        format!("Payment amount ({})", options.formatter.currency()),
        TextAnchor::Middle,
        LabelRole::AxisTitle,
    )));
    geometry
}
