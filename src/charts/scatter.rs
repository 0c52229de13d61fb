//! Scatter chart: unconnected markers sized by amount.

use super::{
    line::{plot_points, push_axes, ORIGIN},
    marker_tooltip, max_amount, min_amount, ratio, ChartGeometry, ChartStyle, Circle, Label,
    LabelRole, LayoutOptions, Point, Primitive, TextAnchor,
};
use crate::core::services::CategoryTotal;
use crate::currency::shorten_label;

pub const MIN_DIAMETER: f64 = 8.0;
pub const DIAMETER_RANGE: f64 = 12.0;

pub fn layout(totals: &[CategoryTotal], options: &LayoutOptions) -> ChartGeometry {
    let mut geometry = ChartGeometry::new(ChartStyle::Scatter, super::line::WIDTH, super::line::HEIGHT);
    push_axes(&mut geometry);

    let max = max_amount(totals);
    let min = min_amount(totals);
    let points = plot_points(totals, max);
    let last = totals.len().saturating_sub(1);

    for (idx, (row, point)) in totals.iter().zip(&points).enumerate() {
        let diameter = MIN_DIAMETER + DIAMETER_RANGE * ratio(row.amount, max);
        geometry.push(Primitive::Circle(Circle {
            center: *point,
            radius: diameter / 2.0,
            fill: options.palette.color(idx),
            stroke: None,
            tooltip: Some(marker_tooltip(row, options)),
        }));
        geometry.push(Primitive::Label(Label::new(
            Point::new(point.x, ORIGIN.y + 10.0),
            shorten_label(&row.category_name, options.short_label_len),
            TextAnchor::Middle,
            LabelRole::Category,
        )));
        if idx == 0 || idx == last || row.amount == max || row.amount == min {
            geometry.push(Primitive::Label(Label::new(
                Point::new(point.x, point.y - 25.0),
                options.formatter.money(row.amount),
                TextAnchor::Middle,
                LabelRole::Value,
            )));
        }
    }
    geometry
}
