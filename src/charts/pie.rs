//! Donut-style pie with a separate legend.

use rust_decimal::Decimal;

use super::{
    ratio, ChartGeometry, ChartStyle, Circle, Color, Label, LabelRole, LayoutOptions, LegendEntry,
    Point, Primitive, TextAnchor, Wedge,
};
use crate::core::services::{AggregationService, CategoryTotal};
use crate::currency::format_percent;

pub const SIZE: f64 = 300.0;
pub const CENTER: Point = Point::new(150.0, 150.0);
pub const RADIUS: f64 = 120.0;
pub const HOLE_RADIUS: f64 = 40.0;

pub fn layout(totals: &[CategoryTotal], total: Decimal, options: &LayoutOptions) -> ChartGeometry {
    let mut geometry = ChartGeometry::new(ChartStyle::Pie, SIZE, SIZE);

    let mut angle = 0.0;
    for (idx, row) in totals.iter().enumerate() {
        let sweep = 360.0 * ratio(row.amount, total);
        geometry.push(Primitive::Wedge(wedge(
            angle,
            sweep,
            options.palette.color(idx),
            &row.category_name,
        )));
        angle += sweep;
    }

    geometry.push(Primitive::Circle(Circle {
        center: CENTER,
        radius: HOLE_RADIUS,
        fill: Color::WHITE,
        stroke: Some(Color::OUTLINE),
        tooltip: None,
    }));
    geometry.push(Primitive::Label(Label::new(
        CENTER,
        "Total",
        TextAnchor::Middle,
        LabelRole::Caption,
    )));

    geometry.legend = totals
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let percent = AggregationService::percent_of(row.amount, total);
            LegendEntry {
                color: options.palette.color(idx),
                category: row.category_name.clone(),
                amount: row.amount,
                amount_text: options.formatter.money(row.amount),
                percent,
                percent_text: format_percent(percent),
            }
        })
        .collect();
    geometry
}

fn wedge(start_angle: f64, sweep_angle: f64, fill: Color, category: &str) -> Wedge {
    Wedge {
        center: CENTER,
        radius: RADIUS,
        start_angle,
        sweep_angle,
        start: point_on_circle(start_angle),
        end: point_on_circle(start_angle + sweep_angle),
        large_arc: sweep_angle > 180.0,
        fill,
        category: category.to_string(),
    }
}

/// Point on the outer rim, with 0° at 12 o'clock growing clockwise.
pub fn point_on_circle(angle: f64) -> Point {
    let radians = (angle - 90.0).to_radians();
    Point::new(
        CENTER.x + RADIUS * radians.cos(),
        CENTER.y + RADIUS * radians.sin(),
    )
}
