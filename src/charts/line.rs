//! Line chart over the categories in input order.
//!
//! The plot area mapping here is shared with the scatter layout.

use rust_decimal::Decimal;

use super::{
    marker_tooltip, max_amount, ratio, ChartGeometry, ChartStyle, Circle, Color, Label, LabelRole,
    LayoutOptions, Point, Polyline, Primitive, Segment, TextAnchor,
};
use crate::core::services::CategoryTotal;
use crate::currency::shorten_label;

pub const WIDTH: f64 = 600.0;
pub const HEIGHT: f64 = 400.0;
pub const ORIGIN: Point = Point::new(50.0, 350.0);
pub const PLOT_WIDTH: f64 = 500.0;
pub const PLOT_HEIGHT: f64 = 300.0;
pub const MARKER_RADIUS: f64 = 5.0;

pub fn layout(totals: &[CategoryTotal], options: &LayoutOptions) -> ChartGeometry {
    let mut geometry = ChartGeometry::new(ChartStyle::Line, WIDTH, HEIGHT);
    push_axes(&mut geometry);

    let max = max_amount(totals);
    let points = plot_points(totals, max);
    let stroke = options.palette.color(0);

    geometry.push(Primitive::Polyline(Polyline {
        points: points.clone(),
        stroke,
        stroke_width: 2.0,
    }));

    for (idx, (row, point)) in totals.iter().zip(&points).enumerate() {
        geometry.push(Primitive::Circle(Circle {
            center: *point,
            radius: MARKER_RADIUS,
            fill: stroke,
            stroke: Some(Color::WHITE),
            tooltip: Some(marker_tooltip(row, options)),
        }));
        geometry.push(Primitive::Label(Label::new(
            Point::new(point.x, ORIGIN.y + 10.0),
            shorten_label(&row.category_name, options.short_label_len),
            TextAnchor::Middle,
            LabelRole::Category,
        )));
        if idx == 0 || idx == totals.len() - 1 || row.amount == max {
            geometry.push(Primitive::Label(Label::new(
                Point::new(point.x, point.y - 20.0),
                options.formatter.money(row.amount),
                TextAnchor::Middle,
                LabelRole::Value,
            )));
        }
    }
    geometry
}

/// Maps each total onto the shared plot area, scaled against `max`.
pub(crate) fn plot_points(totals: &[CategoryTotal], max: Decimal) -> Vec<Point> {
    let step = PLOT_WIDTH / (totals.len().saturating_sub(1).max(1) as f64);
    totals
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            Point::new(
                ORIGIN.x + idx as f64 * step,
                ORIGIN.y - ratio(row.amount, max) * PLOT_HEIGHT,
            )
        })
        .collect()
}

/// Both axes plus their titles.
pub(crate) fn push_axes(geometry: &mut ChartGeometry) {
    geometry.push(Primitive::Segment(Segment {
        from: ORIGIN,
        to: Point::new(ORIGIN.x + PLOT_WIDTH, ORIGIN.y),
        stroke: Color::AXIS,
        stroke_width: 1.0,
    }));
    geometry.push(Primitive::Segment(Segment {
        from: ORIGIN,
        to: Point::new(ORIGIN.x, ORIGIN.y - PLOT_HEIGHT),
        stroke: Color::AXIS,
        stroke_width: 1.0,
    }));
    geometry.push(Primitive::Label(
        Label::new(
            Point::new(10.0, 200.0),
            "Amount",
            TextAnchor::Middle,
            LabelRole::AxisTitle,
        )
        .rotated(-90.0),
    ));
    geometry.push(Primitive::Label(Label::new(
        Point::new(300.0, 380.0),
        "Categories",
        TextAnchor::Middle,
        LabelRole::AxisTitle,
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use rust_decimal_macros::dec;

    fn row(name: &str, amount: Decimal) -> CategoryTotal {
        CategoryTotal::new(&Category::new(name), amount)
    }

    #[test]
    fn points_spread_across_plot_and_scale_to_max() {
        let totals = vec![
            row("Food", dec!(50)),
            row("Rent", dec!(100)),
            row("Bus", dec!(25)),
        ];
        let geometry = layout(&totals, &LayoutOptions::default());
        let line = geometry.polylines().next().expect("polyline");

        assert_eq!(line.points[0], Point::new(50.0, 200.0));
        assert_eq!(line.points[1], Point::new(300.0, 50.0));
        assert_eq!(line.points[2], Point::new(550.0, 275.0));
        assert_eq!(geometry.segments().count(), 2);
    }

    #[test]
    fn value_labels_only_on_first_last_and_max() {
        let totals = vec![
            row("A", dec!(10)),
            row("B", dec!(5)),
            row("C", dec!(40)),
            row("D", dec!(7)),
            row("E", dec!(20)),
        ];
        let geometry = layout(&totals, &LayoutOptions::default());
        let values: Vec<_> = geometry
            .labels_with_role(LabelRole::Value)
            .map(|label| label.text.as_str())
            .collect();
        assert_eq!(values, vec!["10 RUB", "40 RUB", "20 RUB"]);
        assert_eq!(geometry.circles().count(), 5);
    }

    #[test]
    fn markers_carry_full_category_and_amount_tooltips() {
        let totals = vec![row("Entertainment", dec!(1234)), row("Food", dec!(20))];
        let geometry = layout(&totals, &LayoutOptions::default());
        let tooltips: Vec<_> = geometry
            .circles()
            .map(|marker| marker.tooltip.as_deref())
            .collect();
        assert_eq!(tooltips, vec![Some("Entertainment: 1,234 RUB"), Some("Food: 20 RUB")]);
    }

    #[test]
    fn long_category_names_are_shortened() {
        let totals = vec![row("Entertainment", dec!(10))];
        let geometry = layout(&totals, &LayoutOptions::default());
        let category = geometry
            .labels_with_role(LabelRole::Category)
            .next()
            .expect("category label");
        assert_eq!(category.text, "Enter...");
    }

    #[test]
    fn single_point_sits_on_the_y_axis() {
        let totals = vec![row("Food", dec!(10))];
        let points = plot_points(&totals, dec!(10));
        assert_eq!(points, vec![Point::new(50.0, 50.0)]);
    }

    #[test]
    fn zero_max_keeps_points_on_the_baseline() {
        let totals = vec![row("Food", Decimal::ZERO), row("Rent", Decimal::ZERO)];
        let points = plot_points(&totals, Decimal::ZERO);
        assert!(points.iter().all(|point| point.y == ORIGIN.y));
    }

    #[test]
    fn amount_axis_title_is_rotated() {
        let geometry = layout(&[row("Food", dec!(1))], &LayoutOptions::default());
        let titles: Vec<_> = geometry.labels_with_role(LabelRole::AxisTitle).collect();
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].text, "Amount");
        assert_eq!(titles[0].rotation, -90.0);
    }
}
