//! Renderer-agnostic drawing primitives produced by the chart layouts.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{palette::Color, ChartStyle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// What a label annotates, so renderers can style them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRole {
    Category,
    Amount,
    Percent,
    Value,
    AxisTitle,
    Caption,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub category: String,
}

/// A pie slice; angles are degrees measured clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wedge {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub start: Point,
    pub end: Point,
    pub large_arc: bool,
    pub fill: Color,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Option<Color>,
    /// Hover text for data markers, e.g. `Food: 20 RUB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub stroke: Color,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub stroke: Color,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub position: Point,
    pub text: String,
    pub anchor: TextAnchor,
    pub role: LabelRole,
    /// Clockwise rotation in degrees around `position`.
    pub rotation: f64,
}

impl Label {
    pub fn new(position: Point, text: impl Into<String>, anchor: TextAnchor, role: LabelRole) -> Self {
        Self {
            position,
            text: text.into(),
            anchor,
            role,
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Stand-in drawn instead of a chart when there is nothing to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect(Rect),
    Wedge(Wedge),
    Circle(Circle),
    Polyline(Polyline),
    Segment(Segment),
    Label(Label),
    Placeholder(Placeholder),
}

/// Legend row shown next to a pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: Color,
    pub category: String,
    pub amount: Decimal,
    pub amount_text: String,
    pub percent: f64,
    pub percent_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub style: ChartStyle,
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
    pub legend: Vec<LegendEntry>,
}

impl ChartGeometry {
    pub fn new(style: ChartStyle, width: f64, height: f64) -> Self {
        Self {
            style,
            width,
            height,
            primitives: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub fn no_data(style: ChartStyle, message: impl Into<String>) -> Self {
        let mut geometry = Self::new(style, 0.0, 0.0);
        geometry.push(Primitive::Placeholder(Placeholder {
            message: message.into(),
        }));
        geometry
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.primitives.iter().find_map(|primitive| match primitive {
            Primitive::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn wedges(&self) -> impl Iterator<Item = &Wedge> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Wedge(wedge) => Some(wedge),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Polyline(polyline) => Some(polyline),
            _ => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Segment(segment) => Some(segment),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Label(label) => Some(label),
            _ => None,
        })
    }

    pub fn labels_with_role(&self, role: LabelRole) -> impl Iterator<Item = &Label> {
        self.labels().filter(move |label| label.role == role)
    }
}
