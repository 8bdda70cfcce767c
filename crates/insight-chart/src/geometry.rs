// File: crates/insight-chart/src/geometry.rs
// Summary: Renderer-agnostic geometry primitives produced by the engine.

use serde::Serialize;

use crate::axis::{XTick, YTick};
use crate::theme::Rgb;

/// One histogram bar. `y` is the top edge; bars grow down to the canvas bottom.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

/// One pie slice, measured along the circle circumference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSegment {
    pub label: String,
    /// Value as given in the `PieSpec` (may be negative; the arc uses `max(0, value)`).
    pub value: f64,
    pub arc_length: f64,
    pub arc_offset: f64,
    pub color: Rgb,
}

impl PieSegment {
    /// Start angle in degrees, clockwise from 12 o'clock.
    pub fn start_degrees(&self, circumference: f64) -> f64 {
        if circumference <= 0.0 { 0.0 } else { self.arc_offset / circumference * 360.0 }
    }

    /// Angular extent in degrees.
    pub fn sweep_degrees(&self, circumference: f64) -> f64 {
        if circumference <= 0.0 { 0.0 } else { self.arc_length / circumference * 360.0 }
    }
}

/// One line series as an SVG-style path command (`M x,y L x,y ...`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinePath {
    pub series_name: String,
    pub path_command: String,
    /// The same points as `path_command`, for renderers that build their own paths.
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
}

/// Everything needed to draw one chart, in canvas coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometryBundle {
    Histogram {
        title: String,
        y_axis_label: String,
        bars: Vec<Bar>,
        x_ticks: Vec<XTick>,
        y_ticks: Vec<YTick>,
    },
    Pie {
        title: String,
        segments: Vec<PieSegment>,
        radius: f64,
        circumference: f64,
    },
    Line {
        title: String,
        y_axis_label: String,
        paths: Vec<LinePath>,
        x_ticks: Vec<XTick>,
        y_ticks: Vec<YTick>,
    },
}

impl GeometryBundle {
    pub fn title(&self) -> &str {
        match self {
            GeometryBundle::Histogram { title, .. }
            | GeometryBundle::Pie { title, .. }
            | GeometryBundle::Line { title, .. } => title,
        }
    }

    /// True when the bundle carries no data primitives (ticks do not count).
    pub fn is_empty(&self) -> bool {
        match self {
            GeometryBundle::Histogram { bars, .. } => bars.is_empty(),
            GeometryBundle::Pie { segments, .. } => segments.is_empty(),
            GeometryBundle::Line { paths, .. } => paths.is_empty(),
        }
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
