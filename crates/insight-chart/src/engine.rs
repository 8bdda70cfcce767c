// File: crates/insight-chart/src/engine.rs
// Summary: Geometry engine turning a ChartSpec into bars, pie arcs, or line paths.
// Notes:
// - Every layout is total: empty or degenerate input yields empty collections
//   or zero-length primitives, never an error.

use std::fmt::Write as _;

use tracing::trace;

use crate::axis::{label_ticks, value_ticks, XTick, YTick};
use crate::geometry::{Bar, GeometryBundle, LinePath, PieSegment};
use crate::scale::{IndexScale, ValueScale};
use crate::spec::{ChartSpec, HistogramSpec, LineSpec, PieSpec};
use crate::theme::palette_color;
use crate::types::Canvas;

/// Stateless layout engine over a fixed logical canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartGeometryEngine {
    pub canvas: Canvas,
}

/// Lay out `spec` on the default canvas.
pub fn render_chart(spec: &ChartSpec) -> GeometryBundle {
    ChartGeometryEngine::default().render(spec)
}

impl ChartGeometryEngine {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    pub fn render(&self, spec: &ChartSpec) -> GeometryBundle {
        match spec {
            ChartSpec::Histogram(h) => self.histogram(h),
            ChartSpec::Pie(p) => self.pie(p),
            ChartSpec::Line(l) => self.line(l),
        }
    }

    pub fn histogram(&self, spec: &HistogramSpec) -> GeometryBundle {
        let c = &self.canvas;
        let pairs: Vec<(&str, f64)> = spec.pairs().collect();
        let n = pairs.len();

        let max_value = pairs.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max).max(1.0);
        let scale = ValueScale::new_linear(c.top_margin, c.height, 0.0, max_value);
        let bands = IndexScale::bands(0.0, c.width, n);
        let bar_width = if n == 0 { 0.0 } else { (bands.step - c.bar_gap).max(0.0) };

        let bars: Vec<Bar> = pairs
            .iter()
            .enumerate()
            .map(|(i, &(label, value))| {
                let height = scale.extent(value).max(c.min_bar_height);
                Bar {
                    label: label.to_string(),
                    value,
                    x: bands.to_px(i) + c.bar_gap / 2.0,
                    y: c.height - height,
                    width: bar_width,
                    height,
                    color: palette_color(i),
                }
            })
            .collect();

        let x_ticks = bars
            .iter()
            .map(|b| XTick { label: b.label.clone(), x: b.x + b.width / 2.0 })
            .collect();
        let y_ticks = value_ticks(&scale, c.y_tick_steps);

        trace!(bars = n, max_value, "histogram layout");
        GeometryBundle::Histogram {
            title: spec.title.clone(),
            y_axis_label: spec.y_axis_label.clone(),
            bars,
            x_ticks,
            y_ticks,
        }
    }

    pub fn pie(&self, spec: &PieSpec) -> GeometryBundle {
        let circumference = self.canvas.circumference();
        let weights: Vec<f64> = spec.values.iter().map(|&v| pie_weight(v)).collect();
        let sum: f64 = weights.iter().sum();
        let total = if sum > 0.0 { sum } else { 1.0 };

        let mut offset = 0.0;
        let segments: Vec<PieSegment> = spec
            .values
            .iter()
            .zip(&weights)
            .enumerate()
            .map(|(i, (&value, &w))| {
                let arc_length = circumference * (w / total);
                let seg = PieSegment {
                    label: spec.label_at(i),
                    value,
                    arc_length,
                    arc_offset: offset,
                    color: palette_color(i),
                };
                offset += arc_length;
                seg
            })
            .collect();

        trace!(segments = segments.len(), total = sum, "pie layout");
        GeometryBundle::Pie {
            title: spec.title.clone(),
            segments,
            radius: self.canvas.pie_radius,
            circumference,
        }
    }

    pub fn line(&self, spec: &LineSpec) -> GeometryBundle {
        let c = &self.canvas;
        let (left, top, right, bottom) = c.line_plot_bounds();
        let domain = spec.domain_size();
        let (lo, hi) = spec.value_range();
        let xs = IndexScale::points(left, right, domain);
        let ys = ValueScale::new_linear(top, bottom, lo, hi);

        let paths: Vec<LinePath> = spec
            .y_series
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                let points: Vec<(f64, f64)> = s
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (xs.to_px(i), ys.to_px(v)))
                    .collect();
                LinePath {
                    series_name: spec.series_name(idx),
                    path_command: path_command(&points),
                    points,
                    color: palette_color(idx),
                }
            })
            .collect();

        let x_ticks: Vec<XTick> = if spec.y_series.is_empty() && spec.x_values.is_empty() {
            Vec::new()
        } else {
            label_ticks(&spec.x_values, domain, &xs, c.max_x_ticks)
        };
        let y_ticks: Vec<YTick> = value_ticks(&ys, c.y_tick_steps);

        trace!(series = paths.len(), domain, lo, hi, "line layout");
        GeometryBundle::Line {
            title: spec.title.clone(),
            y_axis_label: spec.y_axis_label.clone(),
            paths,
            x_ticks,
            y_ticks,
        }
    }
}

/// Share a pie value contributes: negatives and non-finite values count as zero.
#[inline]
fn pie_weight(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// `M x,y` for the first point, `L x,y` for the rest, space separated.
pub fn path_command(points: &[(f64, f64)]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        // Writing into a String cannot fail.
        let _ = write!(out, "{cmd}{x},{y}");
    }
    out
}
