// File: crates/insight-chart/src/types.rs
// Summary: Shared types and constants (logical canvas size, paddings, margins).

use serde::{Deserialize, Serialize};

/// Default logical canvas width.
pub const WIDTH: f64 = 296.0;
/// Default logical canvas height.
pub const HEIGHT: f64 = 144.0;
/// Inner padding used by line charts.
pub const PADDING: f64 = 8.0;
/// Horizontal gap between histogram bars (split evenly on both sides).
pub const BAR_GAP: f64 = 12.0;
/// Space kept free above the tallest histogram bar.
pub const TOP_MARGIN: f64 = 24.0;
/// Smallest drawn histogram bar height.
pub const MIN_BAR_HEIGHT: f64 = 2.0;
/// Radius of the circle pie segments are laid out on.
pub const PIE_RADIUS: f64 = 48.0;
/// Number of equal steps between the lowest and highest y tick.
pub const Y_TICK_STEPS: usize = 4;
/// Upper bound on x tick labels for line charts.
pub const MAX_X_TICKS: usize = 6;
/// Smallest value span a line chart scales against.
pub const MIN_SPAN: f64 = 1e-9;

/// Fixed logical coordinate space all geometry is computed into.
///
/// Every field has a default, so a partial JSON object (or `{}`) deserializes
/// into a usable canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub bar_gap: f64,
    pub top_margin: f64,
    pub min_bar_height: f64,
    pub pie_radius: f64,
    pub y_tick_steps: usize,
    pub max_x_ticks: usize,
}

impl Canvas {
    /// Height available to histogram bars.
    pub fn bar_extent(&self) -> f64 {
        self.height - self.top_margin
    }

    /// Circumference of the pie circle; the total of all arc lengths.
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.pie_radius
    }

    /// Plot bounds of a line chart as (left, top, right, bottom).
    pub fn line_plot_bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.padding,
            self.padding,
            self.width - self.padding,
            self.height - self.padding,
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            padding: PADDING,
            bar_gap: BAR_GAP,
            top_margin: TOP_MARGIN,
            min_bar_height: MIN_BAR_HEIGHT,
            pie_radius: PIE_RADIUS,
            y_tick_steps: Y_TICK_STEPS,
            max_x_ticks: MAX_X_TICKS,
        }
    }
}

/// Margins around the canvas reserved for axis labels, in logical units.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    /// Create new insets; negative inputs are clamped to zero.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(28.0, 8.0, 20.0, 18.0)
    }
}
