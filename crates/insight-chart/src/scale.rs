// File: crates/insight-chart/src/scale.rs
// Summary: Index (X) and value (Y) scale transforms onto the logical canvas.

use crate::types::MIN_SPAN;

/// Evenly spaced horizontal positions for category or sample indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexScale {
    pub left_px: f64,
    pub step: f64,
}

impl IndexScale {
    pub fn new(left_px: f64, step: f64) -> Self {
        Self { left_px, step }
    }

    /// `count` equal bands across `[left, left + width]`; returns the scale
    /// placing index `i` at the left edge of its band.
    pub fn bands(left_px: f64, width: f64, count: usize) -> Self {
        let step = if count == 0 { 0.0 } else { width / count as f64 };
        Self::new(left_px, step)
    }

    /// `count` points spread over `[left, right]` with both ends used.
    /// A single point sits at `left`.
    pub fn points(left_px: f64, right_px: f64, count: usize) -> Self {
        let gaps = count.saturating_sub(1).max(1);
        Self::new(left_px, (right_px - left_px) / gaps as f64)
    }

    #[inline]
    pub fn to_px(&self, index: usize) -> f64 {
        self.left_px + index as f64 * self.step
    }
}

/// Vertical value scale mapping `[vmin, vmin + span]` onto `[bottom, top]` pixels
/// (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: f64,
    span: f64,
}

impl ValueScale {
    /// The span never drops below [`MIN_SPAN`], so flat data does not divide by zero.
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: f64, vmax: f64) -> Self {
        let span = (vmax - vmin).max(MIN_SPAN);
        Self { top_px, bottom_px, vmin, span }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.span
    }

    #[inline]
    pub fn vmax(&self) -> f64 {
        self.vmin + self.span
    }

    /// Distance in pixels from the bottom edge for value `v`.
    #[inline]
    pub fn extent(&self, v: f64) -> f64 {
        (v - self.vmin) / self.span * (self.bottom_px - self.top_px)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        self.bottom_px - self.extent(v)
    }

    #[inline]
    pub fn from_px(&self, py: f64) -> f64 {
        let h = self.bottom_px - self.top_px;
        if h == 0.0 { return self.vmin; }
        self.vmin + (self.bottom_px - py) / h * self.span
    }
}
