// File: crates/insight-chart/src/axis.rs
// Summary: Axis tick models and tick generation.

use serde::Serialize;

use crate::grid::{linspace, strided_indices};
use crate::scale::{IndexScale, ValueScale};

/// Category/sample label placed at horizontal position `x`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct XTick {
    pub label: String,
    pub x: f64,
}

/// Rounded value label placed at vertical position `y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct YTick {
    pub value: f64,
    pub y: f64,
}

/// Round to the nearest integer, halves toward positive infinity.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// `steps + 1` ticks covering the whole scale. Positions use the exact
/// value; labels are rounded.
pub fn value_ticks(scale: &ValueScale, steps: usize) -> Vec<YTick> {
    linspace(scale.vmin, scale.vmax(), steps.max(1) + 1)
        .into_iter()
        .map(|v| YTick { value: round_half_up(v), y: scale.to_px(v) })
        .collect()
}

/// Down-sampled x ticks over a domain of `count` positions. Index `i` is
/// labelled `labels[i]`, or `i + 1` when there is no label.
pub fn label_ticks(labels: &[String], count: usize, scale: &IndexScale, max_shown: usize) -> Vec<XTick> {
    strided_indices(count, max_shown)
        .map(|i| XTick {
            label: labels.get(i).cloned().unwrap_or_else(|| (i + 1).to_string()),
            x: scale.to_px(i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(0.49), 0.0);
    }

    #[test]
    fn value_ticks_span_scale() {
        let s = ValueScale::new_linear(24.0, 144.0, 0.0, 10.0);
        let t = value_ticks(&s, 4);
        assert_eq!(t.len(), 5);
        assert_eq!(t[0], YTick { value: 0.0, y: 144.0 });
        assert_eq!(t[4], YTick { value: 10.0, y: 24.0 });
        assert_eq!(t[1].value, 3.0); // 2.5 rounds up
    }

    #[test]
    fn label_ticks_fall_back_to_ordinal() {
        let labels = vec!["Jan".to_string()];
        let t = label_ticks(&labels, 3, &IndexScale::new(8.0, 10.0), 6);
        let got: Vec<_> = t.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(got, vec!["Jan", "2", "3"]);
        assert_eq!(t[2].x, 28.0);
    }
}
