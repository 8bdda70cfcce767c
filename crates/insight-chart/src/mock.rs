// File: crates/insight-chart/src/mock.rs
// Summary: Deterministic placeholder series for the overview pages (area, bars, donut KPI).

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::axis::round_half_up;
use crate::error::ChartError;
use crate::geometry::clamp;

/// Which overview page the series is for; seeds the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Region,
    School,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Region => "region",
            Scope::School => "school",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "12mo")]
    Year,
}

impl FromStr for Scope {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Scope::Global, Scope::Region, Scope::School]
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::UnknownName { kind: "scope", value: s.to_string() })
    }
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Year => "12mo",
        }
    }

    pub fn sample_count(&self) -> usize {
        match self {
            TimeRange::Week => 8,
            TimeRange::Month => 16,
            TimeRange::Year => 12,
        }
    }
}

impl FromStr for TimeRange {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [TimeRange::Week, TimeRange::Month, TimeRange::Year]
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::UnknownName { kind: "time range", value: s.to_string() })
    }
}

/// Area chart box, in logical units.
pub const AREA_WIDTH: f64 = 300.0;
pub const AREA_HEIGHT: f64 = 120.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MockSeries {
    pub scope: Scope,
    pub range: TimeRange,
}

impl MockSeries {
    pub fn new(scope: Scope, range: TimeRange) -> Self {
        Self { scope, range }
    }

    /// Values in `[10, 100]`, identical for identical (scope, range).
    pub fn values(&self) -> Vec<f64> {
        let base = (hash_to_number(self.scope.as_str()) % 50) as usize;
        let bump = if self.range == TimeRange::Year { 5.0 } else { 0.0 };
        let mut v = 40.0 + base as f64;
        (0..self.range.sample_count())
            .map(|i| {
                v = 0.8 * v + 13.0 * ((i + base) % 7) as f64 + bump;
                clamp(round_half_up(v % 100.0), 10.0, 100.0)
            })
            .collect()
    }

    pub fn bars(&self) -> Vec<f64> {
        self.values()
    }

    /// Closed area path over a 300x120 box, baseline at the bottom edge.
    pub fn area_path(&self) -> String {
        let points = self.values();
        let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = points.iter().copied().fold(f64::INFINITY, f64::min);
        let span = (max - min).max(1.0);
        let dx = AREA_WIDTH / points.len().saturating_sub(1).max(1) as f64;

        let mut out = format!("M0,{AREA_HEIGHT}");
        for (i, v) in points.iter().enumerate() {
            let x = i as f64 * dx;
            let y = AREA_HEIGHT - (v - min) / span * AREA_HEIGHT;
            // The first point follows `L` directly; later ones are joined by " L ".
            let sep = if i == 0 { " L" } else { " L " };
            let _ = write!(out, "{sep}{x},{y}");
        }
        let _ = write!(out, " L{AREA_WIDTH},{AREA_HEIGHT} Z");
        out
    }

    /// Percentage KPI derived from the last value (50 when empty).
    pub fn donut_value(&self) -> f64 {
        let last = self.values().last().copied().unwrap_or(50.0);
        round_half_up(50.0 + last % 40.0)
    }
}

/// 32-bit wrapping string hash (`h * 31 + unit` over UTF-16 code units), absolute value.
fn hash_to_number(input: &str) -> i64 {
    let mut h: i32 = 0;
    for unit in input.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32);
    }
    (h as i64).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable() {
        assert_eq!(hash_to_number(""), 0);
        assert_eq!(hash_to_number("a"), 97);
        assert_eq!(hash_to_number("ab"), 97 * 31 + 98);
    }

    #[test]
    fn values_are_deterministic_and_bounded() {
        for scope in [Scope::Global, Scope::Region, Scope::School] {
            for range in [TimeRange::Week, TimeRange::Month, TimeRange::Year] {
                let m = MockSeries::new(scope, range);
                let a = m.values();
                assert_eq!(a, m.values());
                assert_eq!(a.len(), range.sample_count());
                assert!(a.iter().all(|v| (10.0..=100.0).contains(v)), "{a:?}");
            }
        }
    }

    #[test]
    fn area_path_is_closed() {
        let p = MockSeries::new(Scope::Global, TimeRange::Week).area_path();
        assert!(p.starts_with("M0,120 L0,"));
        assert!(p.ends_with(" L300,120 Z"));
        assert_eq!(p.matches(" L").count(), 8 + 1);
    }

    #[test]
    fn area_path_joins_points_with_spaced_l() {
        let m = MockSeries::new(Scope::Global, TimeRange::Week);
        let n = m.values().len();
        let p = m.area_path();
        assert_eq!(p.matches(" L ").count(), n - 1);
        let dx = AREA_WIDTH / (n - 1) as f64;
        assert!(p.contains(&format!(" L {dx},")), "{p}");
        assert!(!p.contains(" L 0,"), "{p}");
    }

    #[test]
    fn names_parse() {
        assert_eq!("Region".parse::<Scope>().ok(), Some(Scope::Region));
        assert_eq!("12mo".parse::<TimeRange>().ok(), Some(TimeRange::Year));
        let err = "decade".parse::<TimeRange>().unwrap_err();
        assert_eq!(err.to_string(), "unknown time range 'decade'");
    }

    #[test]
    fn donut_is_a_percentage() {
        let d = MockSeries::new(Scope::School, TimeRange::Year).donut_value();
        assert!((50.0..=90.0).contains(&d));
    }
}
