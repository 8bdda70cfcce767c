// File: crates/insight-chart/src/spec.rs
// Summary: Chart specification model (histogram, pie, line) as a closed tagged union.
// Notes:
// - Field names match the JSON the analysis agent emits, so specs deserialize
//   without renaming. Every field but `type` may be missing on input.

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// One chart to render. The `type` field selects the variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartSpec {
    Histogram(HistogramSpec),
    Pie(PieSpec),
    Line(LineSpec),
}

/// Category bars. `x_values[i]` labels `y_values[i]`; extra entries on
/// either side are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramSpec {
    pub title: String,
    pub x_values: Vec<String>,
    pub y_values: Vec<f64>,
    pub y_axis_label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSpec {
    pub title: String,
    pub x_values: Vec<String>,
    pub y_series: Vec<NamedSeries>,
    pub y_axis_label: String,
}

/// One line of a line chart. Series of one chart may differ in length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values }
    }
}

impl ChartSpec {
    /// Parse a spec from its JSON form, e.g. `{"type":"pie","labels":[...],"values":[...]}`.
    pub fn from_json(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input.trim())?)
    }

    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Histogram(h) => &h.title,
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Line(l) => &l.title,
        }
    }

    /// Discriminant as it appears in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::Histogram(_) => "histogram",
            ChartSpec::Pie(_) => "pie",
            ChartSpec::Line(_) => "line",
        }
    }
}

impl HistogramSpec {
    pub fn new(title: impl Into<String>, x_values: Vec<String>, y_values: Vec<f64>) -> Self {
        Self { title: title.into(), x_values, y_values, y_axis_label: String::new() }
    }

    pub fn with_y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = label.into();
        self
    }

    /// Position-correlated (label, value) pairs, truncated to the shorter side.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.x_values.iter().map(String::as_str).zip(self.y_values.iter().copied())
    }
}

impl PieSpec {
    pub fn new(title: impl Into<String>, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { title: title.into(), labels, values }
    }

    /// Label at `index`, or `S<index+1>` when absent or empty.
    pub fn label_at(&self, index: usize) -> String {
        match self.labels.get(index) {
            Some(l) if !l.is_empty() => l.clone(),
            _ => format!("S{}", index + 1),
        }
    }
}

impl LineSpec {
    pub fn new(title: impl Into<String>, x_values: Vec<String>, y_series: Vec<NamedSeries>) -> Self {
        Self { title: title.into(), x_values, y_series, y_axis_label: String::new() }
    }

    pub fn with_y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = label.into();
        self
    }

    /// Shared x-domain size: longest series or label count, at least 1.
    pub fn domain_size(&self) -> usize {
        self.y_series
            .iter()
            .map(|s| s.values.len())
            .chain(std::iter::once(self.x_values.len()))
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Display name of series `index`, or `Series <index+1>` when empty.
    pub fn series_name(&self, index: usize) -> String {
        match self.y_series.get(index) {
            Some(s) if !s.name.is_empty() => s.name.clone(),
            _ => format!("Series {}", index + 1),
        }
    }

    /// (min, max) over every series value; (0, 1) when there are none.
    pub fn value_range(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut any = false;
        for v in self.y_series.iter().flat_map(|s| s.values.iter().copied()) {
            lo = lo.min(v);
            hi = hi.max(v);
            any = true;
        }
        if any { (lo, hi) } else { (0.0, 1.0) }
    }
}

impl From<HistogramSpec> for ChartSpec {
    fn from(s: HistogramSpec) -> Self { ChartSpec::Histogram(s) }
}

impl From<PieSpec> for ChartSpec {
    fn from(s: PieSpec) -> Self { ChartSpec::Pie(s) }
}

impl From<LineSpec> for ChartSpec {
    fn from(s: LineSpec) -> Self { ChartSpec::Line(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_json_with_missing_fields() {
        let spec = ChartSpec::from_json(r#"{"type":"histogram","x_values":["a","b"]}"#).unwrap();
        match spec {
            ChartSpec::Histogram(h) => {
                assert_eq!(h.x_values, vec!["a", "b"]);
                assert!(h.y_values.is_empty());
                assert!(h.title.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(ChartSpec::from_json(r#"{"type":"radar"}"#).is_err());
        assert!(ChartSpec::from_json("not json").is_err());
    }

    #[test]
    fn json_shape_is_stable() {
        let spec: ChartSpec = PieSpec::new("Share", vec!["a".into()], vec![1.0]).into();
        let json = spec.to_json().unwrap();
        assert!(json.starts_with(r#"{"type":"pie""#), "{json}");
        assert_eq!(ChartSpec::from_json(&json).unwrap(), spec);
    }

    #[test]
    fn line_domain_counts_labels_and_longest_series() {
        let mut l = LineSpec::new("t", vec!["a".into(); 3], vec![NamedSeries::new("x", vec![1.0; 5])]);
        assert_eq!(l.domain_size(), 5);
        l.y_series.clear();
        assert_eq!(l.domain_size(), 3);
        l.x_values.clear();
        assert_eq!(l.domain_size(), 1);
    }

    #[test]
    fn default_names() {
        let p = PieSpec::new("", vec!["".into()], vec![1.0, 2.0]);
        assert_eq!(p.label_at(0), "S1");
        assert_eq!(p.label_at(1), "S2");
        let l = LineSpec::new("", vec![], vec![NamedSeries::default()]);
        assert_eq!(l.series_name(0), "Series 1");
    }
}
