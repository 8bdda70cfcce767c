// File: crates/insight-chart/src/error.rs
// Summary: Error type for fallible chart-spec conversions. Geometry itself never fails.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart spec: {0}")]
    InvalidSpec(#[from] serde_json::Error),
    #[error("unknown {kind} '{value}'")]
    UnknownName { kind: &'static str, value: String },
}
