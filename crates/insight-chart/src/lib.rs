// File: crates/insight-chart/src/lib.rs
// Summary: Core library entry point; exports the chart spec model, geometry engine, and serializers.

pub mod axis;
pub mod engine;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod grid;
pub mod mock;
pub mod scale;
pub mod spec;
pub mod svg;
pub mod telemetry;
pub mod theme;
pub mod types;

pub use axis::{XTick, YTick};
pub use engine::{render_chart, ChartGeometryEngine};
pub use error::{ChartError, ChartResult};
pub use extract::{extract_charts, extract_segments, ResponseSegment};
pub use geometry::{Bar, GeometryBundle, LinePath, PieSegment};
pub use mock::{MockSeries, Scope, TimeRange};
pub use spec::{ChartSpec, HistogramSpec, LineSpec, NamedSeries, PieSpec};
pub use svg::{to_svg, SvgOptions};
pub use telemetry::init_default_tracing;
pub use theme::{palette_color, Rgb, Theme, PALETTE};
pub use types::{Canvas, Insets};
