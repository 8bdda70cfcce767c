// File: crates/insight-chart/tests/snapshot.rs
// Purpose: Golden SVG snapshots with bless flow.
// Behavior:
// - Serializes deterministic charts of each kind to SVG.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, compares text for exact match; a missing snapshot fails the test.

use insight_chart::{render_chart, to_svg, ChartSpec, HistogramSpec, LineSpec, NamedSeries, PieSpec, SvgOptions};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(name: &str, svg: &str) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(&path, svg).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), svg.len());
        return;
    }
    let want = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing snapshot {} ({e}); run with UPDATE_SNAPSHOTS=1 to bless", path.display()));
    assert_eq!(svg, want, "SVG differs from golden snapshot: {}", path.display());
}

fn svg_for(spec: ChartSpec) -> String {
    to_svg(&render_chart(&spec), &SvgOptions::default())
}

#[test]
fn golden_histogram() {
    let spec = HistogramSpec::new(
        "Enrollment by grade",
        ["G1", "G2", "G3", "G4", "G5"].map(String::from).to_vec(),
        vec![120.0, 98.0, 143.0, 87.0, 110.0],
    )
    .with_y_axis_label("Students");
    write_or_compare("histogram.svg", &svg_for(spec.into()));
}

#[test]
fn golden_pie() {
    let spec = PieSpec::new(
        "Attendance",
        ["Present", "Excused", "Absent"].map(String::from).to_vec(),
        vec![92.0, 5.0, 3.0],
    );
    write_or_compare("pie.svg", &svg_for(spec.into()));
}

#[test]
fn golden_line() {
    let spec = LineSpec::new(
        "Average score",
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug"].map(String::from).to_vec(),
        vec![
            NamedSeries::new("Region A", vec![71.0, 73.5, 72.0, 76.0, 78.5, 77.0, 80.0, 81.5]),
            NamedSeries::new("Region B", vec![68.0, 69.0, 71.5, 70.0, 72.0, 74.5]),
        ],
    )
    .with_y_axis_label("Score");
    write_or_compare("line.svg", &svg_for(spec.into()));
}
