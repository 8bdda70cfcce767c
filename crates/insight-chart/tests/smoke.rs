// File: crates/insight-chart/tests/smoke.rs
// Purpose: End-to-end: agent response text -> extracted specs -> geometry -> SVG.

use insight_chart::{extract_segments, render_chart, to_svg, GeometryBundle, ResponseSegment, SvgOptions};

const RESPONSE: &str = r#"Enrollment grew in every region.

<chart>{"type":"histogram","title":"Enrollment","x_values":["North","South","East"],"y_values":[120,95,143],"y_axis_label":"Students"}</chart>

Attendance split:

```chart
{"type":"pie","title":"Attendance","labels":["Present","Absent"],"values":[92,8]}
```

<chart>{"type":"line", "y_series": [oops]}</chart>
"#;

#[test]
fn response_to_svg_smoke() {
    let segments = extract_segments(RESPONSE);
    let charts: Vec<_> = segments
        .iter()
        .filter_map(|s| match s {
            ResponseSegment::Chart(c) => Some(c),
            ResponseSegment::Text(_) => None,
        })
        .collect();
    assert_eq!(charts.len(), 2);

    // The malformed island is kept as prose.
    let last_text = match segments.last() {
        Some(ResponseSegment::Text(t)) => t.clone(),
        other => panic!("expected trailing text, got {other:?}"),
    };
    assert!(last_text.contains("[oops]"));

    for spec in charts {
        let bundle = render_chart(spec);
        assert!(!bundle.is_empty());
        let svg = to_svg(&bundle, &SvgOptions::default());
        assert!(svg.starts_with("<svg") && svg.ends_with("</svg>"));
        assert!(svg.contains(spec.title()));
    }
}

#[test]
fn geometry_serializes_to_json() {
    let spec = insight_chart::ChartSpec::from_json(r#"{"type":"pie","values":[1]}"#).expect("valid spec");
    let bundle = render_chart(&spec);
    let json = serde_json::to_value(&bundle).expect("serialize");
    assert_eq!(json["type"], "pie");
    assert_eq!(json["segments"][0]["label"], "S1");
    assert_eq!(json["segments"][0]["color"], "#2563eb");
    assert!(matches!(bundle, GeometryBundle::Pie { .. }));
}
