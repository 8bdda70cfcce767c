// File: crates/insight-chart/src/svg.rs
// Summary: Serializes a GeometryBundle into a standalone SVG document.

use std::fmt::Write as _;

use crate::geometry::GeometryBundle;
use crate::axis::{XTick, YTick};
use crate::theme::Theme;
use crate::types::{Canvas, Insets};

/// Options for [`to_svg`]. The canvas must be the one the bundle was laid out on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgOptions {
    pub canvas: Canvas,
    pub insets: Insets,
    pub theme: Theme,
    pub font_size: f64,
    /// Emit a title row above the plot.
    pub draw_title: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            insets: Insets::default(),
            theme: Theme::default(),
            font_size: 8.0,
            draw_title: true,
        }
    }
}

/// Escape text for XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Compact number: at most three decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub fn to_svg(bundle: &GeometryBundle, opts: &SvgOptions) -> String {
    let c = &opts.canvas;
    let i = &opts.insets;
    let t = &opts.theme;
    let mut out = String::new();

    // Writing into a String cannot fail; results are ignored below.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" role="img" aria-label="{}">"#,
        num(-i.left),
        num(-i.top),
        num(c.width + i.hsum()),
        num(c.height + i.vsum()),
        num(c.width + i.hsum()),
        num(c.height + i.vsum()),
        escape_xml(bundle.title()),
    );
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        num(-i.left),
        num(-i.top),
        num(c.width + i.hsum()),
        num(c.height + i.vsum()),
        t.background,
    );
    if opts.draw_title && !bundle.title().is_empty() {
        let _ = write!(
            out,
            r#"<text x="0" y="{}" font-size="{}" font-weight="600" fill="{}">{}</text>"#,
            num(-i.top + opts.font_size * 1.5),
            num(opts.font_size * 1.25),
            t.title,
            escape_xml(bundle.title()),
        );
    }

    match bundle {
        GeometryBundle::Histogram { bars, x_ticks, y_ticks, y_axis_label, .. } => {
            write_y_axis(&mut out, y_ticks, y_axis_label, opts);
            for b in bars {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="2" fill="{}"><title>{}: {}</title></rect>"#,
                    num(b.x),
                    num(b.y),
                    num(b.width),
                    num(b.height),
                    b.color,
                    escape_xml(&b.label),
                    b.value,
                );
            }
            write_x_axis(&mut out, x_ticks, opts);
        }
        GeometryBundle::Pie { segments, radius, circumference, .. } => {
            let cx = c.width / 2.0;
            let cy = c.height / 2.0;
            let stroke = radius / 3.0;
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                num(cx),
                num(cy),
                num(*radius),
                t.pie_track,
                num(stroke),
            );
            let _ = write!(out, r#"<g transform="rotate(-90 {} {})">"#, num(cx), num(cy));
            for s in segments {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}" stroke-dasharray="{} {}" stroke-dashoffset="{}"><title>{}: {}</title></circle>"#,
                    num(cx),
                    num(cy),
                    num(*radius),
                    s.color,
                    num(stroke),
                    num(s.arc_length),
                    num(circumference - s.arc_length),
                    num(-s.arc_offset),
                    escape_xml(&s.label),
                    s.value,
                );
            }
            out.push_str("</g>");
            // legend
            let lx = cx + radius + stroke;
            for (k, s) in segments.iter().enumerate() {
                let ly = opts.font_size * 1.5 * k as f64;
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/><text x="{}" y="{}" font-size="{}" fill="{}">{}</text>"#,
                    num(lx),
                    num(ly),
                    num(opts.font_size * 0.8),
                    num(opts.font_size * 0.8),
                    s.color,
                    num(lx + opts.font_size * 1.2),
                    num(ly + opts.font_size * 0.8),
                    num(opts.font_size),
                    t.axis_label,
                    escape_xml(&s.label),
                );
            }
        }
        GeometryBundle::Line { paths, x_ticks, y_ticks, y_axis_label, .. } => {
            write_y_axis(&mut out, y_ticks, y_axis_label, opts);
            for p in paths {
                let _ = write!(
                    out,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="2" stroke-linejoin="round"><title>{}</title></path>"#,
                    p.path_command,
                    p.color,
                    escape_xml(&p.series_name),
                );
            }
            write_x_axis(&mut out, x_ticks, opts);
        }
    }

    out.push_str("</svg>");
    out
}

fn write_y_axis(out: &mut String, ticks: &[YTick], label: &str, opts: &SvgOptions) {
    let c = &opts.canvas;
    let t = &opts.theme;
    for tick in ticks {
        let _ = write!(
            out,
            r#"<line x1="0" y1="{y}" x2="{}" y2="{y}" stroke="{}" stroke-width="0.5"/><text x="-3" y="{}" font-size="{}" text-anchor="end" fill="{}">{}</text>"#,
            num(c.width),
            t.grid,
            num(tick.y + opts.font_size * 0.35),
            num(opts.font_size),
            t.axis_label,
            tick.value,
            y = num(tick.y),
        );
    }
    if !label.is_empty() {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" fill="{}" transform="rotate(-90 {} {})">{}</text>"#,
            num(-opts.insets.left + opts.font_size),
            num(c.height / 2.0),
            num(opts.font_size),
            t.axis_label,
            num(-opts.insets.left + opts.font_size),
            num(c.height / 2.0),
            escape_xml(label),
        );
    }
    let _ = write!(
        out,
        r#"<line x1="0" y1="{h}" x2="{}" y2="{h}" stroke="{}" stroke-width="1"/>"#,
        num(c.width),
        t.axis_line,
        h = num(c.height),
    );
}

fn write_x_axis(out: &mut String, ticks: &[XTick], opts: &SvgOptions) {
    let c = &opts.canvas;
    for tick in ticks {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" fill="{}">{}</text>"#,
            num(tick.x),
            num(c.height + opts.font_size * 1.4),
            num(opts.font_size),
            opts.theme.axis_label,
            escape_xml(&tick.label),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::render_chart;
    use crate::spec::{ChartSpec, HistogramSpec, PieSpec};

    #[test]
    fn number_formatting() {
        assert_eq!(num(8.0), "8");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(301.592_894_744), "301.593");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn labels_are_escaped() {
        let spec: ChartSpec = HistogramSpec::new("<b>&", vec!["<x>".into()], vec![1.0]).into();
        let svg = to_svg(&render_chart(&spec), &SvgOptions::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("&lt;x&gt;"));
        assert!(svg.contains("&lt;b&gt;&amp;"));
        assert!(!svg.contains("<x>"));
    }

    #[test]
    fn pie_uses_dash_arrays() {
        let spec: ChartSpec = PieSpec::new("", vec![], vec![1.0, 1.0]).into();
        let svg = to_svg(&render_chart(&spec), &SvgOptions::default());
        assert_eq!(svg.matches("stroke-dasharray").count(), 2);
        assert!(svg.contains(r#"stroke-dashoffset="-150.796""#), "{svg}");
    }
}
