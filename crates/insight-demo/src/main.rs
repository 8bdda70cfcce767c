// File: crates/insight-demo/src/main.rs
// Summary: Demo turns CSV data, JSON chart specs, agent responses, or mock series into SVG/PNG/HTML files.

use anyhow::{Context, Result};
use insight_chart::{
    extract_segments, render_chart, theme, to_svg, ChartSpec, GeometryBundle, HistogramSpec, MockSeries, PieSpec,
    ResponseSegment, Scope, SvgOptions, Theme, TimeRange,
};
use insight_markdown::{escape_html, render_markdown};
use insight_render_skia::{RasterOptions, SkiaRasterizer};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const USAGE: &str = "usage: insight-demo <input.csv|input.json|response.txt> [--theme NAME] [--scale N] [--out DIR]\n       insight-demo --mock global|region|school [--range 7d|30d|12mo] [--theme NAME] [--scale N] [--out DIR]";

#[derive(Debug)]
struct Args {
    input: Option<PathBuf>,
    mock: Option<(Scope, TimeRange)>,
    theme: Theme,
    scale: f32,
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let _ = insight_chart::init_default_tracing();
    let args = parse_args(std::env::args().skip(1))?;

    let svg_opts = SvgOptions { theme: args.theme, ..SvgOptions::default() };
    let raster = SkiaRasterizer::new(RasterOptions { theme: args.theme, scale: args.scale, ..RasterOptions::default() });
    let out = Outputs { dir: &args.out_dir, svg: &svg_opts, raster: &raster };

    if let Some((scope, range)) = args.mock {
        return run_mock(&out, MockSeries::new(scope, range));
    }
    let Some(input) = args.input.as_deref() else {
        anyhow::bail!("missing input file\n{USAGE}");
    };
    if !input.exists() {
        anyhow::bail!("file not found: {}", input.display());
    }
    info!(input = %input.display(), theme = args.theme.name, "using input file");

    let ext = input.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "csv" => run_csv(&out, input),
        "json" => run_json(&out, input),
        _ => run_response(&out, input),
    }
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args {
        input: None,
        mock: None,
        theme: Theme::default(),
        scale: 2.0,
        out_dir: PathBuf::from("target/out"),
    };
    let mut range = TimeRange::default();
    let mut scope = None;

    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} needs a value\n{USAGE}"));
        match arg.as_str() {
            "--theme" => args.theme = theme::find(&value("--theme")?),
            "--scale" => {
                let raw = value("--scale")?;
                args.scale = raw.parse::<f32>().with_context(|| format!("invalid --scale '{raw}'"))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    anyhow::bail!("--scale must be positive, got {raw}");
                }
            }
            "--out" => args.out_dir = PathBuf::from(value("--out")?),
            "--mock" => scope = Some(value("--mock")?.parse::<Scope>()?),
            "--range" => range = value("--range")?.parse::<TimeRange>()?,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => anyhow::bail!("unknown option {flag}\n{USAGE}"),
            _ if args.input.is_none() => args.input = Some(PathBuf::from(arg)),
            _ => anyhow::bail!("unexpected argument '{arg}'\n{USAGE}"),
        }
    }
    args.mock = scope.map(|s| (s, range));
    Ok(args)
}

/// Where and how charts are written.
struct Outputs<'a> {
    dir: &'a Path,
    svg: &'a SvgOptions,
    raster: &'a SkiaRasterizer,
}

impl Outputs<'_> {
    /// Writes `<dir>/chart_<stem>_<suffix>.svg` and `.png`; returns the SVG text.
    fn write_chart(&self, stem: &str, suffix: &str, bundle: &GeometryBundle) -> Result<String> {
        let svg = to_svg(bundle, self.svg);
        let svg_path = out_name_with(self.dir, stem, suffix, "svg");
        write_file(&svg_path, &svg)?;
        let png_path = svg_path.with_extension("png");
        self.raster
            .render_to_png(bundle, &png_path)
            .with_context(|| format!("rendering {}", png_path.display()))?;
        println!("Wrote {} and {}", svg_path.display(), png_path.display());
        Ok(svg)
    }
}

/// CSV of label,value rows -> histogram and pie.
fn run_csv(out: &Outputs, path: &Path) -> Result<()> {
    let (labels, values) = load_label_value_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if values.is_empty() {
        anyhow::bail!("no rows loaded from {}; check headers/delimiter", path.display());
    }
    info!(rows = values.len(), "loaded CSV");

    let stem = file_stem(path);
    let hist: ChartSpec = HistogramSpec::new(stem.clone(), labels.clone(), values.clone()).with_y_axis_label("Value").into();
    let pie: ChartSpec = PieSpec::new(stem.clone(), labels, values).into();
    out.write_chart(&stem, "histogram", &render_chart(&hist))?;
    out.write_chart(&stem, "pie", &render_chart(&pie))?;
    Ok(())
}

/// A single ChartSpec document.
fn run_json(out: &Outputs, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let spec = ChartSpec::from_json(&text).with_context(|| format!("parsing chart spec {}", path.display()))?;
    out.write_chart(&file_stem(path), spec.kind(), &render_chart(&spec))?;
    Ok(())
}

/// Agent response text -> standalone HTML page with inline SVG charts.
fn run_response(out: &Outputs, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let stem = file_stem(path);
    let segments = extract_segments(&text);

    let mut body = String::new();
    let mut charts = 0usize;
    for segment in &segments {
        match segment {
            ResponseSegment::Text(t) => body.push_str(&render_markdown(Some(t))),
            ResponseSegment::Chart(spec) => {
                charts += 1;
                let bundle = render_chart(spec);
                if bundle.is_empty() {
                    warn!(title = spec.title(), kind = spec.kind(), "chart has no data");
                }
                let svg = out.write_chart(&stem, &format!("{charts}_{}", spec.kind()), &bundle)?;
                let _ = write!(body, r#"<figure class="chart">{svg}</figure>"#);
            }
        }
    }
    info!(segments = segments.len(), charts, "rendered response");

    let html_path = out_name_with(out.dir, &stem, "response", "html");
    write_file(&html_path, &html_page(&stem, &out.svg.theme, &body))?;
    println!("Wrote {}", html_path.display());
    Ok(())
}

/// Overview-page placeholders: area trend, bar histogram, and donut KPI.
fn run_mock(out: &Outputs, mock: MockSeries) -> Result<()> {
    let stem = format!("mock_{}_{}", mock.scope.as_str(), mock.range.as_str());
    let values = mock.bars();
    let labels: Vec<String> = (1..=values.len()).map(|i| i.to_string()).collect();

    let bars: ChartSpec = HistogramSpec::new(format!("{} activity", mock.scope.as_str()), labels, values).into();
    out.write_chart(&stem, "bars", &render_chart(&bars))?;

    let kpi = mock.donut_value();
    let donut: ChartSpec =
        PieSpec::new(format!("{kpi}%"), vec!["Value".into(), "Remaining".into()], vec![kpi, 100.0 - kpi]).into();
    out.write_chart(&stem, "donut", &render_chart(&donut))?;

    let t = &out.svg.theme;
    let area = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><rect width="{w}" height="{h}" fill="{}"/><path d="{}" fill="{}" fill-opacity="0.35" stroke="{}" stroke-width="1.5"/></svg>"#,
        t.background,
        mock.area_path(),
        insight_chart::palette_color(0),
        insight_chart::palette_color(0),
        w = insight_chart::mock::AREA_WIDTH,
        h = insight_chart::mock::AREA_HEIGHT,
    );
    let area_path = out_name_with(out.dir, &stem, "area", "svg");
    write_file(&area_path, &area)?;
    println!("Wrote {}", area_path.display());
    Ok(())
}

fn html_page(title: &str, theme: &Theme, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; background: {bg}; color: {fg}; }}
.md-table {{ border-collapse: collapse; }}
.md-table th, .md-table td {{ border: 1px solid {grid}; padding: 0.25rem 0.5rem; }}
figure.chart svg {{ width: 100%; height: auto; }}
</style></head>
<body>{body}</body></html>
"#,
        title = escape_html(title),
        bg = theme.background,
        fg = theme.title,
        grid = theme.grid,
    )
}

/// Load a label,value CSV. Columns are picked by header name, else the first two.
fn load_label_value_csv(path: &Path) -> Result<(Vec<String>, Vec<f64>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    info!(?headers, "CSV headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_label = idx(&["label", "name", "category", "x", "date", "time", "timestamp"]).unwrap_or(0);
    let i_value = idx(&["value", "y", "count", "amount", "total", "close"])
        .unwrap_or(if i_label == 0 { 1 } else { 0 });
    if i_label == i_value {
        anyhow::bail!("label and value resolve to the same column {i_label}");
    }

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(value) = rec.get(i_value).and_then(|s| s.parse::<f64>().ok()) else {
            warn!(row, "skipping row without a numeric value");
            continue;
        };
        let raw = rec.get(i_label).unwrap_or_default();
        let label = epoch_label(raw).unwrap_or_else(|| raw.to_string());
        labels.push(label);
        values.push(value);
    }
    Ok((labels, values))
}

/// Epoch seconds or milliseconds -> `YYYY-MM-DD` (UTC). Other text is left alone.
fn epoch_label(s: &str) -> Option<String> {
    let n = s.trim().parse::<i64>().ok()?;
    let secs = if n > 10_i64.pow(12) {
        n / 1000
    } else if n > 10_i64.pow(9) {
        n
    } else {
        // Small integers are categories (years, ids), not timestamps.
        return None;
    };
    let dt = chrono::DateTime::from_timestamp(secs, 0)?;
    Some(dt.format("%Y-%m-%d").to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).filter(|s| !s.is_empty()).unwrap_or("chart").to_string()
}

/// Output file name like <dir>/chart_<stem>_<suffix>.<ext>
fn out_name_with(dir: &Path, stem: &str, suffix: &str, ext: &str) -> PathBuf {
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    if short.is_empty() {
        dir.join(format!("chart_{suffix}.{ext}"))
    } else {
        dir.join(format!("chart_{short}_{suffix}.{ext}"))
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags() {
        let a = args(&["data.csv", "--theme", "dark", "--scale", "1.5", "--out", "tmp"]).expect("args");
        assert_eq!(a.input.as_deref(), Some(Path::new("data.csv")));
        assert_eq!(a.theme.name, "dark");
        assert_eq!(a.scale, 1.5);
        assert_eq!(a.out_dir, PathBuf::from("tmp"));
        assert!(a.mock.is_none());
    }

    #[test]
    fn parses_mock_mode() {
        let a = args(&["--range", "7d", "--mock", "school"]).expect("args");
        assert_eq!(a.mock, Some((Scope::School, TimeRange::Week)));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(args(&["--scale", "0"]).is_err());
        assert!(args(&["--scale"]).is_err());
        assert!(args(&["a", "b"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["--mock", "planet"]).is_err());
    }

    #[test]
    fn epoch_labels() {
        assert_eq!(epoch_label("1700000000").as_deref(), Some("2023-11-14"));
        assert_eq!(epoch_label("1700000000000").as_deref(), Some("2023-11-14"));
        assert_eq!(epoch_label("2024"), None);
        assert_eq!(epoch_label("North"), None);
    }

    #[test]
    fn output_names() {
        let p = out_name_with(Path::new("out"), "enrollment_by_region_2024_q3", "pie", "svg");
        assert_eq!(p, Path::new("out").join("chart_enrollment_by_region_pie.svg"));
    }

    #[test]
    fn csv_round_trip_through_charts() {
        let dir = std::env::temp_dir().join(format!("insight-demo-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("mkdir");
        let csv_path = dir.join("grades.csv");
        std::fs::write(&csv_path, "Name,Count\nG1,10\nG2,oops\nG3,30\n").expect("write csv");

        let (labels, values) = load_label_value_csv(&csv_path).expect("load");
        assert_eq!(labels, vec!["G1", "G3"]);
        assert_eq!(values, vec![10.0, 30.0]);

        let svg_opts = SvgOptions::default();
        let raster = SkiaRasterizer::new(RasterOptions { scale: 1.0, draw_labels: false, ..RasterOptions::default() });
        let out = Outputs { dir: &dir, svg: &svg_opts, raster: &raster };
        run_csv(&out, &csv_path).expect("run");
        assert!(dir.join("chart_grades_histogram.svg").exists());
        assert!(dir.join("chart_grades_pie.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
