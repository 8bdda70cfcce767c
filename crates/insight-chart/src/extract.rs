// File: crates/insight-chart/src/extract.rs
// Summary: Splits an agent response into prose and embedded chart specs.
// Notes:
// - A chart island is `<chart>{json}</chart>` or a fenced block opened with
//   ```chart and closed with ```. Islands whose body is not a valid ChartSpec
//   stay in the text verbatim, delimiters included.

use tracing::{debug, warn};

use crate::spec::ChartSpec;

const TAG_OPEN: &str = "<chart>";
const TAG_CLOSE: &str = "</chart>";
const FENCE_OPEN: &str = "```chart";
const FENCE_CLOSE: &str = "```";

#[derive(Clone, Debug, PartialEq)]
pub enum ResponseSegment {
    Text(String),
    Chart(ChartSpec),
}

/// Islands located in the input, as byte ranges.
struct Island {
    start: usize,
    body_start: usize,
    body_end: usize,
    end: usize,
}

pub fn extract_segments(text: &str) -> Vec<ResponseSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    while let Some(island) = next_island(text, cursor) {
        let body = &text[island.body_start..island.body_end];
        match ChartSpec::from_json(body) {
            Ok(spec) => {
                push_text(&mut segments, &text[cursor..island.start]);
                debug!(kind = spec.kind(), "extracted chart spec");
                segments.push(ResponseSegment::Chart(spec));
            }
            Err(err) => {
                warn!(error = %err, "chart island is not a valid spec; keeping it as text");
                push_text(&mut segments, &text[cursor..island.end]);
            }
        }
        cursor = island.end;
    }
    push_text(&mut segments, &text[cursor..]);
    segments
}

/// Specs only, in order of appearance.
pub fn extract_charts(text: &str) -> Vec<ChartSpec> {
    extract_segments(text)
        .into_iter()
        .filter_map(|s| match s {
            ResponseSegment::Chart(c) => Some(c),
            ResponseSegment::Text(_) => None,
        })
        .collect()
}

fn push_text(segments: &mut Vec<ResponseSegment>, s: &str) {
    if s.is_empty() {
        return;
    }
    if let Some(ResponseSegment::Text(prev)) = segments.last_mut() {
        prev.push_str(s);
    } else {
        segments.push(ResponseSegment::Text(s.to_string()));
    }
}

fn next_island(text: &str, from: usize) -> Option<Island> {
    let mut search = from;
    while search < text.len() {
        let rest = &text[search..];
        let tag = rest.find(TAG_OPEN).map(|p| p + search);
        let fence = rest.find(FENCE_OPEN).map(|p| p + search);
        let (start, found) = match (tag, fence) {
            (Some(t), Some(f)) if t < f => (t, tag_island(text, t)),
            (Some(t), None) => (t, tag_island(text, t)),
            (_, Some(f)) => (f, fence_island(text, f)),
            (None, None) => return None,
        };
        if found.is_some() {
            return found;
        }
        // Unterminated, or ```chartfoo: not an island, keep looking past it.
        search = start + 1;
    }
    None
}

fn tag_island(text: &str, start: usize) -> Option<Island> {
    let body_start = start + TAG_OPEN.len();
    let body_end = text[body_start..].find(TAG_CLOSE)? + body_start;
    Some(Island { start, body_start, body_end, end: body_end + TAG_CLOSE.len() })
}

/// The info string must be exactly `chart`, i.e. followed by whitespace.
fn fence_island(text: &str, start: usize) -> Option<Island> {
    let body_start = start + FENCE_OPEN.len();
    if !text[body_start..].starts_with(char::is_whitespace) {
        return None;
    }
    let body_end = text[body_start..].find(FENCE_CLOSE)? + body_start;
    Some(Island { start, body_start, body_end, end: body_end + FENCE_CLOSE.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIE: &str = r#"{"type":"pie","labels":["a","b"],"values":[1,2]}"#;

    #[test]
    fn tag_island_is_extracted() {
        let text = format!("Here you go:\n<chart>{PIE}</chart>\nDone.");
        let segs = extract_segments(&text);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], ResponseSegment::Text("Here you go:\n".into()));
        assert!(matches!(segs[1], ResponseSegment::Chart(ChartSpec::Pie(_))));
        assert_eq!(segs[2], ResponseSegment::Text("\nDone.".into()));
    }

    #[test]
    fn fenced_island_is_extracted() {
        let text = format!("```chart\n{PIE}\n```");
        assert_eq!(extract_charts(&text).len(), 1);
    }

    #[test]
    fn malformed_island_stays_text() {
        let text = "before <chart>{not json}</chart> after";
        let segs = extract_segments(text);
        assert_eq!(segs, vec![ResponseSegment::Text(text.to_string())]);
    }

    #[test]
    fn other_fences_and_unterminated_islands_are_text() {
        let text = "```charts\nx\n``` and <chart>{";
        assert_eq!(extract_segments(text), vec![ResponseSegment::Text(text.to_string())]);
        assert!(extract_segments("").is_empty());
    }

    #[test]
    fn multiple_islands_keep_order() {
        let line = r#"{"type":"line","y_series":[{"name":"x","values":[1,2]}]}"#;
        let text = format!("<chart>{PIE}</chart> then ```chart {line}```");
        let charts = extract_charts(&text);
        assert_eq!(charts.iter().map(|c| c.kind()).collect::<Vec<_>>(), vec!["pie", "line"]);
    }
}
