// File: crates/insight-markdown/src/lib.rs
// Summary: Lightweight markdown-to-HTML renderer for agent responses.

//! Pipeline: the whole text is HTML-escaped, fenced code blocks are cut out of
//! the escaped text (their bodies are escaped a second time), inline markup is
//! rewritten, and a line scanner emits block elements. Code is held in a
//! placeholder store until the very end so no later pass can touch it.

pub mod block;
pub mod escape;
pub mod fence;
pub mod inline;
pub mod protect;

use tracing::debug;

pub use block::Align;
pub use escape::escape_html;

/// Stateless renderer. Safe to share between threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let input = protect::reserve_delimiters(input);
        let mut store = protect::Protected::default();

        let text = escape_html(&input);
        let text = fence::extract_code_blocks(&text, &mut store);
        let text = inline::render_inline(&text, &mut store);
        let html = block::render_blocks(&text);
        let html = store.restore(&html);

        debug!(input_len = input.len(), output_len = html.len(), protected = store.len(), "rendered markdown");
        html
    }
}

/// Render optional text; `None` and `""` both produce an empty string.
pub fn render_markdown(input: Option<&str>) -> String {
    input.map(|text| MarkdownRenderer.render(text)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(s: &str) -> String {
        render_markdown(Some(s))
    }

    #[test]
    fn empty_input() {
        assert_eq!(render_markdown(None), "");
        assert_eq!(md(""), "");
    }

    #[test]
    fn plain_paragraph() {
        assert_eq!(md("hello world"), "<p>hello world</p>");
    }

    #[test]
    fn script_is_escaped() {
        assert_eq!(md("<script>"), "<p>&lt;script&gt;</p>");
    }

    #[test]
    fn list_closes_before_blank_line() {
        assert_eq!(md("- a\n- b\n\nc"), "<ul><li>a</li><li>b</li></ul><br/><p>c</p>");
    }

    #[test]
    fn aligned_table() {
        assert_eq!(
            md("| A | B |\n|---|---:|\n| 1 | 2 |"),
            concat!(
                r#"<table class="md-table"><thead><tr><th style="text-align:left">A</th><th style="text-align:right">B</th></tr></thead>"#,
                r#"<tbody><tr><td style="text-align:left">1</td><td style="text-align:right">2</td></tr></tbody></table>"#
            )
        );
    }

    #[test]
    fn fenced_block_body_is_escaped_twice_and_untouched() {
        let html = md("Before\n```html\n<b>**x**</b> | y\n- z\n```\nAfter");
        assert_eq!(
            html,
            "<p>Before</p><p><pre><code>&amp;lt;b&amp;gt;**x**&amp;lt;/b&amp;gt; | y\n- z\n</code></pre></p><p>After</p>"
        );
    }

    #[test]
    fn fenced_less_than_is_double_escaped() {
        assert_eq!(md("```\na < b\n```"), "<p><pre><code>a &amp;lt; b\n</code></pre></p>");
    }

    #[test]
    fn aligned_table_with_spaced_separator() {
        assert_eq!(
            md("| A | B |\n| --- | ---: |\n| 1 | 2 |"),
            concat!(
                r#"<table class="md-table"><thead><tr><th style="text-align:left">A</th><th style="text-align:right">B</th></tr></thead>"#,
                r#"<tbody><tr><td style="text-align:left">1</td><td style="text-align:right">2</td></tr></tbody></table>"#
            )
        );
    }

    #[test]
    fn inline_code_in_table_cell_keeps_pipes_out_of_layout() {
        let html = md("a | b\n--|--\n`x` | **y**");
        assert!(html.contains(r#"<td style="text-align:left"><code>x</code></td>"#), "{html}");
        assert!(html.contains("<strong>y</strong>"), "{html}");
    }

    #[test]
    fn headings_and_emphasis() {
        assert_eq!(md("## Results for *Q3*"), "<h2>Results for <em>Q3</em></h2>");
        assert_eq!(md("**Total:** 12"), "<p><strong>Total:</strong> 12</p>");
    }

    #[test]
    fn star_list_is_not_italic() {
        assert_eq!(md("* one\n* two"), "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn reserved_delimiters_cannot_forge_placeholders() {
        let html = md("```a```x \u{E000}0\u{E001}");
        assert_eq!(html, "<p><pre><code></code></pre>x \u{FFFD}0\u{FFFD}</p>");
    }
}
