// File: crates/insight-render-skia/src/text.rs
// Summary: Tick, legend and title text drawn through Skia textlayout.

use std::borrow::Cow;

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Horizontal anchor for [`TextShaper::draw`], matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, numeric: bool, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        if numeric {
            // Tabular digits keep y-axis labels aligned on their right edge.
            ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        } else {
            ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        }
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    fn layout(&self, text: &str, size: f32, color: skia::Color, numeric: bool, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, numeric, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, numeric: bool) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT, numeric, false).longest_line()
    }

    /// `text`, shortened with a trailing ellipsis when wider than `max_width`.
    pub fn fit<'a>(&self, text: &'a str, max_width: f32, size: f32) -> Cow<'a, str> {
        fit_to_width(text, max_width, |t| self.measure_width(t, size, false))
    }

    /// Draws `text` with its baseline at `y`, anchored horizontally at `x`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        (x, y): (f32, f32),
        anchor: Anchor,
        size: f32,
        color: skia::Color,
        numeric: bool,
        bold: bool,
    ) {
        if text.is_empty() {
            return;
        }
        let mut p = self.layout(text, size, color, numeric, bold);
        let w = p.longest_line();
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - w / 2.0,
            Anchor::End => x - w,
        };
        // Paragraphs paint from their top-left corner; approximate the ascent.
        p.paint(canvas, (left, y - size * 0.8));
    }
}

/// Drop characters from the end of `text` until it plus `…` fits `max_width`.
/// Returns an empty string when not even the ellipsis fits.
pub fn fit_to_width<'a>(text: &'a str, max_width: f32, measure: impl Fn(&str) -> f32) -> Cow<'a, str> {
    if measure(text) <= max_width {
        return Cow::Borrowed(text);
    }
    let mut cut = text.len();
    while let Some((idx, _)) = text[..cut].char_indices().next_back() {
        cut = idx;
        let candidate = format!("{}\u{2026}", text[..cut].trim_end());
        if measure(&candidate) <= max_width {
            return Cow::Owned(candidate);
        }
    }
    Cow::Borrowed("")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Five units per character keeps the arithmetic obvious.
    fn mono(text: &str) -> f32 {
        text.chars().count() as f32 * 5.0
    }

    #[test]
    fn short_text_is_untouched() {
        assert!(matches!(fit_to_width("Present", 35.0, mono), Cow::Borrowed("Present")));
    }

    #[test]
    fn long_text_is_ellipsized_to_fit() {
        assert_eq!(fit_to_width("Excused absence", 40.0, mono), "Excused\u{2026}");
        assert_eq!(fit_to_width("ab cd", 20.0, mono), "ab\u{2026}");
    }

    #[test]
    fn nothing_fits() {
        assert_eq!(fit_to_width("Absent", 3.0, mono), "");
    }

    #[test]
    fn multibyte_labels_cut_on_char_boundaries() {
        assert_eq!(fit_to_width("Éléonore", 20.0, mono), "Élé\u{2026}");
    }
}
