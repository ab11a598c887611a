// File: crates/weightline-core/src/text.rs
// Summary: Text shaping/measurement over Skia textlayout with sensible font fallbacks.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    /// Shape `text` (may contain newlines) into a laid-out paragraph.
    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color, bold);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Pixel size (width of the longest line, total height) of the shaped text.
    pub fn measure(&self, text: &str, size: f32, bold: bool) -> (f32, f32) {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0), bold);
        (p.longest_line(), p.height())
    }

    /// Paint `text` with its top-left corner at (x, y).
    pub fn draw_at(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        bold: bool,
    ) {
        let mut p = self.layout(text, size, color, bold);
        p.paint(canvas, (x, y));
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
