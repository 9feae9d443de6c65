// File: crates/price-chart-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout: tick labels, rotated labels, tooltip lines.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::style::Color;

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
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color.to_skia());
        ts.set_font_families(&["Helvetica Neue", "Helvetica", "Arial", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        let p = self.layout(text, size, Color::rgba(0, 0, 0, 0.0));
        // width of the longest line
        p.longest_line()
    }

    /// Draw with the baseline at `y`, left edge at `x`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let mut p = self.layout(text, size, color);
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }

    /// Draw with the right edge at `x`.
    pub fn draw_right(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        p.paint(canvas, (x - w, y - size * 0.8));
    }

    /// Draw rotated counter-clockwise by `degrees` so the text ends at the anchor
    /// `(x, y)` and runs down-left from it, as under a category axis.
    pub fn draw_rotated_end(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, degrees: f32, size: f32, color: Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(-degrees, None);
        p.paint(canvas, (-w, 0.0));
        canvas.restore();
    }

    /// Vertical room needed below an axis for `width_px` of text rotated by `degrees`.
    pub fn rotated_extent(width_px: f32, size: f32, degrees: f32) -> f32 {
        let r = degrees.to_radians();
        width_px * r.sin().abs() + size * r.cos().abs()
    }
}
