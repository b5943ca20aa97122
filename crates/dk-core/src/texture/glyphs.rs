//! Glyph shaping and coverage rasterization

use cosmic_text::{
    Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, Style, SwashCache, Weight,
};

use super::style::{FontFamily, FontSpec};
use crate::constants::TEXT_LINE_HEIGHT;

/// Measured size of laid out text, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    pub width: f32,
    pub height: f32,
}

/// Shapes text and reports glyph coverage
pub trait GlyphSource: Send {
    /// Bounding box of `text` laid out on one line per `\n`
    fn measure(&mut self, text: &str, font: &FontSpec) -> TextLayout;

    /// Report coverage of every covered pixel, relative to the layout's
    /// top-left corner, as `plot(x, y, alpha)`
    fn draw(&mut self, text: &str, font: &FontSpec, plot: &mut dyn FnMut(i32, i32, u8));
}

/// Glyph source backed by cosmic-text and the system font database
pub struct CosmicGlyphs {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl CosmicGlyphs {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    fn layout(&mut self, text: &str, font: &FontSpec) -> Buffer {
        let metrics = Metrics::new(font.size, font.size * TEXT_LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);

        let family = match font.family {
            FontFamily::Serif => Family::Serif,
            FontFamily::SansSerif => Family::SansSerif,
            FontFamily::Cursive => Family::Cursive,
            FontFamily::Monospace => Family::Monospace,
        };
        let style = if font.italic {
            Style::Italic
        } else {
            Style::Normal
        };
        let attrs = Attrs::new()
            .family(family)
            .weight(Weight(font.weight))
            .style(style);

        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

impl Default for CosmicGlyphs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSource for CosmicGlyphs {
    fn measure(&mut self, text: &str, font: &FontSpec) -> TextLayout {
        let line_height = font.size * TEXT_LINE_HEIGHT;
        let buffer = self.layout(text, font);

        let mut width = 0.0f32;
        let mut lines = 0usize;
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                width = width.max(glyph.x + glyph.w);
            }
            lines += 1;
        }
        let height = lines.max(1) as f32 * line_height;

        TextLayout {
            width: width.ceil(),
            height: height.ceil(),
        }
    }

    fn draw(&mut self, text: &str, font: &FontSpec, plot: &mut dyn FnMut(i32, i32, u8)) {
        let mut buffer = self.layout(text, font);
        let white = Color::rgba(255, 255, 255, 255);
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            white,
            |x, y, w, h, color| {
                let alpha = color.a();
                if alpha == 0 {
                    return;
                }
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        plot(x + dx, y + dy, alpha);
                    }
                }
            },
        );
    }
}

/// Monospaced block glyphs with exact metrics
///
/// Every character occupies `size * advance` by `size` pixels and is drawn
/// as a solid block inset by one pixel. Useful where no font database is
/// available and wherever exact text metrics matter.
#[derive(Debug, Clone, Copy)]
pub struct BlockGlyphs {
    /// Horizontal advance as a fraction of the font size
    pub advance: f32,
}

impl Default for BlockGlyphs {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl BlockGlyphs {
    fn cell(&self, font: &FontSpec) -> (f32, f32) {
        (font.size * self.advance, font.size)
    }
}

impl GlyphSource for BlockGlyphs {
    fn measure(&mut self, text: &str, font: &FontSpec) -> TextLayout {
        let (cell_w, cell_h) = self.cell(font);
        let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let rows = text.lines().count().max(1);
        TextLayout {
            width: columns as f32 * cell_w,
            height: rows as f32 * cell_h,
        }
    }

    fn draw(&mut self, text: &str, font: &FontSpec, plot: &mut dyn FnMut(i32, i32, u8)) {
        let (cell_w, cell_h) = self.cell(font);
        for (row, line) in text.lines().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let x0 = (col as f32 * cell_w) as i32 + 1;
                let y0 = (row as f32 * cell_h) as i32 + 1;
                let x1 = ((col + 1) as f32 * cell_w) as i32 - 1;
                let y1 = ((row + 1) as f32 * cell_h) as i32 - 1;
                for y in y0..y1 {
                    for x in x0..x1 {
                        plot(x, y, 255);
                    }
                }
            }
        }
    }
}
