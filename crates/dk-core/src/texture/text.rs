//! Text decal rasterization
//!
//! Text is drawn onto an off-screen canvas sized to the measured text plus
//! padding. Layers, bottom to top: background shape, blurred drop shadow,
//! text.

use image::{GrayImage, Luma, RgbaImage};

use super::glyphs::{GlyphSource, TextLayout};
use super::style::{BackgroundShape, FontSpec, Rgba, ShadowSpec, TextStyleConfig};
use super::Texture;
use crate::constants::{MAX_TEXT_CANVAS_SIDE, MIN_TEXT_FONT_SIZE, TEXT_PADDING_RATIO};

/// Font and canvas chosen for a piece of text
struct FittedText {
    font: FontSpec,
    layout: TextLayout,
    width: u32,
    height: u32,
}

/// Rasterizes text decals onto a canvas
pub struct TextRasterizer {
    glyphs: Box<dyn GlyphSource>,
}

impl TextRasterizer {
    pub fn new(glyphs: Box<dyn GlyphSource>) -> Self {
        Self { glyphs }
    }

    /// Canvas size for `content`, or `None` for empty text
    ///
    /// Text that would not fit in [`MAX_TEXT_CANVAS_SIDE`] is laid out at a
    /// smaller font size.
    pub fn canvas_size(&mut self, content: &str, style: &TextStyleConfig) -> Option<(u32, u32)> {
        self.fit(content, style).map(|fitted| (fitted.width, fitted.height))
    }

    fn fit(&mut self, content: &str, style: &TextStyleConfig) -> Option<FittedText> {
        if content.is_empty() {
            return None;
        }
        let max_side = MAX_TEXT_CANVAS_SIDE as f32;
        let mut font = style.font();
        for _ in 0..3 {
            let layout = self.glyphs.measure(content, &font);
            let padding = layout.width.max(layout.height) * TEXT_PADDING_RATIO;
            let width = (layout.width + padding * 2.0).ceil();
            let height = (layout.height + padding * 2.0).ceil();
            let longest = width.max(height);
            if longest <= max_side {
                return Some(FittedText {
                    font,
                    layout,
                    width: (width as u32).max(1),
                    height: (height as u32).max(1),
                });
            }

            font.size *= (max_side - 1.0) / longest;
            if font.size < MIN_TEXT_FONT_SIZE {
                break;
            }
            tracing::debug!(
                "Text decal too large at {}px, shrinking font to {:.1}px",
                style.font_size,
                font.size
            );
        }

        tracing::warn!(
            "Text decal of {} characters does not fit a {}px canvas",
            content.chars().count(),
            MAX_TEXT_CANVAS_SIDE
        );
        None
    }

    /// Rasterize `content`; empty text produces no texture
    pub fn rasterize(&mut self, content: &str, style: &TextStyleConfig) -> Option<Texture> {
        let FittedText {
            font,
            layout,
            width,
            height,
        } = self.fit(content, style)?;

        let mut canvas = RgbaImage::new(width, height);
        fill_shape(&mut canvas, style.shape, style.background_color);

        let origin_x = ((width as f32 - layout.width) / 2.0).round() as i32;
        let origin_y = ((height as f32 - layout.height) / 2.0).round() as i32;
        let mut mask = GrayImage::new(width, height);
        self.glyphs.draw(content, &font, &mut |x, y, alpha| {
            let px = x + origin_x;
            let py = y + origin_y;
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                return;
            }
            let pixel = mask.get_pixel_mut(px as u32, py as u32);
            pixel.0[0] = pixel.0[0].max(alpha);
        });

        if let Some(shadow) = style.style.preset().shadow {
            draw_shadow(&mut canvas, &mask, &shadow);
        }
        composite_mask(&mut canvas, &mask, [0, 0], style.text_color);

        tracing::debug!(
            "Rasterized text decal '{}' at {}x{} ({:?})",
            content,
            width,
            height,
            style.style
        );

        match Texture::from_raster(canvas) {
            Ok(texture) => Some(texture),
            Err(e) => {
                tracing::warn!("Text rasterization produced no pixels: {}", e);
                None
            }
        }
    }
}

fn fill_shape(canvas: &mut RgbaImage, shape: BackgroundShape, color: Rgba) {
    let (width, height) = (canvas.width() as f32, canvas.height() as f32);
    let (cx, cy) = (width / 2.0, height / 2.0);
    let (rx, ry) = match shape {
        BackgroundShape::Rectangle => {
            for pixel in canvas.pixels_mut() {
                blend(&mut pixel.0, color, 255);
            }
            return;
        }
        BackgroundShape::Circle => {
            let r = width.min(height) / 2.0;
            (r, r)
        }
        BackgroundShape::Oval => (width / 2.0, height / 2.0),
    };

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let dx = (x as f32 + 0.5 - cx) / rx;
        let dy = (y as f32 + 0.5 - cy) / ry;
        if dx * dx + dy * dy <= 1.0 {
            blend(&mut pixel.0, color, 255);
        }
    }
}

fn draw_shadow(canvas: &mut RgbaImage, mask: &GrayImage, shadow: &ShadowSpec) {
    let blurred = if shadow.blur > 0.0 {
        image::imageops::blur(mask, shadow.blur / 2.0)
    } else {
        mask.clone()
    };
    let offset = [
        shadow.offset[0].round() as i32,
        shadow.offset[1].round() as i32,
    ];
    composite_mask(canvas, &blurred, offset, shadow.color);
}

/// Paint `color` through `mask` shifted by `offset`
fn composite_mask(canvas: &mut RgbaImage, mask: &GrayImage, offset: [i32; 2], color: Rgba) {
    let (width, height) = mask.dimensions();
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let sx = x as i32 - offset[0];
        let sy = y as i32 - offset[1];
        if sx < 0 || sy < 0 || sx >= width as i32 || sy >= height as i32 {
            continue;
        }
        let Luma([coverage]) = *mask.get_pixel(sx as u32, sy as u32);
        if coverage > 0 {
            blend(&mut pixel.0, color, coverage);
        }
    }
}

/// Source-over blend of `color` scaled by `coverage` onto `dst`
fn blend(dst: &mut [u8; 4], color: Rgba, coverage: u8) {
    let src_a = (color[3] as f32 / 255.0) * (coverage as f32 / 255.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for i in 0..3 {
        let src = color[i] as f32 / 255.0;
        let d = dst[i] as f32 / 255.0;
        let out = (src * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = (out * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{BlockGlyphs, TextStyle};
    use approx::assert_relative_eq;

    fn rasterizer() -> TextRasterizer {
        TextRasterizer::new(Box::new(BlockGlyphs::default()))
    }

    fn style(font_size: f32) -> TextStyleConfig {
        TextStyleConfig {
            font_size,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_text_produces_nothing() {
        assert!(rasterizer().rasterize("", &style(20.0)).is_none());
    }

    #[test]
    fn test_canvas_includes_padding() {
        // "Hello" at 20px: 50x20 text, padding 10 on every side
        let texture = rasterizer().rasterize("Hello", &style(20.0)).unwrap();
        assert_eq!(texture.width(), 70);
        assert_eq!(texture.height(), 40);
        assert_relative_eq!(texture.aspect_ratio(), 70.0 / 40.0);
    }

    #[test]
    fn test_new_text_replaces_raster() {
        let mut rasterizer = rasterizer();
        let first = rasterizer.rasterize("Hello", &style(20.0)).unwrap();
        let second = rasterizer.rasterize("Hi", &style(20.0)).unwrap();

        // "Hi": 20x20 text, padding 4
        assert_eq!((second.width(), second.height()), (28, 28));
        assert_relative_eq!(second.aspect_ratio(), 1.0);
        assert_ne!(first.aspect_ratio(), second.aspect_ratio());
    }

    #[test]
    fn test_text_drawn_in_text_color() {
        let config = TextStyleConfig {
            style: TextStyle::Modern,
            text_color: [255, 0, 0, 255],
            background_color: [0, 0, 255, 255],
            font_size: 20.0,
            ..Default::default()
        };
        let texture = rasterizer().rasterize("H", &config).unwrap();
        let raster = texture.raster();
        let center = raster.get_pixel(raster.width() / 2, raster.height() / 2);
        assert_eq!(center.0, [255, 0, 0, 255]);
        assert_eq!(raster.get_pixel(0, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_circle_background_leaves_corners_clear() {
        let config = TextStyleConfig {
            shape: BackgroundShape::Circle,
            style: TextStyle::Modern,
            font_size: 20.0,
            ..Default::default()
        };
        let texture = rasterizer().rasterize("Hello", &config).unwrap();
        let raster = texture.raster();
        assert_eq!(raster.get_pixel(0, 0).0[3], 0);
        assert_eq!(raster.get_pixel(raster.width() / 2, 1).0[3], 255);
    }

    #[test]
    fn test_shadow_darkens_offset_pixels() {
        let plain = TextStyleConfig {
            style: TextStyle::Modern,
            font_size: 20.0,
            ..Default::default()
        };
        let shadowed = TextStyleConfig {
            style: TextStyle::Bold,
            ..plain.clone()
        };
        let mut rasterizer = rasterizer();
        let a = rasterizer.rasterize("H", &plain).unwrap();
        let b = rasterizer.rasterize("H", &shadowed).unwrap();
        assert_eq!(a.raster().dimensions(), b.raster().dimensions());

        let sum = |t: &Texture| -> u64 {
            t.raster().pixels().map(|p| p.0[0] as u64).sum()
        };
        assert!(sum(&b) < sum(&a));
    }

    #[test]
    fn test_long_text_shrinks_to_fit_canvas() {
        let mut rasterizer = rasterizer();
        let content = "A".repeat(500);
        // 64px would need a 22400px wide canvas
        let (width, height) = rasterizer.canvas_size(&content, &style(64.0)).unwrap();
        assert!(width <= MAX_TEXT_CANVAS_SIDE);
        assert!(height <= MAX_TEXT_CANVAS_SIDE);

        let texture = rasterizer.rasterize(&content, &style(64.0)).unwrap();
        assert_eq!((texture.width(), texture.height()), (width, height));
        assert!(texture.aspect_ratio() > 1.0);
    }

    #[test]
    fn test_text_too_long_for_canvas_is_rejected() {
        let content = "A".repeat(2000);
        assert!(rasterizer().canvas_size(&content, &style(64.0)).is_none());
        assert!(rasterizer().rasterize(&content, &style(64.0)).is_none());
    }
}
