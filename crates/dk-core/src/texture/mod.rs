//! Texture sources and their resolution into rasters
//!
//! A decal's content is either an uploaded image or a line of styled text.
//! [`TextureResolver`] turns a [`TextureSource`] into a [`Texture`]: images
//! are already decoded, text goes through the [`TextRasterizer`].

mod decode;
mod glyphs;
mod style;
mod text;

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

pub use decode::{decode_file, decode_image, encode_png};
pub use glyphs::{BlockGlyphs, CosmicGlyphs, GlyphSource, TextLayout};
pub use style::{
    BackgroundShape, FontFamily, FontSpec, Rgba, ShadowSpec, StylePreset, TextStyle,
    TextStyleConfig,
};
pub use text::TextRasterizer;

/// Texture-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
    #[error("Image has no pixels")]
    EmptyImage,
}

/// A decoded or rasterized decal texture
#[derive(Clone)]
pub struct Texture {
    raster: Arc<RgbaImage>,
    aspect_ratio: f32,
}

impl Texture {
    /// Wrap a raster, rejecting zero-sized images
    pub fn from_raster(raster: RgbaImage) -> Result<Self, TextureError> {
        Self::from_shared(Arc::new(raster))
    }

    /// Wrap an already shared raster
    pub fn from_shared(raster: Arc<RgbaImage>) -> Result<Self, TextureError> {
        let (width, height) = raster.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage);
        }
        Ok(Self {
            aspect_ratio: width as f32 / height as f32,
            raster,
        })
    }

    pub fn raster(&self) -> &Arc<RgbaImage> {
        &self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Native width / height of the raster
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("aspect_ratio", &self.aspect_ratio)
            .finish()
    }
}

/// Kind of a [`TextureSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    None,
    Image,
    Text,
}

/// Content assigned to a decal
#[derive(Clone, Default)]
pub enum TextureSource {
    #[default]
    None,
    Image {
        raster: Arc<RgbaImage>,
    },
    Text {
        content: String,
        style: TextStyleConfig,
    },
}

impl TextureSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            TextureSource::None => SourceKind::None,
            TextureSource::Image { .. } => SourceKind::Image,
            TextureSource::Text { .. } => SourceKind::Text,
        }
    }

    /// Text source with the given style
    pub fn text(content: impl Into<String>, style: TextStyleConfig) -> Self {
        TextureSource::Text {
            content: content.into(),
            style,
        }
    }

    /// Image source sharing the texture's raster
    pub fn image(texture: &Texture) -> Self {
        TextureSource::Image {
            raster: texture.raster.clone(),
        }
    }
}

impl fmt::Debug for TextureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureSource::None => f.write_str("None"),
            TextureSource::Image { raster } => f
                .debug_struct("Image")
                .field("width", &raster.width())
                .field("height", &raster.height())
                .finish(),
            TextureSource::Text { content, style } => f
                .debug_struct("Text")
                .field("content", content)
                .field("style", style)
                .finish(),
        }
    }
}

/// Resolves texture sources into rasters
pub struct TextureResolver {
    text: TextRasterizer,
}

impl TextureResolver {
    /// Resolver using the given glyph source for text
    pub fn new(glyphs: Box<dyn GlyphSource>) -> Self {
        Self {
            text: TextRasterizer::new(glyphs),
        }
    }

    /// Resolver shaping text with the system's installed fonts
    pub fn with_system_fonts() -> Self {
        Self::new(Box::new(CosmicGlyphs::new()))
    }

    /// Produce the texture for a source; `None` when there is nothing to draw
    pub fn resolve(&mut self, source: &TextureSource) -> Option<Texture> {
        match source {
            TextureSource::None => None,
            TextureSource::Image { raster } => match Texture::from_shared(raster.clone()) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    tracing::warn!("Ignoring image source: {}", e);
                    None
                }
            },
            TextureSource::Text { content, style } => self.text.rasterize(content, style),
        }
    }
}
