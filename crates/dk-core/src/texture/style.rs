//! Text decal styling

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FONT_SIZE;

/// RGBA color, 8 bits per channel
pub type Rgba = [u8; 4];

/// Named text style preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    #[default]
    Classic,
    Bold,
    Fancy,
    Modern,
}

/// Generic font family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    SansSerif,
    Cursive,
    Monospace,
}

/// Font selection for a text layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    /// CSS-style weight (100..=900)
    pub weight: u16,
    pub italic: bool,
    /// Font size in pixels
    pub size: f32,
}

/// Drop shadow drawn under text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    /// Blur radius in pixels
    pub blur: f32,
    /// Offset in pixels (x right, y down)
    pub offset: [f32; 2],
    pub color: Rgba,
}

/// Font and shadow parameters of a style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePreset {
    pub family: FontFamily,
    pub weight: u16,
    pub italic: bool,
    pub shadow: Option<ShadowSpec>,
}

impl TextStyle {
    pub const ALL: [TextStyle; 4] = [
        TextStyle::Classic,
        TextStyle::Bold,
        TextStyle::Fancy,
        TextStyle::Modern,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextStyle::Classic => "Classic",
            TextStyle::Bold => "Bold",
            TextStyle::Fancy => "Fancy",
            TextStyle::Modern => "Modern",
        }
    }

    pub fn preset(&self) -> StylePreset {
        match self {
            TextStyle::Classic => StylePreset {
                family: FontFamily::Serif,
                weight: 400,
                italic: false,
                shadow: Some(ShadowSpec {
                    blur: 2.0,
                    offset: [1.0, 1.0],
                    color: [0, 0, 0, 77],
                }),
            },
            TextStyle::Bold => StylePreset {
                family: FontFamily::SansSerif,
                weight: 700,
                italic: false,
                shadow: Some(ShadowSpec {
                    blur: 4.0,
                    offset: [2.0, 2.0],
                    color: [0, 0, 0, 128],
                }),
            },
            TextStyle::Fancy => StylePreset {
                family: FontFamily::Cursive,
                weight: 400,
                italic: true,
                shadow: Some(ShadowSpec {
                    blur: 6.0,
                    offset: [3.0, 3.0],
                    color: [0, 0, 0, 102],
                }),
            },
            TextStyle::Modern => StylePreset {
                family: FontFamily::SansSerif,
                weight: 300,
                italic: false,
                shadow: None,
            },
        }
    }
}

/// Background drawn behind text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundShape {
    #[default]
    Rectangle,
    Circle,
    Oval,
}

impl BackgroundShape {
    pub const ALL: [BackgroundShape; 3] = [
        BackgroundShape::Rectangle,
        BackgroundShape::Circle,
        BackgroundShape::Oval,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BackgroundShape::Rectangle => "Rectangle",
            BackgroundShape::Circle => "Circle",
            BackgroundShape::Oval => "Oval",
        }
    }
}

/// Complete styling of a text decal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyleConfig {
    pub style: TextStyle,
    pub shape: BackgroundShape,
    pub text_color: Rgba,
    pub background_color: Rgba,
    pub font_size: f32,
}

impl Default for TextStyleConfig {
    fn default() -> Self {
        Self {
            style: TextStyle::default(),
            shape: BackgroundShape::default(),
            text_color: [0, 0, 0, 255],
            background_color: [255, 255, 255, 255],
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl TextStyleConfig {
    /// Font for laying out text in this style
    pub fn font(&self) -> FontSpec {
        let preset = self.style.preset();
        FontSpec {
            family: preset.family,
            weight: preset.weight,
            italic: preset.italic,
            size: self.font_size.max(1.0),
        }
    }
}
