//! Color palette for the UI theme

use egui::Color32;

/// Colors of one theme variant
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Viewport and text field background
    pub bg_base: Color32,
    /// Panel background
    pub bg_panel: Color32,
    /// Popups and windows
    pub bg_elevated: Color32,
    /// Input widgets
    pub bg_input: Color32,
    /// Hovered widgets
    pub bg_hover: Color32,
    /// Subtle panel boundary
    pub border_subtle: Color32,
    /// Normal divider line
    pub border_normal: Color32,
    /// Primary text
    pub text_primary: Color32,
    /// Labels and hints
    pub text_secondary: Color32,
    /// Selection and active widgets
    pub accent: Color32,
    /// Selection background
    pub accent_subtle: Color32,
    /// Garment wireframe in the viewport
    pub garment: Color32,
}

/// Dark theme
pub const DARK: ThemeColors = ThemeColors {
    bg_base: Color32::from_rgb(24, 24, 28),
    bg_panel: Color32::from_rgb(30, 30, 35),
    bg_elevated: Color32::from_rgb(38, 38, 44),
    bg_input: Color32::from_rgb(45, 45, 52),
    bg_hover: Color32::from_rgb(55, 55, 65),
    border_subtle: Color32::from_rgb(50, 50, 58),
    border_normal: Color32::from_rgb(65, 65, 75),
    text_primary: Color32::from_rgb(230, 230, 235),
    text_secondary: Color32::from_rgb(160, 160, 170),
    accent: Color32::from_rgb(66, 150, 250),
    accent_subtle: Color32::from_rgba_premultiplied(66, 150, 250, 30),
    garment: Color32::from_rgb(120, 120, 135),
};

/// Light theme
pub const LIGHT: ThemeColors = ThemeColors {
    bg_base: Color32::from_rgb(245, 245, 248),
    bg_panel: Color32::from_rgb(250, 250, 252),
    bg_elevated: Color32::from_rgb(255, 255, 255),
    bg_input: Color32::from_rgb(240, 240, 244),
    bg_hover: Color32::from_rgb(230, 230, 236),
    border_subtle: Color32::from_rgb(220, 220, 226),
    border_normal: Color32::from_rgb(200, 200, 210),
    text_primary: Color32::from_rgb(30, 30, 35),
    text_secondary: Color32::from_rgb(90, 90, 100),
    accent: Color32::from_rgb(45, 120, 220),
    accent_subtle: Color32::from_rgba_premultiplied(45, 120, 220, 40),
    garment: Color32::from_rgb(150, 150, 165),
};

/// Warning text (status bar)
pub const WARNING: Color32 = Color32::from_rgb(255, 180, 60);

/// Convert a linear `[r, g, b, a]` config color
pub fn from_rgba_f32(color: [f32; 4]) -> Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Create a semi-transparent version of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_f32_clamps() {
        assert_eq!(
            from_rgba_f32([1.0, 0.0, 2.0, 1.0]),
            Color32::from_rgb(255, 0, 255)
        );
    }
}
