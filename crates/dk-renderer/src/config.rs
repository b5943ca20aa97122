//! Viewer configuration structures
//!
//! This module provides configurable settings for the viewport that can be
//! serialized and loaded from configuration files.

use serde::{Deserialize, Serialize};

/// Viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
    /// Outline every placed decal, not only the selected one
    pub outline_all: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::dark()
    }
}

impl ViewportConfig {
    /// Create dark theme viewport config
    pub fn dark() -> Self {
        Self {
            background_color: [0.15, 0.15, 0.18, 1.0],
            outline_all: false,
        }
    }

    /// Create light theme viewport config
    pub fn light() -> Self {
        Self {
            background_color: [0.92, 0.92, 0.94, 1.0],
            outline_all: false,
        }
    }
}

/// Camera default configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial distance from the garment
    pub distance: f32,
    /// Pan sensitivity multiplier
    pub pan_sensitivity: f32,
    /// Zoom sensitivity multiplier
    pub zoom_sensitivity: f32,
    /// Orbit sensitivity multiplier
    pub orbit_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 40.0,
            near_plane: 0.01,
            far_plane: 100.0,
            distance: 2.0,
            pan_sensitivity: 0.002,
            zoom_sensitivity: 0.1,
            orbit_sensitivity: 0.005,
        }
    }
}

/// Decal handle overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    /// Handle button radius in pixels
    pub handle_radius: f32,
    /// Selection outline width in pixels
    pub outline_width: f32,
    /// Selection outline color (RGBA)
    pub outline_color: [f32; 4],
    /// Handle fill color (RGBA)
    pub handle_color: [f32; 4],
    /// Delete handle fill color (RGBA)
    pub delete_color: [f32; 4],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            handle_radius: 11.0,
            outline_width: 1.5,
            outline_color: [0.26, 0.59, 0.98, 1.0],
            handle_color: [0.15, 0.15, 0.18, 0.9],
            delete_color: [0.85, 0.25, 0.25, 0.95],
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewerConfig {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Handle overlay settings
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl ViewerConfig {
    /// Apply dark theme colors
    pub fn apply_dark_theme(&mut self) {
        self.viewport = ViewportConfig {
            outline_all: self.viewport.outline_all,
            ..ViewportConfig::dark()
        };
    }

    /// Apply light theme colors
    pub fn apply_light_theme(&mut self) {
        self.viewport = ViewportConfig {
            outline_all: self.viewport.outline_all,
            ..ViewportConfig::light()
        };
    }
}
