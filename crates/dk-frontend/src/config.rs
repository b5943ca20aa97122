//! Application configuration
//!
//! Persisted as RON under a single key in eframe's storage, so settings
//! survive restarts alongside the window layout.

use dk_core::{RegionTable, TextStyleConfig};
use dk_renderer::ViewerConfig;
use serde::{Deserialize, Serialize};

/// Storage key for the configuration
pub const CONFIG_KEY: &str = "dk_config";

/// UI color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// UI theme
    #[serde(default)]
    pub theme: UiTheme,
    /// Viewer settings (camera, viewport, handle overlay)
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Style used for newly typed text decals
    #[serde(default)]
    pub default_text_style: TextStyleConfig,
    /// Mesh name to region table of the garment model
    #[serde(default)]
    pub regions: RegionTable,
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
    #[error("Failed to parse config: {0}")]
    Deserialize(String),
}

/// Loads and stores [`AppConfig`]
pub struct ConfigManager;

impl ConfigManager {
    /// Serialize a config to RON
    pub fn to_ron(config: &AppConfig) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Parse a config from RON
    pub fn from_ron(source: &str) -> Result<AppConfig, ConfigError> {
        ron::from_str(source).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load the stored config, falling back to defaults
    pub fn load(storage: Option<&dyn eframe::Storage>) -> AppConfig {
        let Some(source) = storage.and_then(|s| s.get_string(CONFIG_KEY)) else {
            return AppConfig::default();
        };
        match Self::from_ron(&source) {
            Ok(config) => {
                tracing::debug!("Loaded config from storage");
                config
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                AppConfig::default()
            }
        }
    }

    /// Write the config to storage
    pub fn save(storage: &mut dyn eframe::Storage, config: &AppConfig) {
        match Self::to_ron(config) {
            Ok(source) => storage.set_string(CONFIG_KEY, source),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_core::{Region, TextStyle};

    #[test]
    fn test_config_round_trip() {
        let mut config = AppConfig::default();
        config.theme = UiTheme::Light;
        config.default_text_style.style = TextStyle::Fancy;
        config.viewer.overlay.handle_radius = 14.0;
        config.regions.insert_mesh("Hoodie_Cuff_L", Region::Arms);

        let source = ConfigManager::to_ron(&config).unwrap();
        assert_eq!(ConfigManager::from_ron(&source).unwrap(), config);
    }

    #[test]
    fn test_missing_sections_default() {
        let config = ConfigManager::from_ron("(theme: Light)").unwrap();
        assert_eq!(config.theme, UiTheme::Light);
        assert_eq!(config.viewer, ViewerConfig::default());
        assert_eq!(
            config.regions.region_for_mesh("Hoodie_Chest"),
            Some(Region::Chest)
        );
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(matches!(
            ConfigManager::from_ron("(theme: Purple)"),
            Err(ConfigError::Deserialize(_))
        ));
    }
}
