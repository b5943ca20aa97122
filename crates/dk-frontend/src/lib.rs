//! Decal Kit Frontend
//!
//! egui-based editor for placing image and text decals on a garment.

pub mod actions;
pub mod app;
pub mod config;
pub mod panels;
pub mod state;
pub mod texture_cache;
pub mod theme;

// Re-exports for convenience
pub use app::DecalApp;
pub use config::{AppConfig, ConfigError, ConfigManager, UiTheme};
pub use state::{AppAction, AppState, SharedAppState};
