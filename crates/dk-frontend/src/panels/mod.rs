//! UI panels

mod decal_panel;
mod viewport;

pub use decal_panel::DecalPanel;
pub use viewport::ViewportPanel;

use crate::state::SharedAppState;

/// Panel trait for the editor's UI areas
pub trait Panel {
    /// Panel name
    fn name(&self) -> &str;

    /// Draw the panel UI
    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState);
}
