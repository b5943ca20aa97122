//! Action handling module
//!
//! This module contains the action dispatch system for the decal editor.
//! Actions are queued in AppState and processed each frame.

mod decal;
mod file;

use crate::state::{AppAction, SharedAppState};

pub use decal::handle_decal_action;
pub use file::handle_file_action;

/// Context for action handlers
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
}

impl<'a> ActionContext<'a> {
    pub fn new(app_state: &'a SharedAppState) -> Self {
        Self { app_state }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    match action {
        // File actions
        AppAction::NewDesign | AppAction::SaveDesign(_) | AppAction::LoadDesign(_) => {
            handle_file_action(action, ctx);
        }

        // Decal actions
        AppAction::SelectDecal(_)
        | AppAction::LoadImage { .. }
        | AppAction::SetText { .. }
        | AppAction::SetVisibility { .. }
        | AppAction::UpdateTransform { .. }
        | AppAction::ResetTransform(_)
        | AppAction::ClearDecal(_)
        | AppAction::Duplicate(_)
        | AppAction::RemoveDuplicate(_) => {
            handle_decal_action(action, ctx);
        }
    }
}
