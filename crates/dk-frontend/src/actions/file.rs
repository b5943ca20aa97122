//! Design file action handlers

use std::path::PathBuf;

use dk_core::Design;

use crate::state::AppAction;

use super::ActionContext;

/// Handle design file actions
pub fn handle_file_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::NewDesign => handle_new_design(ctx),
        AppAction::SaveDesign(path) => handle_save_design(path, ctx),
        AppAction::LoadDesign(path) => handle_load_design(path, ctx),
        _ => {}
    }
}

fn handle_new_design(ctx: &ActionContext) {
    ctx.app_state.lock().new_design();
    tracing::info!("Started a new design");
}

fn handle_save_design(path: Option<PathBuf>, ctx: &ActionContext) {
    let mut state = ctx.app_state.lock();
    let Some(path) = path.or(state.design_path.clone()) else {
        tracing::warn!("No path to save the design to");
        return;
    };

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| state.design_name.clone());

    let result = Design::capture(name.clone(), &state.store).and_then(|d| d.save(&path));
    match result {
        Ok(()) => {
            tracing::info!("Saved design to {:?}", path);
            state.design_name = name;
            state.design_path = Some(path);
            state.modified = false;
            state.status = None;
        }
        Err(e) => {
            tracing::error!("Failed to save design: {}", e);
            state.status = Some(format!("Save failed: {}", e));
        }
    }
}

fn handle_load_design(path: PathBuf, ctx: &ActionContext) {
    let mut state = ctx.app_state.lock();
    let result = Design::load(&path).and_then(|design| {
        let store = design.restore(&mut state.resolver)?;
        Ok((design.name, store))
    });
    match result {
        Ok((name, store)) => {
            tracing::info!("Loaded design '{}' ({} decals)", name, store.len());
            state.replace_store(store, name, Some(path));
            state.status = None;
        }
        Err(e) => {
            tracing::error!("Failed to load design: {}", e);
            state.status = Some(format!("Load failed: {}", e));
        }
    }
}
