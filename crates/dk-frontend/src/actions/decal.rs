//! Decal action handlers

use dk_core::TextureSource;

use crate::state::AppAction;

use super::ActionContext;

/// Handle decal editing actions
pub fn handle_decal_action(action: AppAction, ctx: &ActionContext) {
    let mut guard = ctx.app_state.lock();
    let state = &mut *guard;

    match action {
        AppAction::SelectDecal(id) => state.select(id),
        AppAction::LoadImage { decal, path } => {
            if state.store.contains(decal) {
                tracing::info!("Loading image {:?} for decal {}", path, decal);
                state.decodes.spawn(decal, path);
            }
        }
        AppAction::SetText {
            decal,
            content,
            style,
        } => {
            let source = TextureSource::text(content, style.clone());
            if state
                .store
                .set_texture_source(decal, source, &mut state.resolver)
            {
                state.text_style = style;
                state.modified = true;
            }
        }
        AppAction::SetVisibility { decal, visible } => {
            if state.store.set_visibility(decal, visible) {
                state.modified = true;
            }
        }
        AppAction::UpdateTransform { decal, update } => {
            if state.store.set_transform(decal, update) {
                state.modified = true;
            }
        }
        AppAction::ResetTransform(decal) => {
            if state.store.reset_transform(decal) {
                state.modified = true;
            }
        }
        AppAction::ClearDecal(decal) => {
            state.decodes.cancel(decal);
            if state.store.clear(decal) {
                state.modified = true;
            }
        }
        AppAction::Duplicate(decal) => {
            if let Some(copy) = state.store.duplicate(decal) {
                state.select(Some(copy));
                state.modified = true;
            }
        }
        AppAction::RemoveDuplicate(decal) => {
            if state.store.remove_duplicate(decal).is_some() {
                state.decodes.cancel(decal);
                tracing::debug!("Removed decal {}", decal);
                if state.selected == Some(decal) {
                    state.selected = None;
                }
                state.modified = true;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SharedAppState, create_shared_state, test_state};
    use dk_core::{Region, SourceKind, TextStyle, TextStyleConfig, Texture, TransformUpdate};
    use glam::Vec3;
    use image::RgbaImage;

    fn shared() -> SharedAppState {
        create_shared_state(test_state())
    }

    fn run(shared: &SharedAppState, action: AppAction) {
        handle_decal_action(action, &ActionContext::new(shared));
    }

    #[test]
    fn test_set_text_shows_decal() {
        let shared = shared();
        let id = shared.lock().store.primary(Region::Chest);
        run(
            &shared,
            AppAction::SetText {
                decal: id,
                content: "Hello".into(),
                style: TextStyleConfig::default(),
            },
        );

        let state = shared.lock();
        let instance = state.store.get(id).unwrap();
        assert!(instance.visible);
        assert_eq!(instance.source.kind(), SourceKind::Text);
        assert!(state.modified);
    }

    #[test]
    fn test_set_text_remembers_style() {
        let shared = shared();
        let id = shared.lock().store.primary(Region::Back);
        let style = TextStyleConfig {
            style: TextStyle::Fancy,
            font_size: 40.0,
            ..Default::default()
        };
        run(
            &shared,
            AppAction::SetText {
                decal: id,
                content: "10".into(),
                style: style.clone(),
            },
        );
        assert_eq!(shared.lock().text_style, style);

        // Unknown decals leave the remembered style alone
        run(
            &shared,
            AppAction::SetText {
                decal: dk_core::DecalId::new(),
                content: "x".into(),
                style: TextStyleConfig::default(),
            },
        );
        assert_eq!(shared.lock().text_style, style);
    }

    #[test]
    fn test_clear_discards_running_decode() {
        let shared = shared();
        let id = shared.lock().store.primary(Region::Chest);
        let ticket = shared.lock().decodes.start(id);

        run(&shared, AppAction::ClearDecal(id));
        let texture = Texture::from_raster(RgbaImage::new(4, 4)).unwrap();
        shared.lock().decodes.finish(ticket, Ok(texture));

        let mut state = shared.lock();
        state.apply_decoded();
        let instance = state.store.get(id).unwrap();
        assert!(!instance.visible);
        assert!(!instance.has_content());
        assert_eq!(state.decodes.pending(), 0);
    }

    #[test]
    fn test_duplicate_selects_copy_and_remove_deselects() {
        let shared = shared();
        let id = shared.lock().store.primary(Region::Arms);
        run(&shared, AppAction::Duplicate(id));

        let copy = shared.lock().selected.unwrap();
        assert_ne!(copy, id);

        run(&shared, AppAction::RemoveDuplicate(copy));
        let state = shared.lock();
        assert_eq!(state.selected, None);
        assert!(!state.store.contains(copy));
    }

    #[test]
    fn test_primary_survives_remove() {
        let shared = shared();
        let id = shared.lock().store.primary(Region::Back);
        run(&shared, AppAction::SelectDecal(Some(id)));
        run(&shared, AppAction::RemoveDuplicate(id));

        let state = shared.lock();
        assert!(state.store.contains(id));
        assert_eq!(state.selected, Some(id));
    }

    #[test]
    fn test_numeric_transform_then_reset() {
        let shared = shared();
        let id = shared.lock().store.primary(Region::Front);
        let default = shared.lock().store.transform(id).unwrap();
        run(
            &shared,
            AppAction::UpdateTransform {
                decal: id,
                update: TransformUpdate::position(Vec3::new(0.1, 0.2, 0.3)),
            },
        );
        assert_eq!(
            shared.lock().store.transform(id).unwrap().position,
            Vec3::new(0.1, 0.2, 0.3)
        );

        run(&shared, AppAction::ResetTransform(id));
        assert_eq!(shared.lock().store.transform(id).unwrap(), default);
    }

    #[test]
    fn test_load_image_for_unknown_decal_ignored() {
        let shared = shared();
        run(
            &shared,
            AppAction::LoadImage {
                decal: dk_core::DecalId::new(),
                path: "/nonexistent.png".into(),
            },
        );
        assert_eq!(shared.lock().decodes.pending(), 0);
    }
}
