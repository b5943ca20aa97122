//! Decal list and properties panel

use dk_core::{
    BackgroundShape, DecalId, DecalInstance, Region, SourceKind, TextStyle, TextStyleConfig,
    TextureSource, TransformUpdate,
};

use crate::panels::Panel;
use crate::state::{AppAction, AppState, SharedAppState};
use crate::theme::palette;

/// Text being edited for the selected decal
struct TextDraft {
    decal: DecalId,
    /// Source kind of the instance when the draft was last checked
    source: SourceKind,
    content: String,
    style: TextStyleConfig,
}

/// Region list and selected decal properties
#[derive(Default)]
pub struct DecalPanel {
    draft: Option<TextDraft>,
}

impl DecalPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the draft from the selected instance when the selection or its
    /// content changes
    fn sync_draft(&mut self, instance: &DecalInstance, default_style: &TextStyleConfig) {
        let kind = instance.source.kind();
        if let Some(draft) = self.draft.as_mut().filter(|d| d.decal == instance.id) {
            // An image upload keeps the typed text underneath
            if draft.source == kind || kind == SourceKind::Image {
                draft.source = kind;
                return;
            }
        }
        let (content, style) = match &instance.source {
            TextureSource::Text { content, style } => (content.clone(), style.clone()),
            _ => (String::new(), default_style.clone()),
        };
        self.draft = Some(TextDraft {
            decal: instance.id,
            source: kind,
            content,
            style,
        });
    }

    fn region_list(&self, ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<AppAction>) {
        for region in Region::ALL {
            egui::CollapsingHeader::new(region.label())
                .default_open(true)
                .show(ui, |ui| {
                    for (index, instance) in state.store.instances_in(region).enumerate() {
                        ui.horizontal(|ui| {
                            let mut visible = instance.visible;
                            if ui
                                .add_enabled(instance.has_content(), egui::Checkbox::without_text(&mut visible))
                                .on_hover_text("Visible")
                                .changed()
                            {
                                actions.push(AppAction::SetVisibility {
                                    decal: instance.id,
                                    visible,
                                });
                            }

                            let label = instance_label(index, instance);
                            let selected = state.selected == Some(instance.id);
                            if ui.selectable_label(selected, label).clicked() {
                                actions.push(AppAction::SelectDecal(Some(instance.id)));
                            }
                        });
                    }
                });
        }
    }

    fn content_section(
        &mut self,
        ui: &mut egui::Ui,
        instance: &DecalInstance,
        actions: &mut Vec<AppAction>,
    ) {
        ui.horizontal(|ui| {
            if ui.button("Upload image...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "PNG", "JPG", "JPEG"])
                    .pick_file()
                {
                    actions.push(AppAction::LoadImage {
                        decal: instance.id,
                        path,
                    });
                }
            }
            if let Some(texture) = instance.image_texture() {
                ui.weak(format!("{}x{}", texture.width(), texture.height()));
            }
        });

        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        let mut changed = false;

        ui.label("Text");
        changed |= ui
            .add(egui::TextEdit::singleline(&mut draft.content).hint_text("Type decal text"))
            .changed();

        egui::Grid::new("text_style_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Style");
                egui::ComboBox::from_id_salt("text_style")
                    .selected_text(draft.style.style.label())
                    .show_ui(ui, |ui| {
                        for style in TextStyle::ALL {
                            changed |= ui
                                .selectable_value(&mut draft.style.style, style, style.label())
                                .changed();
                        }
                    });
                ui.end_row();

                ui.label("Shape");
                egui::ComboBox::from_id_salt("text_shape")
                    .selected_text(draft.style.shape.label())
                    .show_ui(ui, |ui| {
                        for shape in BackgroundShape::ALL {
                            changed |= ui
                                .selectable_value(&mut draft.style.shape, shape, shape.label())
                                .changed();
                        }
                    });
                ui.end_row();

                ui.label("Text color");
                changed |= ui
                    .color_edit_button_srgba_unmultiplied(&mut draft.style.text_color)
                    .changed();
                ui.end_row();

                ui.label("Background");
                changed |= ui
                    .color_edit_button_srgba_unmultiplied(&mut draft.style.background_color)
                    .changed();
                ui.end_row();

                ui.label("Font size");
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut draft.style.font_size)
                            .range(8.0..=256.0)
                            .speed(1.0)
                            .suffix(" px"),
                    )
                    .changed();
                ui.end_row();
            });

        if changed {
            actions.push(AppAction::SetText {
                decal: instance.id,
                content: draft.content.clone(),
                style: draft.style.clone(),
            });
        }
    }

    fn transform_section(
        &self,
        ui: &mut egui::Ui,
        instance: &DecalInstance,
        actions: &mut Vec<AppAction>,
    ) {
        let mut transform = instance.transform;
        let mut update = TransformUpdate::default();

        egui::Grid::new("decal_transform_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Position");
                ui.horizontal(|ui| {
                    let mut changed = false;
                    for (axis, value) in ["X", "Y", "Z"]
                        .into_iter()
                        .zip(transform.position.as_mut().iter_mut())
                    {
                        changed |= ui
                            .add(egui::DragValue::new(value).speed(0.005).prefix(format!("{axis} ")))
                            .changed();
                    }
                    if changed {
                        update.position = Some(transform.position);
                    }
                });
                ui.end_row();

                ui.label("Rotation");
                let mut degrees = transform.rotation.z.to_degrees();
                if ui
                    .add(egui::DragValue::new(&mut degrees).speed(1.0).suffix("\u{00b0}"))
                    .changed()
                {
                    transform.rotation.z = degrees.to_radians();
                    update.rotation = Some(transform.rotation);
                }
                ui.end_row();

                ui.label("Scale");
                if ui
                    .add(
                        egui::DragValue::new(&mut transform.uniform_scale)
                            .speed(0.005)
                            .range(dk_core::constants::MIN_UNIFORM_SCALE..=5.0),
                    )
                    .changed()
                {
                    update.uniform_scale = Some(transform.uniform_scale);
                }
                ui.end_row();

                ui.label("Aspect");
                ui.weak(format!("{:.3}", transform.aspect_ratio));
                ui.end_row();
            });

        if !update.is_empty() {
            actions.push(AppAction::UpdateTransform {
                decal: instance.id,
                update,
            });
        }
    }

    fn instance_actions(
        &self,
        ui: &mut egui::Ui,
        state: &AppState,
        instance: &DecalInstance,
        actions: &mut Vec<AppAction>,
    ) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Duplicate").clicked() {
                actions.push(AppAction::Duplicate(instance.id));
            }
            if ui.button("Reset").on_hover_text("Restore the default placement").clicked() {
                actions.push(AppAction::ResetTransform(instance.id));
            }
            if ui
                .add_enabled(instance.has_content(), egui::Button::new("Clear"))
                .clicked()
            {
                actions.push(AppAction::ClearDecal(instance.id));
            }
            if !state.store.is_primary(instance.id) && ui.button("Remove").clicked() {
                actions.push(AppAction::RemoveDuplicate(instance.id));
            }
        });
    }
}

impl Panel for DecalPanel {
    fn name(&self) -> &str {
        "Decals"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut actions = Vec::new();
        {
            let state = app_state.lock();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Regions");
                self.region_list(ui, &state, &mut actions);

                let Some(instance) = state.selected.and_then(|id| state.store.get(id)) else {
                    self.draft = None;
                    ui.separator();
                    ui.weak("Select a decal in the list or the viewport");
                    return;
                };
                self.sync_draft(instance, &state.text_style);

                ui.separator();
                ui.heading(format!("{} decal", instance.region.label()));
                self.content_section(ui, instance, &mut actions);

                ui.separator();
                ui.label("Transform");
                self.transform_section(ui, instance, &mut actions);

                ui.separator();
                self.instance_actions(ui, &state, instance, &mut actions);
            });

            if state.decodes.pending() > 0 {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Decoding image...");
                });
            }
            if let Some(status) = &state.status {
                ui.colored_label(palette::WARNING, status);
            }
        }

        let mut state = app_state.lock();
        for action in actions {
            state.queue_action(action);
        }
    }
}

fn instance_label(index: usize, instance: &DecalInstance) -> String {
    let name = if index == 0 {
        "Primary".to_string()
    } else {
        format!("Copy {}", index)
    };
    match &instance.source {
        TextureSource::None => format!("{} (empty)", name),
        TextureSource::Image { .. } => format!("{} - image", name),
        TextureSource::Text { content, .. } if content.is_empty() => format!("{} - text", name),
        TextureSource::Text { content, .. } => format!("{} - \"{}\"", name, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[test]
    fn test_instance_labels() {
        let mut state = test_state();
        let id = state.store.primary(Region::Chest);
        let copy = state.store.duplicate(id).unwrap();
        assert_eq!(
            instance_label(0, state.store.get(id).unwrap()),
            "Primary (empty)"
        );

        let AppState {
            store, resolver, ..
        } = &mut state;
        store.set_texture_source(
            copy,
            TextureSource::text("10", TextStyleConfig::default()),
            resolver,
        );
        assert_eq!(
            instance_label(1, state.store.get(copy).unwrap()),
            "Copy 1 - \"10\""
        );
    }

    #[test]
    fn test_draft_follows_selection() {
        let mut state = test_state();
        let chest = state.store.primary(Region::Chest);
        let back = state.store.primary(Region::Back);
        let style = TextStyleConfig {
            style: TextStyle::Bold,
            ..Default::default()
        };
        let AppState {
            store, resolver, ..
        } = &mut state;
        store.set_texture_source(back, TextureSource::text("7", style.clone()), resolver);

        let mut panel = DecalPanel::new();
        panel.sync_draft(state.store.get(chest).unwrap(), &state.text_style);
        let draft = panel.draft.as_ref().unwrap();
        assert!(draft.content.is_empty());
        assert_eq!(draft.style, state.text_style);

        panel.sync_draft(state.store.get(back).unwrap(), &state.text_style);
        let draft = panel.draft.as_ref().unwrap();
        assert_eq!(draft.content, "7");
        assert_eq!(draft.style, style);
    }

    #[test]
    fn test_draft_resets_after_clear() {
        let mut state = test_state();
        let back = state.store.primary(Region::Back);
        let AppState {
            store, resolver, ..
        } = &mut state;
        store.set_texture_source(
            back,
            TextureSource::text("23", TextStyleConfig::default()),
            resolver,
        );

        let mut panel = DecalPanel::new();
        panel.sync_draft(state.store.get(back).unwrap(), &state.text_style);
        assert_eq!(panel.draft.as_ref().unwrap().content, "23");

        // Uploading an image keeps what was typed
        let logo = dk_core::Texture::from_raster(image::RgbaImage::new(4, 2)).unwrap();
        let AppState {
            store, resolver, ..
        } = &mut state;
        store.set_texture_source(back, TextureSource::image(&logo), resolver);
        panel.sync_draft(state.store.get(back).unwrap(), &state.text_style);
        assert_eq!(panel.draft.as_ref().unwrap().content, "23");

        state.store.clear(back);
        panel.sync_draft(state.store.get(back).unwrap(), &state.text_style);
        let draft = panel.draft.as_ref().unwrap();
        assert!(draft.content.is_empty());
        assert_eq!(draft.source, SourceKind::None);
    }
}
