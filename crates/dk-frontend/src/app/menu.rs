//! Menu bar rendering

use crate::config::UiTheme;
use crate::state::{AppAction, SharedAppState};

/// Design file extension
const DESIGN_EXTENSION: &str = "dkd";

/// Menu actions handled by the app rather than the action queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SetTheme(UiTheme),
}

/// Render the menu bar and return any triggered action
pub fn render_menu_bar(ctx: &egui::Context, app_state: &SharedAppState) -> Option<MenuAction> {
    let mut menu_action = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Design").clicked() {
                    app_state.lock().queue_action(AppAction::NewDesign);
                    ui.close_menu();
                }
                if ui.button("Open Design...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Decal Design", &[DESIGN_EXTENSION])
                        .pick_file()
                    {
                        app_state.lock().queue_action(AppAction::LoadDesign(path));
                    }
                    ui.close_menu();
                }
                let has_path = app_state.lock().design_path.is_some();
                if ui
                    .add_enabled(has_path, egui::Button::new("Save Design"))
                    .clicked()
                {
                    app_state.lock().queue_action(AppAction::SaveDesign(None));
                    ui.close_menu();
                }
                if ui.button("Save Design As...").clicked() {
                    let name = app_state.lock().design_name.clone();
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Decal Design", &[DESIGN_EXTENSION])
                        .set_file_name(format!("{}.{}", name, DESIGN_EXTENSION))
                        .save_file()
                    {
                        app_state
                            .lock()
                            .queue_action(AppAction::SaveDesign(Some(path)));
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Front").clicked() {
                    app_state.lock().camera.set_front_view();
                    ui.close_menu();
                }
                if ui.button("Back").clicked() {
                    app_state.lock().camera.set_back_view();
                    ui.close_menu();
                }
                if ui.button("Side").clicked() {
                    app_state.lock().camera.set_side_view();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Dark Theme").clicked() {
                    menu_action = Some(MenuAction::SetTheme(UiTheme::Dark));
                    ui.close_menu();
                }
                if ui.button("Light Theme").clicked() {
                    menu_action = Some(MenuAction::SetTheme(UiTheme::Light));
                    ui.close_menu();
                }
            });
        });
    });

    menu_action
}
