//! Main application module

mod menu;

use crate::actions::{ActionContext, dispatch_action};
use crate::config::{AppConfig, ConfigManager};
use crate::panels::{DecalPanel, Panel, ViewportPanel};
use crate::state::{AppState, SharedAppState, create_shared_state};
use crate::theme::apply_theme;

pub use menu::{MenuAction, render_menu_bar};

/// Main application
pub struct DecalApp {
    app_state: SharedAppState,
    config: AppConfig,
    viewport_panel: ViewportPanel,
    decal_panel: DecalPanel,
}

impl DecalApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ConfigManager::load(cc.storage);
        apply_theme(&cc.egui_ctx, config.theme);

        let state = AppState::new(
            config.regions.clone(),
            config.viewer.clone(),
            config.default_text_style.clone(),
        );
        let viewport_panel = ViewportPanel::new(state.orbit.clone(), config.regions.clone());

        Self {
            app_state: create_shared_state(state),
            config,
            viewport_panel,
            decal_panel: DecalPanel::new(),
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        let ctx = ActionContext::new(&self.app_state);

        for action in actions {
            dispatch_action(action, &ctx);
        }
    }

    fn handle_menu_action(&mut self, ctx: &egui::Context, action: MenuAction) {
        match action {
            MenuAction::SetTheme(theme) => {
                self.config.theme = theme;
                apply_theme(ctx, theme);
                let mut state = self.app_state.lock();
                match theme {
                    crate::config::UiTheme::Dark => state.viewer.apply_dark_theme(),
                    crate::config::UiTheme::Light => state.viewer.apply_light_theme(),
                }
            }
        }
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let state = self.app_state.lock();
            ui.horizontal(|ui| {
                let marker = if state.modified { "*" } else { "" };
                ui.label(format!("{}{}", state.design_name, marker));
                if let Some(path) = &state.design_path {
                    ui.weak(path.display().to_string());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let visible = state.store.instances().filter(|i| i.visible).count();
                    ui.weak(format!("{} of {} decals visible", visible, state.store.len()));
                });
            });
        });
    }
}

impl eframe::App for DecalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Results of background decodes land before anything reads the store
        self.app_state.lock().apply_decoded();

        // Process pending actions
        self.process_actions();

        // Menu bar
        if let Some(menu_action) = render_menu_bar(ctx, &self.app_state) {
            self.handle_menu_action(ctx, menu_action);
        }

        self.status_bar(ctx);

        egui::SidePanel::right("decal_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| self.decal_panel.ui(ui, &self.app_state));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.viewport_panel.ui(ui, &self.app_state));

        if self.app_state.lock().decodes.pending() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        {
            let state = self.app_state.lock();
            self.config.viewer = state.viewer.clone();
            self.config.default_text_style = state.text_style.clone();
        }
        ConfigManager::save(storage, &self.config);
    }
}
