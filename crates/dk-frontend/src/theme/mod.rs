//! Theme module for UI styling

pub mod palette;

use egui::{Color32, Rounding, Shadow, Stroke, Visuals};

use crate::config::UiTheme;
use palette::ThemeColors;

/// Colors for a theme
pub fn colors(theme: UiTheme) -> &'static ThemeColors {
    match theme {
        UiTheme::Dark => &palette::DARK,
        UiTheme::Light => &palette::LIGHT,
    }
}

/// Apply a theme to the egui context
pub fn apply_theme(ctx: &egui::Context, theme: UiTheme) {
    let base = match theme {
        UiTheme::Dark => Visuals::dark(),
        UiTheme::Light => Visuals::light(),
    };
    ctx.set_visuals(visuals(base, colors(theme)));
}

fn visuals(mut v: Visuals, c: &ThemeColors) -> Visuals {
    v.panel_fill = c.bg_panel;
    v.window_fill = c.bg_elevated;
    v.extreme_bg_color = c.bg_base;
    v.faint_bg_color = c.bg_input;

    v.selection.bg_fill = c.accent_subtle;
    v.selection.stroke = Stroke::new(1.0, c.accent);
    v.hyperlink_color = c.accent;
    v.override_text_color = Some(c.text_primary);

    let rounding = Rounding::same(4.0);
    let widgets = &mut v.widgets;
    widgets.noninteractive.bg_fill = c.bg_input;
    widgets.noninteractive.weak_bg_fill = c.bg_panel;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, c.border_subtle);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, c.text_secondary);

    widgets.inactive.bg_fill = c.bg_input;
    widgets.inactive.weak_bg_fill = c.bg_input;
    widgets.inactive.bg_stroke = Stroke::new(1.0, c.border_subtle);
    widgets.inactive.fg_stroke = Stroke::new(1.0, c.text_primary);

    widgets.hovered.bg_fill = c.bg_hover;
    widgets.hovered.weak_bg_fill = c.bg_hover;
    widgets.hovered.bg_stroke = Stroke::new(1.0, c.border_normal);
    widgets.hovered.fg_stroke = Stroke::new(1.5, c.text_primary);

    widgets.active.bg_fill = c.accent;
    widgets.active.weak_bg_fill = c.bg_hover;
    widgets.active.bg_stroke = Stroke::new(1.0, c.accent);
    widgets.active.fg_stroke = Stroke::new(2.0, c.text_primary);

    widgets.open.bg_fill = c.bg_elevated;
    widgets.open.weak_bg_fill = c.bg_elevated;
    widgets.open.bg_stroke = Stroke::new(1.0, c.border_normal);
    widgets.open.fg_stroke = Stroke::new(1.0, c.text_primary);

    for w in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        w.rounding = rounding;
    }

    v.window_rounding = Rounding::same(6.0);
    v.menu_rounding = rounding;
    v.window_stroke = Stroke::new(1.0, c.border_subtle);
    v.window_shadow = Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 16.0,
        spread: 0.0,
        color: Color32::from_black_alpha(80),
    };
    v.popup_shadow = Shadow {
        offset: egui::vec2(0.0, 2.0),
        blur: 8.0,
        spread: 0.0,
        color: Color32::from_black_alpha(60),
    };

    v.striped = true;
    v.slider_trailing_fill = true;
    v.text_cursor.stroke = Stroke::new(2.0, c.text_primary);
    v
}
