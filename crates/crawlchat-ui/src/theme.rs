//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(22, 24, 29);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(34, 37, 44);
pub const BG_SURFACE: Color32 = Color32::from_rgb(48, 52, 61);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 229, 235);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 156, 170);
pub const ACCENT: Color32 = Color32::from_rgb(56, 139, 253);
pub const SUCCESS: Color32 = Color32::from_rgb(46, 189, 110);
pub const ERROR: Color32 = Color32::from_rgb(235, 87, 87);
pub const WARNING: Color32 = Color32::from_rgb(230, 175, 46);
pub const HUMAN_BG: Color32 = Color32::from_rgb(30, 46, 72);
pub const PLACEHOLDER_BG: Color32 = Color32::from_rgb(40, 42, 48);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);
pub const THUMBNAIL_SIZE: Vec2 = Vec2::new(160.0, 120.0);

/// Apply the dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = BG_SECONDARY;
    style.visuals.hyperlink_color = ACCENT;

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.weak_bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.bg_fill = BG_SURFACE;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
