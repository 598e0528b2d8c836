//! Strip of advisory notices shown above the transcript.

use egui::{self, Color32, RichText};
use crawlchat_core::session::NoticeLevel;
use crate::state::UiState;
use crate::theme::*;

pub fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => ACCENT,
        NoticeLevel::Warning => WARNING,
        NoticeLevel::Error => ERROR,
    }
}

pub fn notice_strip(ui: &mut egui::Ui, state: &mut UiState) {
    if !state.has_notices() {
        return;
    }

    let mut dismiss = false;
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    for notice in state.notices() {
                        ui.label(RichText::new(&notice.text).color(notice_color(notice.level)).small());
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    dismiss = ui.small_button("Dismiss").clicked();
                });
            });
        });

    if dismiss {
        state.dismiss_notices();
    }
}
