//! Settings panel — backend origin, crawl defaults, connection timeout,
//! plus backend diagnostics (health and known sessions).

use egui::{self, RichText, Vec2};
use crawlchat_core::controller::Diagnostics;
use crawlchat_types::config::{ClientConfig, MAX_PAGE_LIMIT, MIN_PAGE_LIMIT};
use crawlchat_types::session::SessionSummary;
use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Nothing changed
    None,
    /// A field of the draft was edited
    Changed,
    /// The user clicked the Save button
    SaveClicked,
    /// The user asked to re-run the diagnostics calls
    RefreshClicked,
}

/// Save feedback passed in from the app layer
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// Range offered for the connection timeout, in seconds.
pub const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 5..=300;

/// One-line description of a listed session.
pub fn session_line(session: &SessionSummary) -> String {
    let state = if session.completed { "done" } else { session.status.as_str() };
    format!(
        "{} · {} images / {} pages · {}",
        session.url, session.total_images, session.total_pages, state
    )
}

pub fn settings_panel(
    ui: &mut egui::Ui,
    draft: &mut ClientConfig,
    save_feedback: Option<&SaveFeedback>,
    diagnostics: &Diagnostics,
    storage_backend: &str,
) -> SettingsAction {
    let mut changed = false;
    let mut save_clicked = false;
    let mut refresh_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Backend Section ──────────────────────────────
            ui.label(RichText::new("Backend").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Origin").color(TEXT_SECONDARY).small());
            let origin_edit = egui::TextEdit::singleline(&mut draft.backend_origin)
                .hint_text(ClientConfig::default().backend_origin);
            if ui.add(origin_edit).changed() {
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Status connection timeout (s)").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::Slider::new(&mut draft.connect_timeout_secs, TIMEOUT_RANGE_SECS))
                .changed()
            {
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Default page limit").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::Slider::new(&mut draft.default_page_limit, MIN_PAGE_LIMIT..=MAX_PAGE_LIMIT))
                .changed()
            {
                changed = true;
            }

            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Settings are stored in {}", storage_backend))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            // ── Save Button ──────────────────────────────────
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(RichText::new("Save Settings").color(TEXT_PRIMARY).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Diagnostics Section ──────────────────────────
            ui.horizontal(|ui| {
                ui.label(RichText::new("Diagnostics").color(ACCENT).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    refresh_clicked = ui.small_button("Refresh").clicked();
                });
            });

            match &diagnostics.health {
                Some(health) => {
                    ui.label(
                        RichText::new(format!("Backend {} · version {}", health.status, health.version))
                            .color(SUCCESS)
                            .small(),
                    );
                }
                None => {
                    let text = match &diagnostics.last_error {
                        Some(err) => format!("Backend unreachable: {}", err),
                        None => "Backend status unknown".to_string(),
                    };
                    ui.label(RichText::new(text).color(WARNING).small());
                }
            }

            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Known sessions ({})", diagnostics.sessions.len()))
                    .color(TEXT_SECONDARY)
                    .small(),
            );
            egui::ScrollArea::vertical()
                .id_salt("sessions_list")
                .max_height(200.0)
                .show(ui, |ui| {
                    for session in &diagnostics.sessions {
                        ui.label(RichText::new(session_line(session)).color(TEXT_PRIMARY).small())
                            .on_hover_text(&session.session_id);
                    }
                });
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if refresh_clicked {
        SettingsAction::RefreshClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}
