//! Result cards under an assistant message: thumbnail, format, score and
//! two outbound links.

use egui::{self, Align2, FontId, RichText, Sense};
use egui::load::TexturePoll;
use crawlchat_types::message::SearchResult;
use crate::state::UiState;
use crate::theme::*;

/// Relevance score as a fixed four-decimal figure.
pub fn score_label(score: f64) -> String {
    format!("{:.4}", score)
}

pub fn format_label(format: &str) -> String {
    let format = format.trim();
    if format.is_empty() {
        "?".to_string()
    } else {
        format.to_uppercase()
    }
}

/// Render the result cards for one message. Nothing is drawn for an empty
/// list.
pub fn results_panel(ui: &mut egui::Ui, message_id: &str, results: &[SearchResult], state: &mut UiState) {
    if results.is_empty() {
        return;
    }

    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        for (index, result) in results.iter().enumerate() {
            let key = UiState::result_key(message_id, index);
            result_card(ui, result, key, state);
        }
    });
}

fn result_card(ui: &mut egui::Ui, result: &SearchResult, key: String, state: &mut UiState) {
    egui::Frame::default()
        .fill(BG_SURFACE)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.set_width(THUMBNAIL_SIZE.x);
            ui.vertical(|ui| {
                thumbnail(ui, result, key, state);

                ui.horizontal(|ui| {
                    ui.label(RichText::new(format_label(&result.format)).color(ACCENT).strong().small());
                    ui.label(
                        RichText::new(score_label(result.score))
                            .color(TEXT_SECONDARY)
                            .small()
                            .monospace(),
                    );
                });

                if !result.alt_text.is_empty() {
                    ui.label(RichText::new(&result.alt_text).color(TEXT_PRIMARY).small())
                        .on_hover_text(&result.alt_text);
                }

                ui.horizontal(|ui| {
                    ui.add(egui::Hyperlink::from_label_and_url("Image", &result.url).open_in_new_tab(true));
                    if !result.source_url.is_empty() {
                        ui.add(
                            egui::Hyperlink::from_label_and_url("Source page", &result.source_url)
                                .open_in_new_tab(true),
                        );
                    }
                });
            });
        });
}

/// Thumbnails load only once their rect is on screen. A failed load swaps
/// in the placeholder for good.
fn thumbnail(ui: &mut egui::Ui, result: &SearchResult, key: String, state: &mut UiState) {
    let (rect, _response) = ui.allocate_exact_size(THUMBNAIL_SIZE, Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    if state.is_broken(&key) {
        placeholder(ui, rect);
        return;
    }

    let image = egui::Image::new(result.url.as_str())
        .fit_to_exact_size(THUMBNAIL_SIZE)
        .corner_radius(PANEL_ROUNDING);
    match image.load_for_size(ui.ctx(), THUMBNAIL_SIZE) {
        Ok(TexturePoll::Ready { .. }) => image.paint_at(ui, rect),
        Ok(TexturePoll::Pending { .. }) => {
            ui.painter().rect_filled(rect, PANEL_ROUNDING, PLACEHOLDER_BG);
            ui.put(rect, egui::Spinner::new());
        }
        Err(e) => {
            log::debug!("Could not load {}: {}", result.url, e);
            state.mark_broken(key);
            placeholder(ui, rect);
        }
    }
}

fn placeholder(ui: &egui::Ui, rect: egui::Rect) {
    let painter = ui.painter();
    painter.rect_filled(rect, PANEL_ROUNDING, PLACEHOLDER_BG);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Image unavailable",
        FontId::proportional(12.0),
        TEXT_SECONDARY,
    );
}
