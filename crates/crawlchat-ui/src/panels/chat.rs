//! Chat panel — transcript of the current session and the query input.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use crawlchat_core::session::SessionStore;
use crawlchat_types::message::{Message, Role};
use crawlchat_types::session::CrawlPhase;
use crate::panels::results;
use crate::state::UiState;
use crate::theme::*;

/// Placeholder text for the query field in each phase.
pub fn input_hint(phase: CrawlPhase, sending: bool) -> &'static str {
    if sending {
        return "Waiting for the answer...";
    }
    match phase {
        CrawlPhase::Idle => "Start a crawl to begin chatting",
        CrawlPhase::Crawling => "Waiting for the crawl to finish...",
        CrawlPhase::Ready => "Ask about the crawled images...",
        CrawlPhase::Error => "The crawl failed, start a new one",
    }
}

/// Render the chat panel. Returns Some(text) when the user submits a query.
pub fn chat_panel(ui: &mut egui::Ui, store: &SessionStore, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                let available_height = ui.available_height() - 48.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if store.transcript().is_empty() {
                            ui.label(
                                RichText::new("No messages yet.")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }
                        for message in store.transcript() {
                            render_message(ui, message, state);
                            ui.add_space(4.0);
                        }
                        if store.is_sending() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Searching...").color(TEXT_SECONDARY).small());
                            });
                        }
                    });

                ui.add_space(8.0);

                let enabled = store.can_send();
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.query_input)
                        .hint_text(input_hint(store.phase(), store.is_sending()))
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add_enabled(enabled, input);

                    let has_text = !state.query_input.trim().is_empty();
                    let send_enabled = enabled && has_text;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        submitted = Some(state.query_input.trim().to_string());
                        state.query_input.clear();
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &Message, state: &mut UiState) {
    let (label_color, bg) = match message.role {
        Role::Human => (ACCENT, HUMAN_BG),
        Role::Ai => (SUCCESS, BG_SECONDARY),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(message.role.label()).color(label_color).strong().small());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new(short_time(&message.timestamp)).color(TEXT_SECONDARY).small());
                });
            });
            ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
            results::results_panel(ui, &message.id, &message.results, state);
        });
}

/// `HH:MM:SS` out of an RFC 3339 timestamp; the raw string otherwise.
pub fn short_time(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .and_then(|(_, time)| time.get(..8))
        .unwrap_or(timestamp)
}
