//! Crawl panel — URL form, page limit, progress of the running crawl.

use egui::{self, Color32, RichText, Vec2};
use crawlchat_core::session::SessionStore;
use crawlchat_types::config::{MAX_PAGE_LIMIT, MIN_PAGE_LIMIT};
use crawlchat_types::event::CrawlStats;
use crawlchat_types::session::CrawlPhase;
use crate::state::UiState;
use crate::theme::*;

/// What the caller should do after rendering the crawl panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlAction {
    None,
    Start { url: String, limit: u32 },
    Reset,
}

pub fn phase_color(phase: CrawlPhase) -> Color32 {
    match phase {
        CrawlPhase::Idle => TEXT_SECONDARY,
        CrawlPhase::Crawling => WARNING,
        CrawlPhase::Ready => SUCCESS,
        CrawlPhase::Error => ERROR,
    }
}

/// "12 images across 3 pages" style summary; `None` until the server
/// reports any totals.
pub fn stats_summary(stats: &CrawlStats) -> Option<String> {
    match (stats.total_images, stats.total_pages) {
        (Some(images), Some(pages)) => Some(format!("{} images across {} pages", images, pages)),
        (Some(images), None) => Some(format!("{} images", images)),
        (None, Some(pages)) => Some(format!("{} pages", pages)),
        (None, None) => None,
    }
}

/// One line per crawled page with its image count, for the hover text on
/// the stats summary.
pub fn page_breakdown(stats: &CrawlStats) -> Option<String> {
    if stats.images_by_page.is_empty() {
        return None;
    }
    let lines: Vec<String> = stats
        .images_by_page
        .iter()
        .map(|(page, count)| format!("{}: {}", page, count))
        .collect();
    Some(lines.join("\n"))
}

pub fn crawl_panel(ui: &mut egui::Ui, store: &SessionStore, state: &mut UiState) -> CrawlAction {
    let mut action = CrawlAction::None;
    let busy = store.is_crawling();

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let url_edit = egui::TextEdit::singleline(&mut state.url_input)
                    .hint_text("https://example.com")
                    .desired_width(ui.available_width() - 330.0);
                let response = ui.add_enabled(!busy, url_edit);

                ui.label(RichText::new("Pages").color(TEXT_SECONDARY).small());
                ui.add_enabled(
                    !busy,
                    egui::Slider::new(&mut state.page_limit, MIN_PAGE_LIMIT..=MAX_PAGE_LIMIT),
                );

                let start_label = if busy { "Crawling..." } else { "Start Crawl" };
                let start = ui.add_enabled(
                    !busy,
                    egui::Button::new(RichText::new(start_label).color(TEXT_PRIMARY))
                        .fill(if busy { BG_SURFACE } else { ACCENT })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(100.0, 0.0)),
                );
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if start.clicked() || (submitted && !busy) {
                    action = CrawlAction::Start {
                        url: state.url_input.clone(),
                        limit: state.page_limit,
                    };
                }

                if ui
                    .add_enabled(store.phase() != CrawlPhase::Idle || busy, egui::Button::new("Reset"))
                    .clicked()
                {
                    action = CrawlAction::Reset;
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let phase = store.phase();
                ui.label(RichText::new(phase.label()).color(phase_color(phase)).strong().small());
                if busy {
                    ui.spinner();
                }
                ui.label(RichText::new(store.status_text()).color(TEXT_PRIMARY).small());
                if let Some(summary) = stats_summary(store.stats()) {
                    ui.separator();
                    let label = ui.label(RichText::new(summary).color(TEXT_SECONDARY).small());
                    if let Some(pages) = page_breakdown(store.stats()) {
                        label.on_hover_text(pages);
                    }
                }
            });

            let stats = store.stats();
            if !stats.images_by_format.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for (format, count) in &stats.images_by_format {
                        ui.label(
                            RichText::new(format!("{} {}", format.to_uppercase(), count))
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    }
                });
            }

            if let (Some(id), Some(url)) = (store.session_id(), store.source_url()) {
                ui.label(
                    RichText::new(format!("Session {} · {}", id, url))
                        .color(TEXT_SECONDARY)
                        .small()
                        .italics(),
                );
            }
        });

    action
}
