//! Main egui application — composes the panels and dispatches the
//! controller's requests to the browser adapters.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use crawlchat_core::channel::ChannelState;
use crawlchat_core::controller::ChatController;
use crawlchat_core::event_bus::EventBus;
use crawlchat_core::ports::{ApiPort, StoragePort};
use crawlchat_core::session::{Notice, NoticeLevel, Ticketed};
use crawlchat_core::tasks;
use crawlchat_platform::storage::auto_detect_storage;
use crawlchat_platform::{EventSourceChannel, HttpApiClient};
use crawlchat_types::Result;
use crawlchat_types::api::{ChatRequest, CrawlRequest};
use crawlchat_types::config::ClientConfig;
use crawlchat_ui::panels::crawl::CrawlAction;
use crawlchat_ui::panels::settings::{SaveFeedback, SettingsAction};
use crawlchat_ui::panels::{chat, crawl, notices, settings};
use crawlchat_ui::state::UiState;
use crawlchat_ui::theme;

/// Repaint cadence while waiting on the network; channel callbacks do not
/// wake egui on their own.
const BUSY_REPAINT: Duration = Duration::from_millis(200);

/// What the startup task hands back once storage has been probed.
struct Startup {
    storage: Rc<dyn StoragePort>,
    config: Result<Option<ClientConfig>>,
}

pub struct CrawlChatApp {
    controller: ChatController,
    ui_state: UiState,
    api: Rc<dyn ApiPort>,
    storage: Option<Rc<dyn StoragePort>>,
    startup: Rc<RefCell<Option<Startup>>>,
    save_result: Rc<RefCell<Option<SaveFeedback>>>,
    first_frame: bool,
}

impl CrawlChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = ClientConfig::default();
        let controller = ChatController::new(
            config.clone(),
            Rc::new(EventSourceChannel::new()),
            EventBus::new(),
        );
        let api: Rc<dyn ApiPort> = Rc::new(HttpApiClient::new(config.backend_origin.clone()));

        let app = Self {
            ui_state: UiState::new(controller.config()),
            controller,
            api,
            storage: None,
            startup: Rc::new(RefCell::new(None)),
            save_result: Rc::new(RefCell::new(None)),
            first_frame: true,
        };

        Self::probe_storage(app.startup.clone(), cc.egui_ctx.clone());
        app
    }

    /// Pick a storage backend and read the saved config (async).
    fn probe_storage(slot: Rc<RefCell<Option<Startup>>>, ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            let storage = auto_detect_storage().await;
            let config = tasks::load_config(storage.as_ref()).await;
            *slot.borrow_mut() = Some(Startup { storage, config });
            ctx.request_repaint();
        });
    }

    /// Adopt the startup result once it is ready, then run the first
    /// diagnostics round against the effective origin.
    fn finish_startup(&mut self, ctx: &egui::Context) {
        let Some(startup) = self.startup.borrow_mut().take() else {
            return;
        };

        match startup.config {
            Ok(Some(config)) => {
                log::info!("Config restored from {}", startup.storage.backend_name());
                self.apply_config(config);
            }
            Ok(None) => log::info!("No saved config, using defaults"),
            Err(e) => {
                log::warn!("Could not restore config: {}", e);
                self.ui_state.push_notices(vec![Notice {
                    level: NoticeLevel::Warning,
                    text: format!("Saved settings could not be read: {}", e),
                }]);
            }
        }
        self.storage = Some(startup.storage);
        self.refresh_diagnostics(ctx);
    }

    fn apply_config(&mut self, config: ClientConfig) {
        self.controller.set_config(config);
        let config = self.controller.config().clone();
        self.api = Rc::new(HttpApiClient::new(config.backend_origin.clone()));
        self.ui_state.sync_config(&config);
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        let draft = self.ui_state.settings_draft.clone().normalized();
        if let Err(e) = draft.validate() {
            log::warn!("Rejected settings: {}", e);
            self.ui_state.save_feedback = Some(SaveFeedback {
                message: e.to_string(),
                success: false,
            });
            return;
        }
        self.apply_config(draft);
        self.refresh_diagnostics(ctx);

        let Some(storage) = self.storage.clone() else {
            self.ui_state.save_feedback = Some(SaveFeedback {
                message: "Applied, but storage is not ready yet".to_string(),
                success: false,
            });
            return;
        };

        self.ui_state.save_feedback = Some(SaveFeedback {
            message: "Saving...".to_string(),
            success: true,
        });
        let config = self.controller.config().clone();
        let slot = self.save_result.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let feedback = match tasks::save_config(storage.as_ref(), &config).await {
                Ok(()) => {
                    log::info!("Config saved to {}", storage.backend_name());
                    SaveFeedback {
                        message: "Saved".to_string(),
                        success: true,
                    }
                }
                Err(e) => {
                    log::error!("Config save failed: {}", e);
                    SaveFeedback {
                        message: format!("Save failed: {}", e),
                        success: false,
                    }
                }
            };
            *slot.borrow_mut() = Some(feedback);
            ctx.request_repaint();
        });
    }

    // ─── Dispatch ────────────────────────────────────────────

    fn dispatch_crawl(&self, req: Ticketed<CrawlRequest>, ctx: &egui::Context) {
        let api = self.api.clone();
        let bus = self.controller.bus().clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            tasks::start_crawl(api.as_ref(), req, &bus).await;
            ctx.request_repaint();
        });
    }

    fn dispatch_query(&self, req: Ticketed<ChatRequest>, ctx: &egui::Context) {
        let api = self.api.clone();
        let bus = self.controller.bus().clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            tasks::send_query(api.as_ref(), req, &bus).await;
            ctx.request_repaint();
        });
    }

    fn refresh_diagnostics(&self, ctx: &egui::Context) {
        let api = self.api.clone();
        let bus = self.controller.bus().clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            tasks::refresh_diagnostics(api.as_ref(), &bus).await;
            ctx.request_repaint();
        });
    }

    fn channel_label(&self) -> (&'static str, egui::Color32) {
        match self.controller.channel_state() {
            ChannelState::Closed => ("Status: closed", theme::TEXT_SECONDARY),
            ChannelState::Connecting => ("Status: connecting", theme::WARNING),
            ChannelState::Open => ("Status: live", theme::SUCCESS),
        }
    }
}

impl eframe::App for CrawlChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        self.finish_startup(ctx);
        if let Some(feedback) = self.save_result.borrow_mut().take() {
            self.ui_state.save_feedback = Some(feedback);
        }

        // Apply async completions, then surface any notices they raised
        if self.controller.pump() > 0 {
            ctx.request_repaint();
        }
        let pending = self.controller.take_notices();
        if !pending.is_empty() {
            self.ui_state.push_notices(pending);
        }

        let store = self.controller.store();
        if store.is_crawling() || store.is_sending() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }

        // ── Top bar ──────────────────────────────────────────
        let (channel_text, channel_color) = self.channel_label();
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Crawl & Chat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!("Backend: {}", self.controller.config().backend_origin))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.label(RichText::new(channel_text).color(channel_color).small());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        let mut settings_action = SettingsAction::None;
        if self.ui_state.show_settings {
            let backend = self
                .storage
                .as_ref()
                .map(|s| s.backend_name())
                .unwrap_or("(detecting...)");
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(360.0)
                .show(ctx, |ui| {
                    settings_action = settings::settings_panel(
                        ui,
                        &mut self.ui_state.settings_draft,
                        self.ui_state.save_feedback.as_ref(),
                        self.controller.diagnostics(),
                        backend,
                    );
                });
        }
        match settings_action {
            SettingsAction::SaveClicked => self.save_settings(ctx),
            SettingsAction::RefreshClicked => self.refresh_diagnostics(ctx),
            SettingsAction::Changed => self.ui_state.save_feedback = None,
            SettingsAction::None => {}
        }

        // ── Main content ─────────────────────────────────────
        let mut crawl_action = CrawlAction::None;
        let mut query = None;
        CentralPanel::default().show(ctx, |ui| {
            crawl_action = crawl::crawl_panel(ui, self.controller.store(), &mut self.ui_state);
            ui.add_space(4.0);
            notices::notice_strip(ui, &mut self.ui_state);
            ui.add_space(4.0);
            query = chat::chat_panel(ui, self.controller.store(), &mut self.ui_state);
        });

        match crawl_action {
            CrawlAction::Start { url, limit } => {
                if let Some(req) = self.controller.request_crawl(&url, limit) {
                    self.ui_state.on_session_reset();
                    self.dispatch_crawl(req, ctx);
                }
            }
            CrawlAction::Reset => {
                self.controller.reset();
                self.ui_state.on_session_reset();
            }
            CrawlAction::None => {}
        }

        if let Some(text) = query {
            if let Some(req) = self.controller.request_query(&text) {
                self.dispatch_query(req, ctx);
            }
        }
    }
}
