//! Chat controller — applies user actions and async completions to the
//! session store and drives the status channel.
//!
//! The controller never awaits. User actions return the request the app
//! should dispatch; the dispatched task reports back on the event bus
//! (see [`crate::tasks`]) and [`ChatController::pump`] applies it.

use std::rc::Rc;

use crawlchat_types::{
    api::{ChatRequest, CrawlRequest, HealthStatus},
    config::ClientConfig,
    event::ClientEvent,
    session::SessionSummary,
};
use crate::channel::{ChannelState, ChannelUpdate, StatusChannelManager};
use crate::endpoints::{validate_crawl_input, Endpoints};
use crate::event_bus::EventBus;
use crate::ports::StatusChannelPort;
use crate::session::{Notice, NoticeLevel, SessionStore, Ticketed};

/// Results of the best-effort health and session-list calls.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub health: Option<HealthStatus>,
    pub sessions: Vec<SessionSummary>,
    pub last_error: Option<String>,
}

pub struct ChatController {
    config: ClientConfig,
    endpoints: Endpoints,
    store: SessionStore,
    channel: StatusChannelManager,
    bus: EventBus,
    diagnostics: Diagnostics,
}

impl ChatController {
    pub fn new(config: ClientConfig, channel_port: Rc<dyn StatusChannelPort>, bus: EventBus) -> Self {
        let config = config.normalized();
        Self {
            endpoints: Endpoints::new(config.backend_origin.clone()),
            config,
            store: SessionStore::new(),
            channel: StatusChannelManager::new(channel_port),
            bus,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Takes effect for the next request; an open channel is left alone.
    pub fn set_config(&mut self, config: ClientConfig) {
        let config = config.normalized();
        self.endpoints = Endpoints::new(config.backend_origin.clone());
        self.config = config;
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.store.take_notices()
    }

    // ─── User actions ────────────────────────────────────────

    /// Validate the crawl form and prepare `POST /crawl`. Any open channel
    /// is closed first. Returns `None` if nothing should be sent.
    pub fn request_crawl(&mut self, url: &str, limit: u32) -> Option<Ticketed<CrawlRequest>> {
        if self.store.is_starting() {
            self.store
                .notice(NoticeLevel::Info, "A crawl is already being started");
            return None;
        }
        match validate_crawl_input(url, limit) {
            Ok(req) => {
                self.channel.close();
                let ticket = self.store.begin_crawl(&req);
                log::info!("Starting crawl #{} of {} (limit {})", ticket, req.url, req.limit);
                Some(Ticketed { ticket, request: req })
            }
            Err(e) => {
                self.store.notice(NoticeLevel::Warning, e.to_string());
                None
            }
        }
    }

    /// Append the human turn and prepare `POST /chat`.
    pub fn request_query(&mut self, text: &str) -> Option<Ticketed<ChatRequest>> {
        match self.store.begin_query(text) {
            Ok(req) => Some(req),
            Err(e) => {
                self.store.notice(NoticeLevel::Warning, e.to_string());
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.channel.close();
        self.store.reset();
        log::info!("Session reset");
    }

    // ─── Async completions ───────────────────────────────────

    /// Apply every pending bus event in arrival order. Returns how many
    /// were applied.
    pub fn pump(&mut self) -> usize {
        let events = self.bus.drain();
        let count = events.len();
        for event in events {
            self.handle(event);
        }
        count
    }

    pub fn handle(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::CrawlStarted { ticket, result: Ok(resp) } => {
                if !self.store.crawl_started(ticket, &resp) {
                    return;
                }
                let url = self.endpoints.status(&resp.session_id);
                if let Err(e) = self.channel.open(&url, self.config.connect_timeout(), &self.bus) {
                    log::error!("Failed to open status channel: {}", e);
                    self.store.channel_fault(&e);
                }
            }
            ClientEvent::CrawlStarted { ticket, result: Err(e) } => {
                log::warn!("Crawl start #{} failed: {}", ticket, e);
                self.store.crawl_failed(ticket, &e);
            }
            ClientEvent::QueryAnswered { ticket, session_id, result } => {
                self.store.query_answered(ticket, &session_id, result);
            }
            ClientEvent::Channel(signal) => match self.channel.accept(signal) {
                Some(ChannelUpdate::Opened) => self.store.channel_opened(),
                Some(ChannelUpdate::Event(event)) => self.store.apply_status(event),
                Some(ChannelUpdate::Fault(e)) => self.store.channel_fault(&e),
                None => {}
            },
            ClientEvent::Health(Ok(health)) => {
                log::info!("Backend {} (version {})", health.status, health.version);
                self.diagnostics.health = Some(health);
            }
            ClientEvent::Health(Err(e)) => {
                self.diagnostics.health = None;
                self.diagnostic_failed("Health check", e.to_string());
            }
            ClientEvent::Sessions(Ok(sessions)) => {
                self.diagnostics.sessions = sessions;
            }
            ClientEvent::Sessions(Err(e)) => {
                self.diagnostic_failed("Session listing", e.to_string());
            }
        }
    }

    fn diagnostic_failed(&mut self, what: &str, reason: String) {
        log::warn!("{} failed: {}", what, reason);
        self.store
            .notice(NoticeLevel::Warning, format!("{} failed: {}", what, reason));
        self.diagnostics.last_error = Some(reason);
    }
}
