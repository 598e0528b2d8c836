//! UI-local state: form inputs, the settings draft and per-thumbnail
//! load failures. Session state lives in the controller; this is only
//! what the panels need between frames.

use std::collections::{HashSet, VecDeque};

use crawlchat_core::session::Notice;
use crawlchat_types::config::ClientConfig;

use crate::panels::settings::SaveFeedback;

/// How many advisory notices stay on screen at once.
pub const MAX_VISIBLE_NOTICES: usize = 4;

pub struct UiState {
    /// Crawl form: target URL
    pub url_input: String,
    /// Crawl form: page limit slider
    pub page_limit: u32,
    /// Chat input field content
    pub query_input: String,
    /// Whether the settings side panel is open
    pub show_settings: bool,
    /// Settings being edited; applied on Save
    pub settings_draft: ClientConfig,
    pub save_feedback: Option<SaveFeedback>,
    notices: VecDeque<Notice>,
    broken_images: HashSet<String>,
}

impl UiState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            url_input: String::new(),
            page_limit: config.default_page_limit,
            query_input: String::new(),
            show_settings: false,
            settings_draft: config.clone(),
            save_feedback: None,
            notices: VecDeque::new(),
            broken_images: HashSet::new(),
        }
    }

    /// Adopt a config that was restored or saved: resets the draft and
    /// the crawl form's default page limit.
    pub fn sync_config(&mut self, config: &ClientConfig) {
        self.settings_draft = config.clone();
        self.page_limit = config.default_page_limit;
    }

    // ─── Notices ─────────────────────────────────────────────

    /// Queue notices drained from the controller, keeping only the most
    /// recent few.
    pub fn push_notices(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            if self.notices.len() == MAX_VISIBLE_NOTICES {
                self.notices.pop_front();
            }
            self.notices.push_back(notice);
        }
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }

    // ─── Thumbnails ──────────────────────────────────────────

    /// Key identifying one result inside one message.
    pub fn result_key(message_id: &str, index: usize) -> String {
        format!("{}#{}", message_id, index)
    }

    /// Record that a thumbnail failed to load. There is no way back: the
    /// placeholder stays for the lifetime of the message.
    pub fn mark_broken(&mut self, key: String) {
        if self.broken_images.insert(key) {
            log::debug!("Thumbnail failed to load, showing placeholder");
        }
    }

    pub fn is_broken(&self, key: &str) -> bool {
        self.broken_images.contains(key)
    }

    /// Forget per-session UI leftovers after the session is reset.
    pub fn on_session_reset(&mut self) {
        self.query_input.clear();
        self.broken_images.clear();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}
