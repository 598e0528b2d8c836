//! Session/transcript store — the single mutable state of the client.
//!
//! Only the controller holds a `&mut SessionStore`; the UI reads it
//! through the getters. The transcript is append-only.

use std::collections::VecDeque;

use crawlchat_types::{
    ClientError, Result,
    api::{ChatRequest, ChatResponse, CrawlRequest, CrawlResponse},
    event::{CrawlStats, StatusEvent},
    message::{ChatTurn, Message, SearchResult},
    session::CrawlPhase,
};

const IDLE_STATUS: &str = "Enter a URL to start crawling";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A request stamped with the ticket its reply must carry back. Tickets
/// are never reused, so a reply that outlived its session or was
/// superseded by a newer request can be told apart and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticketed<R> {
    pub ticket: u64,
    pub request: R,
}

/// An advisory message for the user. Never blocks anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug)]
pub struct SessionStore {
    session_id: Option<String>,
    phase: CrawlPhase,
    source_url: Option<String>,
    page_limit: Option<u32>,
    transcript: Vec<Message>,
    crawling: bool,
    /// Ticket of the `POST /crawl` awaiting its reply
    pending_crawl: Option<u64>,
    /// Ticket of the `POST /chat` awaiting its reply
    pending_query: Option<u64>,
    status_text: String,
    stats: CrawlStats,
    notices: VecDeque<Notice>,
    next_ticket: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            session_id: None,
            phase: CrawlPhase::Idle,
            source_url: None,
            page_limit: None,
            transcript: Vec::new(),
            crawling: false,
            pending_crawl: None,
            pending_query: None,
            status_text: IDLE_STATUS.to_string(),
            stats: CrawlStats::default(),
            notices: VecDeque::new(),
            next_ticket: 1,
        }
    }

    // ─── Read access ─────────────────────────────────────────

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn page_limit(&self) -> Option<u32> {
        self.page_limit
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_crawling(&self) -> bool {
        self.crawling
    }

    pub fn is_sending(&self) -> bool {
        self.pending_query.is_some()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// True while `POST /crawl` is in flight and no session exists yet.
    pub fn is_starting(&self) -> bool {
        self.pending_crawl.is_some()
    }

    pub fn can_send(&self) -> bool {
        self.phase == CrawlPhase::Ready && !self.is_sending()
    }

    /// The transcript reduced to `{role, content}` turns, in order.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.transcript.iter().map(Message::to_turn).collect()
    }

    // ─── Notices ─────────────────────────────────────────────

    pub fn notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push_back(Notice {
            level,
            text: text.into(),
        });
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    // ─── Transitions ─────────────────────────────────────────

    /// Back to the initial state. Pending notices survive so the user
    /// still sees why a reset may have been needed; the ticket counter
    /// survives so replies to requests from before the reset stay stale.
    pub fn reset(&mut self) {
        let notices = std::mem::take(&mut self.notices);
        let next_ticket = self.next_ticket;
        *self = Self::new();
        self.notices = notices;
        self.next_ticket = next_ticket;
    }

    fn issue_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    /// A new crawl replaces whatever session existed. Returns the ticket
    /// the start reply must carry.
    pub fn begin_crawl(&mut self, req: &CrawlRequest) -> u64 {
        self.reset();
        let ticket = self.issue_ticket();
        self.pending_crawl = Some(ticket);
        self.source_url = Some(req.url.clone());
        self.page_limit = Some(req.limit);
        self.crawling = true;
        self.status_text = format!("Starting crawl of {}...", req.url);
        ticket
    }

    /// Returns false when the reply does not answer the pending start
    /// (reset or a newer crawl in the meantime) and was dropped.
    pub fn crawl_started(&mut self, ticket: u64, resp: &CrawlResponse) -> bool {
        if self.pending_crawl != Some(ticket) {
            log::debug!(
                "Dropping crawl-start reply #{} for {} (pending {:?})",
                ticket,
                resp.session_id,
                self.pending_crawl
            );
            return false;
        }
        self.pending_crawl = None;
        self.session_id = Some(resp.session_id.clone());
        self.phase = CrawlPhase::Crawling;
        self.status_text = if resp.message.is_empty() {
            "Crawl started".to_string()
        } else {
            resp.message.clone()
        };
        true
    }

    pub fn crawl_failed(&mut self, ticket: u64, err: &ClientError) {
        if self.pending_crawl != Some(ticket) {
            log::debug!("Dropping crawl-start failure #{}: {}", ticket, err);
            return;
        }
        self.pending_crawl = None;
        self.crawling = false;
        self.phase = CrawlPhase::Error;
        self.status_text = format!("Failed to start crawl: {}", err);
        self.notice(NoticeLevel::Error, self.status_text.clone());
    }

    pub fn channel_opened(&mut self) {
        if self.phase == CrawlPhase::Crawling {
            self.status_text = "Connected, waiting for progress...".to_string();
        }
    }

    /// Dispatch one status event. Ignored unless a crawl is running.
    pub fn apply_status(&mut self, event: StatusEvent) {
        if self.phase != CrawlPhase::Crawling {
            log::debug!("Ignoring status event in phase {:?}", self.phase);
            return;
        }

        match event {
            StatusEvent::Connected { message } => {
                self.status_text = message.unwrap_or_else(|| "Connected".to_string());
            }
            StatusEvent::Status { message } => {
                if let Some(message) = message {
                    self.status_text = message;
                }
            }
            StatusEvent::Progress { message, stats } => {
                if let Some(message) = message {
                    self.status_text = message;
                }
                if !stats.is_empty() {
                    self.stats = stats;
                }
            }
            StatusEvent::Completed { summary, stats } => {
                self.phase = CrawlPhase::Ready;
                self.crawling = false;
                if !stats.is_empty() {
                    self.stats = stats;
                }
                self.status_text = "Crawl complete. Ask about the images.".to_string();
                if let Some(summary) = summary.filter(|s| !s.trim().is_empty()) {
                    self.append_assistant(summary, Vec::new());
                }
            }
            StatusEvent::Error { message } => {
                self.phase = CrawlPhase::Error;
                self.crawling = false;
                self.status_text = format!(
                    "Crawl failed: {}",
                    message.as_deref().unwrap_or("unknown error")
                );
                self.notice(NoticeLevel::Error, self.status_text.clone());
            }
        }
    }

    /// Stream dropped, unparsable event, connect timeout, or the stream
    /// could not be opened at all.
    pub fn channel_fault(&mut self, err: &ClientError) {
        if self.phase != CrawlPhase::Crawling && !self.crawling {
            return;
        }
        self.phase = CrawlPhase::Error;
        self.crawling = false;
        self.status_text = if err.is_channel_fault() {
            format!("Lost connection to crawl status: {}", err)
        } else {
            format!("Could not open crawl status stream: {}", err)
        };
        self.notice(NoticeLevel::Warning, self.status_text.clone());
    }

    pub fn append_human(&mut self, text: &str) -> Result<&Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::Validation("Message is empty".to_string()));
        }
        if self.phase != CrawlPhase::Ready {
            return Err(ClientError::Validation(
                "Wait for the crawl to complete before asking".to_string(),
            ));
        }
        if self.is_sending() {
            return Err(ClientError::Validation(
                "Still waiting for the previous answer".to_string(),
            ));
        }
        self.transcript.push(Message::human(text));
        Ok(&self.transcript[self.transcript.len() - 1])
    }

    pub fn append_assistant(&mut self, text: impl Into<String>, results: Vec<SearchResult>) {
        self.transcript.push(Message::ai_with_results(text, results));
    }

    /// Append the human turn and build the chat request carrying the
    /// whole transcript.
    pub fn begin_query(&mut self, text: &str) -> Result<Ticketed<ChatRequest>> {
        let session_id = self
            .session_id
            .clone()
            .ok_or_else(|| ClientError::Validation("No crawl session yet".to_string()))?;
        self.append_human(text)?;
        let ticket = self.issue_ticket();
        self.pending_query = Some(ticket);
        Ok(Ticketed {
            ticket,
            request: ChatRequest {
                session_id,
                chat_history: self.history(),
            },
        })
    }

    /// Apply a chat reply. Replies for another session or an earlier
    /// query are dropped so each human turn is followed by its own answer.
    pub fn query_answered(&mut self, ticket: u64, session_id: &str, result: Result<ChatResponse>) {
        if self.pending_query != Some(ticket) || self.session_id.as_deref() != Some(session_id) {
            log::debug!(
                "Dropping chat reply #{} for session {} (pending {:?})",
                ticket,
                session_id,
                self.pending_query
            );
            return;
        }
        self.pending_query = None;
        match result {
            Ok(resp) => self.append_assistant(resp.response, resp.search_results),
            Err(e) => {
                self.append_assistant(
                    format!("Sorry, I couldn't answer that: {}", e),
                    Vec::new(),
                );
                self.notice(NoticeLevel::Error, format!("Chat request failed: {}", e));
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
