use std::collections::BTreeMap;
use serde::Deserialize;

use crate::api::{ChatResponse, CrawlResponse, HealthStatus};
use crate::session::SessionSummary;
use crate::{ClientError, Result};

/// Counters the backend attaches to progress and completion events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrawlStats {
    pub total_images: Option<u64>,
    pub total_pages: Option<u64>,
    pub images_by_format: BTreeMap<String, u64>,
    pub images_by_page: BTreeMap<String, u64>,
}

impl CrawlStats {
    pub fn is_empty(&self) -> bool {
        self.total_images.is_none()
            && self.total_pages.is_none()
            && self.images_by_format.is_empty()
            && self.images_by_page.is_empty()
    }
}

/// One event pushed by the server on `/crawl/{id}/status`.
///
/// `Completed` and `Error` are terminal: the channel closes after either.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    Connected { message: Option<String> },
    Status { message: Option<String> },
    Progress { message: Option<String>, stats: CrawlStats },
    Completed { summary: Option<String>, stats: CrawlStats },
    Error { message: Option<String> },
}

impl StatusEvent {
    /// Parse one `data:` payload of the event stream.
    pub fn parse(raw: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(raw)
            .map_err(|e| ClientError::Channel(format!("malformed status event: {}", e)))?;
        Ok(envelope.into_event())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusEvent::Completed { .. } | StatusEvent::Error { .. })
    }

    /// Human-readable text carried by the event, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            StatusEvent::Connected { message }
            | StatusEvent::Status { message }
            | StatusEvent::Progress { message, .. }
            | StatusEvent::Error { message } => message.as_deref(),
            StatusEvent::Completed { summary, .. } => summary.as_deref(),
        }
    }
}

// ─── Wire envelope ───────────────────────────────────────────

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(default)]
    data: Option<EventData>,
    /// Some backends put the message next to `type` instead of in `data`
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum EventKind {
    Connected,
    Status,
    Progress,
    Completed,
    Error,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EventData {
    message: Option<String>,
    summary: Option<String>,
    error: Option<String>,
    total_images: Option<u64>,
    total_pages: Option<u64>,
    #[serde(alias = "format_counts")]
    images_by_format: BTreeMap<String, u64>,
    #[serde(alias = "page_counts")]
    images_by_page: BTreeMap<String, u64>,
}

impl Envelope {
    fn into_event(self) -> StatusEvent {
        let data = self.data.unwrap_or_default();
        let message = data.message.or(self.message);
        let stats = CrawlStats {
            total_images: data.total_images,
            total_pages: data.total_pages,
            images_by_format: data.images_by_format,
            images_by_page: data.images_by_page,
        };
        match self.kind {
            EventKind::Connected => StatusEvent::Connected { message },
            EventKind::Status => StatusEvent::Status { message },
            EventKind::Progress => StatusEvent::Progress { message, stats },
            EventKind::Completed => StatusEvent::Completed {
                summary: data.summary,
                stats,
            },
            EventKind::Error => StatusEvent::Error {
                message: data.error.or(message),
            },
        }
    }
}

// ─── Client-side event bus payloads ──────────────────────────

/// Low-level signal from a status channel adapter, tagged with the
/// generation of the channel that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSignal {
    pub generation: u64,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignalKind {
    /// Connection established
    Opened,
    /// Raw `data:` payload of one event
    Message(String),
    /// Dropped connection or any other stream-level error
    Fault(String),
    /// The connect timeout elapsed
    TimedOut,
}

/// Everything that completes asynchronously and must be applied to the
/// session store on the UI thread.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Reply to `POST /crawl`, tagged with the ticket of the start it answers
    CrawlStarted {
        ticket: u64,
        result: Result<CrawlResponse>,
    },
    /// Reply to `POST /chat` for the given session and query ticket
    QueryAnswered {
        ticket: u64,
        session_id: String,
        result: Result<ChatResponse>,
    },
    Channel(ChannelSignal),
    Health(Result<HealthStatus>),
    Sessions(Result<Vec<SessionSummary>>),
}
