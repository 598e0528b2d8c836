//! Port traits — the hexagonal architecture boundary.
//!
//! Implementations live in `crawlchat-platform` (browser adapters) and
//! in test mocks. The core only ever sees these traits.

use std::time::Duration;
use async_trait::async_trait;
use crawlchat_types::{
    Result,
    api::{ChatRequest, ChatResponse, CrawlRequest, CrawlResponse, HealthStatus},
    session::SessionSummary,
};
use crate::event_bus::EventBus;

// ─── API Port ────────────────────────────────────────────────

/// Request/response calls against the crawl backend.
///
/// Non-2xx statuses, network failures, and undecodable bodies all come
/// back as `ClientError::Transport`.
#[async_trait(?Send)]
pub trait ApiPort {
    /// `POST /crawl`
    async fn start_crawl(&self, req: &CrawlRequest) -> Result<CrawlResponse>;

    /// `POST /chat`
    async fn send_query(&self, req: &ChatRequest) -> Result<ChatResponse>;

    /// `GET /health`, diagnostic only
    async fn check_health(&self) -> Result<HealthStatus>;

    /// `GET /sessions`, diagnostic only
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;
}

// ─── Status Channel Port ─────────────────────────────────────

/// A live server-sent-events connection. Dropping or closing it must
/// release the underlying connection and cancel the connect timer.
pub trait ChannelHandle {
    /// Idempotent.
    fn close(&mut self);
}

pub trait StatusChannelPort {
    /// Connect to `url` and start pushing `ClientEvent::Channel` signals
    /// tagged with `generation` onto `bus`. If the connection has not
    /// opened within `timeout`, push `SignalKind::TimedOut`.
    fn open(
        &self,
        url: &str,
        generation: u64,
        timeout: Duration,
        bus: EventBus,
    ) -> Result<Box<dyn ChannelHandle>>;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
