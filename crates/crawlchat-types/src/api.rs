//! Request and response bodies of the crawl backend's HTTP API.

use serde::{Deserialize, Serialize};
use crate::message::{ChatTurn, SearchResult};
use crate::session::SessionSummary;

/// `POST /crawl`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub url: String,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResponse {
    pub session_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub subscribe_url: Option<String>,
}

/// `POST /chat`. The history always carries the full transcript,
/// including the human turn being asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `GET /sessions`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: String,
}
