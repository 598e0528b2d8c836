use serde::{Deserialize, Serialize};

/// Client-side view of where the current crawl session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlPhase {
    #[default]
    Idle,
    Crawling,
    Ready,
    Error,
}

impl CrawlPhase {
    pub fn label(&self) -> &'static str {
        match self {
            CrawlPhase::Idle => "Idle",
            CrawlPhase::Crawling => "Crawling",
            CrawlPhase::Ready => "Ready",
            CrawlPhase::Error => "Error",
        }
    }
}

/// A crawl session as reported by `GET /sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_images: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}
