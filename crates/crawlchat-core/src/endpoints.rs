//! URL building and client-side input checks for the crawl API.

use crawlchat_types::{
    ClientError, Result,
    api::CrawlRequest,
    config::{MAX_PAGE_LIMIT, MIN_PAGE_LIMIT},
};

/// Join `path` beneath `origin` with exactly one `/` between them.
pub fn join_url(origin: &str, path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// The fixed set of backend paths, rooted at a configurable origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    origin: String,
}

impl Endpoints {
    pub fn new(origin: impl Into<String>) -> Self {
        Self { origin: origin.into() }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn crawl(&self) -> String {
        join_url(&self.origin, "/crawl")
    }

    pub fn status(&self, session_id: &str) -> String {
        join_url(&self.origin, &format!("/crawl/{}/status", session_id))
    }

    pub fn chat(&self) -> String {
        join_url(&self.origin, "/chat")
    }

    pub fn sessions(&self) -> String {
        join_url(&self.origin, "/sessions")
    }

    pub fn health(&self) -> String {
        join_url(&self.origin, "/health")
    }
}

/// Check a crawl form before anything touches the network.
pub fn validate_crawl_input(url: &str, limit: u32) -> Result<CrawlRequest> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ClientError::Validation("Please enter a URL to crawl".to_string()));
    }
    if !(MIN_PAGE_LIMIT..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ClientError::Validation(format!(
            "Page limit must be between {} and {}, got {}",
            MIN_PAGE_LIMIT, MAX_PAGE_LIMIT, limit
        )));
    }
    Ok(CrawlRequest {
        url: url.to_string(),
        limit,
    })
}
