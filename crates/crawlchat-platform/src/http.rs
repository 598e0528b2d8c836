//! HTTP adapter for the crawl backend.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility. Every
//! failure is normalized into `ClientError::Transport` so callers only
//! deal with one shape: status (if any) plus the server's error text.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crawlchat_core::endpoints::Endpoints;
use crawlchat_core::ports::ApiPort;
use crawlchat_types::{
    ClientError, Result,
    api::{ChatRequest, ChatResponse, CrawlRequest, CrawlResponse, HealthStatus, SessionList},
    session::SessionSummary,
};

pub struct HttpApiClient {
    endpoints: Endpoints,
}

impl HttpApiClient {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            endpoints: Endpoints::new(origin),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;
        read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let response = Request::post(url)
            .header("Accept", "application/json")
            .json(body)
            .map_err(|e| ClientError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;
        read_json(response).await
    }
}

#[async_trait(?Send)]
impl ApiPort for HttpApiClient {
    async fn start_crawl(&self, req: &CrawlRequest) -> Result<CrawlResponse> {
        self.post_json(&self.endpoints.crawl(), req).await
    }

    async fn send_query(&self, req: &ChatRequest) -> Result<ChatResponse> {
        self.post_json(&self.endpoints.chat(), req).await
    }

    async fn check_health(&self) -> Result<HealthStatus> {
        self.get_json(&self.endpoints.health()).await
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let list: SessionList = self.get_json(&self.endpoints.sessions()).await?;
        Ok(list.sessions)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(ClientError::http(status, error_detail(&text)));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::http(status, format!("malformed response body: {}", e)))
}

/// Pull the human-readable part out of an error body. Understands
/// `{"detail": ...}`, `{"error": ...}` and `{"message": ...}`; anything
/// else is returned trimmed.
pub(crate) fn error_detail(body: &str) -> String {
    let body = body.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            match map.get(key) {
                Some(Value::String(s)) => return s.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }
    body.to_string()
}
