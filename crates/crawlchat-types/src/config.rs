use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::{ClientError, Result};

pub const MIN_PAGE_LIMIT: u32 = 1;
pub const MAX_PAGE_LIMIT: u32 = 20;

/// Storage key the client configuration is persisted under.
pub const CONFIG_STORAGE_KEY: &str = "crawlchat:config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin every API path is joined beneath, e.g. `http://localhost:8000`
    pub backend_origin: String,
    pub default_page_limit: u32,
    /// How long a freshly opened status channel may stay silent
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_origin: DEFAULT_BACKEND_ORIGIN.to_string(),
            default_page_limit: 5,
            connect_timeout_secs: 60,
        }
    }
}

impl ClientConfig {
    /// Clamp out-of-range values restored from storage.
    pub fn normalized(mut self) -> Self {
        self.default_page_limit = self.default_page_limit.clamp(MIN_PAGE_LIMIT, MAX_PAGE_LIMIT);
        if self.connect_timeout_secs == 0 {
            self.connect_timeout_secs = 1;
        }
        if self.backend_origin.trim().is_empty() {
            self.backend_origin = DEFAULT_BACKEND_ORIGIN.to_string();
        }
        self
    }

    /// The origin has to be an absolute `http://` or `https://` URL; every
    /// endpoint is joined beneath it.
    pub fn validate(&self) -> Result<()> {
        let origin = self.backend_origin.trim();
        let host = origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"));
        match host {
            Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
            _ => Err(ClientError::Config(format!(
                "backend origin must be an http(s) URL, got '{}'",
                origin
            ))),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:8000";
