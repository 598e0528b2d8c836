use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Non-2xx status, network failure, or an undecodable response body.
    /// `status` is `None` when the request never produced a response.
    #[error("{}", transport_message(.status, .message))]
    Transport { status: Option<u16>, message: String },

    #[error("Connection error: {0}")]
    Channel(String),

    #[error("No status from server after {0}s")]
    Timeout(u64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl ClientError {
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        ClientError::Transport {
            status: Some(status),
            message: body.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Stream-level faults and timeouts both mean the status channel is gone.
    pub fn is_channel_fault(&self) -> bool {
        matches!(self, ClientError::Channel(_) | ClientError::Timeout(_))
    }
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match (status, message.is_empty()) {
        (Some(code), true) => format!("HTTP {}", code),
        (Some(code), false) => format!("HTTP {}: {}", code, message),
        (None, _) => format!("Network error: {}", message),
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}
