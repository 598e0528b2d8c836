use serde::{Deserialize, Serialize};

/// Speaker of a transcript turn. Serialized the way the backend's
/// chat history expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Human => "You",
            Role::Ai => "Assistant",
        }
    }
}

/// One ranked image match returned by a chat query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub score: f64,
}

/// A single transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub results: Vec<SearchResult>,
}

/// The `{role, content}` reduction of a message sent as chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl Message {
    fn new(role: Role, content: String, results: Vec<SearchResult>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
            results,
        }
    }

    pub fn human(text: impl Into<String>) -> Self {
        Self::new(Role::Human, text.into(), Vec::new())
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Role::Ai, text.into(), Vec::new())
    }

    pub fn ai_with_results(text: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self::new(Role::Ai, text.into(), results)
    }

    pub fn to_turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}
