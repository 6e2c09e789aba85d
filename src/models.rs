use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One result row returned by the backend: column name -> scalar value.
pub type SqlRow = serde_json::Map<String, serde_json::Value>;

/// Author of a conversational turn.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

// Represents a single turn in a conversation. Assistant turns may carry the
// generated SQL, the rows it produced, and a rendered chart artifact; user
// turns carry narrative content only.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatTurn {
    #[serde(default = "Uuid::new_v4")] // Generate a new UUID if missing during deserialization
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_results: Option<Vec<SqlRow>>,
    // Opaque chart artifact; the controller never inspects it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_html: Option<String>,
}

impl ChatTurn {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            sql_query: None,
            sql_results: None,
            chart_html: None,
        }
    }

    /// A user turn with the given narrative content.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// An assistant turn with narrative content only.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    /// Whether this turn carries a renderable chart artifact.
    pub fn has_chart(&self) -> bool {
        self.chart_html.is_some()
    }

    /// Whether this turn carries at least one result row.
    pub fn has_data(&self) -> bool {
        self.sql_results.as_deref().is_some_and(|rows| !rows.is_empty())
    }
}
