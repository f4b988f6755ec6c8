use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Represents a conversation note created on a ticket.
#[derive(Debug, Deserialize, Clone)]
pub struct Note {
    pub id: u64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub private: bool,
    pub created_at: Option<DateTime<Utc>>,
}
