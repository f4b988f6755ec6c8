use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a helpdesk ticket as returned by the upstream API, including
/// status and priority codes, the dynamic custom-field mapping and the
/// requester/company association. Read-only from this system's perspective.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HelpdeskTicket {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description_text: Option<String>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub custom_fields: HashMap<String, ScalarValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Closed scalar variant for custom-field values, replacing untyped maps so
/// downstream text scanning has a precise contract.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl ScalarValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Renders the value for use as a URL query parameter. `None` for null
    /// values, which are skipped entirely.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            ScalarValue::Bool(value) => Some(value.to_string()),
            ScalarValue::Number(value) if value.fract() == 0.0 => {
                Some(format!("{}", *value as i64))
            }
            ScalarValue::Number(value) => Some(value.to_string()),
            ScalarValue::Text(value) => Some(value.clone()),
            ScalarValue::Null => None,
        }
    }
}

/// Envelope returned by the full-text ticket search endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct TicketSearchResults {
    #[serde(default)]
    pub results: Vec<HelpdeskTicket>,
    #[serde(default)]
    pub total: u64,
}
