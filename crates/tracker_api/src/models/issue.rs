use serde::{Deserialize, Serialize};

/// Represents an issue-tracker ticket flattened from the upstream nested
/// field payloads. Read-only from this system's perspective.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IssueTicket {
    pub key: String,
    pub status: String,
    /// First entry of the upstream fix-version list, when any.
    pub fix_version: Option<String>,
    pub summary: String,
    /// Assignee display name; absent for unassigned tickets.
    pub assignee: Option<String>,
    pub priority: String,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIssue {
    pub key: String,
    pub fields: RawFields,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<NamedField>,
    #[serde(default)]
    pub assignee: Option<AssigneeField>,
    #[serde(default)]
    pub priority: Option<NamedField>,
    #[serde(default)]
    pub fix_versions: Vec<NamedField>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedField {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssigneeField {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<RawIssue> for IssueTicket {
    fn from(raw: RawIssue) -> Self {
        let fields = raw.fields;
        IssueTicket {
            key: raw.key,
            status: named(fields.status),
            fix_version: fields.fix_versions.into_iter().next().and_then(|v| v.name),
            summary: fields.summary.unwrap_or_default(),
            assignee: fields.assignee.and_then(|a| a.display_name),
            priority: named(fields.priority),
            created: fields.created.unwrap_or_default(),
            updated: fields.updated.unwrap_or_default(),
        }
    }
}

fn named(field: Option<NamedField>) -> String {
    field
        .and_then(|f| f.name)
        .unwrap_or_else(|| "Unknown".to_string())
}
