//! Cross-system correlation: batch acquisition with fallback tiers,
//! isolated per-ticket reference resolution and deterministic ordering.

use crate::config::AppConfig;
use crate::extract::extract_references;
use helpdesk_api::{HelpdeskClient, HelpdeskTicket, ScalarValue};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tokio::task::JoinSet;
use tracker_api::{IssueTicket, TrackerClient};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine setup failed: {0}")]
    Setup(String),
    #[error("batch acquisition exhausted all tiers: {0}")]
    BatchExhausted(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

/// Summary of the issue-tracker ticket attached to a correlated item.
#[derive(Debug, Clone, Serialize)]
pub struct IssueInfo {
    pub key: String,
    pub status: String,
    pub fix_version: Option<String>,
    pub summary: String,
    pub assignee: Option<String>,
    pub priority: String,
}

impl From<IssueTicket> for IssueInfo {
    fn from(ticket: IssueTicket) -> Self {
        IssueInfo {
            key: ticket.key,
            status: ticket.status,
            fix_version: ticket.fix_version,
            summary: ticket.summary,
            assignee: ticket.assignee,
            priority: ticket.priority,
        }
    }
}

/// One helpdesk ticket merged with its resolved issue-tracker reference.
/// `issue_info` is absent when the ticket has no reference or resolution
/// failed; `error` is set only in the failure case.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelatedItem {
    pub ticket: HelpdeskTicket,
    pub issue_info: Option<IssueInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Typed outcome of resolving one ticket's first reference. Failure is a
/// value here, so per-item isolation is enforced by the type rather than
/// by exception discipline.
#[derive(Debug)]
enum Resolution {
    Linked(IssueInfo),
    NoReference,
    Missing,
    Failed(String),
}

/// Ordered batch acquisition strategies, tried until one yields tickets.
#[derive(Debug, Clone, Copy)]
enum AcquisitionTier {
    StatusSearch,
    StatusCodeScan,
    RecentListing,
}

impl AcquisitionTier {
    const ORDER: [AcquisitionTier; 3] = [
        AcquisitionTier::StatusSearch,
        AcquisitionTier::StatusCodeScan,
        AcquisitionTier::RecentListing,
    ];

    fn name(self) -> &'static str {
        match self {
            AcquisitionTier::StatusSearch => "status-search",
            AcquisitionTier::StatusCodeScan => "status-code-scan",
            AcquisitionTier::RecentListing => "recent-listing",
        }
    }
}

/// Orchestrates one correlation pass over both ticket systems. Stateless
/// between calls; callers needing retries re-invoke the whole engine.
#[derive(Clone)]
pub struct CorrelationEngine {
    helpdesk: HelpdeskClient,
    tracker: TrackerClient,
    target_status_label: String,
    candidate_status_codes: Vec<i64>,
    page_size: u32,
}

impl CorrelationEngine {
    pub fn new(
        helpdesk: HelpdeskClient,
        tracker: TrackerClient,
        target_status_label: impl Into<String>,
        candidate_status_codes: Vec<i64>,
        page_size: u32,
    ) -> Self {
        Self {
            helpdesk,
            tracker,
            target_status_label: target_status_label.into(),
            candidate_status_codes,
            page_size,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, EngineError> {
        let helpdesk = HelpdeskClient::new(config.helpdesk_config())
            .map_err(|err| EngineError::Setup(err.to_string()))?;
        let tracker = TrackerClient::new(config.tracker_config())
            .map_err(|err| EngineError::Setup(err.to_string()))?;
        Ok(Self::new(
            helpdesk,
            tracker,
            config.target_status_label.clone(),
            config.fallback_status_codes.clone(),
            config.page_size,
        ))
    }

    /// Produces the merged correlation dataset: acquire a helpdesk batch,
    /// resolve each ticket's first issue reference independently, then sort
    /// by creation time, newest first. Only total acquisition exhaustion is
    /// fatal; per-ticket failures are captured on their items.
    pub async fn fetch_correlated(&self) -> Result<Vec<CorrelatedItem>, EngineError> {
        let batch = self.acquire_batch().await?;
        debug!("acquired batch of {} helpdesk tickets", batch.len());

        let mut resolutions = JoinSet::new();
        for ticket in batch {
            let tracker = self.tracker.clone();
            resolutions.spawn(async move { resolve_ticket(&tracker, ticket).await });
        }

        let mut items = Vec::new();
        while let Some(joined) = resolutions.join_next().await {
            match joined {
                Ok(item) => items.push(item),
                Err(err) => {
                    return Err(EngineError::Internal(format!(
                        "resolution task did not complete: {err}"
                    )))
                }
            }
        }

        // Completion order is nondeterministic; restore the contract here.
        items.sort_by(|a, b| b.ticket.created_at.cmp(&a.ticket.created_at));
        Ok(items)
    }

    /// Runs the acquisition tiers in order. A tier's failure falls through
    /// to the next; a non-empty batch wins immediately. All tiers failing
    /// hard is fatal, while empty-but-successful tiers yield an empty batch.
    async fn acquire_batch(&self) -> Result<Vec<HelpdeskTicket>, EngineError> {
        let mut last_error = None;
        let mut any_tier_succeeded = false;

        for tier in AcquisitionTier::ORDER {
            match self.run_tier(tier).await {
                Ok(tickets) if !tickets.is_empty() => {
                    debug!("tier {} produced {} tickets", tier.name(), tickets.len());
                    return Ok(tickets);
                }
                Ok(_) => {
                    debug!("tier {} returned no tickets", tier.name());
                    any_tier_succeeded = true;
                }
                Err(err) => {
                    warn!("tier {} failed: {err}", tier.name());
                    last_error = Some(err);
                }
            }
        }

        if any_tier_succeeded {
            Ok(Vec::new())
        } else {
            Err(EngineError::BatchExhausted(
                last_error.unwrap_or_else(|| "no acquisition tier ran".to_string()),
            ))
        }
    }

    async fn run_tier(&self, tier: AcquisitionTier) -> Result<Vec<HelpdeskTicket>, String> {
        match tier {
            AcquisitionTier::StatusSearch => self.tier_status_search().await,
            AcquisitionTier::StatusCodeScan => self.tier_status_code_scan().await,
            AcquisitionTier::RecentListing => self.tier_recent_listing().await,
        }
    }

    /// Tier 1: targeted search for the configured status label.
    async fn tier_status_search(&self) -> Result<Vec<HelpdeskTicket>, String> {
        let query = format!("status:'{}'", self.target_status_label);
        self.helpdesk
            .search_tickets(&query)
            .await
            .into_result()
            .map(|results| results.results)
    }

    /// Tier 2: one listing page per candidate status code, first page with
    /// any results wins. Codes discovered from the field schema are tried
    /// before the configured candidates.
    async fn tier_status_code_scan(&self) -> Result<Vec<HelpdeskTicket>, String> {
        let mut last_error = None;
        let mut any_page_succeeded = false;

        for code in self.status_codes_to_scan().await {
            let mut filters = HashMap::new();
            filters.insert("status".to_string(), ScalarValue::Number(code as f64));
            match self
                .helpdesk
                .get_tickets(1, self.page_size, Some(&filters))
                .await
                .into_result()
            {
                Ok(tickets) if !tickets.is_empty() => return Ok(tickets),
                Ok(_) => any_page_succeeded = true,
                Err(err) => {
                    debug!("status code {code} page failed: {err}");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if !any_page_succeeded => Err(err),
            _ => Ok(Vec::new()),
        }
    }

    /// Tier 3: unfiltered recent listing, bounded page size.
    async fn tier_recent_listing(&self) -> Result<Vec<HelpdeskTicket>, String> {
        self.helpdesk
            .get_tickets(1, self.page_size, None)
            .await
            .into_result()
    }

    /// Resolves the target label to concrete status codes via the field
    /// schema, then appends the configured candidates. Discovery failure is
    /// not an error; the candidates alone are scanned.
    async fn status_codes_to_scan(&self) -> Vec<i64> {
        let mut codes = Vec::new();
        match self.helpdesk.get_ticket_fields().await.into_result() {
            Ok(fields) => {
                for field in fields.iter().filter(|field| field.is_status_field()) {
                    if let Some(code) = field.choice_code(&self.target_status_label) {
                        codes.push(code);
                    }
                }
            }
            Err(err) => debug!("status schema discovery failed: {err}"),
        }
        for code in &self.candidate_status_codes {
            if !codes.contains(code) {
                codes.push(*code);
            }
        }
        codes
    }
}

/// Resolves one ticket in isolation and folds the typed outcome into a
/// [`CorrelatedItem`]. Never propagates a failure to sibling tickets.
async fn resolve_ticket(tracker: &TrackerClient, ticket: HelpdeskTicket) -> CorrelatedItem {
    match resolve_first_reference(tracker, &ticket).await {
        Resolution::Linked(info) => CorrelatedItem {
            ticket,
            issue_info: Some(info),
            error: None,
        },
        Resolution::NoReference | Resolution::Missing => CorrelatedItem {
            ticket,
            issue_info: None,
            error: None,
        },
        Resolution::Failed(message) => CorrelatedItem {
            ticket,
            issue_info: None,
            error: Some(message),
        },
    }
}

async fn resolve_first_reference(tracker: &TrackerClient, ticket: &HelpdeskTicket) -> Resolution {
    let references = extract_references(ticket);
    let Some(key) = references.first() else {
        return Resolution::NoReference;
    };
    match tracker.get_ticket_by_key(key).await {
        Ok(Some(issue)) => Resolution::Linked(issue.into()),
        Ok(None) => Resolution::Missing,
        Err(err) => Resolution::Failed(format!("failed to resolve {key}: {err}")),
    }
}
