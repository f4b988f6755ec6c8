use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::models::{IssueTicket, RawIssue, SearchResponse, TicketCountSummary};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as HttpClient, Response, StatusCode};
use tracing::debug;

/// Field list requested on every issue query; only what the correlation
/// views consume downstream.
const ISSUE_FIELDS: &str = "key,summary,status,assignee,priority,fixVersions,created,updated";

/// Maximum number of outstanding tickets fetched per call.
const MAX_RESULTS: u32 = 100;

/// Authenticated client for the issue-tracker API, scoped to one project.
#[derive(Clone)]
pub struct TrackerClient {
    http: HttpClient,
    config: TrackerConfig,
}

impl TrackerClient {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Fetches unresolved tickets in the configured project, newest first,
    /// capped at [`MAX_RESULTS`].
    pub async fn get_outstanding_tickets(&self) -> Result<Vec<IssueTicket>> {
        let jql = format!(
            "project = {} AND resolution = EMPTY ORDER BY created DESC",
            self.config.project_key
        );
        debug!(%jql, "querying outstanding tracker tickets");
        let max_results = MAX_RESULTS.to_string();
        let response = self
            .http
            .get(self.url_for("search"))
            .query(&[
                ("jql", jql.as_str()),
                ("maxResults", max_results.as_str()),
                ("fields", ISSUE_FIELDS),
            ])
            .send()
            .await?;

        let response = self.check_project_response(response).await?;
        let parsed = response.json::<SearchResponse>().await?;
        Ok(parsed.issues.into_iter().map(IssueTicket::from).collect())
    }

    /// Fetches outstanding tickets and aggregates them in one pass.
    pub async fn get_ticket_counts(&self) -> Result<TicketCountSummary> {
        let tickets = self.get_outstanding_tickets().await?;
        Ok(TicketCountSummary::from_tickets(&tickets))
    }

    /// Fetches a single ticket by key. A missing ticket returns `Ok(None)`
    /// rather than an error, so callers can tell "not linked" apart from
    /// "lookup broke".
    pub async fn get_ticket_by_key(&self, key: &str) -> Result<Option<IssueTicket>> {
        debug!(key, "resolving tracker ticket by key");
        let response = self
            .http
            .get(self.url_for(&format!("issue/{key}")))
            .query(&[("fields", ISSUE_FIELDS)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = self.check_status(response, status).await?;
        let raw = response.json::<RawIssue>().await?;
        Ok(Some(raw.into()))
    }

    fn url_for(&self, path: &str) -> String {
        let mut base = self.config.api_root();
        base.push_str(path.trim_start_matches('/'));
        base
    }

    /// Maps project-level query rejections onto specific error variants.
    async fn check_project_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TrackerError::NotFound(format!(
                "project {} not found",
                self.config.project_key
            )));
        }
        self.check_status(response, status).await
    }

    async fn check_status(&self, response: Response, status: StatusCode) -> Result<Response> {
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED => Err(TrackerError::Authentication(format!(
                "invalid credentials for {} - {}",
                self.config.username, body
            ))),
            StatusCode::FORBIDDEN => Err(TrackerError::Permission(format!(
                "account {} may not browse project {} - {}",
                self.config.username, self.config.project_key, body
            ))),
            _ => Err(TrackerError::Http {
                status,
                message: body,
            }),
        }
    }
}

fn build_http_client(config: &TrackerConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    let credentials = BASE64_STANDARD.encode(format!("{}:{}", config.username, config.api_token));
    headers.insert(AUTHORIZATION, header_value(format!("Basic {credentials}"))?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(config.user_agent.clone())?);

    HttpClient::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(|err| TrackerError::Other(err.to_string()))
}

fn header_value(value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|err| TrackerError::Other(err.to_string()))
}
