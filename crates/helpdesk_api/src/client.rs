use crate::config::{HelpdeskConfig, PLACEHOLDER_PASSWORD};
use crate::error::{HelpdeskError, Result};
use crate::models::{HelpdeskTicket, Note, ScalarValue, TicketField, TicketSearchResults};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

/// Outcome of one helpdesk API call. Ordinary HTTP failure is carried as
/// data rather than raised: `status` holds the upstream code (0 when no
/// response was received at all) and `error` the captured body text.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub status: u16,
}

impl<T> ApiResponse<T> {
    fn success(status: u16, data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status,
        }
    }

    fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    /// Collapses the response into a `Result`, for callers that treat any
    /// failed call uniformly.
    pub fn into_result(self) -> std::result::Result<T, String> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(self
                .error
                .unwrap_or_else(|| format!("http {} with empty body", self.status))),
        }
    }
}

/// Authenticated client for the helpdesk ticketing API. Holds no retry
/// policy; retry and fallback decisions live in the caller.
#[derive(Clone)]
pub struct HelpdeskClient {
    http: HttpClient,
    config: HelpdeskConfig,
}

impl HelpdeskClient {
    pub fn new(config: HelpdeskConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &HelpdeskConfig {
        &self.config
    }

    /// Fetches a single ticket by its numeric id.
    pub async fn get_ticket(&self, id: u64) -> ApiResponse<HelpdeskTicket> {
        debug!(ticket_id = id, "fetching helpdesk ticket");
        let request = self.http.get(self.url_for(&format!("tickets/{id}")));
        self.dispatch(request).await
    }

    /// Fetches the ticket field schema, used to discover dynamic picklist
    /// choices such as status labels.
    pub async fn get_ticket_fields(&self) -> ApiResponse<Vec<TicketField>> {
        debug!("fetching helpdesk ticket field schema");
        let request = self.http.get(self.url_for("ticket_fields"));
        self.dispatch(request).await
    }

    /// Runs a full-text/filtered search. The query string is wrapped in
    /// double quotes per the upstream search grammar; URL encoding is left
    /// to the transport layer.
    pub async fn search_tickets(&self, query: &str) -> ApiResponse<TicketSearchResults> {
        debug!(query, "searching helpdesk tickets");
        let request = self
            .http
            .get(self.url_for("search/tickets"))
            .query(&[("query", format!("\"{query}\""))]);
        self.dispatch(request).await
    }

    /// Lists tickets page by page. Scalar `filters` are appended as query
    /// parameters; null values are skipped.
    pub async fn get_tickets(
        &self,
        page: u32,
        per_page: u32,
        filters: Option<&HashMap<String, ScalarValue>>,
    ) -> ApiResponse<Vec<HelpdeskTicket>> {
        debug!(page, per_page, "listing helpdesk tickets");
        let mut request = self
            .http
            .get(self.url_for("tickets"))
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())]);
        if let Some(filters) = filters {
            for (key, value) in filters {
                if let Some(rendered) = value.to_query_value() {
                    request = request.query(&[(key.as_str(), rendered.as_str())]);
                }
            }
        }
        self.dispatch(request).await
    }

    /// Creates an internal-only note on a ticket.
    pub async fn add_private_note(&self, ticket_id: u64, body: &str) -> ApiResponse<Note> {
        debug!(ticket_id, "adding private note");
        let payload = NoteCreateRequest { body, private: true };
        let request = self
            .http
            .post(self.url_for(&format!("tickets/{ticket_id}/notes")))
            .json(&payload);
        self.dispatch(request).await
    }

    /// Partial update restricted to a single custom field.
    pub async fn update_ticket_custom_field(
        &self,
        ticket_id: u64,
        field_name: &str,
        value: ScalarValue,
    ) -> ApiResponse<HelpdeskTicket> {
        debug!(ticket_id, field_name, "updating ticket custom field");
        let mut custom_fields = serde_json::Map::new();
        custom_fields.insert(
            field_name.to_string(),
            serde_json::to_value(&value).unwrap_or(Value::Null),
        );
        let payload: Value = json!({ "custom_fields": custom_fields });
        let request = self
            .http
            .put(self.url_for(&format!("tickets/{ticket_id}")))
            .json(&payload);
        self.dispatch(request).await
    }

    fn url_for(&self, path: &str) -> String {
        let mut base = self.config.api_root();
        base.push_str(path.trim_start_matches('/'));
        base
    }

    async fn dispatch<T>(&self, request: RequestBuilder) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return ApiResponse::failure(0, format!("network error: {err}")),
        };
        let status = response.status();
        if status.is_success() {
            match response.json::<T>().await {
                Ok(data) => ApiResponse::success(status.as_u16(), data),
                Err(err) => ApiResponse::failure(
                    status.as_u16(),
                    format!("failed to decode response: {err}"),
                ),
            }
        } else {
            let body = response.text().await.unwrap_or_default();
            ApiResponse::failure(status.as_u16(), format!("http {}: {}", status.as_u16(), body))
        }
    }
}

fn build_http_client(config: &HelpdeskConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    let credentials =
        BASE64_STANDARD.encode(format!("{}:{}", config.api_key, PLACEHOLDER_PASSWORD));
    headers.insert(AUTHORIZATION, header_value(format!("Basic {credentials}"))?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(config.user_agent.clone())?);

    HttpClient::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(|err| HelpdeskError::Configuration(err.to_string()))
}

fn header_value(value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|err| HelpdeskError::Configuration(err.to_string()))
}

#[derive(Debug, Serialize)]
struct NoteCreateRequest<'a> {
    body: &'a str,
    private: bool,
}

#[cfg(test)]
mod tests {
    use super::{HelpdeskClient, HelpdeskConfig};
    use crate::models::ScalarValue;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use base64::Engine;
    use mockito::Matcher;
    use std::collections::HashMap;

    fn client_for(server: &mockito::ServerGuard) -> HelpdeskClient {
        let config =
            HelpdeskConfig::new("support.example.com", "apikey").with_base_url(server.url());
        HelpdeskClient::new(config).expect("client should build")
    }

    const TICKET_BODY: &str = r#"{
        "id": 42,
        "subject": "Fix ABC-123 now",
        "description_text": "see details",
        "status": 2,
        "priority": 1,
        "custom_fields": {"cf_ref": "XYZ-9"},
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-02T10:00:00Z",
        "requester_name": "Alice",
        "company_name": "Acme"
    }"#;

    #[tokio::test]
    async fn get_ticket_sends_basic_auth_and_parses_body() {
        let mut server = mockito::Server::new_async().await;
        let expected_auth = format!("Basic {}", BASE64_STANDARD.encode("apikey:X"));
        let mock = server
            .mock("GET", "/tickets/42")
            .match_header("authorization", expected_auth.as_str())
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(TICKET_BODY)
            .create_async()
            .await;

        let response = client_for(&server).get_ticket(42).await;

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        let ticket = response.data.expect("ticket should be present");
        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.subject, "Fix ABC-123 now");
        assert_eq!(ticket.requester_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn non_success_status_captures_body_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tickets/7")
            .with_status(403)
            .with_body("access restricted")
            .create_async()
            .await;

        let response = client_for(&server).get_ticket(7).await;

        assert_eq!(response.status, 403);
        assert!(response.data.is_none());
        let error = response.error.expect("error should be present");
        assert!(error.contains("403"));
        assert!(error.contains("access restricted"));
    }

    #[tokio::test]
    async fn network_failure_yields_status_zero() {
        // Nothing listens on this port; the connection is refused.
        let config = HelpdeskConfig::new("support.example.com", "apikey")
            .with_base_url("http://127.0.0.1:9");
        let client = HelpdeskClient::new(config).expect("client should build");

        let response = client.get_ticket(1).await;

        assert_eq!(response.status, 0);
        assert!(response.error.expect("error expected").contains("network error"));
    }

    #[tokio::test]
    async fn search_wraps_query_in_quotes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search/tickets")
            .match_query(Matcher::UrlEncoded(
                "query".into(),
                "\"status:'Escalated'\"".into(),
            ))
            .with_status(200)
            .with_body(format!(r#"{{"results": [{TICKET_BODY}], "total": 1}}"#))
            .create_async()
            .await;

        let response = client_for(&server).search_tickets("status:'Escalated'").await;

        mock.assert_async().await;
        let results = response.data.expect("results should be present");
        assert_eq!(results.total, 1);
        assert_eq!(results.results.len(), 1);
    }

    #[tokio::test]
    async fn listing_appends_filters_and_skips_null_values() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tickets")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "50".into()),
                Matcher::UrlEncoded("status".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(format!("[{TICKET_BODY}]"))
            .create_async()
            .await;

        let mut filters = HashMap::new();
        filters.insert("status".to_string(), ScalarValue::Number(2.0));
        filters.insert("company_id".to_string(), ScalarValue::Null);

        let response = client_for(&server).get_tickets(1, 50, Some(&filters)).await;

        mock.assert_async().await;
        assert_eq!(response.data.expect("page should parse").len(), 1);
    }

    #[tokio::test]
    async fn add_private_note_posts_private_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tickets/42/notes")
            .match_body(Matcher::Json(serde_json::json!({
                "body": "internal context",
                "private": true
            })))
            .with_status(201)
            .with_body(r#"{"id": 5, "body": "internal context", "private": true, "created_at": null}"#)
            .create_async()
            .await;

        let response = client_for(&server).add_private_note(42, "internal context").await;

        mock.assert_async().await;
        assert_eq!(response.status, 201);
        assert!(response.data.expect("note should parse").private);
    }

    #[tokio::test]
    async fn custom_field_update_is_restricted_to_one_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/tickets/42")
            .match_body(Matcher::Json(serde_json::json!({
                "custom_fields": {"cf_ref": "DEF-77"}
            })))
            .with_status(200)
            .with_body(TICKET_BODY)
            .create_async()
            .await;

        let response = client_for(&server)
            .update_ticket_custom_field(42, "cf_ref", ScalarValue::Text("DEF-77".to_string()))
            .await;

        mock.assert_async().await;
        assert!(response.is_success());
    }
}
