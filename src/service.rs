//! Read surface consumed by the presentation layer, plus the session seam.
//!
//! The reply is always structurally valid: partial data is preferred over
//! total failure whenever any acquisition tier or any item succeeded.

use crate::config::AppConfig;
use crate::correlation::{CorrelatedItem, CorrelationEngine, EngineError};
use log::warn;
use serde::Serialize;

/// Capability check supplied by the session layer. Correlation requires
/// only "authenticated or not"; no finer-grained permission applies here.
pub trait SessionGate {
    fn is_authenticated(&self) -> bool;
}

/// Represents the serialized reply of the correlation read operation.
#[derive(Debug, Serialize)]
pub struct ServiceReply {
    pub status: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<CorrelatedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceReply {
    fn ok(data: Vec<CorrelatedItem>) -> Self {
        Self {
            status: 200,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Runs one correlation pass for an authenticated caller. Fatal conditions
/// (batch exhaustion, setup failure) map to 500; any other caught runtime
/// failure is reported as a 200 with `success: false`.
pub async fn correlated_tickets(gate: &dyn SessionGate, engine: &CorrelationEngine) -> ServiceReply {
    if !gate.is_authenticated() {
        return ServiceReply::failure(401, "authentication required");
    }
    match engine.fetch_correlated().await {
        Ok(items) => ServiceReply::ok(items),
        Err(err @ (EngineError::BatchExhausted(_) | EngineError::Setup(_))) => {
            warn!("correlation call failed fatally: {err}");
            ServiceReply::failure(500, err.to_string())
        }
        Err(err) => {
            warn!("correlation call caught runtime failure: {err}");
            ServiceReply::failure(200, err.to_string())
        }
    }
}

/// Convenience entry point that wires configuration from the environment.
/// Missing configuration is fatal and reported without any network call.
pub async fn correlated_tickets_from_env(gate: &dyn SessionGate) -> ServiceReply {
    correlated_tickets_with_lookup(gate, |key| std::env::var(key).ok()).await
}

/// Same as [`correlated_tickets_from_env`] but sources configuration from
/// any key lookup, so callers and tests control it without process state.
pub async fn correlated_tickets_with_lookup(
    gate: &dyn SessionGate,
    lookup: impl Fn(&str) -> Option<String>,
) -> ServiceReply {
    if !gate.is_authenticated() {
        return ServiceReply::failure(401, "authentication required");
    }
    let config = match AppConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(err) => return ServiceReply::failure(500, err.to_string()),
    };
    let engine = match CorrelationEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(err) => return ServiceReply::failure(500, err.to_string()),
    };
    correlated_tickets(gate, &engine).await
}

#[cfg(test)]
mod tests {
    use super::{correlated_tickets, correlated_tickets_with_lookup, SessionGate};
    use crate::correlation::CorrelationEngine;
    use helpdesk_api::{HelpdeskClient, HelpdeskConfig};
    use tracker_api::{TrackerClient, TrackerConfig};

    struct FixedGate(bool);

    impl SessionGate for FixedGate {
        fn is_authenticated(&self) -> bool {
            self.0
        }
    }

    fn offline_engine() -> CorrelationEngine {
        // Points at a closed port; only reached by authenticated calls.
        let helpdesk = HelpdeskClient::new(
            HelpdeskConfig::new("support.example.com", "key").with_base_url("http://127.0.0.1:9"),
        )
        .expect("helpdesk client should build");
        let tracker =
            TrackerClient::new(TrackerConfig::new("http://127.0.0.1:9", "bot", "token", "ABC"))
                .expect("tracker client should build");
        CorrelationEngine::new(helpdesk, tracker, "Escalated", vec![2], 10)
    }

    #[tokio::test]
    async fn unauthenticated_caller_gets_401_without_network_io() {
        let reply = correlated_tickets(&FixedGate(false), &offline_engine()).await;

        assert_eq!(reply.status, 401);
        assert!(!reply.success);
        assert!(reply.data.is_none());
    }

    #[tokio::test]
    async fn fatal_batch_exhaustion_maps_to_500() {
        let reply = correlated_tickets(&FixedGate(true), &offline_engine()).await;

        assert_eq!(reply.status, 500);
        assert!(!reply.success);
        assert!(reply
            .error
            .as_deref()
            .is_some_and(|e| e.contains("exhausted")));
    }

    #[tokio::test]
    async fn missing_configuration_maps_to_500_before_any_network_io() {
        let values = std::collections::HashMap::from([
            ("HELPDESK_DOMAIN", "support.example.com"),
            ("TRACKER_BASE_URL", "https://issues.example.com"),
            ("TRACKER_USERNAME", "bot@example.com"),
            ("TRACKER_API_TOKEN", "tr-token"),
            ("TRACKER_PROJECT_KEY", "ABC"),
        ]);
        // HELPDESK_API_KEY is absent; no client is ever constructed.
        let reply = correlated_tickets_with_lookup(&FixedGate(true), |key| {
            values.get(key).map(|value| value.to_string())
        })
        .await;

        assert_eq!(reply.status, 500);
        assert!(!reply.success);
        assert!(reply.data.is_none());
        assert!(reply
            .error
            .as_deref()
            .is_some_and(|e| e.contains("HELPDESK_API_KEY")));
    }

    #[tokio::test]
    async fn reply_serializes_without_empty_optionals() {
        let reply = correlated_tickets(&FixedGate(false), &offline_engine()).await;
        let json = serde_json::to_value(&reply).expect("reply should serialize");

        assert_eq!(json["status"], 401);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"], "authentication required");
    }
}
