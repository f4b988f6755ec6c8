//! Environment-derived configuration for the correlation backend.

use helpdesk_api::HelpdeskConfig;
use std::env;
use thiserror::Error;
use tracker_api::TrackerConfig;

pub const ENV_HELPDESK_DOMAIN: &str = "HELPDESK_DOMAIN";
pub const ENV_HELPDESK_API_KEY: &str = "HELPDESK_API_KEY";
pub const ENV_TRACKER_BASE_URL: &str = "TRACKER_BASE_URL";
pub const ENV_TRACKER_USERNAME: &str = "TRACKER_USERNAME";
pub const ENV_TRACKER_API_TOKEN: &str = "TRACKER_API_TOKEN";
pub const ENV_TRACKER_PROJECT_KEY: &str = "TRACKER_PROJECT_KEY";
pub const ENV_TARGET_STATUS_LABEL: &str = "TARGET_STATUS_LABEL";

pub const DEFAULT_TARGET_STATUS_LABEL: &str = "Escalated";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Candidate numeric status codes tried when schema discovery cannot map
/// the target label. Overridable; these are defaults, not assumptions.
pub const DEFAULT_FALLBACK_STATUS_CODES: [i64; 4] = [2, 3, 6, 7];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Represents the full configuration consumed by the correlation engine.
/// Missing credentials are fatal before any network call is attempted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub helpdesk_domain: String,
    pub helpdesk_api_key: String,
    pub tracker_base_url: String,
    pub tracker_username: String,
    pub tracker_api_token: String,
    pub tracker_project_key: String,
    pub target_status_label: String,
    pub fallback_status_codes: Vec<i64>,
    pub page_size: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests can supply values
    /// without touching process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            helpdesk_domain: require(ENV_HELPDESK_DOMAIN)?,
            helpdesk_api_key: require(ENV_HELPDESK_API_KEY)?,
            tracker_base_url: require(ENV_TRACKER_BASE_URL)?,
            tracker_username: require(ENV_TRACKER_USERNAME)?,
            tracker_api_token: require(ENV_TRACKER_API_TOKEN)?,
            tracker_project_key: require(ENV_TRACKER_PROJECT_KEY)?,
            target_status_label: lookup(ENV_TARGET_STATUS_LABEL)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TARGET_STATUS_LABEL.to_string()),
            fallback_status_codes: DEFAULT_FALLBACK_STATUS_CODES.to_vec(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn helpdesk_config(&self) -> HelpdeskConfig {
        HelpdeskConfig::new(self.helpdesk_domain.clone(), self.helpdesk_api_key.clone())
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::new(
            self.tracker_base_url.clone(),
            self.tracker_username.clone(),
            self.tracker_api_token.clone(),
            self.tracker_project_key.clone(),
        )
    }
}
