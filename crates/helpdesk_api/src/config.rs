use std::time::Duration;

pub const DEFAULT_API_PATH: &str = "api/v2";
pub const DEFAULT_USER_AGENT: &str = "deskcorr";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Constant placeholder password paired with the API key for Basic auth,
/// as required by the upstream helpdesk API.
pub const PLACEHOLDER_PASSWORD: &str = "X";

/// Represents connection settings for one helpdesk client instance,
/// including the per-client TLS verification flag.
#[derive(Clone, Debug)]
pub struct HelpdeskConfig {
    pub domain: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl HelpdeskConfig {
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_key: api_key.into(),
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }

    /// Overrides the derived `https://{domain}/api/v2` root, mainly for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    pub fn with_connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = duration;
        self
    }

    /// Scopes relaxed certificate verification to this client instance only.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn api_root(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}/", base.trim_end_matches('/')),
            None => format!(
                "https://{}/{}/",
                self.domain.trim_end_matches('/'),
                DEFAULT_API_PATH
            ),
        }
    }
}
