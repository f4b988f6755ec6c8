use std::time::Duration;

pub const DEFAULT_API_PATH: &str = "rest/api/2";
pub const DEFAULT_USER_AGENT: &str = "deskcorr";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Represents connection settings for one issue-tracker client instance.
/// All queries are scoped to `project_key`.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub base_url: String,
    pub username: String,
    pub api_token: String,
    pub project_key: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl TrackerConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
        project_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            api_token: api_token.into(),
            project_key: project_key.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
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
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            DEFAULT_API_PATH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TrackerConfig;

    #[test]
    fn api_root_joins_base_and_api_path() {
        let config = TrackerConfig::new("https://issues.example.com/", "bot", "token", "ABC");
        assert_eq!(config.api_root(), "https://issues.example.com/rest/api/2/");
    }
}
