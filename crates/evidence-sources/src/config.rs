//! Client configuration and credentials

use std::time::Duration;

/// Timeout applied to every outbound request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default GitHub REST API base URL
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default BigQuery REST API base URL
pub const DEFAULT_BIGQUERY_ENDPOINT: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Environment variable holding a GitHub token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the BigQuery billing project
pub const BIGQUERY_PROJECT_ENV: &str = "GHE_BIGQUERY_PROJECT";

/// Environment variable holding a BigQuery OAuth access token
pub const BIGQUERY_TOKEN_ENV: &str = "GHE_BIGQUERY_TOKEN";

/// Settings shared by all HTTP clients
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// GitHub REST API base URL
    pub github_api_url: String,

    /// GitHub token; unauthenticated requests are rate limited harder
    pub github_token: Option<String>,

    /// BigQuery REST API base URL
    pub bigquery_endpoint: String,

    /// User-Agent header (GitHub rejects requests without one)
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            bigquery_endpoint: DEFAULT_BIGQUERY_ENDPOINT.to_string(),
            user_agent: format!("gh-evidence/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the GitHub token
    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Credentials for GH Archive queries
///
/// Their absence is an environment condition: archive verification is
/// skipped rather than failed.
#[derive(Clone, PartialEq)]
pub struct ArchiveCredentials {
    /// Google Cloud project billed for queries
    pub project_id: String,

    /// OAuth2 access token with BigQuery scope
    pub access_token: String,
}

impl ArchiveCredentials {
    /// Create credentials
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            access_token: access_token.into(),
        }
    }
}

// Keep the token out of logs
impl std::fmt::Debug for ArchiveCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveCredentials")
            .field("project_id", &self.project_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert!(config.github_token.is_none());
        assert!(config.user_agent.starts_with("gh-evidence/"));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_github_token("ghp_test")
            .with_timeout_secs(5);
        assert_eq!(config.github_token.as_deref(), Some("ghp_test"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = ArchiveCredentials::new("my-project", "ya29.secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("my-project"));
        assert!(!debug.contains("ya29.secret"));
    }
}
