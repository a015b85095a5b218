//! Configuration management for the CLI.
//!
//! The file lives at `~/.gh-evidence/config.toml` unless `--config` names
//! another path. Environment variables override file values.

use crate::error::{CliError, Result};
use evidence_sources::config::{
    BIGQUERY_PROJECT_ENV, BIGQUERY_TOKEN_ENV, DEFAULT_BIGQUERY_ENDPOINT, DEFAULT_GITHUB_API_URL,
    GITHUB_TOKEN_ENV,
};
use evidence_sources::{ArchiveCredentials, ClientConfig, DEFAULT_TIMEOUT_SECS};
use evidence_verify::VerificationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const REDACTED: &str = "<redacted>";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API access
    #[serde(default)]
    pub github: GitHubSettings,

    /// GH Archive access
    #[serde(default)]
    pub archive: ArchiveSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// GitHub API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// GH Archive (BigQuery) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSettings {
    /// BigQuery REST API base URL
    #[serde(default = "default_bigquery_endpoint")]
    pub endpoint: String,

    /// Project billed for queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// OAuth2 access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Compare identifying fields only
    #[serde(default)]
    pub identity_only: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gh-evidence").join("config.toml"))
    }

    /// Resolve the path to use: the override if given, else the default.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from the resolved path and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_from(&Self::resolve_path(path)?)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Override file values with the environment.
    ///
    /// Empty variables are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(token) = var(GITHUB_TOKEN_ENV) {
            self.github.token = Some(token);
        }
        if let Some(project_id) = var(BIGQUERY_PROJECT_ENV) {
            self.archive.project_id = Some(project_id);
        }
        if let Some(access_token) = var(BIGQUERY_TOKEN_ENV) {
            self.archive.access_token = Some(access_token);
        }
    }

    /// HTTP client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_secs: self.settings.timeout_secs,
            github_api_url: self.github.api_url.clone(),
            github_token: self.github.token.clone(),
            bigquery_endpoint: self.archive.endpoint.clone(),
            ..ClientConfig::default()
        }
    }

    /// Archive credentials, present only when both parts are configured.
    pub fn archive_credentials(&self) -> Option<ArchiveCredentials> {
        match (&self.archive.project_id, &self.archive.access_token) {
            (Some(project_id), Some(access_token)) => {
                Some(ArchiveCredentials::new(project_id, access_token))
            }
            _ => None,
        }
    }

    /// Comparison settings.
    pub fn verification_config(&self) -> VerificationConfig {
        if self.settings.identity_only {
            VerificationConfig::identity_only()
        } else {
            VerificationConfig::default()
        }
    }

    /// Copy with secrets replaced, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.github.token.is_some() {
            config.github.token = Some(REDACTED.to_string());
        }
        if config.archive.access_token.is_some() {
            config.archive.access_token = Some(REDACTED.to_string());
        }
        config
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
        }
    }
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            endpoint: default_bigquery_endpoint(),
            project_id: None,
            access_token: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            identity_only: false,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_bigquery_endpoint() -> String {
    DEFAULT_BIGQUERY_ENDPOINT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.timeout_secs, 30);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!(config.archive_credentials().is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [settings]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.archive.endpoint, DEFAULT_BIGQUERY_ENDPOINT);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::default();
        config.github.token = Some("from-file".to_string());

        let env: HashMap<&str, &str> = [
            (GITHUB_TOKEN_ENV, "from-env"),
            (BIGQUERY_PROJECT_ENV, "osint-project"),
            (BIGQUERY_TOKEN_ENV, "  "),
        ]
        .into_iter()
        .collect();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.github.token.as_deref(), Some("from-env"));
        assert_eq!(config.archive.project_id.as_deref(), Some("osint-project"));
        // Blank token is ignored, so credentials stay incomplete
        assert!(config.archive_credentials().is_none());
    }

    #[test]
    fn test_client_config() {
        let mut config = Config::default();
        config.settings.timeout_secs = 5;
        config.github.token = Some("ghp_x".to_string());

        let client = config.client_config();
        assert_eq!(client.timeout_secs, 5);
        assert_eq!(client.github_token.as_deref(), Some("ghp_x"));
    }

    #[test]
    fn test_redacted() {
        let mut config = Config::default();
        config.archive.project_id = Some("p".to_string());
        config.archive.access_token = Some("ya29.secret".to_string());

        let shown = config.redacted().to_toml().unwrap();
        assert!(!shown.contains("ya29.secret"));
        assert!(shown.contains(REDACTED));
    }
}
