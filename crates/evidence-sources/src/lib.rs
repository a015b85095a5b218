//! gh-evidence Source Layer
//!
//! Network implementations of the source traits from `evidence-domain`.
//!
//! # Sources
//!
//! - `GitHubClient`: GitHub REST API
//! - `HttpFetcher`: plain GETs for Wayback snapshots and vendor pages
//! - `GhArchiveClient`: GH Archive tables through the BigQuery REST API
//! - [`mock`]: deterministic in-memory sources for tests
//!
//! All clients are blocking and share one fixed request timeout
//! (`DEFAULT_TIMEOUT_SECS`).
//!
//! # Examples
//!
//! ```
//! use evidence_domain::traits::GitHubApi;
//! use evidence_domain::{CommitRecord, GitHubRepository};
//! use evidence_sources::mock::MockGitHub;
//!
//! let repo = GitHubRepository::new("octo", "hello");
//! let github = MockGitHub::new().with_commit(&repo, CommitRecord {
//!     sha: "abc123".to_string(),
//!     message: "init".to_string(),
//!     author_name: Some("octo".to_string()),
//! });
//!
//! let commit = github.get_commit(&repo, "abc123").unwrap();
//! assert_eq!(commit.message, "init");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod fetcher;
pub mod gharchive;
pub mod github;
pub mod mock;

use thiserror::Error;

pub use config::{ArchiveCredentials, ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use fetcher::HttpFetcher;
pub use gharchive::GhArchiveClient;
pub use github::GitHubClient;

/// Errors that can occur while talking to a source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The requested object does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success HTTP status other than 404
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection or other transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credentials missing or rejected
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Query could not be built or did not complete
    #[error("Query error: {0}")]
    Query(String),
}

impl SourceError {
    /// The source reported that the object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Timeout(e.to_string())
        } else if e.is_connect() {
            SourceError::Transport(e.to_string())
        } else if e.is_decode() {
            SourceError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            match status {
                reqwest::StatusCode::NOT_FOUND => SourceError::NotFound(e.to_string()),
                _ => SourceError::Http {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
            }
        } else {
            SourceError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(SourceError::NotFound("x".to_string()).is_not_found());
        assert!(!SourceError::Transport("x".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = SourceError::Http {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }
}
