//! Ground truth as returned by evidence sources
//!
//! These are deliberately narrow: each record holds only the fields the
//! verifier compares against.

use chrono::{DateTime, Utc};

/// Commit as reported by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitRecord {
    /// Full commit SHA
    pub sha: String,
    /// Commit message
    pub message: String,
    /// Git author name
    pub author_name: Option<String>,
}

/// Issue or pull request as reported by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueRecord {
    /// Issue or PR number
    pub number: u64,
    /// Title
    pub title: String,
    /// "open" or "closed"
    pub state: String,
    /// Pull request was merged (always false for issues)
    pub merged: bool,
}

impl IssueRecord {
    /// State with merged pull requests reported as "merged"
    pub fn effective_state(&self) -> &str {
        if self.merged {
            "merged"
        } else {
            &self.state
        }
    }
}

/// File contents as reported by the GitHub contents API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileRecord {
    /// Encoded content (may contain line breaks)
    pub content: Option<String>,
    /// Content encoding, normally "base64"
    pub encoding: Option<String>,
}

/// Branch as reported by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchRecord {
    /// SHA of the branch tip
    pub head_sha: Option<String>,
}

/// Tag ref as reported by the GitHub git refs API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagRecord {
    /// SHA of the object the ref points to
    pub target_sha: Option<String>,
}

/// Release as reported by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseRecord {
    /// Release tag name
    pub tag_name: String,
}

/// Repository metadata as reported by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryRecord {
    /// `owner/name`
    pub full_name: String,
    /// Repository is a fork
    pub fork: bool,
    /// `owner/name` of the fork parent
    pub parent_full_name: Option<String>,
}

/// Response to a plain URL fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl PageResponse {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parameters for a GH Archive row lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLookup {
    /// Fully qualified BigQuery table
    pub table: String,
    /// Repository full name (`owner/name`)
    pub repo: Option<String>,
    /// Actor login
    pub actor: Option<String>,
    /// Start of the lookup window as a 12-digit `YYYYMMDDHHMM` timestamp
    pub from_date: String,
}

/// A matching GH Archive row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRow {
    /// Event type
    pub event_type: String,
    /// Actor login
    pub actor: String,
    /// Repository full name
    pub repo: String,
    /// Event creation time
    pub created_at: DateTime<Utc>,
}
