//! Observations: the state of a GitHub entity as seen at fetch time

use crate::{CommitAuthor, EvidenceId, GitHubActor, GitHubRepository, VerificationInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of some entity
///
/// Identifying fields inside [`ObservationKind`] are optional on purpose:
/// a record without them still loads, and verification reports the missing
/// field instead of contacting the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Record identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_id: Option<EvidenceId>,

    /// When the observation was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_when: Option<DateTime<Utc>>,

    /// Who made the observation or is associated with it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_by: Option<GitHubActor>,

    /// Repository the entity lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<GitHubRepository>,

    /// How to re-verify this observation
    pub verification: VerificationInfo,

    /// The entity is known to have been deleted from its source
    #[serde(default)]
    pub is_deleted: bool,

    /// Kind-specific payload, discriminated by `observation_type`
    #[serde(flatten)]
    pub kind: ObservationKind,
}

/// Observation kinds, discriminated by `observation_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "observation_type", rename_all = "snake_case")]
pub enum ObservationKind {
    /// A commit
    Commit {
        /// Commit SHA
        #[serde(default)]
        sha: Option<String>,
        /// Full commit message
        #[serde(default)]
        message: Option<String>,
        /// Git author
        #[serde(default)]
        author: Option<CommitAuthor>,
    },

    /// An issue or pull request
    Issue {
        /// Issue or PR number
        #[serde(default)]
        issue_number: Option<u64>,
        /// Whether the number refers to a pull request
        #[serde(default)]
        is_pull_request: bool,
        /// Title
        #[serde(default)]
        title: Option<String>,
        /// "open", "closed" or "merged"
        #[serde(default)]
        state: Option<String>,
    },

    /// A file at a ref
    File {
        /// Path inside the repository
        #[serde(default)]
        file_path: Option<String>,
        /// Ref the file was read from (defaults to HEAD)
        #[serde(default)]
        branch: Option<String>,
        /// SHA-256 hex digest of the file content
        #[serde(default)]
        content_hash: Option<String>,
    },

    /// A fork of the observation's repository
    Fork {
        /// The forked repository
        #[serde(default)]
        fork_repository: Option<GitHubRepository>,
    },

    /// A branch
    Branch {
        /// Branch name
        #[serde(default)]
        branch_name: Option<String>,
        /// Commit at the branch tip
        #[serde(default)]
        head_sha: Option<String>,
    },

    /// A tag
    Tag {
        /// Tag name
        #[serde(default)]
        tag_name: Option<String>,
        /// Object the tag points to
        #[serde(default)]
        target_sha: Option<String>,
    },

    /// A release
    Release {
        /// Release tag
        #[serde(default)]
        tag_name: Option<String>,
        /// Release title
        #[serde(default)]
        release_name: Option<String>,
    },

    /// An archived web page
    Snapshot {
        /// URL that was archived
        #[serde(default)]
        original_url: Option<String>,
        /// 14-digit Wayback capture timestamp (YYYYMMDDhhmmss)
        #[serde(default)]
        captured_at: Option<String>,
    },

    /// An indicator of compromise published by a third party
    Ioc {
        /// Kind of indicator
        ioc_type: IocType,
        /// Indicator value
        value: String,
    },

    /// A published article or write-up
    Article {
        /// Article title
        #[serde(default)]
        title: Option<String>,
        /// Article author
        #[serde(default)]
        author: Option<String>,
    },
}

impl ObservationKind {
    /// Name used in evidence JSON (`observation_type`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationKind::Commit { .. } => "commit",
            ObservationKind::Issue { .. } => "issue",
            ObservationKind::File { .. } => "file",
            ObservationKind::Fork { .. } => "fork",
            ObservationKind::Branch { .. } => "branch",
            ObservationKind::Tag { .. } => "tag",
            ObservationKind::Release { .. } => "release",
            ObservationKind::Snapshot { .. } => "snapshot",
            ObservationKind::Ioc { .. } => "ioc",
            ObservationKind::Article { .. } => "article",
        }
    }
}

/// Kinds of indicators of compromise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IocType {
    /// Git commit SHA
    CommitSha,
    /// File hash (md5, sha1, sha256)
    FileHash,
    /// Domain name
    Domain,
    /// IP address
    IpAddress,
    /// URL
    Url,
    /// Email address
    Email,
    /// Package name or version
    Package,
    /// Anything else
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvidenceSource;

    #[test]
    fn test_parse_commit_observation() {
        let json = r#"{
            "evidence_id": "obs-commit",
            "observation_type": "commit",
            "repository": {"owner": "aws", "name": "aws-toolkit-vscode"},
            "verification": {"source": "github"},
            "sha": "678851bbe9776228f55e0460e66a6167ac2a1685",
            "author": {"name": "lkmanka58"}
        }"#;

        let obs: Observation = serde_json::from_str(json).unwrap();
        assert!(!obs.is_deleted);
        assert_eq!(obs.verification.source, EvidenceSource::GitHub);
        match obs.kind {
            ObservationKind::Commit { sha, message, author } => {
                assert_eq!(sha.as_deref(), Some("678851bbe9776228f55e0460e66a6167ac2a1685"));
                assert!(message.is_none());
                assert_eq!(author.unwrap().name, "lkmanka58");
            }
            other => panic!("Expected commit, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ioc_observation() {
        let json = r#"{
            "observation_type": "ioc",
            "verification": {"source": "security_vendor", "url": "https://vendor.example/report"},
            "ioc_type": "domain",
            "value": "evil.example"
        }"#;

        let obs: Observation = serde_json::from_str(json).unwrap();
        assert_eq!(
            obs.kind,
            ObservationKind::Ioc {
                ioc_type: IocType::Domain,
                value: "evil.example".to_string()
            }
        );
    }

    #[test]
    fn test_issue_defaults() {
        let json = r#"{
            "observation_type": "issue",
            "verification": {"source": "github"},
            "is_deleted": true
        }"#;

        let obs: Observation = serde_json::from_str(json).unwrap();
        assert!(obs.is_deleted);
        match obs.kind {
            ObservationKind::Issue { issue_number, is_pull_request, .. } => {
                assert!(issue_number.is_none());
                assert!(!is_pull_request);
            }
            other => panic!("Expected issue, got {:?}", other),
        }
    }
}
