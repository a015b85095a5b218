//! Timeline events: point-in-time GitHub activity

use crate::{EvidenceId, GitHubActor, GitHubRepository, VerificationInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timeline event such as a push or a workflow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Record identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_id: Option<EvidenceId>,

    /// When the event happened
    pub when: DateTime<Utc>,

    /// Who performed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who: Option<GitHubActor>,

    /// Free-form summary of what happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what: Option<String>,

    /// Repository the event belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<GitHubRepository>,

    /// How to re-verify this event
    pub verification: VerificationInfo,

    /// Kind-specific payload, discriminated by `event_type`
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Event kinds, discriminated by `event_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventKind {
    /// Commits pushed to a ref
    Push {
        /// Ref that was pushed (e.g. "refs/heads/main")
        #[serde(default)]
        ref_name: Option<String>,
        /// Ref tip before the push
        #[serde(default)]
        before_sha: Option<String>,
        /// Ref tip after the push
        #[serde(default)]
        after_sha: Option<String>,
        /// Number of commits in the push
        #[serde(default)]
        size: Option<u64>,
    },

    /// Pull request activity
    PullRequest {
        /// What happened to the pull request
        action: PrAction,
        /// Pull request number
        #[serde(default)]
        pr_number: Option<u64>,
        /// Pull request title
        #[serde(default)]
        pr_title: Option<String>,
    },

    /// Issue activity
    Issue {
        /// What happened to the issue
        action: IssueAction,
        /// Issue number
        #[serde(default)]
        issue_number: Option<u64>,
        /// Issue title
        #[serde(default)]
        issue_title: Option<String>,
    },

    /// Comment on an issue or pull request
    IssueComment {
        /// Issue number
        #[serde(default)]
        issue_number: Option<u64>,
        /// Comment id
        #[serde(default)]
        comment_id: Option<u64>,
        /// Comment body
        #[serde(default)]
        comment_body: Option<String>,
    },

    /// Branch or tag created
    Create {
        /// Kind of ref
        ref_type: RefType,
        /// Ref name
        #[serde(default)]
        ref_name: Option<String>,
    },

    /// Branch or tag deleted
    Delete {
        /// Kind of ref
        ref_type: RefType,
        /// Ref name
        #[serde(default)]
        ref_name: Option<String>,
    },

    /// Repository forked
    Fork {
        /// Full name of the new fork
        #[serde(default)]
        fork_full_name: Option<String>,
    },

    /// GitHub Actions workflow run
    WorkflowRun {
        /// Workflow name
        #[serde(default)]
        workflow_name: Option<String>,
        /// Commit the run executed against
        #[serde(default)]
        head_sha: Option<String>,
        /// Run conclusion
        #[serde(default)]
        conclusion: Option<WorkflowConclusion>,
    },

    /// Release published
    Release {
        /// Release tag
        #[serde(default)]
        tag_name: Option<String>,
        /// Release title
        #[serde(default)]
        release_name: Option<String>,
    },

    /// Repository starred
    Watch,

    /// Collaborator membership changed
    Member {
        /// Login of the affected member
        #[serde(default)]
        member: Option<String>,
        /// Membership action
        #[serde(default)]
        action: Option<String>,
    },

    /// Repository made public
    Public,
}

impl EventKind {
    /// Name used in evidence JSON (`event_type`)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push { .. } => "push",
            EventKind::PullRequest { .. } => "pull_request",
            EventKind::Issue { .. } => "issue",
            EventKind::IssueComment { .. } => "issue_comment",
            EventKind::Create { .. } => "create",
            EventKind::Delete { .. } => "delete",
            EventKind::Fork { .. } => "fork",
            EventKind::WorkflowRun { .. } => "workflow_run",
            EventKind::Release { .. } => "release",
            EventKind::Watch => "watch",
            EventKind::Member { .. } => "member",
            EventKind::Public => "public",
        }
    }
}

/// Kind of git ref in create/delete events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefType {
    /// A branch
    Branch,
    /// A tag
    Tag,
    /// The repository itself
    Repository,
}

/// Pull request actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrAction {
    /// Opened
    Opened,
    /// Closed without merge
    Closed,
    /// Merged
    Merged,
    /// Reopened
    Reopened,
    /// New commits pushed to the head branch
    Synchronize,
}

/// Issue actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    /// Opened
    Opened,
    /// Closed
    Closed,
    /// Reopened
    Reopened,
    /// Deleted
    Deleted,
}

/// Workflow run conclusions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowConclusion {
    /// Succeeded
    Success,
    /// Failed
    Failure,
    /// Cancelled
    Cancelled,
    /// Skipped
    Skipped,
}
