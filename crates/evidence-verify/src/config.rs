//! Verifier configuration

use serde::{Deserialize, Serialize};

/// Which non-identifying fields are compared
///
/// Identifying fields (SHA, number, head SHA, target SHA, tag name, content
/// hash) are always compared; these toggles only cover descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Compare claimed commit messages
    pub check_commit_message: bool,

    /// Compare claimed commit author names
    pub check_commit_author: bool,

    /// Compare claimed issue/PR titles
    pub check_issue_title: bool,

    /// Compare claimed issue/PR states
    pub check_issue_state: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            check_commit_message: true,
            check_commit_author: true,
            check_issue_title: true,
            check_issue_state: true,
        }
    }
}

impl VerificationConfig {
    /// Compare every field
    pub fn strict() -> Self {
        Self::default()
    }

    /// Compare identifying fields only
    ///
    /// Useful for old evidence where titles and states are expected to have
    /// drifted since collection.
    pub fn identity_only() -> Self {
        Self {
            check_commit_message: false,
            check_commit_author: false,
            check_issue_title: false,
            check_issue_state: false,
        }
    }
}
