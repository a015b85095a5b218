//! GitHub entities referenced by evidence

use serde::{Deserialize, Serialize};
use std::fmt;

/// A repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitHubRepository {
    /// Owning user or organization
    pub owner: String,

    /// Repository name
    pub name: String,
}

impl GitHubRepository {
    /// Create a repository reference
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Parse `owner/name`
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }
}

impl fmt::Display for GitHubRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A GitHub account acting in an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubActor {
    /// Account login
    pub login: String,

    /// Numeric account id, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl GitHubActor {
    /// Create an actor from a login
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            id: None,
        }
    }
}

/// Git author recorded on a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// Author name as recorded by git
    pub name: String,

    /// Author email as recorded by git
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let repo = GitHubRepository::new("aws", "aws-toolkit-vscode");
        assert_eq!(repo.full_name(), "aws/aws-toolkit-vscode");
        assert_eq!(repo.to_string(), repo.full_name());
    }

    #[test]
    fn test_parse_full_name() {
        let repo = GitHubRepository::parse("octo/hello").unwrap();
        assert_eq!(repo.owner, "octo");
        assert_eq!(repo.name, "hello");

        assert!(GitHubRepository::parse("octo").is_none());
        assert!(GitHubRepository::parse("/hello").is_none());
        assert!(GitHubRepository::parse("a/b/c").is_none());
    }
}
