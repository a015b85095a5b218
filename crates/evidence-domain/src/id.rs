//! Evidence identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single evidence record
///
/// Loaded records keep whatever identifier they were serialized with. Records
/// added to a store without one get a UUIDv7 string, which sorts
/// chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceId(String);

impl EvidenceId {
    /// Generate a new UUIDv7-based identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use evidence_domain::EvidenceId;
    ///
    /// let id = EvidenceId::generate();
    /// assert_eq!(id.as_str().len(), 36);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EvidenceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
