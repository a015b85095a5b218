//! Evidence sources and the verification metadata attached to every record

use serde::{Deserialize, Serialize};
use std::fmt;

/// The system that vouches for a piece of evidence
///
/// Exactly one source is declared per record and it selects the single
/// verification path used for it. Unrecognized names are preserved in
/// [`EvidenceSource::Unknown`] so loading never fails on them; verification
/// rejects them instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EvidenceSource {
    /// Live GitHub REST API
    GitHub,

    /// GH Archive event tables in BigQuery
    GhArchive,

    /// Wayback Machine snapshot
    Wayback,

    /// Page published by a security vendor
    SecurityVendor,

    /// A local git clone
    Git,

    /// Any source name this crate does not know
    Unknown(String),
}

impl EvidenceSource {
    /// Get the source name as written in evidence JSON
    pub fn as_str(&self) -> &str {
        match self {
            EvidenceSource::GitHub => "github",
            EvidenceSource::GhArchive => "gharchive",
            EvidenceSource::Wayback => "wayback",
            EvidenceSource::SecurityVendor => "security_vendor",
            EvidenceSource::Git => "git",
            EvidenceSource::Unknown(name) => name,
        }
    }

    /// Parse a source name, falling back to [`EvidenceSource::Unknown`]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "github" => EvidenceSource::GitHub,
            "gharchive" => EvidenceSource::GhArchive,
            "wayback" => EvidenceSource::Wayback,
            "security_vendor" => EvidenceSource::SecurityVendor,
            "git" => EvidenceSource::Git,
            _ => EvidenceSource::Unknown(s.to_string()),
        }
    }

    /// Whether this is one of the supported source kinds
    pub fn is_known(&self) -> bool {
        !matches!(self, EvidenceSource::Unknown(_))
    }
}

impl fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EvidenceSource {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EvidenceSource> for String {
    fn from(source: EvidenceSource) -> Self {
        source.as_str().to_string()
    }
}

/// Provenance needed to re-verify a record against its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationInfo {
    /// Source system that produced the record
    pub source: EvidenceSource,

    /// URL of the source document (vendor report, Wayback snapshot, API URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Fully qualified BigQuery table for GH Archive records
    /// (e.g. "githubarchive.day.20250713")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bigquery_table: Option<String>,

    /// Query text or parameters originally used to fetch the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl VerificationInfo {
    /// Create verification info for a source with no extra metadata
    pub fn new(source: EvidenceSource) -> Self {
        Self {
            source,
            url: None,
            bigquery_table: None,
            query: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parsing() {
        assert_eq!(EvidenceSource::parse("github"), EvidenceSource::GitHub);
        assert_eq!(EvidenceSource::parse("GHArchive"), EvidenceSource::GhArchive);
        assert_eq!(
            EvidenceSource::parse("security_vendor"),
            EvidenceSource::SecurityVendor
        );
        assert_eq!(
            EvidenceSource::parse("pastebin"),
            EvidenceSource::Unknown("pastebin".to_string())
        );
    }

    #[test]
    fn test_unknown_source_survives_json() {
        let info: VerificationInfo =
            serde_json::from_str(r#"{"source": "pastebin", "url": "https://x"}"#).unwrap();
        assert_eq!(info.source, EvidenceSource::Unknown("pastebin".to_string()));
        assert!(!info.source.is_known());

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"pastebin\""));
    }

    #[test]
    fn test_known_source_round_trips_name() {
        for name in ["github", "gharchive", "wayback", "security_vendor", "git"] {
            assert_eq!(EvidenceSource::parse(name).as_str(), name);
        }
    }
}
