//! The evidence sum type and JSON loading

use crate::{Event, EvidenceId, EvidenceSource, GitHubRepository, Observation, VerificationInfo};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading evidence
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// The object carries neither `event_type` nor `observation_type`
    #[error("Data must contain 'event_type' or 'observation_type' field")]
    MissingDiscriminator,

    /// The document is not an object or an array of objects
    #[error("Expected an evidence object or an array of evidence objects")]
    NotAnObject,

    /// The object does not match its declared kind
    #[error("Invalid {kind} '{name}': {source}")]
    Invalid {
        /// "event_type" or "observation_type"
        kind: &'static str,
        /// Declared type name
        name: String,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a store file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A verifiable record of GitHub activity or state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Evidence {
    /// Timeline occurrence
    Event(Event),

    /// Point-in-time entity snapshot
    Observation(Observation),
}

impl Evidence {
    /// Record identifier, when one was provided
    pub fn id(&self) -> Option<&EvidenceId> {
        match self {
            Evidence::Event(e) => e.evidence_id.as_ref(),
            Evidence::Observation(o) => o.evidence_id.as_ref(),
        }
    }

    /// Identifier used when labelling messages; "unknown" when absent
    pub fn label(&self) -> &str {
        self.id().map(EvidenceId::as_str).unwrap_or("unknown")
    }

    /// Verification metadata
    pub fn verification(&self) -> &VerificationInfo {
        match self {
            Evidence::Event(e) => &e.verification,
            Evidence::Observation(o) => &o.verification,
        }
    }

    /// Declared source kind
    pub fn source(&self) -> &EvidenceSource {
        &self.verification().source
    }

    /// Repository the record refers to
    pub fn repository(&self) -> Option<&GitHubRepository> {
        match self {
            Evidence::Event(e) => e.repository.as_ref(),
            Evidence::Observation(o) => o.repository.as_ref(),
        }
    }

    /// `event_type` or `observation_type` value
    pub fn kind_name(&self) -> &'static str {
        match self {
            Evidence::Event(e) => e.kind.as_str(),
            Evidence::Observation(o) => o.kind.as_str(),
        }
    }

    /// Parse a single evidence object
    ///
    /// The discriminator field decides between [`Event`] and
    /// [`Observation`].
    pub fn from_value(value: Value) -> Result<Self, EvidenceError> {
        let object = value.as_object().ok_or(EvidenceError::NotAnObject)?;

        if let Some(name) = object.get("event_type") {
            let name = name.as_str().unwrap_or_default().to_string();
            return serde_json::from_value(value)
                .map(Evidence::Event)
                .map_err(|source| EvidenceError::Invalid {
                    kind: "event_type",
                    name,
                    source,
                });
        }

        if let Some(name) = object.get("observation_type") {
            let name = name.as_str().unwrap_or_default().to_string();
            return serde_json::from_value(value)
                .map(Evidence::Observation)
                .map_err(|source| EvidenceError::Invalid {
                    kind: "observation_type",
                    name,
                    source,
                });
        }

        Err(EvidenceError::MissingDiscriminator)
    }
}

impl From<Event> for Evidence {
    fn from(event: Event) -> Self {
        Evidence::Event(event)
    }
}

impl From<Observation> for Evidence {
    fn from(observation: Observation) -> Self {
        Evidence::Observation(observation)
    }
}

/// Load evidence from a JSON document
///
/// Accepts a single evidence object or an array of them; order is preserved.
///
/// # Examples
///
/// ```
/// use evidence_domain::load_evidence;
///
/// let json = r#"[{
///     "evidence_id": "e1",
///     "observation_type": "branch",
///     "repository": {"owner": "octo", "name": "hello"},
///     "verification": {"source": "github"},
///     "branch_name": "main"
/// }]"#;
///
/// let evidence = load_evidence(json).unwrap();
/// assert_eq!(evidence.len(), 1);
/// assert_eq!(evidence[0].label(), "e1");
/// ```
pub fn load_evidence(json: &str) -> Result<Vec<Evidence>, EvidenceError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items.into_iter().map(Evidence::from_value).collect(),
        value @ Value::Object(_) => Ok(vec![Evidence::from_value(value)?]),
        _ => Err(EvidenceError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_discriminator() {
        let result = load_evidence(r#"{"verification": {"source": "github"}}"#);
        assert!(matches!(result, Err(EvidenceError::MissingDiscriminator)));
    }

    #[test]
    fn test_unknown_observation_type() {
        let result = load_evidence(
            r#"{"observation_type": "gist", "verification": {"source": "github"}}"#,
        );
        match result {
            Err(EvidenceError::Invalid { kind, name, .. }) => {
                assert_eq!(kind, "observation_type");
                assert_eq!(name, "gist");
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_document_rejected() {
        assert!(matches!(load_evidence("42"), Err(EvidenceError::NotAnObject)));
        assert!(matches!(load_evidence("[1]"), Err(EvidenceError::NotAnObject)));
    }

    #[test]
    fn test_label_fallback() {
        let evidence = load_evidence(
            r#"{"observation_type": "article", "verification": {"source": "wayback"}}"#,
        )
        .unwrap();
        assert_eq!(evidence[0].label(), "unknown");
        assert_eq!(evidence[0].kind_name(), "article");
        assert_eq!(evidence[0].source(), &EvidenceSource::Wayback);
    }

    #[test]
    fn test_mixed_array_preserves_order() {
        let json = r#"[
            {"evidence_id": "a", "event_type": "public", "when": "2025-01-01T00:00:00Z",
             "verification": {"source": "gharchive"}},
            {"evidence_id": "b", "observation_type": "tag", "verification": {"source": "github"}}
        ]"#;

        let evidence = load_evidence(json).unwrap();
        assert!(matches!(evidence[0], Evidence::Event(_)));
        assert!(matches!(evidence[1], Evidence::Observation(_)));
        assert_eq!(evidence[1].label(), "b");
    }
}
