//! Property tests for evidence loading and identifiers

use evidence_domain::{load_evidence, Evidence, EvidenceSource, GitHubRepository};
use proptest::prelude::*;

proptest! {
    /// Any source name survives a parse and display cycle
    #[test]
    fn test_source_name_roundtrip(name in "[a-z_]{1,20}") {
        let source = EvidenceSource::parse(&name);
        prop_assert_eq!(source.to_string(), name.clone());
        prop_assert_eq!(EvidenceSource::parse(source.as_str()), source);
    }

    /// `owner/name` parsing inverts `full_name`
    #[test]
    fn test_repository_full_name(owner in "[A-Za-z0-9-]{1,39}", name in "[A-Za-z0-9._-]{1,100}") {
        let repo = GitHubRepository::new(owner, name);
        prop_assert_eq!(GitHubRepository::parse(&repo.full_name()), Some(repo));
    }

    /// Unrecognized sources load instead of failing
    #[test]
    fn test_unknown_source_loads(name in "[a-z]{3,12}") {
        prop_assume!(!EvidenceSource::parse(&name).is_known());

        let json = format!(
            r#"{{"observation_type": "article", "verification": {{"source": "{}"}}}}"#,
            name
        );
        let items = load_evidence(&json).unwrap();
        prop_assert_eq!(items[0].source(), &EvidenceSource::Unknown(name));
    }

    /// Arrays load in input order
    #[test]
    fn test_array_order(ids in prop::collection::vec("[a-z0-9-]{1,16}", 0..20)) {
        let objects: Vec<String> = ids
            .iter()
            .map(|id| format!(
                r#"{{"evidence_id": "{}", "observation_type": "article", "verification": {{"source": "github"}}}}"#,
                id
            ))
            .collect();
        let json = format!("[{}]", objects.join(","));

        let items = load_evidence(&json).unwrap();
        let loaded: Vec<&str> = items.iter().map(Evidence::label).collect();
        prop_assert_eq!(loaded, ids.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#[test]
fn test_missing_discriminator_is_an_error() {
    let err = load_evidence(r#"{"verification": {"source": "github"}}"#).unwrap_err();
    assert!(err.to_string().contains("event_type"));
}
