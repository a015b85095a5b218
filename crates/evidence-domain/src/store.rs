//! Persistent evidence collections
//!
//! An [`EvidenceStore`] is an ordered collection of evidence backed by a
//! JSON file holding an array of evidence objects, the same document shape
//! [`load_evidence`] accepts.

use crate::{load_evidence, Evidence, EvidenceError, EvidenceId, EvidenceSource};
use std::fs;
use std::path::Path;

/// Filter for [`EvidenceStore::query`]
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceQuery {
    /// Declared verification source
    pub source: Option<EvidenceSource>,

    /// `event_type` or `observation_type` value
    pub kind: Option<String>,

    /// Repository full name (`owner/name`), compared ignoring case
    pub repository: Option<String>,
}

impl EvidenceQuery {
    /// Whether an item passes every set filter
    pub fn matches(&self, evidence: &Evidence) -> bool {
        if let Some(source) = &self.source {
            if evidence.source() != source {
                return false;
            }
        }
        if let Some(kind) = &self.kind {
            if evidence.kind_name() != kind.as_str() {
                return false;
            }
        }
        if let Some(repository) = &self.repository {
            match evidence.repository() {
                Some(repo) if repo.full_name().eq_ignore_ascii_case(repository) => {}
                _ => return false,
            }
        }
        true
    }
}

/// An ordered, id-keyed collection of evidence
///
/// # Examples
///
/// ```
/// use evidence_domain::{load_evidence, EvidenceQuery, EvidenceSource, EvidenceStore};
///
/// let mut store = EvidenceStore::new();
/// for item in load_evidence(r#"[
///     {"observation_type": "branch", "branch_name": "main",
///      "verification": {"source": "github"}},
///     {"observation_type": "article", "verification": {"source": "wayback"}}
/// ]"#).unwrap() {
///     store.add(item);
/// }
///
/// let query = EvidenceQuery {
///     source: Some(EvidenceSource::GitHub),
///     ..Default::default()
/// };
/// assert_eq!(store.query(&query).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceStore {
    items: Vec<Evidence>,
}

impl EvidenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store file; a missing file is an empty store
    pub fn load(path: &Path) -> Result<Self, EvidenceError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a store from an evidence document
    pub fn from_json(json: &str) -> Result<Self, EvidenceError> {
        let mut store = Self::new();
        store.extend(load_evidence(json)?);
        Ok(store)
    }

    /// Write the store as a pretty-printed JSON array
    pub fn save(&self, path: &Path) -> Result<(), EvidenceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Serialize the store as a JSON array
    pub fn to_json(&self) -> Result<String, EvidenceError> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Add an item and return its id
    ///
    /// Items without an id get a generated one. An item whose id is already
    /// stored replaces the stored item in place.
    pub fn add(&mut self, mut evidence: Evidence) -> EvidenceId {
        let id = match evidence.id() {
            Some(id) => id.clone(),
            None => {
                let id = EvidenceId::generate();
                assign_id(&mut evidence, id.clone());
                id
            }
        };

        match self.position(&id) {
            Some(index) => self.items[index] = evidence,
            None => self.items.push(evidence),
        }
        id
    }

    /// Add every item, in order
    pub fn extend(&mut self, items: impl IntoIterator<Item = Evidence>) {
        for item in items {
            self.add(item);
        }
    }

    /// Look an item up by id
    pub fn get(&self, id: &EvidenceId) -> Option<&Evidence> {
        self.position(id).map(|index| &self.items[index])
    }

    /// Remove an item by id
    pub fn remove(&mut self, id: &EvidenceId) -> Option<Evidence> {
        self.position(id).map(|index| self.items.remove(index))
    }

    /// Items matching a query, in store order
    pub fn query(&self, query: &EvidenceQuery) -> Vec<&Evidence> {
        self.items.iter().filter(|item| query.matches(item)).collect()
    }

    /// All items, in store order
    pub fn items(&self) -> &[Evidence] {
        &self.items
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &EvidenceId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == Some(id))
    }
}

fn assign_id(evidence: &mut Evidence, id: EvidenceId) {
    match evidence {
        Evidence::Event(event) => event.evidence_id = Some(id),
        Evidence::Observation(observation) => observation.evidence_id = Some(id),
    }
}
