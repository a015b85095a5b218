//! gh-evidence Domain Layer
//!
//! Evidence records describing GitHub activity, the provenance each record
//! carries, and the trait seams through which ground truth is re-fetched.
//!
//! ## Key Concepts
//!
//! - **Evidence**: either an [`Event`] (timeline occurrence) or an
//!   [`Observation`] (point-in-time state of a GitHub entity)
//! - **VerificationInfo**: which source system vouches for the record, and how
//!   to reach it again
//! - **Records**: ground truth as returned by a source, compared field by
//!   field against the claimed evidence
//!
//! ## Architecture
//!
//! This crate does no network I/O; [`EvidenceStore`] reads and writes local
//! JSON files. Network implementations of the traits in
//! [`traits`] live in `evidence-sources`; the comparison logic lives in
//! `evidence-verify`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod event;
pub mod evidence;
pub mod id;
pub mod observation;
pub mod records;
pub mod source;
pub mod store;
pub mod traits;

// Re-exports for convenience
pub use entity::{CommitAuthor, GitHubActor, GitHubRepository};
pub use event::{Event, EventKind, IssueAction, PrAction, RefType, WorkflowConclusion};
pub use evidence::{load_evidence, Evidence, EvidenceError};
pub use id::EvidenceId;
pub use observation::{IocType, Observation, ObservationKind};
pub use records::{
    ArchiveLookup, ArchiveRow, BranchRecord, CommitRecord, FileRecord, IssueRecord, PageResponse,
    ReleaseRecord, RepositoryRecord, TagRecord,
};
pub use source::{EvidenceSource, VerificationInfo};
pub use store::{EvidenceQuery, EvidenceStore};
