//! gh-evidence Verifier
//!
//! Re-verifies evidence against the source it claims to come from.
//!
//! The Verifier provides:
//! - Dispatch from (entity kind, source kind) to a single checker
//! - Source checkers for the GitHub API, GH Archive, Wayback, security
//!   vendors and local git
//! - Aggregation over an ordered list of evidence
//!
//! Verification never returns `Err`: every failure mode ends up as a
//! human-readable message in a [`VerificationResult`].
//!
//! # Examples
//!
//! ```
//! use evidence_domain::{load_evidence, BranchRecord, GitHubRepository};
//! use evidence_sources::mock::{MockArchive, MockFetcher, MockGitHub};
//! use evidence_verify::Verifier;
//!
//! let repo = GitHubRepository::new("octo", "hello");
//! let github = MockGitHub::new().with_branch(&repo, "main", BranchRecord {
//!     head_sha: Some("abc123".to_string()),
//! });
//! let verifier = Verifier::new(github, MockFetcher::new(), None::<MockArchive>);
//!
//! let evidence = load_evidence(r#"{
//!     "evidence_id": "branch-main",
//!     "observation_type": "branch",
//!     "repository": {"owner": "octo", "name": "hello"},
//!     "verification": {"source": "github"},
//!     "branch_name": "main",
//!     "head_sha": "abc123"
//! }"#).unwrap();
//!
//! let result = verifier.verify_all(&evidence);
//! assert!(result.is_valid);
//! ```

#![warn(missing_docs)]

mod checkers;
mod config;
mod dispatch;
mod error;
mod result;
mod verifier;

pub use checkers::content_hash;
pub use config::VerificationConfig;
pub use dispatch::{select_checker, Checker, GitHubCheck};
pub use error::VerifyError;
pub use result::{aggregate, ItemReport, VerificationResult};
pub use verifier::{LiveVerifier, Verifier};

/// Advisory returned when GH Archive credentials are not configured
pub const ARCHIVE_SKIPPED: &str = "GH Archive verification skipped - no credentials";

/// Advisory returned for local git evidence
pub const LOCAL_GIT_UNSUPPORTED: &str = "Local git verification not supported";
