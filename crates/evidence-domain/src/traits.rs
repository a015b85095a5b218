//! Trait definitions for source access
//!
//! These traits define the boundary between comparison logic and the
//! network. Implementations live in `evidence-sources`.

use crate::records::*;
use crate::GitHubRepository;

/// Read access to the live GitHub REST API
///
/// Implemented by the infrastructure layer (evidence-sources)
pub trait GitHubApi {
    /// Error type for API calls
    type Error;

    /// Fetch a commit by SHA
    fn get_commit(&self, repo: &GitHubRepository, sha: &str) -> Result<CommitRecord, Self::Error>;

    /// Fetch an issue by number
    fn get_issue(&self, repo: &GitHubRepository, number: u64) -> Result<IssueRecord, Self::Error>;

    /// Fetch a pull request by number
    fn get_pull_request(
        &self,
        repo: &GitHubRepository,
        number: u64,
    ) -> Result<IssueRecord, Self::Error>;

    /// Fetch file contents at a ref
    fn get_file(
        &self,
        repo: &GitHubRepository,
        path: &str,
        git_ref: &str,
    ) -> Result<FileRecord, Self::Error>;

    /// Fetch a branch by name
    fn get_branch(&self, repo: &GitHubRepository, name: &str) -> Result<BranchRecord, Self::Error>;

    /// Fetch a tag ref by name
    fn get_tag(&self, repo: &GitHubRepository, name: &str) -> Result<TagRecord, Self::Error>;

    /// Fetch a release by tag name
    fn get_release(&self, repo: &GitHubRepository, tag: &str) -> Result<ReleaseRecord, Self::Error>;

    /// Fetch repository metadata
    fn get_repository(&self, repo: &GitHubRepository) -> Result<RepositoryRecord, Self::Error>;
}

/// Plain HTTP GET of an arbitrary URL
///
/// Non-success statuses are returned as responses, not errors; only
/// transport failures are errors.
pub trait PageFetcher {
    /// Error type for transport failures
    type Error;

    /// Fetch a URL
    fn fetch(&self, url: &str) -> Result<PageResponse, Self::Error>;
}

/// Row lookup in the GH Archive event tables
///
/// Implemented by the infrastructure layer (evidence-sources)
pub trait ArchiveSearch {
    /// Error type for query failures
    type Error;

    /// Find events matching the lookup
    fn find_events(&self, lookup: &ArchiveLookup) -> Result<Vec<ArchiveRow>, Self::Error>;
}
