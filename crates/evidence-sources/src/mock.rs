//! Deterministic in-memory sources for testing
//!
//! These sources return pre-configured records without making any network
//! calls. Each one counts its calls so tests can assert that a check did or
//! did not reach the source. Clones share the same counter.

use crate::SourceError;
use evidence_domain::records::*;
use evidence_domain::traits::{ArchiveSearch, GitHubApi, PageFetcher};
use evidence_domain::GitHubRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Stored {
    Commit(CommitRecord),
    Issue(IssueRecord),
    File(FileRecord),
    Branch(BranchRecord),
    Tag(TagRecord),
    Release(ReleaseRecord),
    Repository(RepositoryRecord),
}

/// Mock GitHub API
///
/// Lookups for anything not registered return [`SourceError::NotFound`].
///
/// # Examples
///
/// ```
/// use evidence_domain::traits::GitHubApi;
/// use evidence_domain::{BranchRecord, GitHubRepository};
/// use evidence_sources::mock::MockGitHub;
///
/// let repo = GitHubRepository::new("octo", "hello");
/// let github = MockGitHub::new().with_branch(&repo, "main", BranchRecord {
///     head_sha: Some("abc".to_string()),
/// });
///
/// assert!(github.get_branch(&repo, "main").is_ok());
/// assert!(github.get_branch(&repo, "dev").unwrap_err().is_not_found());
/// assert_eq!(github.call_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockGitHub {
    objects: HashMap<String, Stored>,
    failure: Option<SourceError>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGitHub {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose every call fails with the given error
    pub fn failing(error: SourceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Register a commit, keyed by its SHA
    pub fn with_commit(mut self, repo: &GitHubRepository, record: CommitRecord) -> Self {
        let key = key("commit", repo, &record.sha);
        self.objects.insert(key, Stored::Commit(record));
        self
    }

    /// Register a commit under a SHA other than the one it reports
    pub fn with_commit_at(
        mut self,
        repo: &GitHubRepository,
        sha: &str,
        record: CommitRecord,
    ) -> Self {
        self.objects.insert(key("commit", repo, sha), Stored::Commit(record));
        self
    }

    /// Register an issue, keyed by its number
    pub fn with_issue(mut self, repo: &GitHubRepository, record: IssueRecord) -> Self {
        let key = key("issue", repo, &record.number.to_string());
        self.objects.insert(key, Stored::Issue(record));
        self
    }

    /// Register a pull request, keyed by its number
    pub fn with_pull_request(mut self, repo: &GitHubRepository, record: IssueRecord) -> Self {
        let key = key("pull", repo, &record.number.to_string());
        self.objects.insert(key, Stored::Issue(record));
        self
    }

    /// Register file contents at a ref
    pub fn with_file(
        mut self,
        repo: &GitHubRepository,
        path: &str,
        git_ref: &str,
        record: FileRecord,
    ) -> Self {
        let key = key("file", repo, &format!("{}@{}", path, git_ref));
        self.objects.insert(key, Stored::File(record));
        self
    }

    /// Register a branch
    pub fn with_branch(mut self, repo: &GitHubRepository, name: &str, record: BranchRecord) -> Self {
        self.objects.insert(key("branch", repo, name), Stored::Branch(record));
        self
    }

    /// Register a tag
    pub fn with_tag(mut self, repo: &GitHubRepository, name: &str, record: TagRecord) -> Self {
        self.objects.insert(key("tag", repo, name), Stored::Tag(record));
        self
    }

    /// Register a release under the tag it is requested by
    pub fn with_release(mut self, repo: &GitHubRepository, tag: &str, record: ReleaseRecord) -> Self {
        self.objects.insert(key("release", repo, tag), Stored::Release(record));
        self
    }

    /// Register repository metadata
    pub fn with_repository(mut self, repo: &GitHubRepository, record: RepositoryRecord) -> Self {
        self.objects.insert(key("repo", repo, ""), Stored::Repository(record));
        self
    }

    /// Get the number of API calls made
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    fn lookup(&self, key: String) -> Result<Stored, SourceError> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.objects
            .get(&key)
            .cloned()
            .ok_or(SourceError::NotFound(key))
    }
}

fn key(kind: &str, repo: &GitHubRepository, id: &str) -> String {
    format!("{} {} {}", kind, repo.full_name(), id)
}

fn unexpected(kind: &str) -> SourceError {
    SourceError::InvalidResponse(format!("mock stored a different record kind for {}", kind))
}

impl GitHubApi for MockGitHub {
    type Error = SourceError;

    fn get_commit(&self, repo: &GitHubRepository, sha: &str) -> Result<CommitRecord, Self::Error> {
        match self.lookup(key("commit", repo, sha))? {
            Stored::Commit(record) => Ok(record),
            _ => Err(unexpected("commit")),
        }
    }

    fn get_issue(&self, repo: &GitHubRepository, number: u64) -> Result<IssueRecord, Self::Error> {
        match self.lookup(key("issue", repo, &number.to_string()))? {
            Stored::Issue(record) => Ok(record),
            _ => Err(unexpected("issue")),
        }
    }

    fn get_pull_request(
        &self,
        repo: &GitHubRepository,
        number: u64,
    ) -> Result<IssueRecord, Self::Error> {
        match self.lookup(key("pull", repo, &number.to_string()))? {
            Stored::Issue(record) => Ok(record),
            _ => Err(unexpected("pull request")),
        }
    }

    fn get_file(
        &self,
        repo: &GitHubRepository,
        path: &str,
        git_ref: &str,
    ) -> Result<FileRecord, Self::Error> {
        match self.lookup(key("file", repo, &format!("{}@{}", path, git_ref)))? {
            Stored::File(record) => Ok(record),
            _ => Err(unexpected("file")),
        }
    }

    fn get_branch(&self, repo: &GitHubRepository, name: &str) -> Result<BranchRecord, Self::Error> {
        match self.lookup(key("branch", repo, name))? {
            Stored::Branch(record) => Ok(record),
            _ => Err(unexpected("branch")),
        }
    }

    fn get_tag(&self, repo: &GitHubRepository, name: &str) -> Result<TagRecord, Self::Error> {
        match self.lookup(key("tag", repo, name))? {
            Stored::Tag(record) => Ok(record),
            _ => Err(unexpected("tag")),
        }
    }

    fn get_release(&self, repo: &GitHubRepository, tag: &str) -> Result<ReleaseRecord, Self::Error> {
        match self.lookup(key("release", repo, tag))? {
            Stored::Release(record) => Ok(record),
            _ => Err(unexpected("release")),
        }
    }

    fn get_repository(&self, repo: &GitHubRepository) -> Result<RepositoryRecord, Self::Error> {
        match self.lookup(key("repo", repo, ""))? {
            Stored::Repository(record) => Ok(record),
            _ => Err(unexpected("repository")),
        }
    }
}

/// Mock page fetcher
///
/// Unregistered URLs fail with a transport error, as an unreachable host
/// would.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    pages: HashMap<String, PageResponse>,
    call_count: Arc<Mutex<usize>>,
}

impl MockFetcher {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a 200 response
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    /// Register a response with an explicit status
    pub fn with_status(mut self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.pages.insert(
            url.into(),
            PageResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Get the number of fetches made
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl PageFetcher for MockFetcher {
    type Error = SourceError;

    fn fetch(&self, url: &str) -> Result<PageResponse, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::Transport(format!("connection refused: {}", url)))
    }
}

/// Mock GH Archive
///
/// Returns the registered rows that match the lookup's repo, actor and event
/// type filters. Every lookup is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockArchive {
    rows: Vec<ArchiveRow>,
    failure: Option<SourceError>,
    lookups: Arc<Mutex<Vec<ArchiveLookup>>>,
}

impl MockArchive {
    /// Create an archive with no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an archive whose every query fails
    pub fn failing(error: SourceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Add a row
    pub fn with_row(mut self, row: ArchiveRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Lookups received so far
    pub fn lookups(&self) -> Vec<ArchiveLookup> {
        self.lookups.lock().unwrap().clone()
    }

    /// Get the number of queries made
    pub fn call_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

impl ArchiveSearch for MockArchive {
    type Error = SourceError;

    fn find_events(&self, lookup: &ArchiveLookup) -> Result<Vec<ArchiveRow>, Self::Error> {
        self.lookups.lock().unwrap().push(lookup.clone());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let matches = |filter: &Option<String>, value: &str| {
            filter.as_deref().map_or(true, |f| f == value)
        };
        Ok(self
            .rows
            .iter()
            .filter(|row| {
                matches(&lookup.repo, &row.repo)
                    && matches(&lookup.actor, &row.actor)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> GitHubRepository {
        GitHubRepository::new("octo", "hello")
    }

    #[test]
    fn test_mock_github_lookup() {
        let github = MockGitHub::new().with_issue(
            &repo(),
            IssueRecord {
                number: 1,
                title: "Bug".to_string(),
                state: "open".to_string(),
                merged: false,
            },
        );

        assert_eq!(github.get_issue(&repo(), 1).unwrap().title, "Bug");
        // Issues and pull requests are separate namespaces
        assert!(github.get_pull_request(&repo(), 1).unwrap_err().is_not_found());
        assert_eq!(github.call_count(), 2);

        github.reset_call_count();
        assert_eq!(github.call_count(), 0);
    }

    #[test]
    fn test_mock_github_failing() {
        let github = MockGitHub::failing(SourceError::Timeout("slow".to_string()));
        assert!(matches!(
            github.get_repository(&repo()),
            Err(SourceError::Timeout(_))
        ));
    }

    #[test]
    fn test_mock_clone_shares_count() {
        let fetcher = MockFetcher::new().with_page("https://a", "body");
        let clone = fetcher.clone();

        fetcher.fetch("https://a").unwrap();
        assert_eq!(clone.call_count(), 1);
    }

    #[test]
    fn test_mock_fetcher_status() {
        let fetcher = MockFetcher::new().with_status("https://gone", 410, "Gone");
        let page = fetcher.fetch("https://gone").unwrap();
        assert_eq!(page.status, 410);
        assert!(fetcher.fetch("https://other").is_err());
    }

    #[test]
    fn test_mock_archive_filters() {
        let archive = MockArchive::new().with_row(ArchiveRow {
            event_type: "PushEvent".to_string(),
            actor: "octocat".to_string(),
            repo: "octo/hello".to_string(),
            created_at: "2025-07-13T20:37:04Z".parse().unwrap(),
        });

        let mut lookup = ArchiveLookup {
            table: "githubarchive.day.20250713".to_string(),
            repo: Some("octo/hello".to_string()),
            actor: None,
            from_date: "202507132037".to_string(),
        };
        assert_eq!(archive.find_events(&lookup).unwrap().len(), 1);

        lookup.actor = Some("someone-else".to_string());
        assert!(archive.find_events(&lookup).unwrap().is_empty());
        assert_eq!(archive.call_count(), 2);
    }
}
