//! GitHub REST API client
//!
//! Fetches the live state of commits, issues, pull requests, files, branches,
//! tags, releases and repositories. Every call is a single blocking GET.
//!
//! # Examples
//!
//! ```no_run
//! use evidence_domain::traits::GitHubApi;
//! use evidence_domain::GitHubRepository;
//! use evidence_sources::{ClientConfig, GitHubClient};
//!
//! let client = GitHubClient::new(&ClientConfig::default()).unwrap();
//! let repo = GitHubRepository::new("aws", "aws-toolkit-vscode");
//! let pr = client.get_pull_request(&repo, 7710).unwrap();
//! println!("{} ({})", pr.title, pr.effective_state());
//! ```

use crate::{ClientConfig, SourceError};
use evidence_domain::records::*;
use evidence_domain::traits::GitHubApi;
use evidence_domain::GitHubRepository;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// GitHub REST API client
pub struct GitHubClient {
    api_url: String,
    token: Option<String>,
    client: Client,
}

#[derive(Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    author: Option<GitIdentity>,
}

#[derive(Deserialize)]
struct GitIdentity {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct IssueResponse {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    merged: Option<bool>,
}

#[derive(Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Deserialize)]
struct BranchResponse {
    commit: ShaRef,
}

#[derive(Deserialize)]
struct RefResponse {
    object: ShaRef,
}

#[derive(Deserialize)]
struct ShaRef {
    #[serde(default)]
    sha: Option<String>,
}

#[derive(Deserialize)]
struct ReleaseResponse {
    tag_name: String,
}

#[derive(Deserialize)]
struct RepositoryResponse {
    full_name: String,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    parent: Option<ParentRepository>,
}

#[derive(Deserialize)]
struct ParentRepository {
    full_name: String,
}

impl GitHubClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built (e.g. no
    /// TLS backend available).
    pub fn new(config: &ClientConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
            client,
        })
    }

    /// Whether requests are authenticated
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn repo_path(repo: &GitHubRepository) -> String {
        format!(
            "/repos/{}/{}",
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.name)
        )
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}{}", self.api_url, path);
        debug!(%url, "GitHub API request");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<T>()
            .map_err(|e| SourceError::InvalidResponse(format!("Failed to parse {}: {}", url, e)))
    }
}

/// Percent-encode each segment of a slash-separated path
fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl GitHubApi for GitHubClient {
    type Error = SourceError;

    fn get_commit(&self, repo: &GitHubRepository, sha: &str) -> Result<CommitRecord, Self::Error> {
        let path = format!("{}/commits/{}", Self::repo_path(repo), urlencoding::encode(sha));
        let data: CommitResponse = self.get_json(&path)?;

        Ok(CommitRecord {
            sha: data.sha,
            message: data.commit.message,
            author_name: data.commit.author.and_then(|a| a.name),
        })
    }

    fn get_issue(&self, repo: &GitHubRepository, number: u64) -> Result<IssueRecord, Self::Error> {
        let path = format!("{}/issues/{}", Self::repo_path(repo), number);
        let data: IssueResponse = self.get_json(&path)?;

        Ok(IssueRecord {
            number: data.number,
            title: data.title,
            state: data.state,
            merged: false,
        })
    }

    fn get_pull_request(
        &self,
        repo: &GitHubRepository,
        number: u64,
    ) -> Result<IssueRecord, Self::Error> {
        let path = format!("{}/pulls/{}", Self::repo_path(repo), number);
        let data: IssueResponse = self.get_json(&path)?;

        Ok(IssueRecord {
            number: data.number,
            title: data.title,
            state: data.state,
            merged: data.merged.unwrap_or(false),
        })
    }

    fn get_file(
        &self,
        repo: &GitHubRepository,
        path: &str,
        git_ref: &str,
    ) -> Result<FileRecord, Self::Error> {
        let path = format!(
            "{}/contents/{}?ref={}",
            Self::repo_path(repo),
            encode_path(path),
            urlencoding::encode(git_ref)
        );
        let data: ContentsResponse = self.get_json(&path)?;

        Ok(FileRecord {
            content: data.content,
            encoding: data.encoding,
        })
    }

    fn get_branch(&self, repo: &GitHubRepository, name: &str) -> Result<BranchRecord, Self::Error> {
        let path = format!("{}/branches/{}", Self::repo_path(repo), urlencoding::encode(name));
        let data: BranchResponse = self.get_json(&path)?;

        Ok(BranchRecord {
            head_sha: data.commit.sha,
        })
    }

    fn get_tag(&self, repo: &GitHubRepository, name: &str) -> Result<TagRecord, Self::Error> {
        let path = format!("{}/git/ref/tags/{}", Self::repo_path(repo), encode_path(name));
        let data: RefResponse = self.get_json(&path)?;

        Ok(TagRecord {
            target_sha: data.object.sha,
        })
    }

    fn get_release(&self, repo: &GitHubRepository, tag: &str) -> Result<ReleaseRecord, Self::Error> {
        let path = format!("{}/releases/tags/{}", Self::repo_path(repo), urlencoding::encode(tag));
        let data: ReleaseResponse = self.get_json(&path)?;

        Ok(ReleaseRecord {
            tag_name: data.tag_name,
        })
    }

    fn get_repository(&self, repo: &GitHubRepository) -> Result<RepositoryRecord, Self::Error> {
        let data: RepositoryResponse = self.get_json(&Self::repo_path(repo))?;

        Ok(RepositoryRecord {
            full_name: data.full_name,
            fork: data.fork,
            parent_full_name: data.parent.map(|p| p.full_name),
        })
    }
}
