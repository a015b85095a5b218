//! Checks against the live GitHub REST API

use super::{content_hash, decode_content};
use crate::{VerificationConfig, VerificationResult};
use evidence_domain::traits::GitHubApi;
use evidence_domain::{CommitAuthor, GitHubRepository, Observation, ObservationKind};
use std::fmt::Display;
use tracing::debug;

/// Compare a GitHub-sourced observation with the live object
///
/// Missing identifiers fail before any request is made. A failed fetch is a
/// failure unless the observation is marked deleted, in which case the
/// missing object is the expected outcome.
pub(crate) fn check<G>(
    github: &G,
    observation: &Observation,
    config: &VerificationConfig,
) -> VerificationResult
where
    G: GitHubApi,
    G::Error: Display,
{
    let Some(repo) = observation.repository.as_ref() else {
        return VerificationResult::invalid("No repository specified");
    };

    let outcome = match &observation.kind {
        ObservationKind::Commit {
            sha,
            message,
            author,
        } => commit(github, repo, given(sha), message.as_deref(), author.as_ref(), config),
        ObservationKind::Issue {
            issue_number,
            is_pull_request,
            title,
            state,
        } => issue(
            github,
            repo,
            (*issue_number).filter(|n| *n > 0),
            *is_pull_request,
            title.as_deref(),
            state.as_deref(),
            config,
        ),
        ObservationKind::File {
            file_path,
            branch,
            content_hash,
        } => file(
            github,
            repo,
            given(file_path),
            given(branch),
            content_hash.as_deref(),
        ),
        ObservationKind::Branch {
            branch_name,
            head_sha,
        } => branch(github, repo, given(branch_name), head_sha.as_deref()),
        ObservationKind::Tag {
            tag_name,
            target_sha,
        } => tag(github, repo, given(tag_name), target_sha.as_deref()),
        ObservationKind::Release { tag_name, .. } => release(github, repo, given(tag_name)),
        ObservationKind::Fork { fork_repository } => {
            let fork_repository = fork_repository
                .as_ref()
                .filter(|r| !r.owner.trim().is_empty() && !r.name.trim().is_empty());
            fork(github, repo, fork_repository)
        }
        other => {
            return VerificationResult::invalid(format!(
                "No GitHub API check for {} observations",
                other.as_str()
            ))
        }
    };

    match outcome {
        Ok(result) => result,
        Err(e) if observation.is_deleted => {
            debug!(error = %e, "Fetch failed for an item marked deleted");
            VerificationResult::valid()
        }
        Err(e) => VerificationResult::invalid(format!("Verification failed: {}", e)),
    }
}

/// Blank identifiers count as absent
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn missing(field: &str) -> VerificationResult {
    VerificationResult::invalid(format!("No {} specified", field))
}

/// SHAs are hex, so case is ignored when comparing them.
fn commit<G: GitHubApi>(
    github: &G,
    repo: &GitHubRepository,
    sha: Option<&str>,
    message: Option<&str>,
    author: Option<&CommitAuthor>,
    config: &VerificationConfig,
) -> Result<VerificationResult, G::Error> {
    let Some(sha) = sha else {
        return Ok(missing("SHA"));
    };

    debug!(repo = %repo, sha, "Fetching commit");
    let actual = github.get_commit(repo, sha)?;
    let mut errors = Vec::new();

    if !actual.sha.eq_ignore_ascii_case(sha) {
        errors.push(format!("SHA mismatch: expected {}, got {}", sha, actual.sha));
    }

    if config.check_commit_message {
        if let Some(message) = message {
            if message != actual.message {
                errors.push("Message mismatch".to_string());
            }
        }
    }

    if config.check_commit_author {
        if let Some(author) = author {
            if actual.author_name.as_deref() != Some(author.name.as_str()) {
                errors.push(format!(
                    "Author mismatch: expected {}, got {}",
                    author.name,
                    actual.author_name.as_deref().unwrap_or("none")
                ));
            }
        }
    }

    Ok(VerificationResult::from_errors(errors))
}

fn issue<G: GitHubApi>(
    github: &G,
    repo: &GitHubRepository,
    number: Option<u64>,
    is_pull_request: bool,
    title: Option<&str>,
    state: Option<&str>,
    config: &VerificationConfig,
) -> Result<VerificationResult, G::Error> {
    let Some(number) = number else {
        return Ok(missing("issue number"));
    };

    debug!(repo = %repo, number, is_pull_request, "Fetching issue");
    let actual = if is_pull_request {
        github.get_pull_request(repo, number)?
    } else {
        github.get_issue(repo, number)?
    };
    let mut errors = Vec::new();

    if actual.number != number {
        errors.push(format!(
            "Number mismatch: expected {}, got {}",
            number, actual.number
        ));
    }

    if config.check_issue_title {
        if let Some(title) = title {
            if title != actual.title {
                errors.push("Title mismatch".to_string());
            }
        }
    }

    if config.check_issue_state {
        if let Some(state) = state {
            let actual_state = actual.effective_state();
            if state != actual_state {
                errors.push(format!(
                    "State mismatch: expected {}, got {}",
                    state, actual_state
                ));
            }
        }
    }

    Ok(VerificationResult::from_errors(errors))
}

/// Content hashes are hex digests; case is ignored when comparing them.
fn file<G: GitHubApi>(
    github: &G,
    repo: &GitHubRepository,
    path: Option<&str>,
    branch: Option<&str>,
    claimed_hash: Option<&str>,
) -> Result<VerificationResult, G::Error> {
    let Some(path) = path else {
        return Ok(missing("file path"));
    };
    let git_ref = branch.unwrap_or("HEAD");

    debug!(repo = %repo, path, git_ref, "Fetching file");
    let actual = github.get_file(repo, path, git_ref)?;

    let Some(claimed_hash) = claimed_hash else {
        return Ok(VerificationResult::valid());
    };

    let raw = actual.content.unwrap_or_default();
    let bytes = match actual.encoding.as_deref() {
        None | Some("base64") => match decode_content(&raw) {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(VerificationResult::invalid(format!(
                    "Could not decode file content: {}",
                    e
                )))
            }
        },
        Some(_) => raw.into_bytes(),
    };

    if !content_hash(&bytes).eq_ignore_ascii_case(claimed_hash) {
        return Ok(VerificationResult::invalid("Content hash mismatch"));
    }
    Ok(VerificationResult::valid())
}

fn branch<G: GitHubApi>(
    github: &G,
    repo: &GitHubRepository,
    name: Option<&str>,
    head_sha: Option<&str>,
) -> Result<VerificationResult, G::Error> {
    let Some(name) = name else {
        return Ok(missing("branch name"));
    };

    debug!(repo = %repo, branch = name, "Fetching branch");
    let actual = github.get_branch(repo, name)?;

    if let Some(expected) = head_sha {
        if actual.head_sha.as_deref() != Some(expected) {
            return Ok(VerificationResult::invalid(format!(
                "HEAD SHA mismatch: expected {}, got {}",
                expected,
                actual.head_sha.as_deref().unwrap_or("none")
            )));
        }
    }
    Ok(VerificationResult::valid())
}

fn tag<G: GitHubApi>(
    github: &G,
    repo: &GitHubRepository,
    name: Option<&str>,
    target_sha: Option<&str>,
) -> Result<VerificationResult, G::Error> {
    let Some(name) = name else {
        return Ok(missing("tag name"));
    };

    debug!(repo = %repo, tag = name, "Fetching tag");
    let actual = github.get_tag(repo, name)?;

    if let Some(expected) = target_sha {
        if actual.target_sha.as_deref() != Some(expected) {
            return Ok(VerificationResult::invalid(format!(
                "Target SHA mismatch: expected {}, got {}",
                expected,
                actual.target_sha.as_deref().unwrap_or("none")
            )));
        }
    }
    Ok(VerificationResult::valid())
}

fn release<G: GitHubApi>(
    github: &G,
    repo: &GitHubRepository,
    tag_name: Option<&str>,
) -> Result<VerificationResult, G::Error> {
    let Some(tag_name) = tag_name else {
        return Ok(missing("tag name"));
    };

    debug!(repo = %repo, tag = tag_name, "Fetching release");
    let actual = github.get_release(repo, tag_name)?;

    if actual.tag_name != tag_name {
        return Ok(VerificationResult::invalid("Tag name mismatch"));
    }
    Ok(VerificationResult::valid())
}

fn fork<G: GitHubApi>(
    github: &G,
    parent: &GitHubRepository,
    fork_repository: Option<&GitHubRepository>,
) -> Result<VerificationResult, G::Error> {
    let Some(fork_repository) = fork_repository else {
        return Ok(missing("fork repository"));
    };

    debug!(repo = %fork_repository, "Fetching fork");
    let actual = github.get_repository(fork_repository)?;

    if !actual.fork {
        return Ok(VerificationResult::invalid(format!(
            "Repository {} is not a fork",
            fork_repository
        )));
    }

    // Repository names are case-insensitive on GitHub
    let expected = parent.full_name();
    match actual.parent_full_name.as_deref() {
        Some(name) if name.eq_ignore_ascii_case(&expected) => Ok(VerificationResult::valid()),
        other => Ok(VerificationResult::invalid(format!(
            "Fork parent mismatch: expected {}, got {}",
            expected,
            other.unwrap_or("none")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidence_domain::{
        BranchRecord, CommitRecord, EvidenceSource, FileRecord, IssueRecord, ReleaseRecord,
        RepositoryRecord, TagRecord, VerificationInfo,
    };
    use evidence_sources::mock::MockGitHub;
    use evidence_sources::SourceError;

    fn repo() -> GitHubRepository {
        GitHubRepository::new("aws", "aws-toolkit-vscode")
    }

    fn observation(kind: ObservationKind) -> Observation {
        Observation {
            evidence_id: None,
            observed_when: None,
            observed_by: None,
            repository: Some(repo()),
            verification: VerificationInfo::new(EvidenceSource::GitHub),
            is_deleted: false,
            kind,
        }
    }

    fn commit_kind(sha: &str) -> ObservationKind {
        ObservationKind::Commit {
            sha: Some(sha.to_string()),
            message: Some("Fix build".to_string()),
            author: Some(CommitAuthor {
                name: "lkmanka58".to_string(),
                email: None,
            }),
        }
    }

    fn commit_record(sha: &str) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            message: "Fix build".to_string(),
            author_name: Some("lkmanka58".to_string()),
        }
    }

    #[test]
    fn test_commit_matches() {
        let github = MockGitHub::new().with_commit(&repo(), commit_record("678851b"));
        let result = check(&github, &observation(commit_kind("678851b")), &Default::default());
        assert_eq!(result, VerificationResult::valid());
    }

    #[test]
    fn test_commit_collects_every_mismatch() {
        let github = MockGitHub::new().with_commit_at(
            &repo(),
            "678851b",
            CommitRecord {
                sha: "1111111".to_string(),
                message: "Other".to_string(),
                author_name: Some("someone".to_string()),
            },
        );
        let result = check(&github, &observation(commit_kind("678851b")), &Default::default());

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "SHA mismatch: expected 678851b, got 1111111",
                "Message mismatch",
                "Author mismatch: expected lkmanka58, got someone",
            ]
        );
    }

    #[test]
    fn test_sha_case_is_ignored() {
        let github = MockGitHub::new().with_commit_at(&repo(), "678851BD", commit_record("678851bd"));
        let result = check(&github, &observation(commit_kind("678851BD")), &Default::default());
        assert_eq!(result, VerificationResult::valid());
    }

    #[test]
    fn test_identity_only_skips_descriptive_fields() {
        let github = MockGitHub::new().with_commit(
            &repo(),
            CommitRecord {
                sha: "678851b".to_string(),
                message: "Reworded".to_string(),
                author_name: None,
            },
        );
        let result = check(
            &github,
            &observation(commit_kind("678851b")),
            &VerificationConfig::identity_only(),
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_missing_repository_makes_no_call() {
        let github = MockGitHub::new();
        let mut item = observation(commit_kind("678851b"));
        item.repository = None;

        let result = check(&github, &item, &Default::default());
        assert_eq!(result, VerificationResult::invalid("No repository specified"));
        assert_eq!(github.call_count(), 0);
    }

    #[test]
    fn test_missing_sha_makes_no_call() {
        let github = MockGitHub::new();
        let item = observation(ObservationKind::Commit {
            sha: None,
            message: None,
            author: None,
        });

        let result = check(&github, &item, &Default::default());
        assert_eq!(result, VerificationResult::invalid("No SHA specified"));
        assert_eq!(github.call_count(), 0);
    }

    #[test]
    fn test_fetch_failure() {
        let github = MockGitHub::new();
        let result = check(&github, &observation(commit_kind("678851b")), &Default::default());

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Verification failed: Not found"));
    }

    #[test]
    fn test_deleted_item_fetch_failure_is_valid() {
        let github = MockGitHub::failing(SourceError::Timeout("30s".to_string()));
        let mut item = observation(commit_kind("678851b"));
        item.is_deleted = true;

        assert_eq!(
            check(&github, &item, &Default::default()),
            VerificationResult::valid()
        );
    }

    #[test]
    fn test_deleted_item_still_compared_when_present() {
        let github = MockGitHub::new().with_commit_at(&repo(), "678851b", commit_record("2222222"));
        let mut item = observation(commit_kind("678851b"));
        item.is_deleted = true;

        assert!(!check(&github, &item, &Default::default()).is_valid);
    }

    #[test]
    fn test_merged_pull_request_state() {
        let github = MockGitHub::new().with_pull_request(
            &repo(),
            IssueRecord {
                number: 7710,
                title: "Add feature".to_string(),
                state: "closed".to_string(),
                merged: true,
            },
        );
        let item = observation(ObservationKind::Issue {
            issue_number: Some(7710),
            is_pull_request: true,
            title: Some("Add feature".to_string()),
            state: Some("closed".to_string()),
        });

        let result = check(&github, &item, &Default::default());
        assert_eq!(
            result.errors,
            vec!["State mismatch: expected closed, got merged"]
        );
    }

    #[test]
    fn test_issue_uses_issue_endpoint() {
        let github = MockGitHub::new().with_issue(
            &repo(),
            IssueRecord {
                number: 12,
                title: "Bug".to_string(),
                state: "open".to_string(),
                merged: false,
            },
        );
        let item = observation(ObservationKind::Issue {
            issue_number: Some(12),
            is_pull_request: false,
            title: Some("Bug report".to_string()),
            state: Some("open".to_string()),
        });

        let result = check(&github, &item, &Default::default());
        assert_eq!(result.errors, vec!["Title mismatch"]);
    }

    #[test]
    fn test_file_hash() {
        let github = MockGitHub::new().with_file(
            &repo(),
            "README.md",
            "HEAD",
            FileRecord {
                content: Some("aGVs\nbG8=\n".to_string()),
                encoding: Some("base64".to_string()),
            },
        );
        let matching = observation(ObservationKind::File {
            file_path: Some("README.md".to_string()),
            branch: None,
            content_hash: Some(content_hash(b"hello")),
        });
        assert!(check(&github, &matching, &Default::default()).is_valid);

        let tampered = observation(ObservationKind::File {
            file_path: Some("README.md".to_string()),
            branch: None,
            content_hash: Some(content_hash(b"goodbye")),
        });
        assert_eq!(
            check(&github, &tampered, &Default::default()),
            VerificationResult::invalid("Content hash mismatch")
        );
    }

    #[test]
    fn test_file_reads_branch_ref() {
        let github = MockGitHub::new().with_file(
            &repo(),
            "scripts/build.sh",
            "stability",
            FileRecord::default(),
        );
        let item = observation(ObservationKind::File {
            file_path: Some("scripts/build.sh".to_string()),
            branch: Some("stability".to_string()),
            content_hash: Some(content_hash(b"")),
        });
        assert!(check(&github, &item, &Default::default()).is_valid);
    }

    #[test]
    fn test_branch_and_tag() {
        let github = MockGitHub::new()
            .with_branch(
                &repo(),
                "main",
                BranchRecord {
                    head_sha: Some("aaa".to_string()),
                },
            )
            .with_tag(
                &repo(),
                "v1.84.0",
                TagRecord {
                    target_sha: Some("bbb".to_string()),
                },
            );

        let branch = observation(ObservationKind::Branch {
            branch_name: Some("main".to_string()),
            head_sha: Some("ccc".to_string()),
        });
        assert_eq!(
            check(&github, &branch, &Default::default()).errors,
            vec!["HEAD SHA mismatch: expected ccc, got aaa"]
        );

        let tag = observation(ObservationKind::Tag {
            tag_name: Some("v1.84.0".to_string()),
            target_sha: Some("bbb".to_string()),
        });
        assert!(check(&github, &tag, &Default::default()).is_valid);
    }

    #[test]
    fn test_release() {
        let github = MockGitHub::new().with_release(
            &repo(),
            "v1.84.0",
            ReleaseRecord {
                tag_name: "v1.84.0".to_string(),
            },
        );
        let item = observation(ObservationKind::Release {
            tag_name: Some("v1.84.0".to_string()),
            release_name: None,
        });
        assert!(check(&github, &item, &Default::default()).is_valid);
    }

    #[test]
    fn test_fork_checks() {
        let fork_repo = GitHubRepository::new("lkmanka58", "aws-toolkit-vscode");
        let item = observation(ObservationKind::Fork {
            fork_repository: Some(fork_repo.clone()),
        });

        let genuine = MockGitHub::new().with_repository(
            &fork_repo,
            RepositoryRecord {
                full_name: fork_repo.full_name(),
                fork: true,
                parent_full_name: Some("AWS/aws-toolkit-vscode".to_string()),
            },
        );
        assert!(check(&genuine, &item, &Default::default()).is_valid);

        let not_fork = MockGitHub::new().with_repository(
            &fork_repo,
            RepositoryRecord {
                full_name: fork_repo.full_name(),
                fork: false,
                parent_full_name: None,
            },
        );
        assert_eq!(
            check(&not_fork, &item, &Default::default()).errors,
            vec!["Repository lkmanka58/aws-toolkit-vscode is not a fork"]
        );

        let other_parent = MockGitHub::new().with_repository(
            &fork_repo,
            RepositoryRecord {
                full_name: fork_repo.full_name(),
                fork: true,
                parent_full_name: Some("someone/else".to_string()),
            },
        );
        assert_eq!(
            check(&other_parent, &item, &Default::default()).errors,
            vec!["Fork parent mismatch: expected aws/aws-toolkit-vscode, got someone/else"]
        );
    }

    fn assert_no_call(kind: ObservationKind, deleted: bool, expected: &str) {
        let github = MockGitHub::failing(SourceError::NotFound("gone".to_string()));
        let mut item = observation(kind);
        item.is_deleted = deleted;

        let result = check(&github, &item, &Default::default());
        assert_eq!(result, VerificationResult::invalid(expected));
        assert_eq!(github.call_count(), 0);
    }

    #[test]
    fn test_blank_identifiers_make_no_call() {
        for deleted in [false, true] {
            assert_no_call(
                ObservationKind::Commit {
                    sha: Some(String::new()),
                    message: None,
                    author: None,
                },
                deleted,
                "No SHA specified",
            );
            assert_no_call(
                ObservationKind::Issue {
                    issue_number: Some(0),
                    is_pull_request: true,
                    title: None,
                    state: None,
                },
                deleted,
                "No issue number specified",
            );
            assert_no_call(
                ObservationKind::File {
                    file_path: Some("  ".to_string()),
                    branch: None,
                    content_hash: None,
                },
                deleted,
                "No file path specified",
            );
            assert_no_call(
                ObservationKind::Branch {
                    branch_name: Some(String::new()),
                    head_sha: None,
                },
                deleted,
                "No branch name specified",
            );
            assert_no_call(
                ObservationKind::Tag {
                    tag_name: Some(String::new()),
                    target_sha: None,
                },
                deleted,
                "No tag name specified",
            );
            assert_no_call(
                ObservationKind::Release {
                    tag_name: Some("\t".to_string()),
                    release_name: None,
                },
                deleted,
                "No tag name specified",
            );
            assert_no_call(
                ObservationKind::Fork {
                    fork_repository: Some(GitHubRepository::new("", "aws-toolkit-vscode")),
                },
                deleted,
                "No fork repository specified",
            );
        }
    }

    #[test]
    fn test_blank_branch_reads_head() {
        let github = MockGitHub::new().with_file(&repo(), "README.md", "HEAD", FileRecord::default());
        let item = observation(ObservationKind::File {
            file_path: Some("README.md".to_string()),
            branch: Some(String::new()),
            content_hash: None,
        });
        assert!(check(&github, &item, &Default::default()).is_valid);
    }
}
