//! Routing from evidence to checker

use evidence_domain::{Evidence, EvidenceSource, ObservationKind};
use std::fmt;

/// GitHub API comparisons, one per observation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubCheck {
    /// Commit SHA, message, author
    Commit,
    /// Issue or PR number, title, state
    Issue,
    /// File content hash
    File,
    /// Branch head SHA
    Branch,
    /// Tag target SHA
    Tag,
    /// Release tag name
    Release,
    /// Fork flag and parent
    Fork,
}

impl GitHubCheck {
    fn as_str(&self) -> &'static str {
        match self {
            GitHubCheck::Commit => "commit",
            GitHubCheck::Issue => "issue",
            GitHubCheck::File => "file",
            GitHubCheck::Branch => "branch",
            GitHubCheck::Tag => "tag",
            GitHubCheck::Release => "release",
            GitHubCheck::Fork => "fork",
        }
    }
}

/// The single verification path chosen for an evidence item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checker {
    /// Compare against the live GitHub API
    GitHub(GitHubCheck),

    /// GitHub-sourced observation with no API comparison: the source URL,
    /// if any, must be reachable
    UrlAccessible,

    /// Fetch a Wayback snapshot
    Wayback,

    /// Fetch a security-vendor page
    SecurityVendor,

    /// Look the record up in GH Archive
    GhArchive,

    /// Local git: accepted with an advisory
    LocalGit,

    /// No checker exists; carries the failure message
    Unsupported(String),
}

impl Checker {
    /// Source kind this checker consults, `None` for [`Checker::Unsupported`]
    pub fn source(&self) -> Option<EvidenceSource> {
        match self {
            Checker::GitHub(_) | Checker::UrlAccessible => Some(EvidenceSource::GitHub),
            Checker::Wayback => Some(EvidenceSource::Wayback),
            Checker::SecurityVendor => Some(EvidenceSource::SecurityVendor),
            Checker::GhArchive => Some(EvidenceSource::GhArchive),
            Checker::LocalGit => Some(EvidenceSource::Git),
            Checker::Unsupported(_) => None,
        }
    }

    /// Whether running this checker can touch the network
    pub fn needs_network(&self) -> bool {
        !matches!(self, Checker::LocalGit | Checker::Unsupported(_))
    }
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checker::GitHub(check) => write!(f, "github:{}", check.as_str()),
            Checker::UrlAccessible => f.write_str("github:url"),
            Checker::Wayback => f.write_str("wayback"),
            Checker::SecurityVendor => f.write_str("security_vendor"),
            Checker::GhArchive => f.write_str("gharchive"),
            Checker::LocalGit => f.write_str("git"),
            Checker::Unsupported(_) => f.write_str("unsupported"),
        }
    }
}

/// Select the checker for an evidence item
///
/// Pure routing on (entity kind, source kind); nothing is fetched.
///
/// # Examples
///
/// ```
/// use evidence_domain::load_evidence;
/// use evidence_verify::{select_checker, Checker, GitHubCheck};
///
/// let evidence = load_evidence(r#"{
///     "observation_type": "tag",
///     "verification": {"source": "github"}
/// }"#).unwrap();
///
/// assert_eq!(select_checker(&evidence[0]), Checker::GitHub(GitHubCheck::Tag));
/// ```
pub fn select_checker(evidence: &Evidence) -> Checker {
    let source = evidence.source();

    if let EvidenceSource::Unknown(name) = source {
        return Checker::Unsupported(format!("Unknown verification source: {}", name));
    }

    match evidence {
        Evidence::Event(_) => match source {
            EvidenceSource::GhArchive => Checker::GhArchive,
            EvidenceSource::Git => Checker::LocalGit,
            other => Checker::Unsupported(format!(
                "Unknown verification source for event: {}",
                other
            )),
        },
        Evidence::Observation(observation) => match source {
            EvidenceSource::GitHub => match &observation.kind {
                ObservationKind::Commit { .. } => Checker::GitHub(GitHubCheck::Commit),
                ObservationKind::Issue { .. } => Checker::GitHub(GitHubCheck::Issue),
                ObservationKind::File { .. } => Checker::GitHub(GitHubCheck::File),
                ObservationKind::Branch { .. } => Checker::GitHub(GitHubCheck::Branch),
                ObservationKind::Tag { .. } => Checker::GitHub(GitHubCheck::Tag),
                ObservationKind::Release { .. } => Checker::GitHub(GitHubCheck::Release),
                ObservationKind::Fork { .. } => Checker::GitHub(GitHubCheck::Fork),
                ObservationKind::Snapshot { .. }
                | ObservationKind::Ioc { .. }
                | ObservationKind::Article { .. } => Checker::UrlAccessible,
            },
            EvidenceSource::GhArchive => Checker::GhArchive,
            EvidenceSource::Wayback => Checker::Wayback,
            EvidenceSource::SecurityVendor => Checker::SecurityVendor,
            EvidenceSource::Git => Checker::LocalGit,
            EvidenceSource::Unknown(name) => {
                Checker::Unsupported(format!("Unknown verification source: {}", name))
            }
        },
    }
}
