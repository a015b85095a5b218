//! Verifier: dispatch plus aggregation

use crate::checkers::{archive, github, url};
use crate::dispatch::{select_checker, Checker};
use crate::result::{aggregate, ItemReport, VerificationResult};
use crate::{VerificationConfig, VerifyError, LOCAL_GIT_UNSUPPORTED};
use evidence_domain::traits::{ArchiveSearch, GitHubApi, PageFetcher};
use evidence_domain::Evidence;
use evidence_sources::{ArchiveCredentials, ClientConfig, GhArchiveClient, GitHubClient, HttpFetcher};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Verifies evidence against its declared source
///
/// Generic over the three sources so tests can swap in the mocks from
/// `evidence_sources::mock`. The archive is optional: without it, archive
/// checks are skipped with an advisory.
pub struct Verifier<G, F, A> {
    github: G,
    fetcher: F,
    archive: Option<A>,
    config: VerificationConfig,
}

/// Verifier wired to the network clients
pub type LiveVerifier = Verifier<GitHubClient, HttpFetcher, GhArchiveClient>;

impl LiveVerifier {
    /// Build the network clients from `config`
    ///
    /// GH Archive checks run only when `credentials` is provided.
    pub fn live(
        config: &ClientConfig,
        credentials: Option<ArchiveCredentials>,
    ) -> Result<Self, VerifyError> {
        let github = GitHubClient::new(config)?;
        let fetcher = HttpFetcher::new(config)?;
        let archive = credentials
            .map(|credentials| GhArchiveClient::new(credentials, config))
            .transpose()?;

        if archive.is_none() {
            info!("No GH Archive credentials, archive checks will be skipped");
        }

        Ok(Verifier::new(github, fetcher, archive))
    }
}

impl<G, F, A> Verifier<G, F, A> {
    /// Create a verifier with the default comparison settings
    pub fn new(github: G, fetcher: F, archive: Option<A>) -> Self {
        Self {
            github,
            fetcher,
            archive,
            config: VerificationConfig::default(),
        }
    }

    /// Replace the comparison settings
    pub fn with_config(mut self, config: VerificationConfig) -> Self {
        self.config = config;
        self
    }

    /// Current comparison settings
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Whether archive lookups will actually run
    pub fn has_archive(&self) -> bool {
        self.archive.is_some()
    }
}

impl<G, F, A> Verifier<G, F, A>
where
    G: GitHubApi,
    G::Error: Display,
    F: PageFetcher,
    F::Error: Display,
    A: ArchiveSearch,
    A::Error: Display,
{
    /// Verify one item
    pub fn verify(&self, evidence: &Evidence) -> VerificationResult {
        self.report(evidence).result
    }

    /// Verify one item and record which checker ran
    pub fn report(&self, evidence: &Evidence) -> ItemReport {
        let checker = select_checker(evidence);
        let id = evidence.label();

        debug!(id, checker = %checker, "Verifying evidence");
        let result = self.run(&checker, evidence);

        if result.is_valid {
            info!(id, checker = %checker, advisories = result.errors.len(), "Evidence verified");
        } else {
            warn!(id, checker = %checker, errors = result.errors.len(), "Evidence failed verification");
        }

        ItemReport {
            id: id.to_string(),
            kind: evidence.kind_name().to_string(),
            source: evidence.source().to_string(),
            checker: checker.to_string(),
            result,
        }
    }

    /// Verify every item, in order
    ///
    /// A failing item never stops the items after it.
    pub fn verify_each(&self, items: &[Evidence]) -> Vec<ItemReport> {
        items.iter().map(|item| self.report(item)).collect()
    }

    /// Verify every item and combine the results
    pub fn verify_all(&self, items: &[Evidence]) -> VerificationResult {
        aggregate(&self.verify_each(items))
    }

    fn run(&self, checker: &Checker, evidence: &Evidence) -> VerificationResult {
        match (checker, evidence) {
            (Checker::LocalGit, _) => VerificationResult::advisory(LOCAL_GIT_UNSUPPORTED),
            (Checker::Unsupported(message), _) => VerificationResult::invalid(message.clone()),
            (Checker::GhArchive, _) => archive::check(self.archive.as_ref(), evidence),
            (Checker::GitHub(_), Evidence::Observation(observation)) => {
                github::check(&self.github, observation, &self.config)
            }
            (Checker::UrlAccessible, Evidence::Observation(observation)) => {
                url::url_accessible(&self.fetcher, observation)
            }
            (Checker::Wayback, Evidence::Observation(observation)) => {
                url::wayback(&self.fetcher, observation)
            }
            (Checker::SecurityVendor, Evidence::Observation(observation)) => {
                url::security_vendor(&self.fetcher, observation)
            }
            (checker, Evidence::Event(_)) => {
                VerificationResult::invalid(format!("No {} check for events", checker))
            }
        }
    }
}
