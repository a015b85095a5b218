//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::commands::read_evidence;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use evidence_domain::traits::{ArchiveSearch, GitHubApi, PageFetcher};
use evidence_domain::Evidence;
use evidence_verify::{LiveVerifier, VerificationConfig, Verifier};
use std::fmt::Display;
use tracing::info;

/// Execute the verify command.
///
/// Returns whether every item verified.
pub fn execute_verify(args: VerifyArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    let evidence = read_evidence(&args.files, args.stdin)?;
    verify_live(&evidence, args.identity_only, args.timeout, config, formatter)
}

/// Verify items against the live sources and print the reports.
pub fn verify_live(
    evidence: &[Evidence],
    identity_only: bool,
    timeout: Option<u64>,
    config: &Config,
    formatter: &Formatter,
) -> Result<bool> {
    let mut client_config = config.client_config();
    if let Some(timeout) = timeout {
        client_config.timeout_secs = timeout;
    }
    let comparison = if identity_only {
        VerificationConfig::identity_only()
    } else {
        config.verification_config()
    };

    let verifier = LiveVerifier::live(&client_config, config.archive_credentials())?
        .with_config(comparison);
    info!(items = evidence.len(), archive = verifier.has_archive(), "Starting verification");

    let (output, all_valid) = render_verification(&verifier, evidence, formatter)?;
    println!("{}", output);
    Ok(all_valid)
}

/// Verify every item and render the reports.
pub fn render_verification<G, F, A>(
    verifier: &Verifier<G, F, A>,
    evidence: &[Evidence],
    formatter: &Formatter,
) -> Result<(String, bool)>
where
    G: GitHubApi,
    G::Error: Display,
    F: PageFetcher,
    F::Error: Display,
    A: ArchiveSearch,
    A::Error: Display,
{
    let reports = verifier.verify_each(evidence);
    let all_valid = reports.iter().all(|r| r.result.is_valid);
    Ok((formatter.format_reports(&reports)?, all_valid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use evidence_domain::{load_evidence, GitHubRepository, TagRecord};
    use evidence_sources::mock::{MockArchive, MockFetcher, MockGitHub};

    #[test]
    fn test_render_verification() {
        let repo = GitHubRepository::new("aws", "aws-toolkit-vscode");
        let github = MockGitHub::new().with_tag(
            &repo,
            "stability",
            TagRecord {
                target_sha: Some("678851bd".to_string()),
            },
        );
        let verifier = Verifier::new(github, MockFetcher::new(), None::<MockArchive>);
        let evidence = load_evidence(
            r#"[
                {"evidence_id": "tag", "observation_type": "tag",
                 "repository": {"owner": "aws", "name": "aws-toolkit-vscode"},
                 "verification": {"source": "github"},
                 "tag_name": "stability", "target_sha": "678851bd"},
                {"evidence_id": "push", "event_type": "push", "when": "2025-07-13T20:37:04Z",
                 "verification": {"source": "gharchive"}}
            ]"#,
        )
        .unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let (output, all_valid) = render_verification(&verifier, &evidence, &formatter).unwrap();

        assert!(all_valid);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["is_valid"], true);
        assert_eq!(
            value["items"][1]["result"]["errors"][0],
            "GH Archive verification skipped - no credentials"
        );
    }
}
