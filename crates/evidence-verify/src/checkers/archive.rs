//! GH Archive lookups

use crate::{VerificationResult, ARCHIVE_SKIPPED};
use evidence_domain::traits::ArchiveSearch;
use evidence_domain::{ArchiveLookup, Evidence};
use std::fmt::Display;
use tracing::debug;

/// Look an event or observation up in GH Archive
///
/// Without a configured archive the item is accepted with a single advisory,
/// whatever it contains.
pub(crate) fn check<A>(archive: Option<&A>, evidence: &Evidence) -> VerificationResult
where
    A: ArchiveSearch,
    A::Error: Display,
{
    let Some(archive) = archive else {
        return VerificationResult::advisory(ARCHIVE_SKIPPED);
    };

    let lookup = match lookup_for(evidence) {
        Ok(lookup) => lookup,
        Err(message) => return VerificationResult::invalid(message),
    };

    debug!(
        table = %lookup.table,
        repo = ?lookup.repo,
        actor = ?lookup.actor,
        from_date = %lookup.from_date,
        "Querying GH Archive"
    );
    match archive.find_events(&lookup) {
        Ok(rows) if rows.is_empty() => {
            VerificationResult::invalid("No matching event found in GH Archive")
        }
        Ok(_) => VerificationResult::valid(),
        Err(e) => VerificationResult::invalid(format!("GH Archive verification error: {}", e)),
    }
}

/// Build the lookup key, or the message explaining why none can be built
pub(crate) fn lookup_for(evidence: &Evidence) -> Result<ArchiveLookup, String> {
    let Some(table) = evidence.verification().bigquery_table.clone() else {
        return Err("No BigQuery table specified".to_string());
    };

    let (actor, when) = match evidence {
        Evidence::Event(event) => (
            event.who.as_ref().map(|who| who.login.clone()),
            Some(event.when),
        ),
        Evidence::Observation(observation) => (
            observation.observed_by.as_ref().map(|who| who.login.clone()),
            observation.observed_when,
        ),
    };
    let repo = evidence.repository().map(|repo| repo.full_name());

    if repo.is_none() && actor.is_none() {
        return Err("GH Archive lookup needs a repository or an actor".to_string());
    }
    let Some(when) = when else {
        return Err("No observation time specified".to_string());
    };

    Ok(ArchiveLookup {
        table,
        repo,
        actor,
        from_date: when.format("%Y%m%d%H%M").to_string(),
    })
}
