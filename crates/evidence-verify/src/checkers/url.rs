//! URL-based checks: GitHub fallback, Wayback snapshots, vendor pages

use crate::VerificationResult;
use evidence_domain::traits::PageFetcher;
use evidence_domain::{Observation, ObservationKind, PageResponse};
use std::fmt::Display;
use tracing::debug;

const WAYBACK_BASE: &str = "https://web.archive.org/web";

/// Longest IOC prefix quoted in a not-found message
const IOC_PREVIEW_CHARS: usize = 50;

/// GitHub observations with no API comparison
///
/// The source URL is optional; when present it must be reachable.
pub(crate) fn url_accessible<F>(fetcher: &F, observation: &Observation) -> VerificationResult
where
    F: PageFetcher,
    F::Error: Display,
{
    let Some(url) = observation.verification.url.as_deref() else {
        return VerificationResult::valid();
    };

    match fetch(fetcher, url) {
        Ok(_) => VerificationResult::valid(),
        Err(detail) => VerificationResult::invalid(format!("Failed to access URL: {}", detail)),
    }
}

/// Fetch a Wayback capture
///
/// Snapshots without an explicit URL are addressed by their original URL and
/// capture timestamp.
pub(crate) fn wayback<F>(fetcher: &F, observation: &Observation) -> VerificationResult
where
    F: PageFetcher,
    F::Error: Display,
{
    let url = observation
        .verification
        .url
        .clone()
        .or_else(|| snapshot_url(&observation.kind));

    match url {
        Some(url) => fetch_source(fetcher, &url, observation),
        None => VerificationResult::invalid("No source URL specified"),
    }
}

/// Fetch a security-vendor page
pub(crate) fn security_vendor<F>(fetcher: &F, observation: &Observation) -> VerificationResult
where
    F: PageFetcher,
    F::Error: Display,
{
    match observation.verification.url.as_deref() {
        Some(url) => fetch_source(fetcher, url, observation),
        None => VerificationResult::invalid("No source URL specified"),
    }
}

/// Wayback URL for a snapshot observation, if it names both parts
pub(crate) fn snapshot_url(kind: &ObservationKind) -> Option<String> {
    match kind {
        ObservationKind::Snapshot {
            original_url: Some(original_url),
            captured_at: Some(captured_at),
        } => Some(format!("{}/{}/{}", WAYBACK_BASE, captured_at, original_url)),
        _ => None,
    }
}

fn fetch_source<F>(fetcher: &F, url: &str, observation: &Observation) -> VerificationResult
where
    F: PageFetcher,
    F::Error: Display,
{
    let page = match fetch(fetcher, url) {
        Ok(page) => page,
        Err(detail) => {
            return VerificationResult::invalid(format!("Failed to fetch source URL: {}", detail))
        }
    };

    if let ObservationKind::Ioc { value, .. } = &observation.kind {
        if !value.is_empty() && !page.body.to_lowercase().contains(&value.to_lowercase()) {
            let preview: String = value.chars().take(IOC_PREVIEW_CHARS).collect();
            return VerificationResult::invalid(format!(
                "IOC value '{}' not found in source",
                preview
            ));
        }
    }

    VerificationResult::valid()
}

/// Fetch a page, treating non-success statuses as failures
fn fetch<F>(fetcher: &F, url: &str) -> Result<PageResponse, String>
where
    F: PageFetcher,
    F::Error: Display,
{
    debug!(url, "Fetching page");
    let page = fetcher.fetch(url).map_err(|e| e.to_string())?;
    if !page.is_success() {
        return Err(format!("HTTP {}", page.status));
    }
    Ok(page)
}
