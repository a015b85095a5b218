//! Plain URL fetching for Wayback snapshots and security-vendor pages

use crate::{ClientConfig, SourceError};
use evidence_domain::traits::PageFetcher;
use evidence_domain::PageResponse;
use reqwest::blocking::Client;
use tracing::debug;

/// Blocking HTTP GET fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured timeout and user agent
    pub fn new(config: &ClientConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    type Error = SourceError;

    fn fetch(&self, url: &str) -> Result<PageResponse, Self::Error> {
        debug!(%url, "Fetching page");

        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        debug!(%url, status, bytes = body.len(), "Fetched page");
        Ok(PageResponse { status, body })
    }
}
