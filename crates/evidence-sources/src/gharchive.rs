//! GH Archive lookups through the BigQuery REST API
//!
//! GH Archive publishes every public GitHub event into BigQuery tables
//! (`githubarchive.day.YYYYMMDD`, `githubarchive.month.YYYYMM`, ...). A lookup
//! searches one table for rows matching a repository, an actor and an event
//! type inside the one-minute window named by a 12-digit timestamp.

use crate::{ArchiveCredentials, ClientConfig, SourceError};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use evidence_domain::traits::ArchiveSearch;
use evidence_domain::{ArchiveLookup, ArchiveRow};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Maximum rows requested per lookup
const MAX_ROWS: u32 = 10;

/// Format of the lookup timestamp
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// GH Archive client backed by BigQuery
pub struct GhArchiveClient {
    endpoint: String,
    credentials: ArchiveCredentials,
    timeout_ms: u64,
    client: Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    job_complete: bool,
    #[serde(default)]
    rows: Vec<TableRow>,
}

#[derive(Deserialize)]
struct TableRow {
    f: Vec<TableCell>,
}

#[derive(Deserialize)]
struct TableCell {
    #[serde(default)]
    v: Value,
}

impl GhArchiveClient {
    /// Create a client from credentials and shared configuration
    pub fn new(credentials: ArchiveCredentials, config: &ClientConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            endpoint: config.bigquery_endpoint.trim_end_matches('/').to_string(),
            credentials,
            timeout_ms: config.timeout_secs * 1000,
            client,
        })
    }
}

/// Build the standard-SQL request body for a lookup
///
/// Values are passed as named query parameters. The table name cannot be
/// parameterized, so it is restricted to `[A-Za-z0-9_.-]`.
pub fn build_request(lookup: &ArchiveLookup, timeout_ms: u64) -> Result<Value, SourceError> {
    if lookup.table.is_empty()
        || !lookup
            .table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(SourceError::Query(format!(
            "Invalid BigQuery table name: {}",
            lookup.table
        )));
    }
    if lookup.repo.is_none() && lookup.actor.is_none() {
        return Err(SourceError::Query(
            "Must specify at least repo or actor".to_string(),
        ));
    }

    let window_start = parse_timestamp(&lookup.from_date)?;
    let window_end = window_start + Duration::minutes(1);

    let mut sql = format!(
        "SELECT type, actor.login, repo.name, \
         FORMAT_TIMESTAMP('%Y-%m-%dT%H:%M:%SZ', created_at) \
         FROM `{}` \
         WHERE created_at >= @window_start AND created_at < @window_end",
        lookup.table
    );
    let mut parameters = vec![
        timestamp_parameter("window_start", window_start),
        timestamp_parameter("window_end", window_end),
    ];

    let filters = [
        ("repo.name", "repo", &lookup.repo),
        ("actor.login", "actor", &lookup.actor),
    ];
    for (column, name, value) in filters {
        if let Some(value) = value {
            sql.push_str(&format!(" AND {} = @{}", column, name));
            parameters.push(string_parameter(name, value));
        }
    }
    sql.push_str(&format!(" LIMIT {}", MAX_ROWS));

    Ok(json!({
        "query": sql,
        "useLegacySql": false,
        "parameterMode": "NAMED",
        "queryParameters": parameters,
        "timeoutMs": timeout_ms,
    }))
}

/// Parse a 12-digit `YYYYMMDDHHMM` timestamp as UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SourceError> {
    if value.len() != 12 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(SourceError::Query(format!(
            "Timestamp must be 12 digits (YYYYMMDDHHMM), got '{}'",
            value
        )));
    }

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| SourceError::Query(format!("Invalid timestamp '{}': {}", value, e)))
}

fn timestamp_parameter(name: &str, value: DateTime<Utc>) -> Value {
    json!({
        "name": name,
        "parameterType": {"type": "TIMESTAMP"},
        "parameterValue": {"value": value.format("%Y-%m-%d %H:%M:%S+00:00").to_string()},
    })
}

fn string_parameter(name: &str, value: &str) -> Value {
    json!({
        "name": name,
        "parameterType": {"type": "STRING"},
        "parameterValue": {"value": value},
    })
}

fn parse_rows(response: QueryResponse) -> Result<Vec<ArchiveRow>, SourceError> {
    if !response.job_complete {
        return Err(SourceError::Query(
            "BigQuery job did not complete within the timeout".to_string(),
        ));
    }

    response
        .rows
        .into_iter()
        .map(|row| {
            let cell = |idx: usize| -> String {
                row.f
                    .get(idx)
                    .and_then(|c| c.v.as_str())
                    .unwrap_or_default()
                    .to_string()
            };
            let created_at = DateTime::parse_from_rfc3339(&cell(3))
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    SourceError::InvalidResponse(format!("Invalid created_at in row: {}", e))
                })?;

            Ok(ArchiveRow {
                event_type: cell(0),
                actor: cell(1),
                repo: cell(2),
                created_at,
            })
        })
        .collect()
}

impl ArchiveSearch for GhArchiveClient {
    type Error = SourceError;

    fn find_events(&self, lookup: &ArchiveLookup) -> Result<Vec<ArchiveRow>, Self::Error> {
        let body = build_request(lookup, self.timeout_ms)?;
        let url = format!("{}/projects/{}/queries", self.endpoint, self.credentials.project_id);
        debug!(%url, table = %lookup.table, from = %lookup.from_date, "GH Archive query");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.access_token)
            .json(&body)
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::Credentials(format!(
                "BigQuery rejected credentials (HTTP {})",
                status
            )));
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

        let parsed: QueryResponse = response
            .json()
            .map_err(|e| SourceError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        let rows = parse_rows(parsed)?;

        debug!(rows = rows.len(), "GH Archive query finished");
        Ok(rows)
    }
}
