use reqwest::{header::ACCEPT, Client};
use serde_json::Value;

use crate::config::ExtractorId;
use crate::error::Result;


/// Base path for the remote extraction service.
pub const EXTRACTOR_BASE_URL: &str = "https://data.import.io/extractor";

/// Client for fetching extractor runs, authenticated by an API key.
///
/// There is deliberately no retry, backoff, or request timeout here: a
/// transport failure or malformed response aborts the current ingestion
/// run and is surfaced to the caller.
pub struct ExtractorClient {
    client: Client,
    api_key: String,
}

impl ExtractorClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the latest run of an extractor as ordered JSON documents.
    pub async fn fetch_latest(&self, extractor_id: &ExtractorId) -> Result<Vec<Value>> {
        let url = format!("{EXTRACTOR_BASE_URL}/{}/json/latest", extractor_id);

        let body = self
            .client
            .get(&url)
            .query(&[("_apikey", self.api_key.as_str())])
            .header(ACCEPT, "application/x-ldjson")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_ldjson(&body)
    }
}

/// Split a newline-delimited JSON body into its documents, in order.
/// Blank lines are skipped; a malformed line is an error.
pub fn parse_ldjson(body: &str) -> Result<Vec<Value>> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}
