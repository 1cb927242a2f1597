//! Hit fetcher for retrieving the hit collection from the tracking endpoint
//!
//! This module provides a thin HTTP client wrapper that performs a single
//! GET against the hits endpoint, plus the `HitSource` trait the dashboard
//! state refreshes through.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::hits::record::HitRecord;

/// Anything that can produce one snapshot of the hit collection
#[async_trait]
pub trait HitSource: Send + Sync {
    async fn fetch_hits(&self) -> Result<Vec<HitRecord>, FetchError>;
}

/// HTTP client wrapper for fetching hits
pub struct HitsFetcher {
    client: Client,
    url: String,
}

impl HitsFetcher {
    /// Create a new hits fetcher
    ///
    /// # Arguments
    /// * `url` - Full URL to the hits endpoint (e.g., "http://localhost:5000/api/hits")
    /// * `timeout` - Upper bound for the whole request
    pub fn new(url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch hits from the endpoint
    ///
    /// # Returns
    /// The records in the order the endpoint sent them
    ///
    /// # Errors
    /// Returns an error if:
    /// - Network request fails or times out
    /// - Response status is not successful (2xx)
    /// - Response body is not a JSON array of hit records
    pub async fn fetch(&self) -> Result<Vec<HitRecord>, FetchError> {
        debug!(url = %self.url, "Fetching API hits");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let hits = decode_hits(&body)?;

        debug!(count = hits.len(), "Fetched API hits");
        Ok(hits)
    }
}

/// Decode a JSON array of hits record by record
///
/// Records degrade field by field, so only an entry that is not a JSON
/// object at all is dropped, with a warning. A body that is not an array
/// fails as a whole.
pub fn decode_hits(body: &[u8]) -> Result<Vec<HitRecord>, FetchError> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(body)?;

    let mut hits = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<HitRecord>(entry) {
            Ok(hit) => hits.push(hit),
            Err(e) => warn!(index, error = %e, "Skipping hit entry that is not a record"),
        }
    }

    Ok(hits)
}

#[async_trait]
impl HitSource for HitsFetcher {
    async fn fetch_hits(&self) -> Result<Vec<HitRecord>, FetchError> {
        self.fetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let url = "http://localhost:5000/api/hits".to_string();
        let fetcher = HitsFetcher::new(url.clone(), Duration::from_secs(5)).unwrap();
        assert_eq!(fetcher.url(), url);
    }

    #[test]
    fn test_decode_keeps_odd_records() {
        let body = br#"[
            {"id": 1, "user_agent": "curl/8 x", "ip_address": "10.0.0.1"},
            {"id": 1.5, "user_agent": 99, "ip_address": 10},
            {"ip_address": "10.0.0.1"}
        ]"#;

        let hits = decode_hits(body).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[1].address(), "10");
        assert_eq!(hits[2].client_family(), "");
    }

    #[test]
    fn test_decode_drops_non_object_entries() {
        let hits = decode_hits(br#"[{"id": 1}, 42, "x", {"id": 2}]"#).unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_decode_rejects_non_array_body() {
        let err = decode_hits(br#"{"hits": []}"#).unwrap_err();
        assert_eq!(err.kind(), "decode");
    }
}
