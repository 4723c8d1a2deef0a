#![forbid(unsafe_code)]

//! One-shot retrieval of the record set.
//!
//! The fetch is fire-and-forget: it runs once at startup (the application
//! spawns it on a background thread), resolves exactly once, and is never
//! retried or re-triggered during the session. On failure the caller logs
//! the error and proceeds with an empty record set — there is deliberately
//! no retry or partial-data handling here.

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use udeck_core::{Record, normalize_records};

/// The fixed endpoint used when neither `--url` nor `USERDECK_URL` is set.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Default HTTP timeout for the startup fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Ways the one-shot fetch can fail.
///
/// Every variant degrades to the same outcome: an empty record set and a
/// log line. The taxonomy exists for the log line, not for recovery.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned {0}")]
    Status(reqwest::StatusCode),
    #[error("response decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Decode a JSON array of user objects and normalize identifiers.
///
/// Split out from the HTTP path so the decode/normalize step is testable
/// without a network.
pub fn decode_records(body: &str) -> Result<Vec<Record>, FetchError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body).map_err(FetchError::Decode)?;
    Ok(normalize_records(raw))
}

/// Blocking client for the record endpoint.
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::blocking::Client,
    url: String,
}

impl Fetcher {
    /// Build a client for `url` with the given timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform the one-shot GET and return the normalized record set.
    pub fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text()?;
        let records = decode_records(&body)?;
        info!(url = %self.url, count = records.len(), "record set fetched");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_normalizes_missing_ids() {
        let body = r#"[
            { "id": 1, "name": "Ana" },
            { "id": 2, "name": "Bo" },
            { "name": "Cy" }
        ]"#;
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].id(), 3);
        assert_eq!(records[2].name(), "Cy");
    }

    #[test]
    fn decode_empty_array() {
        assert!(decode_records("[]").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_non_array() {
        let err = decode_records(r#"{ "users": [] }"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = decode_records("[{").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn error_display_names_the_failure() {
        let err = decode_records("nope").unwrap_err();
        assert!(err.to_string().starts_with("response decode failed"));
    }

    #[test]
    fn fetcher_keeps_its_url() {
        let fetcher = Fetcher::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(fetcher.url(), DEFAULT_ENDPOINT);
    }
}
