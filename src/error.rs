//! Errors raised outside the normalization core.

use thiserror::Error;

/// Transport, request and export failures.
///
/// Malformed registry payloads are never errors; they only reduce the
/// number of hits.
#[derive(Debug, Error)]
pub enum KvseekError {
    #[error("invalid search: {0}")]
    InvalidQuery(String),

    #[error("invalid endpoint URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not parse JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("all endpoints failed, last error: {0}")]
    AllEndpointsFailed(Box<KvseekError>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
