use http::StatusCode;
use thiserror::Error;

/// Errors surfaced by a single upstream fetch.
///
/// Every variant is raised only after any open response stream has been
/// drained, so the pooled connection is always released. The aggregator
/// swallows all of these per source; none of them ever reaches a client.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Malformed call-time input, raised before any network activity
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("unexpected content-type {content_type:?} from {url}")]
    UnexpectedContentType { url: String, content_type: String },

    #[error("invalid JSON body from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can take the search service down.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ValidationError),
}
