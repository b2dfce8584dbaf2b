//! Error types for the Yodeck integration.

use reqwest::{Method, StatusCode};

/// Result type alias for Yodeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the Yodeck API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success response from the API.
    ///
    /// `detail` carries the formatted error body (including its leading
    /// separator) or is empty when the body was unreadable.
    #[error("{method} {path} failed with status {status}{detail}")]
    Api {
        method: Method,
        path: String,
        status: StatusCode,
        detail: String,
    },

    /// A listing the choice refresh cannot proceed without
    #[error("Unable to load {resource}: {source}")]
    Listing {
        resource: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// No API key configured
    #[error("API key is not configured")]
    MissingApiKey,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Wrap a failure of a required listing endpoint
    pub(crate) fn listing(resource: &'static str, source: Error) -> Self {
        Self::Listing {
            resource,
            source: Box::new(source),
        }
    }
}
