use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single API call.
///
/// Callers at the session/resource boundary collapse all of these into a
/// boolean outcome; the variants exist for logging and for the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, or similar.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{path} rejected with HTTP {status}: {detail}")]
    Rejected {
        path: String,
        status: StatusCode,
        detail: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// HTTP status of a rejection, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
