use thiserror::Error;

/// Any failed call against the contacts API.
///
/// The controller treats every variant the same way (log and drop); the
/// variants only exist so the log line says what went wrong.
#[derive(Debug, Error)]
pub enum ApiCallError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },
    #[error("{method} {url} returned an unreadable body: {reason}")]
    Decode {
        method: String,
        url: String,
        reason: String,
    },
    #[error("invalid contacts endpoint '{endpoint}': {reason}")]
    Endpoint { endpoint: String, reason: String },
}

impl ApiCallError {
    /// Response body when the server answered with a non-success status.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
