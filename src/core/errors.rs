use reqwest::StatusCode;

/// A status check that could not be completed or understood.
///
/// The tracker renders every variant the same way; the distinction only
/// shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("Status request to {address} failed: {source}")]
    Transport {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Status endpoint {address} returned {status}")]
    Http { address: String, status: StatusCode },

    #[error("Malformed status payload from {address}: {source}")]
    Payload {
        address: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StatusError {
    pub fn kind(&self) -> &'static str {
        match self {
            StatusError::Transport { .. } => "transport",
            StatusError::Http { .. } => "http",
            StatusError::Payload { .. } => "payload",
        }
    }
}
