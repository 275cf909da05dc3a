//! Error types for fossnav
//!
//! Every failure the client can hit talking to the Search API, plus the
//! few local ones (configuration, clipboard, terminal IO).

use thiserror::Error;

/// Main error type for fossnav operations
#[derive(Error, Debug)]
pub enum NavError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API returned {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Malformed response from Search API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Request worker exited without reporting a result")]
    WorkerLost,

    #[error("No response from Search API within {0:?}")]
    Timeout(std::time::Duration),

    /// A failure already reported through the search state
    #[error("{0}")]
    Reported(String),
}

/// Result type alias for fossnav operations
pub type Result<T> = std::result::Result<T, NavError>;

impl NavError {
    /// Build a status error from a non-2xx response code
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        NavError::Status {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Search failed")
                .to_string(),
        }
    }

    /// Check if this error is recoverable (the user may simply try again)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NavError::Http(_)
                | NavError::Status { .. }
                | NavError::Decode(_)
                | NavError::WorkerLost
                | NavError::Timeout(_)
                | NavError::Reported(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_canonical_reason() {
        let err = NavError::from_status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "Search API returned 503: Service Unavailable");
        assert!(err.is_recoverable());
    }

    #[test]
    fn config_errors_are_not_recoverable() {
        assert!(!NavError::Config("bad".into()).is_recoverable());
    }
}
