//! Error types for backend collaborators and configuration.
//!
//! Store operations never surface these to their callers; they are logged and
//! folded into the human-readable `last_error` field of the owning state.

use thiserror::Error;

/// A failed call to the word/score backend or the dictionary service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("Cannot build a request URL from {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration could not be loaded from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} must be a valid URL, got '{value}': {detail}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        detail: String,
    },

    #[error("{var} has an unsupported value '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Status {
            path: "/words/random-word".to_string(),
            status: 503,
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "Request to /words/random-word returned status 503"
        );
        assert_eq!(ApiError::InvalidUrl("x".to_string()).status(), None);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Missing {
            var: "WORDGAME_API_BASE_URL",
        };
        assert_eq!(err.to_string(), "WORDGAME_API_BASE_URL must be set");
    }
}
