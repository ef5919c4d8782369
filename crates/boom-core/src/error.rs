//! Error types for the boom report service

use thiserror::Error;

/// Main error type for all report operations
#[derive(Error, Debug)]
pub enum BoomError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{service} returned {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Empty generation: {0}")]
    EmptyGeneration(String),

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoomError {
    /// Network failures, rate limiting and upstream 5xx are worth another attempt.
    /// Every other error is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            BoomError::Http(_) => true,
            BoomError::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Status code reported to the inbound caller
    pub fn status_code(&self) -> u16 {
        match self {
            BoomError::MethodNotAllowed(_) => 405,
            BoomError::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Best-available diagnostic text from the failing upstream, if any
    pub fn details(&self) -> Option<String> {
        match self {
            BoomError::Upstream { body, .. } if !body.is_empty() => Some(body.clone()),
            BoomError::Http(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, BoomError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status: u16) -> BoomError {
        BoomError::Upstream {
            service: "Gemini",
            status,
            body: "oops".to_string(),
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(upstream(429).is_transient());
        assert!(upstream(503).is_transient());
        assert!(!upstream(400).is_transient());
        assert!(!upstream(401).is_transient());
        assert!(!BoomError::Config("missing".to_string()).is_transient());
        assert!(!BoomError::EmptyGeneration("none".to_string()).is_transient());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(BoomError::MethodNotAllowed("GET".to_string()).status_code(), 405);
        assert_eq!(BoomError::Validation("bad".to_string()).status_code(), 400);
        assert_eq!(BoomError::Config("missing".to_string()).status_code(), 500);
        assert_eq!(upstream(429).status_code(), 500);
    }

    #[test]
    fn test_upstream_message_and_details() {
        let err = upstream(422);
        assert_eq!(err.to_string(), "Gemini returned 422: oops");
        assert_eq!(err.details().as_deref(), Some("oops"));
    }
}
