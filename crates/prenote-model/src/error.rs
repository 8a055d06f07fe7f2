//! Error types for the model layer.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while calling an extraction model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// No model or credential is configured.
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete in time.
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure (connection, TLS, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The response could not be decoded into extraction rules.
    #[error("malformed model output: {0}")]
    Malformed(String),
}

impl ModelError {
    /// Whether the failure means no model could be reached at all, as opposed
    /// to a call that was attempted and failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ModelError::Unavailable(_))
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(ModelError::Unavailable("no key".into()).is_unavailable());
        assert!(!ModelError::Timeout(Duration::from_secs(30)).is_unavailable());
        assert!(!ModelError::Malformed("not json".into()).is_unavailable());
    }

    #[test]
    fn test_display() {
        let err = ModelError::Api {
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "API error 429: rate limited");
    }
}
