//! Error types for the prenote-core library.

use thiserror::Error;

/// Main error type for the prenote library.
///
/// Parsing itself never fails; see [`ParseIssue`](crate::notification::ParseIssue)
/// for the conditions reported as warnings instead.
#[derive(Error, Debug)]
pub enum PrenoteError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model backend could not be constructed.
    #[error("model error: {0}")]
    Model(#[from] prenote_model::ModelError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to configuration. Raised at construction time only.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A numeric threshold is out of range.
    #[error("invalid {name} = {value}: {reason}")]
    InvalidThreshold {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A confidence value is outside 0.0 - 1.0.
    #[error("invalid confidence {name} = {value}: must be within 0.0 - 1.0")]
    InvalidConfidence { name: &'static str, value: f64 },

    /// Model settings are unusable.
    #[error("invalid model settings: {0}")]
    InvalidModel(String),

    /// Failed to read or write the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for the prenote library.
pub type Result<T> = std::result::Result<T, PrenoteError>;
