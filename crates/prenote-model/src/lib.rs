//! Language-model extraction boundary for prenote.
//!
//! This crate defines the contract between the notification parser and an
//! external structured-extraction model:
//! - [`ModelExtractor`], the async capability the parser escalates to
//! - [`ExtractionRequest`] / [`ExtractedRule`], the wire shapes of a call
//! - an OpenAI-compatible chat-completions backend (feature `openai`)
//!
//! Retry and throttling policy are left to the caller.

mod backend;
mod error;
pub mod schema;
mod types;

pub use backend::ModelExtractor;
pub use error::ModelError;
pub use types::{ExtractedRule, ExtractionRequest, ExtractionResponse};

#[cfg(feature = "openai")]
pub use backend::openai::{OpenAiExtractor, OpenAiSettings};

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
