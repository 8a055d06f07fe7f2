//! Model extractor implementations.

#[cfg(feature = "openai")]
pub mod openai;

use async_trait::async_trait;

use crate::{ExtractedRule, ExtractionRequest, Result};

/// Trait for structured-extraction models.
///
/// One call per airport text. Implementations hold no per-call state, so a
/// single extractor can serve many concurrent parses.
#[async_trait]
pub trait ModelExtractor: Send + Sync {
    /// Extract notification rules from the request text.
    ///
    /// An empty `Ok` vector means the model found nothing; any failure
    /// (timeout, bad output, missing credential) is an `Err`.
    async fn extract(&self, request: &ExtractionRequest) -> Result<Vec<ExtractedRule>>;

    /// Short name used in logs and warnings.
    fn name(&self) -> &str;
}
