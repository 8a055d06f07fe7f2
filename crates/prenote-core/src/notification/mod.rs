//! Notification requirement extraction.

pub mod complexity;
pub mod context;
pub mod mapping;
mod parser;
pub mod quick;
pub mod rules;

pub use complexity::{detect_complexity, Complexity, ComplexityClassifier, ComplexityIndicator};
pub use context::{apply_schengen_context, detect_schengen_scope, SchengenScope};
pub use parser::{decide, Decision, EscalationPolicy, NotificationParser};
pub use quick::{extract_quick, QuickExtraction, QuickExtractor};

use thiserror::Error;

/// Conditions reported in `parse_warnings`. None of these abort a parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    #[error("Empty text")]
    EmptyInput,

    /// Quick rules were kept without escalation.
    #[error("Partial pattern match, complexity score {complexity} ({indicators})")]
    AmbiguousResult { complexity: u32, indicators: String },

    #[error("No notification pattern matched (complexity score {complexity})")]
    NoRulesMatched { complexity: u32 },

    #[error("Complex text (complexity score {complexity}) but model fallback is disabled; using pattern rules")]
    ComplexWithoutFallback { complexity: u32 },

    #[error("Complex text (complexity score {complexity}) but model is unavailable: {reason}; using pattern rules")]
    ModelUnavailable { complexity: u32, reason: String },

    #[error("Model fallback failed (complexity score {complexity}): {reason}; using pattern rules")]
    ModelCallFailed { complexity: u32, reason: String },

    #[error("Model found no rules (complexity score {complexity})")]
    ModelReturnedNothing { complexity: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_issue_messages() {
        assert_eq!(ParseIssue::EmptyInput.to_string(), "Empty text");
        assert_eq!(
            ParseIssue::AmbiguousResult {
                complexity: 1,
                indicators: "time_cutoff".to_string(),
            }
            .to_string(),
            "Partial pattern match, complexity score 1 (time_cutoff)"
        );
    }
}
