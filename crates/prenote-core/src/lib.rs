//! Core library for airport prior-notification extraction.
//!
//! This crate provides:
//! - the notification rule model and its weekday vocabulary
//! - a waterfall parser: deterministic quick patterns, complexity
//!   classification, and escalation to a structured-extraction model
//! - Schengen scope propagation
//! - hassle scoring and the query-time `NotificationInfo` view

pub mod error;
pub mod models;
pub mod notification;
pub mod scoring;

pub use error::{ConfigError, PrenoteError, Result};
pub use models::config::{ConfidenceConfig, ModelConfig, ParserConfig, PrenoteConfig};
pub use models::hassle::{HassleLevel, HassleScore};
pub use models::info::{load_records, NotificationInfo, NotificationRecord};
pub use models::rules::{
    ExtractionMethod, NotificationRule, NotificationType, ParsedNotificationRules, RuleType,
};
pub use models::weekday::{resolve_day_span, DaySpan};
pub use notification::{NotificationParser, ParseIssue};
pub use scoring::{condense, score_hassle, HassleScorer};

/// Re-export model boundary types.
pub use prenote_model::{ExtractedRule, ExtractionRequest, ModelError, ModelExtractor};

#[cfg(feature = "openai")]
pub use prenote_model::OpenAiExtractor;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    async fn parse_and_score(text: &str) -> (ParsedNotificationRules, HassleScore) {
        let parsed = NotificationParser::new().parse("EHAM", text, 1).await;
        let score = score_hassle(&parsed);
        (parsed, score)
    }

    #[tokio::test]
    async fn test_h24_has_no_hassle() {
        let (parsed, score) = parse_and_score("H24").await;
        assert_eq!(parsed.rules.len(), 1);
        assert!(parsed.is_h24());
        assert_eq!((score.level, score.score), (HassleLevel::None, 0.0));
        assert_eq!(score.summary, "H24 - no prior notice required");
    }

    #[tokio::test]
    async fn test_weekday_notice_is_moderate() {
        let (parsed, score) = parse_and_score("MON-FRI: PPR 24 HR").await;
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].weekday_start, Some(Weekday::Mon));
        assert_eq!(parsed.rules[0].weekday_end, Some(Weekday::Fri));
        assert_eq!((score.level, score.score), (HassleLevel::Moderate, 0.4));
        assert_eq!(score.summary, "Mon-Fri: PPR 24h");
    }

    #[tokio::test]
    async fn test_weekend_notice_gets_bonus() {
        let (_, score) = parse_and_score("SAT-SUN: PPR 48 HR").await;
        assert_eq!((score.level, score.score), (HassleLevel::High, 0.7));
        assert!(score.has_weekend_rules);
    }

    #[tokio::test]
    async fn test_on_request() {
        let (parsed, score) = parse_and_score("O/R").await;
        assert!(parsed.is_on_request());
        assert_eq!((score.level, score.score), (HassleLevel::Low, 0.2));
    }

    #[tokio::test]
    async fn test_mixed_schengen_text_keeps_flags() {
        let (parsed, score) = parse_and_score("Within Schengen: PN 2H. Extra-Schengen: PPR 24 HR").await;
        assert_eq!(parsed.rules.len(), 2);
        assert!(parsed.rules.iter().all(|r| !r.schengen_only && !r.non_schengen_only));
        assert!(!score.has_schengen_rules);
    }

    #[tokio::test]
    async fn test_condensed_record_round_trip() {
        let (parsed, score) = parse_and_score("MON-FRI: PPR 24 HR, SAT-SUN and HOL: PPR 48 HR").await;
        let json = serde_json::to_string(&condense(&parsed, &score)).unwrap();
        let record: NotificationRecord = serde_json::from_str(&json).unwrap();

        let info = NotificationInfo::from(record);
        assert_eq!(info.get_notice_for_day("saturday"), Some(48));
        assert_eq!(info.get_notice_for_day("TUE"), Some(24));
        assert_eq!(info.get_easiness_score(), 40);
        assert!(info.matches_criteria(Some(48), Some("hours"), Some(40)));
        assert!(!info.matches_criteria(Some(24), None, None));
    }
}
