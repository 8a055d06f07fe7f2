//! Waterfall parser: quick patterns first, the model only for complex text.

use std::sync::Arc;

use tracing::{debug, info, warn};

use prenote_model::{ExtractionRequest, ModelError, ModelExtractor};

use super::complexity::{Complexity, ComplexityClassifier};
use super::mapping::rules_from_model;
use super::quick::{QuickExtraction, QuickExtractor};
use super::ParseIssue;
use crate::error::Result;
use crate::models::config::{ConfidenceConfig, ParserConfig, PrenoteConfig};
use crate::models::rules::{NotificationRule, ParsedNotificationRules};

/// Thresholds that drive [`decide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationPolicy {
    /// Minimum confidence for a complete quick result.
    pub complete_floor: f64,
    /// Complexity scores above this escalate.
    pub threshold: u32,
}

/// Outcome of the escalation state machine for one text.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Quick result is complete and confident.
    AcceptQuick,
    /// Quick rules are kept with a warning.
    AcceptPartial(Complexity),
    /// Too complex for patterns; ask the model.
    Escalate(Complexity),
    /// Simple text that no pattern understood.
    Unresolved(Complexity),
}

/// Decide what to do with a quick result.
///
/// `complexity` is only evaluated when the quick result is not accepted
/// outright.
pub fn decide(
    quick: &QuickExtraction,
    policy: &EscalationPolicy,
    complexity: impl FnOnce() -> Complexity,
) -> Decision {
    if quick.is_complete && quick.confidence >= policy.complete_floor {
        return Decision::AcceptQuick;
    }

    let complexity = complexity();
    if complexity.score() > policy.threshold {
        Decision::Escalate(complexity)
    } else if quick.rules.is_empty() {
        Decision::Unresolved(complexity)
    } else {
        Decision::AcceptPartial(complexity)
    }
}

/// Notification parser.
///
/// Holds no per-parse state: one instance can be shared (it is cheap to
/// clone) across any number of concurrent parses.
#[derive(Clone)]
pub struct NotificationParser {
    config: ParserConfig,
    confidence: ConfidenceConfig,
    quick: QuickExtractor,
    classifier: ComplexityClassifier,
    model: Option<Arc<dyn ModelExtractor>>,
}

impl NotificationParser {
    /// Create a parser with default settings and no model.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        let confidence = ConfidenceConfig::default();
        Self {
            classifier: ComplexityClassifier::new(config.text_length_threshold),
            quick: QuickExtractor::new(confidence.clone()),
            config,
            confidence,
            model: None,
        }
    }

    /// Create a parser from configuration. Invalid thresholds fail here.
    pub fn from_config(config: &PrenoteConfig) -> Result<Self> {
        config.parser.validate()?;
        config.confidence.validate()?;

        Ok(Self {
            classifier: ComplexityClassifier::new(config.parser.text_length_threshold),
            quick: QuickExtractor::new(config.confidence.clone()),
            config: config.parser.clone(),
            confidence: config.confidence.clone(),
            model: None,
        })
    }

    /// Set the model used for escalation.
    pub fn with_model(mut self, model: Arc<dyn ModelExtractor>) -> Self {
        self.model = Some(model);
        self
    }

    /// Enable or disable escalation.
    pub fn with_llm_fallback(mut self, enabled: bool) -> Self {
        self.config.use_llm_fallback = enabled;
        self
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    fn policy(&self) -> EscalationPolicy {
        EscalationPolicy {
            complete_floor: self.confidence.complete,
            threshold: self.config.complexity_threshold,
        }
    }

    /// Parse one airport's notification text.
    ///
    /// Never fails: degraded outcomes are reported in `parse_warnings`.
    pub async fn parse(&self, icao: &str, text: &str, source_field_id: i64) -> ParsedNotificationRules {
        let mut result = ParsedNotificationRules::new(icao, text, source_field_id);

        if text.trim().is_empty() {
            result.parse_warnings.push(ParseIssue::EmptyInput.to_string());
            return result;
        }

        info!("Parsing notification text for {} ({} chars)", icao, text.chars().count());

        let quick = self.quick.extract(text);
        let decision = decide(&quick, &self.policy(), || self.classifier.detect(text));

        match decision {
            Decision::AcceptQuick => {
                debug!("{}: accepted quick result ({} rules)", icao, quick.rules.len());
                result.rules = quick.rules;
            }
            Decision::AcceptPartial(complexity) => {
                debug!("{}: accepted partial result, complexity {}", icao, complexity.score());
                result.rules = quick.rules;
                result.parse_warnings.push(
                    ParseIssue::AmbiguousResult {
                        complexity: complexity.score(),
                        indicators: complexity.to_string(),
                    }
                    .to_string(),
                );
            }
            Decision::Unresolved(complexity) => {
                debug!("{}: no pattern matched", icao);
                result.parse_warnings.push(
                    ParseIssue::NoRulesMatched {
                        complexity: complexity.score(),
                    }
                    .to_string(),
                );
            }
            Decision::Escalate(complexity) => {
                debug!("{}: escalating, complexity {} ({})", icao, complexity.score(), complexity);
                let (rules, issue) = self.escalate(icao, text, quick.rules, complexity.score()).await;
                result.rules = rules;
                result.parse_warnings.extend(issue.map(|i| i.to_string()));
            }
        }

        result
    }

    async fn escalate(
        &self,
        icao: &str,
        text: &str,
        quick_rules: Vec<NotificationRule>,
        complexity: u32,
    ) -> (Vec<NotificationRule>, Option<ParseIssue>) {
        if !self.config.use_llm_fallback {
            return (quick_rules, Some(ParseIssue::ComplexWithoutFallback { complexity }));
        }

        let Some(model) = &self.model else {
            return (
                quick_rules,
                Some(ParseIssue::ModelUnavailable {
                    complexity,
                    reason: "no model configured".to_string(),
                }),
            );
        };

        let request = ExtractionRequest::new(icao, text);
        match model.extract(&request).await {
            Ok(extracted) if extracted.is_empty() => {
                (Vec::new(), Some(ParseIssue::ModelReturnedNothing { complexity }))
            }
            Ok(extracted) => {
                info!("{}: {} returned {} rules", icao, model.name(), extracted.len());
                (rules_from_model(&extracted, text, self.confidence.model), None)
            }
            Err(err) => {
                warn!("{}: {} failed, keeping pattern rules: {}", icao, model.name(), err);
                (quick_rules, Some(model_issue(err, complexity)))
            }
        }
    }
}

impl Default for NotificationParser {
    fn default() -> Self {
        Self::new()
    }
}

fn model_issue(err: ModelError, complexity: u32) -> ParseIssue {
    let reason = err.to_string();
    if err.is_unavailable() {
        ParseIssue::ModelUnavailable { complexity, reason }
    } else {
        ParseIssue::ModelCallFailed { complexity, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rules::{ExtractionMethod, NotificationType};
    use async_trait::async_trait;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;
    use prenote_model::ExtractedRule;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    enum Reply {
        Rules(Vec<ExtractedRule>),
        Raw(&'static str),
        Timeout,
        NoCredential,
    }

    struct MockModel {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl MockModel {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelExtractor for MockModel {
        async fn extract(&self, _request: &ExtractionRequest) -> prenote_model::Result<Vec<ExtractedRule>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Rules(rules) => Ok(rules.clone()),
                Reply::Raw(content) => prenote_model::schema::parse_reply(content),
                Reply::Timeout => Err(ModelError::Timeout(Duration::from_secs(30))),
                Reply::NoCredential => Err(ModelError::Unavailable("OPENAI_API_KEY is not set".to_string())),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn model_rule() -> ExtractedRule {
        ExtractedRule {
            rule_type: "customs".to_string(),
            notification_type: "hours".to_string(),
            hours_notice: Some(24),
            weekday_start: Some(0),
            weekday_end: Some(3),
            summary: "24h notice Monday to Thursday".to_string(),
            ..Default::default()
        }
    }

    fn complex_text() -> String {
        let mut text = String::from("MON: PPR 12 HR. TUE: PPR 12 HR. WED: PPR 24 HR. THU: PPR 24 HR. ");
        while text.len() <= 300 {
            text.push_str("Notify the handling agent via the published telephone number. ");
        }
        text
    }

    fn quick(rules: usize, confidence: f64, is_complete: bool) -> QuickExtraction {
        let rule = NotificationRule::pattern(
            crate::models::rules::RuleType::Ppr,
            NotificationType::Hours,
            "PPR 24 HR",
            confidence,
        );
        QuickExtraction {
            rules: vec![rule; rules],
            confidence,
            is_complete,
        }
    }

    fn complexity(score: usize) -> Complexity {
        let text = match score {
            0 => "PPR 24 HR",
            _ => "Non-Schengen: PPR before 1500 except HOL, if requested during opening hours",
        };
        let complexity = ComplexityClassifier::default().detect(text);
        assert!(score == 0 || complexity.score() > 2);
        complexity
    }

    const POLICY: EscalationPolicy = EscalationPolicy {
        complete_floor: 0.85,
        threshold: 2,
    };

    #[test]
    fn test_decide_accept_quick_is_lazy() {
        let decision = decide(&quick(1, 0.95, true), &POLICY, || panic!("complexity evaluated"));
        assert_eq!(decision, Decision::AcceptQuick);
    }

    #[test]
    fn test_decide_branches() {
        assert!(matches!(
            decide(&quick(1, 0.80, true), &POLICY, || complexity(0)),
            Decision::AcceptPartial(_)
        ));
        assert!(matches!(
            decide(&quick(0, 0.0, true), &POLICY, || complexity(0)),
            Decision::Unresolved(_)
        ));
        assert!(matches!(
            decide(&quick(3, 0.80, false), &POLICY, || complexity(3)),
            Decision::Escalate(_)
        ));
        assert!(matches!(
            decide(&quick(0, 0.0, false), &POLICY, || complexity(3)),
            Decision::Escalate(_)
        ));
    }

    #[tokio::test]
    async fn test_empty_text() {
        let parser = NotificationParser::new();
        for text in ["", "   \n\t"] {
            let result = parser.parse("EDDF", text, 1).await;
            assert!(result.rules.is_empty());
            assert_eq!(result.parse_warnings, vec!["Empty text".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_h24_fast_path() {
        let model = MockModel::new(Reply::Rules(vec![model_rule()]));
        let parser = NotificationParser::new().with_model(model.clone());

        let result = parser.parse("LFPG", "H24", 7).await;
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0].notification_type, NotificationType::H24);
        assert!(result.rules[0].confidence >= 0.95);
        assert!(result.parse_warnings.is_empty());
        assert_eq!(result.source_field_id, 7);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_weekday_rule_accepted_partially() {
        let result = NotificationParser::new().parse("EGKB", "MON-FRI: PPR 24 HR", 1).await;
        assert_eq!(result.rules.len(), 1);
        let rule = &result.rules[0];
        assert_eq!(rule.weekday_start, Some(Weekday::Mon));
        assert_eq!(rule.weekday_end, Some(Weekday::Fri));
        assert_eq!(rule.hours_notice, Some(24));
        assert_eq!(result.parse_warnings.len(), 1);
        assert!(result.parse_warnings[0].contains("complexity score 0"));
    }

    #[tokio::test]
    async fn test_unmatched_simple_text() {
        let result = NotificationParser::new().parse("EGKB", "Contact the airport office", 1).await;
        assert!(result.rules.is_empty());
        assert_eq!(result.parse_warnings.len(), 1);
        assert!(result.parse_warnings[0].starts_with("No notification pattern matched"));
    }

    #[tokio::test]
    async fn test_complex_text_escalates() {
        let model = MockModel::new(Reply::Rules(vec![model_rule()]));
        let parser = NotificationParser::new().with_model(model.clone());

        let result = parser.parse("LSGS", &complex_text(), 3).await;
        assert_eq!(model.calls(), 1);
        assert_eq!(result.rules.len(), 1);
        let rule = &result.rules[0];
        assert_eq!(rule.extraction_method, ExtractionMethod::Model);
        assert_eq!(rule.confidence, 0.85);
        assert_eq!(rule.weekday_end, Some(Weekday::Thu));
        assert!(result.parse_warnings.is_empty());
    }

    #[tokio::test]
    async fn test_h24_with_exceptions_escalates() {
        let model = MockModel::new(Reply::Rules(vec![model_rule()]));
        let parser = NotificationParser::new().with_model(model.clone());

        let text = "H24 except MON, WED, FRI and SAT: not available before 0800 unless PPR";
        let result = parser.parse("LFSB", text, 2).await;
        assert_eq!(model.calls(), 1);
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0].extraction_method, ExtractionMethod::Model);
        assert!(result.parse_warnings.is_empty());
    }

    #[tokio::test]
    async fn test_reply_without_rules_keeps_quick_rules() {
        for reply in ["{}", r#"{"requirements":[{"type":"ppr","hours":24}]}"#] {
            let model = MockModel::new(Reply::Raw(reply));
            let parser = NotificationParser::new().with_model(model.clone());

            let result = parser.parse("LSGS", &complex_text(), 3).await;
            assert_eq!(model.calls(), 1);
            assert_eq!(result.rules.len(), 4);
            assert!(result.rules.iter().all(|r| r.extraction_method == ExtractionMethod::Pattern));
            assert_eq!(result.parse_warnings.len(), 1);
            assert!(result.parse_warnings[0].starts_with("Model fallback failed"));
        }
    }

    #[tokio::test]
    async fn test_model_failure_keeps_quick_rules() {
        let model = MockModel::new(Reply::Timeout);
        let parser = NotificationParser::new().with_model(model.clone());

        let result = parser.parse("LSGS", &complex_text(), 3).await;
        assert_eq!(model.calls(), 1);
        assert_eq!(result.rules.len(), 4);
        assert!(result.rules.iter().all(|r| r.extraction_method == ExtractionMethod::Pattern));
        assert_eq!(result.parse_warnings.len(), 1);
        assert!(result.parse_warnings[0].starts_with("Model fallback failed"));
    }

    #[tokio::test]
    async fn test_missing_credential_degrades() {
        let parser = NotificationParser::new().with_model(MockModel::new(Reply::NoCredential));
        let result = parser.parse("LSGS", &complex_text(), 3).await;
        assert_eq!(result.rules.len(), 4);
        assert!(result.parse_warnings[0].contains("model is unavailable"));

        let result = NotificationParser::new().parse("LSGS", &complex_text(), 3).await;
        assert_eq!(result.rules.len(), 4);
        assert!(result.parse_warnings[0].contains("no model configured"));
    }

    #[tokio::test]
    async fn test_fallback_disabled() {
        let model = MockModel::new(Reply::Rules(vec![model_rule()]));
        let parser = NotificationParser::new()
            .with_model(model.clone())
            .with_llm_fallback(false);

        let result = parser.parse("LSGS", &complex_text(), 3).await;
        assert_eq!(model.calls(), 0);
        assert_eq!(result.rules.len(), 4);
        assert!(result.parse_warnings[0].contains("fallback is disabled"));
    }

    #[tokio::test]
    async fn test_model_returns_nothing() {
        let parser = NotificationParser::new().with_model(MockModel::new(Reply::Rules(Vec::new())));
        let result = parser.parse("LSGS", &complex_text(), 3).await;
        assert!(result.rules.is_empty());
        assert!(result.parse_warnings[0].starts_with("Model found no rules"));
    }

    #[tokio::test]
    async fn test_parse_is_idempotent() {
        let parser = NotificationParser::new();
        let text = "MON-FRI: PPR 24 HR, SAT-SUN and HOL: PPR 48 HR. Non-Schengen only.";
        let first = parser.parse("EDDF", text, 1).await;
        let second = parser.parse("EDDF", text, 1).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_config_rejects_invalid_threshold() {
        let mut config = PrenoteConfig::default();
        config.parser.complexity_threshold = 99;
        assert!(NotificationParser::from_config(&config).is_err());

        let mut config = PrenoteConfig::default();
        config.confidence.model = 1.5;
        assert!(NotificationParser::from_config(&config).is_err());

        assert!(NotificationParser::from_config(&PrenoteConfig::default()).is_ok());
    }
}
