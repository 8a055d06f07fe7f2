//! Conversion of model output into notification rules.

use tracing::debug;

use prenote_model::ExtractedRule;

use super::rules::business_day::is_clock_time;
use crate::models::rules::{ExtractionMethod, NotificationRule, NotificationType, RuleType};
use crate::models::weekday::weekday_from_index;

/// Map one model rule. Never fails; out-of-range values are dropped.
pub fn rule_from_model(extracted: &ExtractedRule, raw_text: &str, confidence: f64) -> NotificationRule {
    let notification_type = if extracted.is_prohibited {
        NotificationType::NotAvailable
    } else {
        NotificationType::from_model(&extracted.notification_type)
    };

    let mut rule = NotificationRule::new(
        RuleType::from_model(&extracted.rule_type),
        notification_type,
        raw_text,
        confidence,
        ExtractionMethod::Model,
    );

    rule.hours_notice = extracted.hours_notice;
    rule.weekday_start = extracted.weekday_start.and_then(weekday_from_index);
    rule.weekday_end = extracted.weekday_end.and_then(weekday_from_index);
    if rule.weekday_start.is_none() {
        rule.weekday_end = None;
    }
    rule.includes_holidays = extracted.includes_holidays;
    rule.business_day_offset = extracted.business_day_offset;
    rule.specific_time = extracted
        .specific_time
        .as_deref()
        .map(str::trim)
        .filter(|t| is_clock_time(t))
        .map(str::to_string);

    if extracted.schengen_only && extracted.non_schengen_only {
        debug!("Model set both Schengen scopes; clearing");
    } else {
        rule.schengen_only = extracted.schengen_only;
        rule.non_schengen_only = extracted.non_schengen_only;
    }

    let summary = extracted.summary.trim();
    if !summary.is_empty() {
        rule.conditions = Some(summary.to_string());
    }

    rule
}

/// Map every model rule for one text.
pub fn rules_from_model(extracted: &[ExtractedRule], raw_text: &str, confidence: f64) -> Vec<NotificationRule> {
    extracted
        .iter()
        .map(|rule| rule_from_model(rule, raw_text, confidence))
        .collect()
}
