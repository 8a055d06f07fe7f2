//! Unscoped hours notice: `PPR 24 HR`, `PN 2H`, `48 hours`.

use regex::Captures;

use super::matched_text;
use crate::models::config::ConfidenceConfig;
use crate::models::rules::{NotificationRule, NotificationType, RuleType};

pub fn hours_rule(caps: &Captures, confidence: &ConfidenceConfig) -> Option<NotificationRule> {
    let hours: u32 = caps.name("hours")?.as_str().parse().ok()?;
    Some(
        NotificationRule::pattern(
            RuleType::Ppr,
            NotificationType::Hours,
            matched_text(caps),
            confidence.hours,
        )
        .with_hours(hours),
    )
}
