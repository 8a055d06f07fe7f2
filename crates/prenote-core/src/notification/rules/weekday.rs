//! Day-scoped hours: `MON-FRI: PPR 24 HR`, `SAT, SUN and HOL: PPR 48 HR`.

use regex::Captures;

use super::matched_text;
use super::patterns::HOLIDAY_TOKEN;
use crate::models::config::ConfidenceConfig;
use crate::models::rules::{NotificationRule, NotificationType, RuleType};
use crate::models::weekday::resolve_day_span;

pub fn weekday_hours_rule(caps: &Captures, confidence: &ConfidenceConfig) -> Option<NotificationRule> {
    let span = resolve_day_span(caps.name("days")?.as_str())?;
    let hours: u32 = caps.name("hours")?.as_str().parse().ok()?;

    let raw = matched_text(caps);
    // Either the day clause carries a holiday suffix or HOL appears anywhere
    // in the matched clause.
    let includes_holidays = caps.name("hol").is_some() || HOLIDAY_TOKEN.is_match(&raw);

    Some(
        NotificationRule::pattern(RuleType::Ppr, NotificationType::Hours, raw, confidence.weekday)
            .with_hours(hours)
            .with_days(span)
            .with_holidays(includes_holidays),
    )
}
