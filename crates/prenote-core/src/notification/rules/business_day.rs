//! Business-day deadlines: `PPR last working day before 1500`.

use regex::Captures;

use super::matched_text;
use crate::models::config::ConfidenceConfig;
use crate::models::rules::{NotificationRule, NotificationType, RuleType};

/// Offset meaning "the last working day before the flight".
pub const LAST_BUSINESS_DAY: i32 = -1;

pub fn business_day_rule(caps: &Captures, confidence: &ConfidenceConfig) -> Option<NotificationRule> {
    let specific_time = caps
        .name("time")
        .map(|m| m.as_str().to_string())
        .filter(|t| is_clock_time(t));

    Some(
        NotificationRule::pattern(
            RuleType::Ppr,
            NotificationType::BusinessDay,
            matched_text(caps),
            confidence.business_day,
        )
        .with_business_day(LAST_BUSINESS_DAY, specific_time),
    )
}

/// `HHMM` with a valid hour and minute.
pub fn is_clock_time(value: &str) -> bool {
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let hours: u32 = value[..2].parse().unwrap_or(99);
    let minutes: u32 = value[2..].parse().unwrap_or(99);
    (hours < 24 && minutes < 60) || value == "2400"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::rules::patterns::BUSINESS_DAY;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_last_working_day_with_time() {
        let caps = BUSINESS_DAY
            .captures("PPR: last working day before 1500")
            .unwrap();
        let rule = business_day_rule(&caps, &ConfidenceConfig::default()).unwrap();
        assert_eq!(rule.notification_type, NotificationType::BusinessDay);
        assert_eq!(rule.business_day_offset, Some(-1));
        assert_eq!(rule.specific_time.as_deref(), Some("1500"));
        assert_eq!(rule.confidence, 0.75);
    }

    #[test]
    fn test_business_day_without_time() {
        let caps = BUSINESS_DAY.captures("PN one business day ahead").unwrap();
        let rule = business_day_rule(&caps, &ConfidenceConfig::default()).unwrap();
        assert_eq!(rule.specific_time, None);
        assert_eq!(rule.business_day_offset, Some(-1));
    }

    #[test]
    fn test_clock_time() {
        assert!(is_clock_time("0000"));
        assert!(is_clock_time("1530"));
        assert!(!is_clock_time("2561"));
        assert!(!is_clock_time("930"));
    }
}
