//! Availability markers: H24, on request, as aerodrome hours.

use regex::Captures;

use super::matched_text;
use crate::models::config::ConfidenceConfig;
use crate::models::rules::{NotificationRule, NotificationType, RuleType};

pub fn h24_rule(caps: &Captures, confidence: &ConfidenceConfig) -> Option<NotificationRule> {
    Some(NotificationRule::pattern(
        RuleType::Customs,
        NotificationType::H24,
        matched_text(caps),
        confidence.h24,
    ))
}

pub fn on_request_rule(caps: &Captures, confidence: &ConfidenceConfig) -> Option<NotificationRule> {
    Some(NotificationRule::pattern(
        RuleType::Customs,
        NotificationType::OnRequest,
        matched_text(caps),
        confidence.on_request,
    ))
}

pub fn as_ad_hours_rule(caps: &Captures, confidence: &ConfidenceConfig) -> Option<NotificationRule> {
    Some(NotificationRule::pattern(
        RuleType::Customs,
        NotificationType::AsAdHours,
        matched_text(caps),
        confidence.as_ad_hours,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::rules::patterns::{AS_AD_HOURS, H24_MARKER, ON_REQUEST};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_h24_rule() {
        let caps = H24_MARKER.captures("Customs: H24").unwrap();
        let rule = h24_rule(&caps, &ConfidenceConfig::default()).unwrap();
        assert_eq!(rule.notification_type, NotificationType::H24);
        assert_eq!(rule.confidence, 0.95);
        assert_eq!(rule.raw_text, "H24");
    }

    #[test]
    fn test_on_request_rule() {
        let caps = ON_REQUEST.captures("Available on request").unwrap();
        let rule = on_request_rule(&caps, &ConfidenceConfig::default()).unwrap();
        assert_eq!(rule.notification_type, NotificationType::OnRequest);
        assert_eq!(rule.hours_notice, None);
    }

    #[test]
    fn test_as_ad_hours_rule() {
        let caps = AS_AD_HOURS.captures("CUST/IMG: AS AD HR").unwrap();
        let rule = as_ad_hours_rule(&caps, &ConfidenceConfig::default()).unwrap();
        assert_eq!(rule.notification_type, NotificationType::AsAdHours);
        assert_eq!(rule.confidence, 0.90);
    }
}
