//! Condensing a parse result into the simplified persisted record.

use std::collections::BTreeMap;

use crate::models::hassle::HassleScore;
use crate::models::info::NotificationRecord;
use crate::models::rules::{NotificationType, ParsedNotificationRules};

/// Build the record that [`NotificationInfo`](crate::models::info::NotificationInfo)
/// queries at read time.
pub fn condense(parsed: &ParsedNotificationRules, score: &HassleScore) -> NotificationRecord {
    let rules = &parsed.rules;

    let notification_type = if parsed.is_h24() {
        NotificationType::H24
    } else if parsed.is_on_request() {
        NotificationType::OnRequest
    } else {
        rules
            .iter()
            .filter(|r| r.notification_type != NotificationType::OnRequest)
            .max_by_key(|r| r.hours_notice)
            .map(|r| r.notification_type)
            .unwrap_or(NotificationType::Unknown)
    };

    let mut weekday_rules = BTreeMap::new();
    for rule in rules {
        if let (Some(span), Some(hours)) = (rule.day_span(), rule.hours_notice) {
            weekday_rules
                .entry(span.label())
                .or_insert_with(|| format!("{} {}h", rule.rule_type.as_str().to_uppercase(), hours));
        }
    }

    let confidence = if rules.is_empty() {
        0.0
    } else {
        rules.iter().map(|r| r.confidence).sum::<f64>() / rules.len() as f64
    };

    NotificationRecord {
        icao: parsed.icao.clone(),
        notification_type: notification_type.as_str().to_string(),
        hours_notice: parsed.max_hours_notice(),
        weekday_rules: (!weekday_rules.is_empty()).then_some(weekday_rules),
        summary: score.summary.clone(),
        confidence,
        rule_type: rules
            .first()
            .map(|r| r.rule_type.as_str().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::info::NotificationInfo;
    use crate::models::rules::{NotificationRule, RuleType};
    use crate::models::weekday::DaySpan;
    use crate::scoring::score_hassle;
    use pretty_assertions::assert_eq;

    fn hours(h: u32) -> NotificationRule {
        NotificationRule::pattern(RuleType::Ppr, NotificationType::Hours, "", 0.8).with_hours(h)
    }

    fn record(rules: Vec<NotificationRule>) -> NotificationRecord {
        let mut parsed = ParsedNotificationRules::new("EDDF", "text", 1);
        parsed.rules = rules;
        condense(&parsed, &score_hassle(&parsed))
    }

    #[test]
    fn test_weekday_rules_map() {
        let record = record(vec![
            hours(24).with_days(DaySpan::WEEKDAYS),
            hours(48).with_days(DaySpan::WEEKEND),
        ]);
        assert_eq!(record.notification_type, "hours");
        assert_eq!(record.hours_notice, Some(48));
        assert_eq!(record.rule_type, "ppr");

        let info = NotificationInfo::from(record);
        assert_eq!(info.get_notice_for_day("wednesday"), Some(24));
        assert_eq!(info.get_notice_for_day("SUN"), Some(48));
    }

    #[test]
    fn test_easiness_mirrors_hassle() {
        for (h, easiness, hassle) in [(24, 60, 0.4), (48, 40, 0.6)] {
            let mut parsed = ParsedNotificationRules::new("EDDF", "text", 1);
            parsed.rules = vec![hours(h)];
            let score = score_hassle(&parsed);
            let info = NotificationInfo::from(condense(&parsed, &score));
            assert_eq!(info.get_easiness_score(), easiness);
            assert_eq!(score.score, hassle);
        }
    }

    #[test]
    fn test_markers_and_empty() {
        let h24 = NotificationRule::pattern(RuleType::Customs, NotificationType::H24, "H24", 0.95);
        let h24_record = record(vec![h24]);
        assert_eq!(h24_record.notification_type, "h24");
        assert_eq!(h24_record.weekday_rules, None);

        let empty = record(vec![]);
        assert_eq!(empty.notification_type, "unknown");
        assert_eq!(empty.confidence, 0.0);
        assert_eq!(empty.rule_type, "");
    }
}
