//! Hassle scoring of parse results.

use chrono::Weekday;

use crate::models::hassle::{HassleLevel, HassleScore};
use crate::models::rules::{NotificationRule, NotificationType, ParsedNotificationRules, RuleType};

/// Added when a rule is Saturday-anchored or covers holidays.
const WEEKEND_BONUS: f64 = 0.10;

/// Hours breakpoints and the level/score they map to.
const HOURS_TABLE: [(u32, HassleLevel, f64); 6] = [
    (2, HassleLevel::Low, 0.15),
    (12, HassleLevel::Low, 0.25),
    (24, HassleLevel::Moderate, 0.4),
    (48, HassleLevel::High, 0.6),
    (72, HassleLevel::High, 0.75),
    (u32::MAX, HassleLevel::VeryHigh, 0.9),
];

/// Maps parse results to hassle scores.
#[derive(Debug, Clone, Default)]
pub struct HassleScorer;

impl HassleScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, parsed: &ParsedNotificationRules) -> HassleScore {
        let rules = &parsed.rules;
        let (level, score) = level_and_score(parsed);

        HassleScore {
            icao: parsed.icao.clone(),
            level,
            score: round2(score),
            summary: summarize(parsed),
            max_hours_notice: parsed.max_hours_notice(),
            has_weekend_rules: rules.iter().any(covers_weekend),
            has_schengen_rules: rules.iter().any(|r| r.has_schengen_scope()),
        }
    }
}

/// Score with the default scorer.
pub fn score_hassle(parsed: &ParsedNotificationRules) -> HassleScore {
    HassleScorer::new().score(parsed)
}

fn level_and_score(parsed: &ParsedNotificationRules) -> (HassleLevel, f64) {
    if !parsed.has_rules() {
        return (HassleLevel::Moderate, 0.5);
    }
    if parsed.is_h24() {
        return (HassleLevel::None, 0.0);
    }
    if parsed.is_on_request() {
        return (HassleLevel::Low, 0.2);
    }
    if parsed
        .rules
        .iter()
        .all(|r| r.notification_type == NotificationType::AsAdHours)
    {
        return (HassleLevel::Low, 0.15);
    }

    let (level, score) = match parsed.max_hours_notice() {
        None => (HassleLevel::High, 0.7),
        Some(hours) => HOURS_TABLE
            .iter()
            .find(|(limit, _, _)| hours <= *limit)
            .map(|(_, level, score)| (*level, *score))
            .unwrap_or((HassleLevel::VeryHigh, 0.9)),
    };

    let weekend = parsed
        .rules
        .iter()
        .any(|r| r.weekday_start == Some(Weekday::Sat) || r.includes_holidays);
    if weekend {
        (level, (score + WEEKEND_BONUS).min(1.0))
    } else {
        (level, score)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn covers_weekend(rule: &NotificationRule) -> bool {
    rule.day_span()
        .is_some_and(|span| span.contains(Weekday::Sat) || span.contains(Weekday::Sun))
}

/// Human-readable summary, derived from the rules only.
pub fn summarize(parsed: &ParsedNotificationRules) -> String {
    if !parsed.has_rules() {
        return "Unable to parse notification requirements - assuming moderate".to_string();
    }
    if parsed.is_h24() {
        return "H24 - no prior notice required".to_string();
    }
    if parsed.is_on_request() {
        return "On request".to_string();
    }

    let mut clauses: Vec<String> = Vec::new();
    for clause in parsed.rules.iter().map(describe_rule) {
        if !clauses.contains(&clause) {
            clauses.push(clause);
        }
    }
    clauses.join("; ")
}

fn rule_label(rule_type: RuleType) -> &'static str {
    match rule_type {
        RuleType::Ppr => "PPR",
        RuleType::Pn => "PN",
        RuleType::Customs => "Customs",
        RuleType::Immigration => "Immigration",
        RuleType::Handling => "Handling",
    }
}

/// One clause such as `Sat-Sun+HOL: PPR 48h (non-Schengen)`.
fn describe_rule(rule: &NotificationRule) -> String {
    let label = rule_label(rule.rule_type);
    let body = match rule.notification_type {
        NotificationType::H24 => "H24".to_string(),
        NotificationType::OnRequest => "On request".to_string(),
        NotificationType::AsAdHours => "As AD hours".to_string(),
        NotificationType::NotAvailable => format!("{} not available", label),
        NotificationType::Hours => match rule.hours_notice {
            Some(hours) => format!("{} {}h", label, hours),
            None => label.to_string(),
        },
        NotificationType::BusinessDay => {
            let day = match rule.business_day_offset {
                Some(-1) | None => "last working day".to_string(),
                Some(offset) => format!("{} working day(s)", offset.unsigned_abs()),
            };
            match &rule.specific_time {
                Some(time) => format!("{} by {} before {}", label, day, time),
                None => format!("{} by {}", label, day),
            }
        }
        NotificationType::SpecificTime => match &rule.specific_time {
            Some(time) => format!("{} before {}", label, time),
            None => label.to_string(),
        },
        NotificationType::Unknown => format!("{} (unspecified)", label),
    };

    let mut clause = match rule.day_span() {
        Some(span) if rule.includes_holidays => format!("{}+HOL: {}", span.label(), body),
        Some(span) => format!("{}: {}", span.label(), body),
        None if rule.includes_holidays => format!("HOL: {}", body),
        None => body,
    };

    if rule.schengen_only {
        clause.push_str(" (Schengen)");
    } else if rule.non_schengen_only {
        clause.push_str(" (non-Schengen)");
    }
    clause
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weekday::DaySpan;
    use pretty_assertions::assert_eq;

    fn parsed(rules: Vec<NotificationRule>) -> ParsedNotificationRules {
        let mut parsed = ParsedNotificationRules::new("EDDF", "text", 1);
        parsed.rules = rules;
        parsed
    }

    fn marker(notification_type: NotificationType) -> NotificationRule {
        NotificationRule::pattern(RuleType::Customs, notification_type, "", 0.9)
    }

    fn hours(h: u32) -> NotificationRule {
        NotificationRule::pattern(RuleType::Ppr, NotificationType::Hours, "", 0.8).with_hours(h)
    }

    #[test]
    fn test_no_rules() {
        let score = score_hassle(&parsed(vec![]));
        assert_eq!(score.level, HassleLevel::Moderate);
        assert_eq!(score.score, 0.5);
        assert!(score.summary.starts_with("Unable to parse"));
    }

    #[test]
    fn test_markers() {
        let score = score_hassle(&parsed(vec![marker(NotificationType::H24)]));
        assert_eq!((score.level, score.score), (HassleLevel::None, 0.0));

        let score = score_hassle(&parsed(vec![marker(NotificationType::OnRequest)]));
        assert_eq!((score.level, score.score), (HassleLevel::Low, 0.2));
        assert_eq!(score.summary, "On request");

        let score = score_hassle(&parsed(vec![marker(NotificationType::AsAdHours)]));
        assert_eq!((score.level, score.score), (HassleLevel::Low, 0.15));
    }

    #[test]
    fn test_h24_wins_over_hours() {
        let score = score_hassle(&parsed(vec![marker(NotificationType::H24), hours(72)]));
        assert_eq!(score.level, HassleLevel::None);
        assert_eq!(score.max_hours_notice, Some(72));
    }

    #[test]
    fn test_hours_breakpoints() {
        let cases = [
            (2, HassleLevel::Low, 0.15),
            (12, HassleLevel::Low, 0.25),
            (24, HassleLevel::Moderate, 0.4),
            (48, HassleLevel::High, 0.6),
            (72, HassleLevel::High, 0.75),
            (96, HassleLevel::VeryHigh, 0.9),
        ];
        for (h, level, expected) in cases {
            let score = score_hassle(&parsed(vec![hours(h)]));
            assert_eq!((score.level, score.score), (level, expected), "{}h", h);
        }
    }

    #[test]
    fn test_unknown_hours_is_high() {
        let rule = NotificationRule::pattern(RuleType::Ppr, NotificationType::BusinessDay, "", 0.75)
            .with_business_day(-1, Some("1500".to_string()));
        let score = score_hassle(&parsed(vec![rule]));
        assert_eq!((score.level, score.score), (HassleLevel::High, 0.7));
        assert_eq!(score.summary, "PPR by last working day before 1500");
    }

    #[test]
    fn test_weekend_bonus() {
        let weekend = hours(48).with_days(DaySpan::WEEKEND);
        let score = score_hassle(&parsed(vec![weekend]));
        assert_eq!(score.level, HassleLevel::High);
        assert_eq!(score.score, 0.7);
        assert!(score.has_weekend_rules);

        let holidays = hours(96).with_holidays(true);
        let score = score_hassle(&parsed(vec![holidays]));
        assert_eq!((score.level, score.score), (HassleLevel::VeryHigh, 1.0));
    }

    #[test]
    fn test_sunday_only_has_no_bonus() {
        let sunday = hours(24).with_days(DaySpan::single(Weekday::Sun));
        let score = score_hassle(&parsed(vec![sunday]));
        assert_eq!(score.score, 0.4);
        assert!(score.has_weekend_rules);
    }

    #[test]
    fn test_monotonic_in_hours() {
        let mut last = 0.0;
        for h in [0, 1, 2, 3, 11, 12, 13, 24, 25, 47, 48, 49, 72, 73, 500] {
            let score = score_hassle(&parsed(vec![hours(h)])).score;
            assert!(score >= last, "{}h scored {} after {}", h, score, last);
            last = score;
        }
    }

    #[test]
    fn test_summary_clauses() {
        let mut scoped = hours(24).with_days(DaySpan::WEEKDAYS);
        scoped.non_schengen_only = true;
        let rules = vec![
            scoped.clone(),
            scoped,
            hours(48).with_days(DaySpan::WEEKEND).with_holidays(true),
        ];
        let score = score_hassle(&parsed(rules));
        assert_eq!(
            score.summary,
            "Mon-Fri: PPR 24h (non-Schengen); Sat-Sun+HOL: PPR 48h"
        );
        assert!(score.has_schengen_rules);
    }
}
