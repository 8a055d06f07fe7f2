//! Rule-based extractors for notification text.
//!
//! The quick extractor walks [`QUICK_PATTERNS`] in order. Each entry pairs a
//! regex with the constructor that turns a match into a rule, so the
//! priority of the cascade is the order of this table.

pub mod availability;
pub mod business_day;
pub mod hours;
pub mod patterns;
pub mod weekday;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::models::config::ConfidenceConfig;
use crate::models::rules::NotificationRule;

/// Which detection produced a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    H24,
    OnRequest,
    AsAdHours,
    WeekdayHours,
    Hours,
    BusinessDay,
}

/// How a pattern takes part in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A marker that settles simple text on its own and stops the cascade.
    Simple {
        /// Text at least this long (chars) counts as complex.
        complexity_limit: usize,
        /// Only applies when the text states no numeric hours.
        requires_no_hours: bool,
        /// Still emit the rule when the text is complex.
        emit_when_complex: bool,
    },
    /// Emits one rule per match and keeps going.
    Compound {
        /// Skip when this kind already produced a rule.
        suppressed_by: Option<PatternKind>,
    },
}

/// Builds a rule from a match.
pub type RuleBuilder = fn(&Captures, &ConfidenceConfig) -> Option<NotificationRule>;

/// One entry of the pattern table.
pub struct QuickPattern {
    pub kind: PatternKind,
    pub regex: &'static Regex,
    pub stage: Stage,
    pub build: RuleBuilder,
}

lazy_static! {
    /// Detections in priority order.
    pub static ref QUICK_PATTERNS: Vec<QuickPattern> = vec![
        QuickPattern {
            kind: PatternKind::H24,
            regex: &patterns::H24_MARKER,
            stage: Stage::Simple {
                complexity_limit: 100,
                requires_no_hours: false,
                emit_when_complex: true,
            },
            build: availability::h24_rule,
        },
        QuickPattern {
            kind: PatternKind::OnRequest,
            regex: &patterns::ON_REQUEST,
            stage: Stage::Simple {
                complexity_limit: 200,
                requires_no_hours: true,
                emit_when_complex: false,
            },
            build: availability::on_request_rule,
        },
        QuickPattern {
            kind: PatternKind::AsAdHours,
            regex: &patterns::AS_AD_HOURS,
            stage: Stage::Simple {
                complexity_limit: 200,
                requires_no_hours: true,
                emit_when_complex: false,
            },
            build: availability::as_ad_hours_rule,
        },
        QuickPattern {
            kind: PatternKind::WeekdayHours,
            regex: &patterns::WEEKDAY_HOURS,
            stage: Stage::Compound { suppressed_by: None },
            build: weekday::weekday_hours_rule,
        },
        QuickPattern {
            kind: PatternKind::Hours,
            regex: &patterns::HOURS_NOTICE,
            stage: Stage::Compound {
                suppressed_by: Some(PatternKind::WeekdayHours),
            },
            build: hours::hours_rule,
        },
        QuickPattern {
            kind: PatternKind::BusinessDay,
            regex: &patterns::BUSINESS_DAY,
            stage: Stage::Compound { suppressed_by: None },
            build: business_day::business_day_rule,
        },
    ];
}

/// Matched text of a capture, trimmed.
pub(crate) fn matched_text(caps: &Captures) -> String {
    caps.get(0)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
