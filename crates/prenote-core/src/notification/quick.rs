//! Deterministic pattern extraction, the cheap first step of the waterfall.

use std::collections::HashSet;

use tracing::debug;

use super::complexity::distinct_days;
use super::context::apply_schengen_context;
use super::rules::patterns::{HOURS_NOTICE, PROHIBITION, SCHENGEN};
use super::rules::{PatternKind, Stage, QUICK_PATTERNS};
use crate::models::config::ConfidenceConfig;
use crate::models::rules::NotificationRule;

/// Texts at least this long (chars) are never complete.
const COMPLETE_MAX_LEN: usize = 150;

/// More rules than this are never complete.
const COMPLETE_MAX_RULES: usize = 2;

/// Result of the quick pass.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickExtraction {
    pub rules: Vec<NotificationRule>,
    /// Mean rule confidence, 0 when nothing matched.
    pub confidence: f64,
    pub is_complete: bool,
}

impl QuickExtraction {
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            confidence: 0.0,
            is_complete: false,
        }
    }
}

/// Cheap checks that mark text as complex for the simple stages.
struct PreChecks {
    len: usize,
    many_days: bool,
    schengen: bool,
    prohibition: bool,
}

impl PreChecks {
    fn new(text: &str) -> Self {
        Self {
            len: text.chars().count(),
            many_days: distinct_days(text).len() >= 3,
            schengen: SCHENGEN.is_match(text),
            prohibition: PROHIBITION.is_match(text),
        }
    }

    fn is_complex(&self, length_limit: usize) -> bool {
        self.len >= length_limit || self.many_days || self.schengen || self.prohibition
    }
}

/// Runs the pattern table over a text.
#[derive(Debug, Clone, Default)]
pub struct QuickExtractor {
    confidence: ConfidenceConfig,
}

impl QuickExtractor {
    pub fn new(confidence: ConfidenceConfig) -> Self {
        Self { confidence }
    }

    pub fn extract(&self, text: &str) -> QuickExtraction {
        let text = text.trim();
        if text.is_empty() {
            return QuickExtraction::empty();
        }

        let checks = PreChecks::new(text);
        let has_hours = HOURS_NOTICE.is_match(text);

        let mut rules: Vec<NotificationRule> = Vec::new();
        let mut produced: HashSet<PatternKind> = HashSet::new();
        // A marker kept in complex text never settles it.
        let mut marker_in_complex_text = false;

        for pattern in QUICK_PATTERNS.iter() {
            match pattern.stage {
                Stage::Simple {
                    complexity_limit,
                    requires_no_hours,
                    emit_when_complex,
                } => {
                    if requires_no_hours && has_hours {
                        continue;
                    }
                    let Some(caps) = pattern.regex.captures(text) else {
                        continue;
                    };
                    let complex = checks.is_complex(complexity_limit);
                    if complex && !emit_when_complex {
                        debug!("{:?} marker ignored in complex text", pattern.kind);
                        continue;
                    }
                    if let Some(rule) = (pattern.build)(&caps, &self.confidence) {
                        rules.push(rule);
                        produced.insert(pattern.kind);
                        marker_in_complex_text |= complex;
                    }
                    if !complex {
                        debug!("{:?} settles simple text", pattern.kind);
                        break;
                    }
                }
                Stage::Compound { suppressed_by } => {
                    if suppressed_by.is_some_and(|kind| produced.contains(&kind)) {
                        continue;
                    }
                    for caps in pattern.regex.captures_iter(text) {
                        let Some(rule) = (pattern.build)(&caps, &self.confidence) else {
                            continue;
                        };
                        if rules.iter().any(|r| r.same_requirement(&rule)) {
                            continue;
                        }
                        rules.push(rule);
                        produced.insert(pattern.kind);
                    }
                }
            }
        }

        let rules = apply_schengen_context(rules, text);

        let confidence = if rules.is_empty() {
            0.0
        } else {
            rules.iter().map(|r| r.confidence).sum::<f64>() / rules.len() as f64
        };
        let is_complete = !marker_in_complex_text
            && checks.len < COMPLETE_MAX_LEN
            && rules.len() <= COMPLETE_MAX_RULES;

        debug!(
            "Quick extraction: {} rule(s), confidence {:.2}, complete {}",
            rules.len(),
            confidence,
            is_complete
        );

        QuickExtraction {
            rules,
            confidence,
            is_complete,
        }
    }
}

/// Quick extraction with default confidences.
pub fn extract_quick(text: &str) -> QuickExtraction {
    QuickExtractor::default().extract(text)
}
