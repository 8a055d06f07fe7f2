//! Complexity indicators for deciding when pattern extraction is unreliable.

use std::collections::BTreeSet;
use std::fmt;

use super::rules::patterns::{
    CONDITIONAL, DAY_RANGE, DAY_TOKEN, OPERATING_HOURS, PROHIBITION, SCHENGEN, TIME_CUTOFF,
};
use crate::models::weekday::{day_index, parse_weekday};

/// Number of distinct indicators; the maximum complexity score.
pub const INDICATOR_COUNT: usize = 8;

/// A reason the text may defeat the quick extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComplexityIndicator {
    /// Three or more different weekdays are named.
    ManyDayReferences,
    /// Several day ranges, or four or more different weekdays.
    MultipleDayRanges,
    SchengenContext,
    Prohibition,
    /// "before/until/by HHMM".
    TimeCutoff,
    /// Opening, closing or operating hours language.
    OperatingHours,
    /// if / when / during / except / unless / provided.
    Conditional,
    LongText,
}

impl ComplexityIndicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityIndicator::ManyDayReferences => "many_day_references",
            ComplexityIndicator::MultipleDayRanges => "multiple_day_ranges",
            ComplexityIndicator::SchengenContext => "schengen_context",
            ComplexityIndicator::Prohibition => "prohibition",
            ComplexityIndicator::TimeCutoff => "time_cutoff",
            ComplexityIndicator::OperatingHours => "operating_hours",
            ComplexityIndicator::Conditional => "conditional_language",
            ComplexityIndicator::LongText => "long_text",
        }
    }
}

/// The set of indicators found in one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Complexity {
    pub indicators: BTreeSet<ComplexityIndicator>,
}

impl Complexity {
    /// Number of indicators present.
    pub fn score(&self) -> u32 {
        self.indicators.len() as u32
    }

    pub fn contains(&self, indicator: ComplexityIndicator) -> bool {
        self.indicators.contains(&indicator)
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indicators.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = self.indicators.iter().map(|i| i.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Distinct weekdays named in the text, as 0 (Mon) .. 6 (Sun).
pub fn distinct_days(text: &str) -> BTreeSet<u8> {
    DAY_TOKEN
        .find_iter(text)
        .filter_map(|m| parse_weekday(m.as_str()))
        .map(day_index)
        .collect()
}

/// Detects complexity indicators.
#[derive(Debug, Clone)]
pub struct ComplexityClassifier {
    text_length_threshold: usize,
}

impl ComplexityClassifier {
    pub fn new(text_length_threshold: usize) -> Self {
        Self {
            text_length_threshold,
        }
    }

    pub fn detect(&self, text: &str) -> Complexity {
        let mut indicators = BTreeSet::new();

        let days = distinct_days(text).len();
        if days >= 3 {
            indicators.insert(ComplexityIndicator::ManyDayReferences);
        }
        if DAY_RANGE.find_iter(text).count() >= 2 || days >= 4 {
            indicators.insert(ComplexityIndicator::MultipleDayRanges);
        }
        if SCHENGEN.is_match(text) {
            indicators.insert(ComplexityIndicator::SchengenContext);
        }
        if PROHIBITION.is_match(text) {
            indicators.insert(ComplexityIndicator::Prohibition);
        }
        if TIME_CUTOFF.is_match(text) {
            indicators.insert(ComplexityIndicator::TimeCutoff);
        }
        if OPERATING_HOURS.is_match(text) {
            indicators.insert(ComplexityIndicator::OperatingHours);
        }
        if CONDITIONAL.is_match(text) {
            indicators.insert(ComplexityIndicator::Conditional);
        }
        if text.chars().count() > self.text_length_threshold {
            indicators.insert(ComplexityIndicator::LongText);
        }

        Complexity { indicators }
    }
}

impl Default for ComplexityClassifier {
    fn default() -> Self {
        Self::new(300)
    }
}

/// Detect indicators with the default length threshold.
pub fn detect_complexity(text: &str) -> Complexity {
    ComplexityClassifier::default().detect(text)
}
