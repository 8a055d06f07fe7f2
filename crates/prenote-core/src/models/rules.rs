//! Notification rule data model.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::weekday::DaySpan;

/// Administrative category of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Prior permission required.
    Ppr,
    /// Prior notice.
    Pn,
    Customs,
    Immigration,
    Handling,
}

impl RuleType {
    /// Map a model-provided category. Unknown values fall back to `Customs`.
    pub fn from_model(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ppr" => RuleType::Ppr,
            "pn" | "prior_notice" => RuleType::Pn,
            "customs" => RuleType::Customs,
            "immigration" => RuleType::Immigration,
            "handling" => RuleType::Handling,
            _ => RuleType::Customs,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Ppr => "ppr",
            RuleType::Pn => "pn",
            RuleType::Customs => "customs",
            RuleType::Immigration => "immigration",
            RuleType::Handling => "handling",
        }
    }
}

/// How the timing of a requirement is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// N hours in advance.
    Hours,
    /// By a given business day (and optionally a time) before the flight.
    BusinessDay,
    /// By a fixed time of day.
    SpecificTime,
    OnRequest,
    /// Available around the clock without notice.
    H24,
    /// Available during aerodrome operating hours.
    AsAdHours,
    NotAvailable,
    Unknown,
}

impl NotificationType {
    /// Map a notification type string, either from the model or from a
    /// persisted record. Unknown values map to `Unknown`.
    pub fn from_model(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "hours" => NotificationType::Hours,
            "business_day" => NotificationType::BusinessDay,
            "specific_time" => NotificationType::SpecificTime,
            "on_request" => NotificationType::OnRequest,
            "h24" => NotificationType::H24,
            "as_ad_hours" => NotificationType::AsAdHours,
            "not_available" | "prohibited" => NotificationType::NotAvailable,
            _ => NotificationType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Hours => "hours",
            NotificationType::BusinessDay => "business_day",
            NotificationType::SpecificTime => "specific_time",
            NotificationType::OnRequest => "on_request",
            NotificationType::H24 => "h24",
            NotificationType::AsAdHours => "as_ad_hours",
            NotificationType::NotAvailable => "not_available",
            NotificationType::Unknown => "unknown",
        }
    }
}

/// How a rule was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Pattern,
    Model,
}

/// A single notification requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRule {
    pub rule_type: RuleType,

    pub notification_type: NotificationType,

    /// Hours of advance notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_notice: Option<u32>,

    /// First day the rule applies to.
    #[serde(
        default,
        with = "weekday_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub weekday_start: Option<Weekday>,

    /// Last day the rule applies to (inclusive).
    #[serde(
        default,
        with = "weekday_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub weekday_end: Option<Weekday>,

    #[serde(default)]
    pub includes_holidays: bool,

    /// Working days before the flight; -1 is the last working day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_day_offset: Option<i32>,

    /// Cut-off time, four digits 24h (`"1500"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_time: Option<String>,

    /// Operating hours start, four digits 24h.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_start: Option<String>,

    /// Operating hours end, four digits 24h.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_end: Option<String>,

    #[serde(default = "default_obligatory")]
    pub is_obligatory: bool,

    #[serde(default)]
    pub schengen_only: bool,

    #[serde(default)]
    pub non_schengen_only: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,

    /// Text the rule was extracted from.
    pub raw_text: String,

    /// Extraction confidence (0.0 - 1.0).
    pub confidence: f64,

    pub extraction_method: ExtractionMethod,
}

fn default_obligatory() -> bool {
    true
}

impl NotificationRule {
    pub fn new(
        rule_type: RuleType,
        notification_type: NotificationType,
        raw_text: impl Into<String>,
        confidence: f64,
        extraction_method: ExtractionMethod,
    ) -> Self {
        Self {
            rule_type,
            notification_type,
            hours_notice: None,
            weekday_start: None,
            weekday_end: None,
            includes_holidays: false,
            business_day_offset: None,
            specific_time: None,
            hours_start: None,
            hours_end: None,
            is_obligatory: true,
            schengen_only: false,
            non_schengen_only: false,
            conditions: None,
            raw_text: raw_text.into(),
            confidence,
            extraction_method,
        }
    }

    /// Shorthand for a pattern-extracted rule.
    pub fn pattern(
        rule_type: RuleType,
        notification_type: NotificationType,
        raw_text: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self::new(
            rule_type,
            notification_type,
            raw_text,
            confidence,
            ExtractionMethod::Pattern,
        )
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours_notice = Some(hours);
        self
    }

    pub fn with_days(mut self, span: DaySpan) -> Self {
        self.weekday_start = Some(span.start);
        self.weekday_end = Some(span.end);
        self
    }

    pub fn with_holidays(mut self, includes_holidays: bool) -> Self {
        self.includes_holidays = includes_holidays;
        self
    }

    pub fn with_business_day(mut self, offset: i32, specific_time: Option<String>) -> Self {
        self.business_day_offset = Some(offset);
        self.specific_time = specific_time;
        self
    }

    pub fn with_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    /// Day span, when the rule is scoped to days.
    pub fn day_span(&self) -> Option<DaySpan> {
        match (self.weekday_start, self.weekday_end) {
            (Some(start), Some(end)) => Some(DaySpan::new(start, end)),
            (Some(start), None) => Some(DaySpan::single(start)),
            _ => None,
        }
    }

    /// Whether the rule already carries a Schengen scope.
    pub fn has_schengen_scope(&self) -> bool {
        self.schengen_only || self.non_schengen_only
    }

    /// Whether two rules state the same requirement, ignoring provenance.
    pub fn same_requirement(&self, other: &NotificationRule) -> bool {
        self.rule_type == other.rule_type
            && self.notification_type == other.notification_type
            && self.hours_notice == other.hours_notice
            && self.weekday_start == other.weekday_start
            && self.weekday_end == other.weekday_end
            && self.business_day_offset == other.business_day_offset
            && self.specific_time == other.specific_time
    }
}

/// All rules parsed from one airport's source field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedNotificationRules {
    pub icao: String,
    pub rules: Vec<NotificationRule>,
    pub raw_text: String,
    /// Opaque provenance of the text.
    pub source_field_id: i64,
    #[serde(default)]
    pub parse_warnings: Vec<String>,
}

impl ParsedNotificationRules {
    pub fn new(icao: impl Into<String>, raw_text: impl Into<String>, source_field_id: i64) -> Self {
        Self {
            icao: icao.into(),
            rules: Vec::new(),
            raw_text: raw_text.into(),
            source_field_id,
            parse_warnings: Vec::new(),
        }
    }

    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Any rule is H24.
    pub fn is_h24(&self) -> bool {
        self.rules
            .iter()
            .any(|r| r.notification_type == NotificationType::H24)
    }

    /// Every rule is on-request, and there is at least one.
    pub fn is_on_request(&self) -> bool {
        self.has_rules()
            && self
                .rules
                .iter()
                .all(|r| r.notification_type == NotificationType::OnRequest)
    }

    /// Largest hours notice over rules that state one.
    pub fn max_hours_notice(&self) -> Option<u32> {
        self.rules.iter().filter_map(|r| r.hours_notice).max()
    }
}

/// Serialize weekdays as 0 (Monday) .. 6 (Sunday).
mod weekday_index {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::weekday::{day_index, weekday_from_index};

    pub fn serialize<S: Serializer>(day: &Option<Weekday>, serializer: S) -> Result<S::Ok, S::Error> {
        match day {
            Some(day) => serializer.serialize_some(&day_index(*day)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Weekday>, D::Error> {
        let index: Option<u8> = Option::deserialize(deserializer)?;
        match index {
            None => Ok(None),
            Some(i) => weekday_from_index(i)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("weekday index {} out of range", i))),
        }
    }
}
