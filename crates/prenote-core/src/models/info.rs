//! Query-time view over a persisted, already-summarized notification record.
//!
//! This works on the simplified record the persistence layer stores, not on
//! [`NotificationRule`](super::rules::NotificationRule)s.

use std::collections::BTreeMap;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::rules::NotificationType;
use super::weekday::resolve_day_span;

lazy_static! {
    /// Trailing "N h" / "N HR" / "N hours" in a per-day rule value.
    static ref TRAILING_HOURS: Regex = Regex::new(
        r"(?i)(\d{1,3})\s*(?:h|hr|hrs|hours?)\s*\.?\s*$"
    ).unwrap();
}

/// Simplified notification record as persisted for one airport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationRecord {
    pub icao: String,
    pub notification_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_notice: Option<u32>,
    /// Day expression (`Mon-Fri`, `weekend`, `SAT`) to rule text (`PPR 24 h`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_rules: Option<BTreeMap<String, String>>,
    pub summary: String,
    pub confidence: f64,
    pub rule_type: String,
}

/// Read-only query wrapper around a [`NotificationRecord`].
#[derive(Debug, Clone)]
pub struct NotificationInfo {
    record: NotificationRecord,
    notification_type: NotificationType,
}

impl From<NotificationRecord> for NotificationInfo {
    fn from(record: NotificationRecord) -> Self {
        Self::new(record)
    }
}

impl NotificationInfo {
    pub fn new(record: NotificationRecord) -> Self {
        let notification_type = NotificationType::from_model(&record.notification_type);
        Self {
            record,
            notification_type,
        }
    }

    pub fn record(&self) -> &NotificationRecord {
        &self.record
    }

    pub fn icao(&self) -> &str {
        &self.record.icao
    }

    pub fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    pub fn is_h24(&self) -> bool {
        self.notification_type == NotificationType::H24
    }

    pub fn is_on_request(&self) -> bool {
        self.notification_type == NotificationType::OnRequest
    }

    /// Hours of notice that apply on `day` (`"sat"`, `"Monday"`, `"weekend"`).
    ///
    /// The first per-day rule whose day expression covers the day wins;
    /// otherwise the record's scalar notice is returned.
    pub fn get_notice_for_day(&self, day: &str) -> Option<u32> {
        let target = resolve_day_span(day).map(|span| span.start);

        if let (Some(target), Some(rules)) = (target, &self.record.weekday_rules) {
            let hit = rules.iter().find_map(|(days, rule)| {
                resolve_day_span(days)
                    .filter(|span| span.contains(target))
                    .and_then(|_| trailing_hours(rule))
            });
            if hit.is_some() {
                return hit;
            }
        }

        self.record.hours_notice
    }

    /// Largest notice stated anywhere on the record.
    pub fn get_max_notice_hours(&self) -> Option<u32> {
        let from_days = self
            .record
            .weekday_rules
            .iter()
            .flat_map(|rules| rules.values())
            .filter_map(|rule| trailing_hours(rule))
            .max();

        match (self.record.hours_notice, from_days) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Ease of access, 0 (impossible) to 100 (no notice).
    pub fn get_easiness_score(&self) -> u32 {
        match self.notification_type {
            NotificationType::H24 => return 100,
            NotificationType::NotAvailable => return 0,
            NotificationType::OnRequest => return 70,
            NotificationType::BusinessDay => return 55,
            _ => {}
        }

        match self.get_max_notice_hours() {
            None if self.notification_type == NotificationType::Hours => 85,
            None => 50,
            Some(0) => 100,
            Some(h) if h <= 2 => 90,
            Some(h) if h <= 12 => 80,
            Some(h) if h <= 24 => 60,
            Some(h) if h <= 48 => 40,
            Some(h) if h <= 72 => 20,
            Some(_) => 10,
        }
    }

    /// Filter predicate. Each criterion is optional and applied independently.
    ///
    /// H24 and on-request records always satisfy an hours ceiling; any other
    /// record with unknown notice does not.
    pub fn matches_criteria(
        &self,
        max_hours_notice: Option<u32>,
        notification_type: Option<&str>,
        min_easiness_score: Option<u32>,
    ) -> bool {
        if let Some(ceiling) = max_hours_notice {
            let within = self.is_h24()
                || self.is_on_request()
                || self.get_max_notice_hours().is_some_and(|h| h <= ceiling);
            if !within {
                return false;
            }
        }

        if let Some(wanted) = notification_type {
            if NotificationType::from_model(wanted) != self.notification_type {
                return false;
            }
        }

        if let Some(floor) = min_easiness_score {
            if self.get_easiness_score() < floor {
                return false;
            }
        }

        true
    }
}

/// Load persisted records from a JSON array file.
pub fn load_records(path: &Path) -> crate::Result<Vec<NotificationRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn trailing_hours(rule: &str) -> Option<u32> {
    TRAILING_HOURS
        .captures(rule.trim())
        .and_then(|caps| caps[1].parse().ok())
}
