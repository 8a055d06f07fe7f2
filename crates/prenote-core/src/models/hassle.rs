//! Hassle score produced from a parse result.

use serde::{Deserialize, Serialize};

/// Categorical burden of an airport's notification requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HassleLevel {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
    NotAvailable,
}

impl HassleLevel {
    pub fn label(&self) -> &'static str {
        match self {
            HassleLevel::None => "None",
            HassleLevel::Low => "Low",
            HassleLevel::Moderate => "Moderate",
            HassleLevel::High => "High",
            HassleLevel::VeryHigh => "Very high",
            HassleLevel::NotAvailable => "Not available",
        }
    }
}

/// Normalized hassle of one airport, built once from a parse result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HassleScore {
    pub icao: String,
    pub level: HassleLevel,
    /// 0.0 = no hassle, 1.0 = maximum.
    pub score: f64,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hours_notice: Option<u32>,
    pub has_weekend_rules: bool,
    pub has_schengen_rules: bool,
}
