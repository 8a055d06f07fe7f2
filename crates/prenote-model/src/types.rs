//! Request and response shapes for model extraction.

use serde::{Deserialize, Serialize};

/// Input to a model extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Airport identifier (ICAO code).
    pub icao: String,
    /// Raw regulatory text.
    pub text: String,
}

impl ExtractionRequest {
    pub fn new(icao: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icao: icao.into(),
            text: text.into(),
        }
    }
}

/// One rule as returned by the model.
///
/// String-valued categories are kept as the model produced them; the parser
/// maps them onto its own enums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRule {
    /// `ppr`, `customs` or `immigration`.
    pub rule_type: String,

    /// `hours`, `business_day`, `on_request`, `h24` or `prohibited`.
    pub notification_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_notice: Option<u32>,

    /// 0 = Monday .. 6 = Sunday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_start: Option<u8>,

    /// Inclusive end of the weekday range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_end: Option<u8>,

    pub includes_holidays: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_day_offset: Option<i32>,

    /// 24h time as four digits, e.g. `"1500"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_time: Option<String>,

    pub schengen_only: bool,
    pub non_schengen_only: bool,
    pub is_prohibited: bool,

    /// Short natural-language description of the rule.
    pub summary: String,
}

/// Top-level JSON object the model is asked to produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub rules: Vec<ExtractedRule>,
}
