//! Extraction schema and prompt sent to the model, and decoding of its reply.

use serde_json::{json, Value};

use crate::types::{ExtractedRule, ExtractionRequest, ExtractionResponse};
use crate::{ModelError, Result};

/// JSON schema of one extracted rule.
pub fn rule_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "rule_type": { "type": "string", "enum": ["ppr", "customs", "immigration"] },
            "notification_type": {
                "type": "string",
                "enum": ["hours", "business_day", "on_request", "h24", "prohibited"]
            },
            "hours_notice": { "type": ["integer", "null"], "minimum": 0 },
            "weekday_start": { "type": ["integer", "null"], "minimum": 0, "maximum": 6 },
            "weekday_end": { "type": ["integer", "null"], "minimum": 0, "maximum": 6 },
            "includes_holidays": { "type": "boolean" },
            "business_day_offset": { "type": ["integer", "null"] },
            "specific_time": { "type": ["string", "null"], "pattern": "^[0-2][0-9][0-5][0-9]$" },
            "schengen_only": { "type": "boolean" },
            "non_schengen_only": { "type": "boolean" },
            "is_prohibited": { "type": "boolean" },
            "summary": { "type": "string" }
        },
        "required": ["rule_type", "notification_type", "summary"]
    })
}

/// JSON schema of the whole reply.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "rules": { "type": "array", "items": rule_schema() }
        },
        "required": ["rules"]
    })
}

/// System prompt describing the task and the reply schema.
pub fn system_prompt() -> String {
    format!(
        "You extract prior-notification requirements for customs and immigration \
         at airports from AIP text.\n\
         Return a JSON object matching this schema:\n{}\n\
         Rules:\n\
         - One rule per distinct requirement (per day range, per Schengen scope).\n\
         - weekday_start/weekday_end use 0=Monday..6=Sunday, end inclusive.\n\
         - \"last working day before 1500\" is business_day with business_day_offset=-1 \
           and specific_time=\"1500\".\n\
         - Set is_prohibited=true when the service is not available.\n\
         - Never set both schengen_only and non_schengen_only.\n\
         - Reply with JSON only.",
        response_schema()
    )
}

/// User message for one request.
pub fn user_prompt(request: &ExtractionRequest) -> String {
    format!("Airport: {}\nText:\n{}", request.icao, request.text)
}

/// Decode the model's reply text.
///
/// Accepts the schema object, a bare array of rules, and either of those
/// wrapped in a markdown code fence.
pub fn parse_reply(content: &str) -> Result<Vec<ExtractedRule>> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(ModelError::Malformed("empty reply".to_string()));
    }

    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(_) => {
            let response: ExtractionResponse = serde_json::from_value(value)?;
            Ok(response.rules)
        }
        other => Err(ModelError::Malformed(format!(
            "expected object or array, got {}",
            other
        ))),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
