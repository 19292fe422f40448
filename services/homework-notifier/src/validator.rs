//! Shape checks for homework API payloads
//!
//! The API payload is loosely typed, so every payload passes through here before
//! anything else touches it. Anomalies become one of a small set of errors.

use serde_json::Value;

use crate::error::HomeworkBotError;

/// Extract the `homeworks` list from a payload, most recent first
pub fn validate(payload: &Value) -> crate::Result<Vec<Value>> {
    tracing::debug!("Validating homework API response");

    let map = payload.as_object().ok_or_else(|| {
        HomeworkBotError::InvalidShape(format!(
            "expected a JSON object, got {}",
            kind_of(payload)
        ))
    })?;

    let homeworks = map
        .get("homeworks")
        .ok_or_else(|| HomeworkBotError::MissingField("homeworks".to_string()))?;

    match homeworks {
        Value::Array(records) => Ok(records.clone()),
        other => Err(HomeworkBotError::InvalidShape(format!(
            "`homeworks` must be an array, got {}",
            kind_of(other)
        ))),
    }
}

/// Server-side timestamp of the response, if present and integral
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get("current_date").and_then(Value::as_i64)
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
