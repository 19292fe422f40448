//! Renders the notification text for the most recent homework record

use serde_json::Value;

use crate::error::HomeworkBotError;
use crate::status::HomeworkStatus;
use crate::validator::kind_of;

/// Render the message for the newest record, or `None` when nothing changed
pub fn extract(records: &[Value]) -> crate::Result<Option<String>> {
    match records.first() {
        Some(latest) => parse_status(latest).map(Some),
        None => {
            tracing::debug!("No new homework statuses");
            Ok(None)
        }
    }
}

/// Build the status-change message for a single homework record
pub fn parse_status(record: &Value) -> crate::Result<String> {
    let record = record.as_object().ok_or_else(|| {
        HomeworkBotError::InvalidShape(format!(
            "homework record must be an object, got {}",
            kind_of(record)
        ))
    })?;

    let homework_name = string_field(record, "homework_name")?;
    let status: HomeworkStatus = string_field(record, "status")?.parse()?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework_name,
        status.verdict()
    ))
}

fn string_field<'a>(
    record: &'a serde_json::Map<String, Value>,
    name: &str,
) -> crate::Result<&'a str> {
    match record.get(name) {
        None => Err(HomeworkBotError::MissingField(name.to_string())),
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(HomeworkBotError::InvalidShape(format!(
            "`{}` must be a string, got {}",
            name,
            kind_of(other)
        ))),
    }
}
