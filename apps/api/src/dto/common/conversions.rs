use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use stagehand_application::DeleteAcknowledgement;
use stagehand_core::{AppError, AppResult};

use super::types::{DeleteResponse, QueryValue};

impl From<DeleteAcknowledgement> for DeleteResponse {
    fn from(value: DeleteAcknowledgement) -> Self {
        Self {
            success: value.success,
            message: value.message,
        }
    }
}

impl QueryValue {
    /// Returns the trimmed textual form, or `None` when it is empty.
    pub fn into_text(self) -> Option<String> {
        let text = match self {
            Self::Flag(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        };
        let trimmed = text.trim();

        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }

    /// Reads a boolean filter given either as a JSON boolean or as text.
    pub fn into_flag(self, name: &str) -> AppResult<Option<bool>> {
        match self {
            Self::Flag(value) => Ok(Some(value)),
            Self::Number(value) => Err(invalid_flag(name, &value.to_string())),
            Self::Text(value) => match value.trim() {
                "" => Ok(None),
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(invalid_flag(name, other)),
            },
        }
    }
}

fn invalid_flag(name: &str, value: &str) -> AppError {
    AppError::Validation(format!("{name} must be true or false, got '{value}'"))
}

/// Decodes a request body; a missing or `null` body reads as `{}`.
pub fn decode_body<T: DeserializeOwned>(body: Option<Value>) -> AppResult<T> {
    let value = match body {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    };

    serde_json::from_value(value)
        .map_err(|error| AppError::Validation(format!("invalid request body: {error}")))
}

/// Decodes query parameters into a typed parameter set.
pub fn decode_query<T: DeserializeOwned>(query: Map<String, Value>) -> AppResult<T> {
    serde_json::from_value(Value::Object(query))
        .map_err(|error| AppError::Validation(format!("invalid query parameters: {error}")))
}

/// Returns the value or a VALIDATION_ERROR naming the missing field.
pub(crate) fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// Renders a timestamp the way the console's date parser expects.
pub(crate) fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
