use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use stagehand_application::AuditLogQuery;
use stagehand_core::{AppError, AppResult};
use stagehand_domain::{AuditAction, AuditEntity, AuditLogEntry};

use super::types::{AuditLogListParams, AuditLogResponse};
use crate::dto::common::{QueryValue, format_timestamp};

/// Which end of a date range a date-only value stands for.
#[derive(Debug, Clone, Copy)]
enum DateBound {
    Start,
    End,
}

impl AuditLogListParams {
    /// Converts raw query values into service filters.
    pub fn into_query(self) -> AppResult<AuditLogQuery> {
        Ok(AuditLogQuery {
            text: self.q.and_then(|value| value.into_text()),
            action: text_of(self.action)
                .map(|value| value.parse::<AuditAction>())
                .transpose()?,
            entity: text_of(self.entity)
                .map(|value| value.parse::<AuditEntity>())
                .transpose()?,
            from: text_of(self.date_from)
                .map(|value| parse_date("dateFrom", &value, DateBound::Start))
                .transpose()?,
            to: text_of(self.date_to)
                .map(|value| parse_date("dateTo", &value, DateBound::End))
                .transpose()?,
        })
    }
}

impl From<AuditLogEntry> for AuditLogResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            action: entry.action.as_str().to_owned(),
            entity: entry.entity.as_str().to_owned(),
            entity_id: entry.entity_id.to_string(),
            actor_id: entry.actor_id,
            actor_name: entry.actor_name,
            message: entry.message,
            timestamp: format_timestamp(entry.timestamp),
            changes: entry.changes,
        }
    }
}

fn text_of(value: Option<QueryValue>) -> Option<String> {
    value.and_then(QueryValue::into_text)
}

/// Parses an RFC 3339 instant or a `YYYY-MM-DD` date.
///
/// A date-only upper bound covers the whole day.
fn parse_date(name: &str, value: &str, bound: DateBound) -> AppResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!(
            "{name} must be an RFC 3339 timestamp or YYYY-MM-DD date, got '{value}'"
        ))
    })?;
    let time = match bound {
        DateBound::Start => NaiveTime::from_hms_opt(0, 0, 0),
        DateBound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999),
    }
    .ok_or_else(|| AppError::Internal("invalid day boundary".to_owned()))?;

    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use stagehand_core::AppError;
    use stagehand_domain::{AuditAction, AuditEntity};

    use crate::dto::AuditLogListParams;
    use crate::dto::common::QueryValue;

    fn text(value: &str) -> Option<QueryValue> {
        Some(QueryValue::Text(value.to_owned()))
    }

    #[test]
    fn action_and_entity_filters_parse_exact_values() {
        let query = AuditLogListParams {
            action: text("DELETE"),
            entity: text("ROLE"),
            ..AuditLogListParams::default()
        }
        .into_query()
        .unwrap_or_else(|error| panic!("conversion failed: {error}"));

        assert_eq!(query.action, Some(AuditAction::Delete));
        assert_eq!(query.entity, Some(AuditEntity::Role));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result = AuditLogListParams {
            action: text("PURGE"),
            ..AuditLogListParams::default()
        }
        .into_query();

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn date_only_upper_bound_covers_whole_day() {
        let query = AuditLogListParams {
            date_from: text("2024-02-09"),
            date_to: text("2024-02-09"),
            ..AuditLogListParams::default()
        }
        .into_query()
        .unwrap_or_else(|error| panic!("conversion failed: {error}"));

        let afternoon = Utc
            .with_ymd_and_hms(2024, 2, 9, 14, 30, 0)
            .single()
            .unwrap_or_else(Utc::now);
        assert!(query.from.is_some_and(|from| from <= afternoon));
        assert!(query.to.is_some_and(|to| to >= afternoon));
    }

    #[test]
    fn rfc3339_bounds_and_malformed_dates() {
        let query = AuditLogListParams {
            date_from: text("2024-02-09T14:30:00+09:00"),
            ..AuditLogListParams::default()
        }
        .into_query()
        .unwrap_or_else(|error| panic!("conversion failed: {error}"));
        let expected = Utc
            .with_ymd_and_hms(2024, 2, 9, 5, 30, 0)
            .single()
            .unwrap_or_else(Utc::now);
        assert_eq!(query.from, Some(expected));

        let result = AuditLogListParams {
            date_to: text("yesterday"),
            ..AuditLogListParams::default()
        }
        .into_query();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
