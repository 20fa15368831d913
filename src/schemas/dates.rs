//! Due date wire format
//!
//! The API exchanges ISO 8601 instants. A due date picked by a user is a
//! calendar day and is sent as midnight UTC with millisecond precision.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Midnight UTC of the given day
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Render a calendar day the way the API expects it, e.g. `2024-06-11T00:00:00.000Z`
pub fn format_due_date(day: NaiveDate) -> String {
    day_start(day).format(WIRE_FORMAT).to_string()
}

/// Parse a due date given either as a plain day (`2024-06-11`) or an instant.
///
/// Instants are truncated to their UTC calendar day.
pub fn parse_day(input: &str) -> Result<NaiveDate, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("date is empty".to_string());
    }
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", trimmed))
}

fn parse_instant(input: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(day_start)
        .map_err(|_| format!("invalid timestamp '{}'", input))
}

/// Serde adapter for due date fields
pub mod wire {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(WIRE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_instant(&raw).map_err(serde::de::Error::custom)
    }
}
