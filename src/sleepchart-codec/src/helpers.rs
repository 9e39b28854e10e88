use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::DecodeError;

/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` which is
/// read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DecodeError> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }
    if let Ok(time) = value.parse::<NaiveDateTime>() {
        return Ok(time.and_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map(|time| time.and_utc())
        .map_err(|_| DecodeError::InvalidTimestamp(value.to_owned()))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, DecodeError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DecodeError::InvalidDate(value.to_owned()))
}

pub(crate) fn parse_clock_time(value: &str) -> Result<NaiveTime, DecodeError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| DecodeError::InvalidTime(value.to_owned()))
}
