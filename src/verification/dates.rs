//! Parsing of collaborator date values into calendar days and UTC instants.
//!
//! Calendar days are taken as written: an RFC 3339 timestamp keeps the date
//! in its own offset, so a value stamped late in the evening does not slide
//! into the next day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::models::DateLike;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Calendar day of a date value, time-of-day discarded.
pub fn parse_calendar_day(value: &DateLike) -> Option<NaiveDate> {
    match value {
        DateLike::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms).map(|dt| dt.date_naive()),
        DateLike::Text(text) => {
            let text = text.trim();
            if let Some(day) = parse_date_only(text) {
                return Some(day);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Some(dt.date_naive());
            }
            parse_naive_datetime(text).map(|dt| dt.date())
        }
        DateLike::Other(_) => None,
    }
}

/// UTC instant of a date value. Date-only values land on midnight UTC.
pub fn parse_instant(value: &DateLike) -> Option<DateTime<Utc>> {
    match value {
        DateLike::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms),
        DateLike::Text(text) => {
            let text = text.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Some(dt) = parse_naive_datetime(text) {
                return Some(dt.and_utc());
            }
            parse_date_only(text).map(|day| day.and_time(NaiveTime::MIN).and_utc())
        }
        DateLike::Other(_) => None,
    }
}

fn parse_date_only(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn parse_naive_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
