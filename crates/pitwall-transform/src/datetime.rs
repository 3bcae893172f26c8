//! ISO 8601 calendar date-time parsing.
//!
//! Values carrying an offset (or `Z`) are converted to UTC. Values without
//! one are kept as written and marked reference-naive; no default time zone
//! is assumed.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use pitwall_model::{CalendarTimestamp, RawCell, Timestamp, Unparseable};

/// Formats with an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Formats without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a datetime cell into a [`Timestamp::Calendar`].
pub fn parse_iso_datetime(raw: &RawCell<'_>) -> Result<Timestamp, Unparseable> {
    match *raw {
        RawCell::Missing => Err(Unparseable::Missing),
        RawCell::IsoDatetimeString(text) => parse_datetime_text(text)
            .map(Timestamp::Calendar)
            .ok_or(Unparseable::Malformed),
        RawCell::NumericSeconds(_)
        | RawCell::CustomDurationString(_)
        | RawCell::AbsoluteTimeString(_)
        | RawCell::Unrecognized(_) => Err(Unparseable::Malformed),
    }
}

fn parse_datetime_text(text: &str) -> Option<CalendarTimestamp> {
    try_parse_offset(text)
        .map(CalendarTimestamp::utc)
        .or_else(|| try_parse_naive(text).map(CalendarTimestamp::naive))
}

fn try_parse_offset(text: &str) -> Option<DateTime<Utc>> {
    let normalized = match text.strip_suffix(['Z', 'z']) {
        Some(stripped) => Cow::Owned(format!("{stripped}+00:00")),
        None => Cow::Borrowed(text),
    };
    OFFSET_FORMATS.iter().find_map(|fmt| {
        DateTime::parse_from_str(&normalized, fmt)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

fn try_parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
