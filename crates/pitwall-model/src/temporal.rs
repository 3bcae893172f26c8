//! Normalized temporal values.
//!
//! Every value has a canonical text form (its `Display` output) that parses
//! back to the same value under the same column kind:
//!
//! | Value                  | Canonical form              |
//! |------------------------|-----------------------------|
//! | [`Duration`]           | `MM:SS.fff`                 |
//! | [`ClockTime`]          | `HH:MM:SS.fff`              |
//! | UTC calendar value     | `YYYY-MM-DDTHH:MM:SS.fffZ`  |
//! | naive calendar value   | `YYYY-MM-DDTHH:MM:SS.fff`   |
//!
//! Minutes (durations) and hours (clock times) are zero-padded to two digits
//! but are not bounded above.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Why a cell could not be normalized.
///
/// This is an ordinary value, not a fault: the transform stores it as a
/// null cell and keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unparseable {
    #[error("value is missing")]
    Missing,
    #[error("value does not match the column grammar")]
    Malformed,
    #[error("value is negative")]
    Negative,
    #[error("value is out of range")]
    OutOfRange,
}

impl Unparseable {
    pub fn is_missing(self) -> bool {
        matches!(self, Unparseable::Missing)
    }
}

/// A non-negative elapsed span with millisecond resolution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration {
    millis: u64,
}

impl Duration {
    pub const ZERO: Duration = Duration { millis: 0 };

    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Builds a duration from minute, second and millisecond parts.
    pub fn from_parts(minutes: u64, seconds: u64, millis: u64) -> Result<Self, Unparseable> {
        minutes
            .checked_mul(MILLIS_PER_MINUTE)
            .and_then(|total| total.checked_add(seconds.checked_mul(MILLIS_PER_SECOND)?))
            .and_then(|total| total.checked_add(millis))
            .map(Self::from_millis)
            .ok_or(Unparseable::OutOfRange)
    }

    /// Converts a number of seconds, rounding to the nearest millisecond.
    pub fn from_secs_f64(seconds: f64) -> Result<Self, Unparseable> {
        if !seconds.is_finite() {
            return Err(Unparseable::Malformed);
        }
        if seconds < 0.0 {
            return Err(Unparseable::Negative);
        }
        let millis = (seconds * MILLIS_PER_SECOND as f64).round();
        if millis >= u64::MAX as f64 {
            return Err(Unparseable::OutOfRange);
        }
        Ok(Self::from_millis(millis as u64))
    }

    pub const fn as_millis(self) -> u64 {
        self.millis
    }

    pub fn as_secs_f64(self) -> f64 {
        self.millis as f64 / MILLIS_PER_SECOND as f64
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.millis / MILLIS_PER_MINUTE;
        let seconds = (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        let millis = self.millis % MILLIS_PER_SECOND;
        write!(f, "{minutes:02}:{seconds:02}.{millis:03}")
    }
}

/// A time of day measured from midnight of the session day, without a date.
///
/// Hours are not wrapped: a session that runs past midnight keeps counting
/// (`25:10:00.000`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClockTime {
    millis: u64,
}

impl ClockTime {
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Builds a clock time; minutes and seconds must be below 60.
    pub fn from_parts(
        hours: u64,
        minutes: u64,
        seconds: u64,
        millis: u64,
    ) -> Result<Self, Unparseable> {
        if minutes >= 60 || seconds >= 60 || millis >= MILLIS_PER_SECOND {
            return Err(Unparseable::OutOfRange);
        }
        hours
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|total| total.checked_add(minutes * MILLIS_PER_MINUTE))
            .and_then(|total| total.checked_add(seconds * MILLIS_PER_SECOND + millis))
            .map(Self::from_millis)
            .ok_or(Unparseable::OutOfRange)
    }

    pub const fn as_millis(self) -> u64 {
        self.millis
    }

    pub const fn hours(self) -> u64 {
        self.millis / MILLIS_PER_HOUR
    }

    pub const fn minutes(self) -> u64 {
        (self.millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE
    }

    pub const fn seconds(self) -> u64 {
        (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND
    }

    pub const fn subsec_millis(self) -> u64 {
        self.millis % MILLIS_PER_SECOND
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.subsec_millis()
        )
    }
}

/// Which clock a calendar timestamp is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeReference {
    /// Converted from an explicit offset (or `Z`) to UTC.
    Utc,
    /// No offset in the source; stored as written.
    Naive,
}

/// A calendar date-time with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarTimestamp {
    datetime: NaiveDateTime,
    reference: TimeReference,
}

impl CalendarTimestamp {
    pub fn utc(datetime: DateTime<Utc>) -> Self {
        Self {
            datetime: datetime.naive_utc().trunc_subsecs(3),
            reference: TimeReference::Utc,
        }
    }

    pub fn naive(datetime: NaiveDateTime) -> Self {
        Self {
            datetime: datetime.trunc_subsecs(3),
            reference: TimeReference::Naive,
        }
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn reference(&self) -> TimeReference {
        self.reference
    }

    pub fn is_naive(&self) -> bool {
        self.reference == TimeReference::Naive
    }

    /// The UTC instant, for reference-bound values only.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self.reference {
            TimeReference::Utc => Some(self.datetime.and_utc()),
            TimeReference::Naive => None,
        }
    }
}

impl fmt::Display for CalendarTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format("%Y-%m-%dT%H:%M:%S%.3f"))?;
        if self.reference == TimeReference::Utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// A point in time, with or without a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timestamp {
    Clock(ClockTime),
    Calendar(CalendarTimestamp),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Clock(clock) => fmt::Display::fmt(clock, f),
            Timestamp::Calendar(calendar) => fmt::Display::fmt(calendar, f),
        }
    }
}

/// The result of normalizing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedTemporalValue {
    Duration(Duration),
    Timestamp(Timestamp),
}

impl NormalizedTemporalValue {
    pub fn as_calendar(&self) -> Option<&CalendarTimestamp> {
        match self {
            NormalizedTemporalValue::Timestamp(Timestamp::Calendar(calendar)) => Some(calendar),
            _ => None,
        }
    }
}

impl From<Duration> for NormalizedTemporalValue {
    fn from(value: Duration) -> Self {
        NormalizedTemporalValue::Duration(value)
    }
}

impl From<Timestamp> for NormalizedTemporalValue {
    fn from(value: Timestamp) -> Self {
        NormalizedTemporalValue::Timestamp(value)
    }
}

impl fmt::Display for NormalizedTemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedTemporalValue::Duration(duration) => fmt::Display::fmt(duration, f),
            NormalizedTemporalValue::Timestamp(timestamp) => fmt::Display::fmt(timestamp, f),
        }
    }
}
