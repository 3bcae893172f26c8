//! Duration parsing for lap, sector and interval columns.
//!
//! Accepted inputs:
//!
//! - numeric seconds (`83.456`), rounded to the millisecond
//! - `mm:ss.fff` or `mm:ss:fff`, minutes of any width, seconds two digits
//!   below 60, milliseconds three digits
//!
//! Everything else, including negative values, is [`Unparseable`].

use pitwall_model::{Duration, RawCell, Unparseable, clock_components};

use crate::parse_component;

/// Parses a duration cell.
pub fn parse_duration(raw: &RawCell<'_>) -> Result<Duration, Unparseable> {
    match *raw {
        RawCell::Missing => Err(Unparseable::Missing),
        RawCell::NumericSeconds(seconds) => Duration::from_secs_f64(seconds),
        RawCell::CustomDurationString(text) => parse_duration_text(text),
        RawCell::Unrecognized(text) if is_signed_duration(text) => Err(Unparseable::Negative),
        RawCell::AbsoluteTimeString(_)
        | RawCell::IsoDatetimeString(_)
        | RawCell::Unrecognized(_) => Err(Unparseable::Malformed),
    }
}

fn parse_duration_text(text: &str) -> Result<Duration, Unparseable> {
    let components = clock_components(text);
    let [minutes, seconds, millis] = components.as_slice() else {
        return Err(Unparseable::Malformed);
    };
    let minutes = parse_component(minutes, None)?;
    let seconds = parse_component(seconds, Some(2))?;
    let millis = parse_component(millis, Some(3))?;
    if seconds >= 60 {
        return Err(Unparseable::OutOfRange);
    }
    Duration::from_parts(minutes, seconds, millis)
}

/// `-01:23.456` is shaped like a duration but carries a sign.
fn is_signed_duration(text: &str) -> bool {
    text.strip_prefix('-').is_some_and(|rest| {
        matches!(
            RawCell::read(Some(rest)),
            RawCell::CustomDurationString(_) | RawCell::NumericSeconds(_)
        )
    })
}
