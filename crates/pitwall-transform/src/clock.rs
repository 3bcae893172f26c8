//! Session clock times.
//!
//! The extraction stage writes absolute session times as `HH:MM:SS:fff`
//! or `HH:MM:SS`; the canonical form is `HH:MM:SS.fff`. Hours are kept as
//! written, so race sessions that cross midnight stay monotonic.

use pitwall_model::{ClockTime, RawCell, Timestamp, Unparseable, clock_components};

use crate::parse_component;

/// Parses an absolute-time cell into a date-less [`Timestamp::Clock`].
pub fn parse_absolute_time(raw: &RawCell<'_>) -> Result<Timestamp, Unparseable> {
    match *raw {
        RawCell::Missing => Err(Unparseable::Missing),
        RawCell::AbsoluteTimeString(text) => parse_clock_text(text).map(Timestamp::Clock),
        RawCell::NumericSeconds(_)
        | RawCell::CustomDurationString(_)
        | RawCell::IsoDatetimeString(_)
        | RawCell::Unrecognized(_) => Err(Unparseable::Malformed),
    }
}

fn parse_clock_text(text: &str) -> Result<ClockTime, Unparseable> {
    let components = clock_components(text);
    let (hours, minutes, seconds, millis) = match components.as_slice() {
        [hours, minutes, seconds] => (hours, minutes, seconds, None),
        [hours, minutes, seconds, millis] => (hours, minutes, seconds, Some(millis)),
        _ => return Err(Unparseable::Malformed),
    };
    let hours = parse_component(hours, None)?;
    let minutes = parse_component(minutes, Some(2))?;
    let seconds = parse_component(seconds, Some(2))?;
    let millis = match millis {
        Some(millis) => parse_component(millis, Some(3))?,
        None => 0,
    };
    ClockTime::from_parts(hours, minutes, seconds, millis)
}
