//! Time parsing and column normalization.
//!
//! - **duration**: lap/sector durations and numeric seconds
//! - **clock**: session clock times (`HH:MM:SS.fff`, hours unbounded)
//! - **datetime**: ISO 8601 calendar date-times with optional offsets
//! - **dispatch**: kind-directed entry point for a single cell
//! - **frame**: applies the parser to every classified column of a `DataFrame`

pub mod clock;
pub mod datetime;
pub mod dispatch;
pub mod duration;
pub mod error;
pub mod frame;

pub use clock::parse_absolute_time;
pub use datetime::parse_iso_datetime;
pub use dispatch::{parse_cell, parse_text};
pub use duration::parse_duration;
pub use error::{Result, TransformError};
pub use frame::{transform_column, transform_frame};

/// Parses one clock component: ASCII digits only, optionally of a fixed width.
pub(crate) fn parse_component(
    text: &str,
    width: Option<usize>,
) -> std::result::Result<u64, pitwall_model::Unparseable> {
    let well_formed = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && width.is_none_or(|width| text.len() == width);
    if !well_formed {
        return Err(pitwall_model::Unparseable::Malformed);
    }
    text.parse::<u64>()
        .map_err(|_| pitwall_model::Unparseable::OutOfRange)
}
