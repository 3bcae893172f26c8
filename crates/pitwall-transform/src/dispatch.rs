//! Kind-directed cell parsing.
//!
//! The column kind alone selects the grammar; a cell's shape never changes
//! which parser runs.

use pitwall_model::{ColumnKind, NormalizedTemporalValue, RawCell, Unparseable};

use crate::{parse_absolute_time, parse_duration, parse_iso_datetime};

/// Parses a cell for a column of the given kind.
///
/// Returns `None` for [`ColumnKind::Passthrough`], whose cells are never parsed.
pub fn parse_cell(
    kind: ColumnKind,
    raw: &RawCell<'_>,
) -> Option<Result<NormalizedTemporalValue, Unparseable>> {
    let parsed = match kind {
        ColumnKind::Duration => parse_duration(raw).map(NormalizedTemporalValue::from),
        ColumnKind::AbsoluteTime => parse_absolute_time(raw).map(NormalizedTemporalValue::from),
        ColumnKind::Datetime => parse_iso_datetime(raw).map(NormalizedTemporalValue::from),
        ColumnKind::Passthrough => return None,
    };
    Some(parsed)
}

/// Reads and parses a text cell in one step.
pub fn parse_text(
    kind: ColumnKind,
    value: Option<&str>,
) -> Option<Result<NormalizedTemporalValue, Unparseable>> {
    parse_cell(kind, &RawCell::read(value))
}
