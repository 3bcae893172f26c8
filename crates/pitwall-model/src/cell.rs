//! Lexical classification of raw table cells.
//!
//! A [`RawCell`] only describes the *shape* of a value. Which grammar is
//! applied to it is decided by the column's [`ColumnKind`](crate::ColumnKind),
//! never by the shape alone.

/// Tokens the extraction stage writes for absent values.
const MISSING_TOKENS: &[&str] = &[
    "nan", "nat", "<nat>", "none", "null", "na", "n/a", "<na>", "#n/a", "#n/a n/a", "#na", "-nan",
    "1.#ind", "1.#qnan", "-1.#ind", "-1.#qnan",
];

/// A source cell before normalization, borrowed from the loaded table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCell<'a> {
    /// Empty, null, or one of the extraction stage's NA tokens.
    Missing,
    /// A finite or non-finite decimal number (seconds).
    NumericSeconds(f64),
    /// `mm:ss.fff` / `mm:ss:fff`.
    CustomDurationString(&'a str),
    /// `HH:MM:SS`, `HH:MM:SS.fff` or `HH:MM:SS:fff`.
    AbsoluteTimeString(&'a str),
    /// Text starting with a `YYYY-` calendar date.
    IsoDatetimeString(&'a str),
    /// Anything else.
    Unrecognized(&'a str),
}

impl<'a> RawCell<'a> {
    /// Reads a cell value, trimming surrounding whitespace first.
    pub fn read(value: Option<&'a str>) -> Self {
        let Some(value) = value else {
            return RawCell::Missing;
        };
        let trimmed = value.trim();
        if is_missing_token(trimmed) {
            return RawCell::Missing;
        }
        if let Some(cell) = read_clock(trimmed) {
            return cell;
        }
        if let Ok(seconds) = trimmed.parse::<f64>() {
            return RawCell::NumericSeconds(seconds);
        }
        if has_date_prefix(trimmed) {
            return RawCell::IsoDatetimeString(trimmed);
        }
        RawCell::Unrecognized(trimmed)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawCell::Missing)
    }
}

/// Returns true for empty strings and NA-style placeholder tokens.
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Splits a clock-style string on `:` and `.` separators.
pub fn clock_components(text: &str) -> Vec<&str> {
    text.split([':', '.']).collect()
}

fn read_clock(text: &str) -> Option<RawCell<'_>> {
    let separators: Vec<char> = text.chars().filter(|ch| matches!(ch, ':' | '.')).collect();
    let groups = clock_components(text);
    let all_digits = groups
        .iter()
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !all_digits || separators.first() != Some(&':') {
        return None;
    }
    match (groups.as_slice(), separators.as_slice()) {
        ([_, _, millis], [':', _]) if millis.len() == 3 => {
            Some(RawCell::CustomDurationString(text))
        }
        ([_, _, seconds], [':', ':']) if seconds.len() == 2 => {
            Some(RawCell::AbsoluteTimeString(text))
        }
        ([_, _, _, _], [':', ':', _]) => Some(RawCell::AbsoluteTimeString(text)),
        _ => None,
    }
}

fn has_date_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 5 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}
