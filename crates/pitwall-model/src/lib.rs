//! Data model shared by the pitwall crates.
//!
//! - **cell**: lexical view of a raw table cell ([`RawCell`])
//! - **temporal**: normalized durations and timestamps, plus the [`Unparseable`] marker
//! - **rules**: column classification ([`ColumnKind`]) and the ordered rule table
//! - **outcome**: per-column and per-file results of a transform run

pub mod cell;
pub mod error;
pub mod outcome;
pub mod rules;
pub mod temporal;

pub use cell::{RawCell, clock_components, is_missing_token};
pub use error::{Result, RuleError};
pub use outcome::{ColumnIssue, ColumnReport, FileFailure, FileOutcome, TransformResult};
pub use rules::{ColumnKind, ColumnPattern, ColumnRule, ColumnRules};
pub use temporal::{
    CalendarTimestamp, ClockTime, Duration, NormalizedTemporalValue, TimeReference, Timestamp,
    Unparseable,
};
