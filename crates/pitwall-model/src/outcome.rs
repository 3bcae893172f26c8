//! Per-column and per-file transform outcomes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::rules::ColumnKind;
use crate::temporal::{NormalizedTemporalValue, TimeReference, Unparseable};

/// Data-quality findings on a single classified column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ColumnIssue {
    /// A datetime column mixes offset-bearing and offset-free values.
    MixedTimeReference { naive: usize, utc: usize },
    /// Values were present but none matched the column's grammar.
    AllUnparseable { rejected: usize },
}

impl fmt::Display for ColumnIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnIssue::MixedTimeReference { naive, utc } => write!(
                f,
                "mixes {naive} reference-naive and {utc} UTC timestamps"
            ),
            ColumnIssue::AllUnparseable { rejected } => {
                write!(f, "none of {rejected} present values could be parsed")
            }
        }
    }
}

/// Cell statistics for one classified column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub column: String,
    pub kind: ColumnKind,
    pub parsed: usize,
    /// Cells that were empty or held an NA token.
    pub missing: usize,
    /// Present cells that were malformed, negative, or out of range.
    pub rejected: usize,
    pub naive: usize,
    pub utc: usize,
    pub issues: Vec<ColumnIssue>,
}

impl ColumnReport {
    pub fn new(column: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            column: column.into(),
            kind,
            parsed: 0,
            missing: 0,
            rejected: 0,
            naive: 0,
            utc: 0,
            issues: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: &Result<NormalizedTemporalValue, Unparseable>) {
        match outcome {
            Ok(value) => {
                self.parsed += 1;
                match value.as_calendar().map(|calendar| calendar.reference()) {
                    Some(TimeReference::Naive) => self.naive += 1,
                    Some(TimeReference::Utc) => self.utc += 1,
                    None => {}
                }
            }
            Err(Unparseable::Missing) => self.missing += 1,
            Err(_) => self.rejected += 1,
        }
    }

    /// Cells written as null.
    pub fn unparseable(&self) -> usize {
        self.missing + self.rejected
    }

    /// Derives column issues from the collected counts.
    #[must_use]
    pub fn finish(mut self) -> Self {
        self.issues.clear();
        if self.naive > 0 && self.utc > 0 {
            self.issues.push(ColumnIssue::MixedTimeReference {
                naive: self.naive,
                utc: self.utc,
            });
        }
        if self.parsed == 0 && self.rejected > 0 {
            self.issues.push(ColumnIssue::AllUnparseable {
                rejected: self.rejected,
            });
        }
        self
    }
}

/// Why a file could not be transformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "reason", rename_all = "snake_case")]
pub enum FileFailure {
    Discover(String),
    Load(String),
    Transform(String),
    Write(String),
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFailure::Discover(reason) => write!(f, "discover: {reason}"),
            FileFailure::Load(reason) => write!(f, "load: {reason}"),
            FileFailure::Transform(reason) => write!(f, "transform: {reason}"),
            FileFailure::Write(reason) => write!(f, "write: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// At least one classified column was rewritten and the table was written.
    Transformed {
        output: PathBuf,
        rows: usize,
        columns: Vec<ColumnReport>,
    },
    /// No column matched a rule; the table was copied through unchanged.
    NoClassifiedColumns { output: PathBuf, rows: usize },
    Failed { failure: FileFailure },
}

/// Outcome of transforming one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    pub input: PathBuf,
    /// Path relative to the input root; identical under the output root.
    pub relative: PathBuf,
    pub outcome: FileOutcome,
}

impl TransformResult {
    pub fn failed(input: PathBuf, relative: PathBuf, failure: FileFailure) -> Self {
        Self {
            input,
            relative,
            outcome: FileOutcome::Failed { failure },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }

    /// True when the file was written but nothing in it was classified.
    pub fn is_warning(&self) -> bool {
        matches!(self.outcome, FileOutcome::NoClassifiedColumns { .. })
    }

    pub fn output(&self) -> Option<&Path> {
        match &self.outcome {
            FileOutcome::Transformed { output, .. }
            | FileOutcome::NoClassifiedColumns { output, .. } => Some(output),
            FileOutcome::Failed { .. } => None,
        }
    }

    pub fn rows(&self) -> usize {
        match &self.outcome {
            FileOutcome::Transformed { rows, .. } | FileOutcome::NoClassifiedColumns { rows, .. } => {
                *rows
            }
            FileOutcome::Failed { .. } => 0,
        }
    }

    pub fn columns(&self) -> &[ColumnReport] {
        match &self.outcome {
            FileOutcome::Transformed { columns, .. } => columns,
            _ => &[],
        }
    }

    pub fn unparseable_cells(&self) -> usize {
        self.columns().iter().map(ColumnReport::unparseable).sum()
    }

    pub fn failure(&self) -> Option<&FileFailure> {
        match &self.outcome {
            FileOutcome::Failed { failure } => Some(failure),
            _ => None,
        }
    }
}
