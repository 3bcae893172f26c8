//! Column classification rules.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

/// Declared time semantics of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    /// Elapsed span: lap and sector times, intervals, numeric seconds.
    Duration,
    /// Session clock time without a date; hours may exceed 23.
    AbsoluteTime,
    /// Full calendar date-time.
    Datetime,
    /// Left untouched.
    Passthrough,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Duration => "duration",
            ColumnKind::AbsoluteTime => "absolute-time",
            ColumnKind::Datetime => "datetime",
            ColumnKind::Passthrough => "passthrough",
        }
    }

    /// True for every kind the transform rewrites.
    pub fn is_classified(self) -> bool {
        self != ColumnKind::Passthrough
    }

    /// Position in the rule table: durations first, then absolute times, then datetimes.
    fn precedence(self) -> u8 {
        match self {
            ColumnKind::Duration => 0,
            ColumnKind::AbsoluteTime => 1,
            ColumnKind::Datetime => 2,
            ColumnKind::Passthrough => 3,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column name pattern; a trailing `*` makes it a prefix match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnPattern {
    Exact(String),
    Prefix(String),
}

impl ColumnPattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let pattern = match trimmed.strip_suffix('*') {
            Some(prefix) => ColumnPattern::Prefix(prefix.to_string()),
            None => ColumnPattern::Exact(trimmed.to_string()),
        };
        if pattern.stem().is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        Ok(pattern)
    }

    pub fn matches(&self, column: &str) -> bool {
        match self {
            ColumnPattern::Exact(name) => column == name,
            ColumnPattern::Prefix(prefix) => column.starts_with(prefix.as_str()),
        }
    }

    fn stem(&self) -> &str {
        match self {
            ColumnPattern::Exact(stem) | ColumnPattern::Prefix(stem) => stem,
        }
    }
}

impl fmt::Display for ColumnPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnPattern::Exact(name) => f.write_str(name),
            ColumnPattern::Prefix(prefix) => write!(f, "{prefix}*"),
        }
    }
}

impl TryFrom<String> for ColumnPattern {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self> {
        ColumnPattern::parse(&value)
    }
}

impl From<ColumnPattern> for String {
    fn from(value: ColumnPattern) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    pub pattern: ColumnPattern,
    pub kind: ColumnKind,
}

impl ColumnRule {
    pub fn exact(name: &str, kind: ColumnKind) -> Self {
        Self {
            pattern: ColumnPattern::Exact(name.to_string()),
            kind,
        }
    }
}

/// Ordered name-to-kind lookup table. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRules {
    rules: Vec<ColumnRule>,
}

const DEFAULT_DURATION_COLUMNS: &[&str] = &[
    "LapTime",
    "Sector1Time",
    "Sector2Time",
    "Sector3Time",
    "Q1",
    "Q2",
    "Q3",
    "Interval",
    "TelemetryLapStartTime_seconds",
];

const DEFAULT_ABSOLUTE_TIME_COLUMNS: &[&str] = &[
    "Time",
    "PitInTime",
    "PitOutTime",
    "Sector1SessionTime",
    "Sector2SessionTime",
    "Sector3SessionTime",
    "LapStartTime",
];

const DEFAULT_DATETIME_COLUMNS: &[&str] = &[
    "EventDate",
    "SessionStartDateLocalISO",
    "SessionStartDateUTCISO",
];

impl ColumnRules {
    /// Validates and orders a rule table.
    ///
    /// Rules are stably reordered so duration rules come before absolute-time
    /// rules, which come before datetime rules.
    pub fn new(mut rules: Vec<ColumnRule>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for rule in &rules {
            let pattern = rule.pattern.to_string();
            if rule.pattern.stem().is_empty() {
                return Err(RuleError::EmptyPattern);
            }
            if rule.kind == ColumnKind::Passthrough {
                return Err(RuleError::PassthroughRule { pattern });
            }
            if !seen.insert(pattern.clone()) {
                return Err(RuleError::DuplicatePattern { pattern });
            }
        }
        rules.sort_by_key(|rule| rule.kind.precedence());
        Ok(Self { rules })
    }

    pub fn classify(&self, column: &str) -> ColumnKind {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(column))
            .map_or(ColumnKind::Passthrough, |rule| rule.kind)
    }

    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ColumnRules {
    fn default() -> Self {
        let groups = [
            (ColumnKind::Duration, DEFAULT_DURATION_COLUMNS),
            (ColumnKind::AbsoluteTime, DEFAULT_ABSOLUTE_TIME_COLUMNS),
            (ColumnKind::Datetime, DEFAULT_DATETIME_COLUMNS),
        ];
        let rules = groups
            .iter()
            .flat_map(|(kind, names)| names.iter().map(|name| ColumnRule::exact(name, *kind)))
            .collect();
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_classifies_extractor_columns() {
        let rules = ColumnRules::default();
        assert_eq!(rules.classify("LapTime"), ColumnKind::Duration);
        assert_eq!(rules.classify("Interval"), ColumnKind::Duration);
        assert_eq!(rules.classify("Sector1SessionTime"), ColumnKind::AbsoluteTime);
        assert_eq!(rules.classify("Time"), ColumnKind::AbsoluteTime);
        assert_eq!(rules.classify("EventDate"), ColumnKind::Datetime);
        assert_eq!(rules.classify("Driver"), ColumnKind::Passthrough);
        assert_eq!(rules.classify("laptime"), ColumnKind::Passthrough);
    }

    #[test]
    fn rules_are_ordered_by_kind() {
        let rules = ColumnRules::new(vec![
            ColumnRule {
                pattern: ColumnPattern::parse("Stamp*").expect("pattern"),
                kind: ColumnKind::Datetime,
            },
            ColumnRule {
                pattern: ColumnPattern::parse("StampDelta").expect("pattern"),
                kind: ColumnKind::Duration,
            },
        ])
        .expect("valid rules");
        assert_eq!(rules.rules()[0].kind, ColumnKind::Duration);
        assert_eq!(rules.classify("StampDelta"), ColumnKind::Duration);
        assert_eq!(rules.classify("StampUtc"), ColumnKind::Datetime);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        assert_eq!(ColumnPattern::parse(" * "), Err(RuleError::EmptyPattern));
        let duplicate = ColumnRules::new(vec![
            ColumnRule::exact("Q1", ColumnKind::Duration),
            ColumnRule::exact("Q1", ColumnKind::AbsoluteTime),
        ]);
        assert_eq!(
            duplicate,
            Err(RuleError::DuplicatePattern {
                pattern: "Q1".to_string()
            })
        );
        let passthrough = ColumnRules::new(vec![ColumnRule::exact("Q1", ColumnKind::Passthrough)]);
        assert!(matches!(passthrough, Err(RuleError::PassthroughRule { .. })));
    }

    #[test]
    fn empty_table_passes_everything_through() {
        let rules = ColumnRules::new(Vec::new()).unwrap();
        assert!(rules.is_empty());
        assert_eq!(rules.classify("LapTime"), ColumnKind::Passthrough);
    }
}
