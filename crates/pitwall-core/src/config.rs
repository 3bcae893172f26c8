//! Batch configuration and rule files.
//!
//! A rule file is TOML with one `[[rule]]` table per rule:
//!
//! ```toml
//! [[rule]]
//! pattern = "LapTime"
//! kind = "duration"
//!
//! [[rule]]
//! pattern = "Pit*"
//! kind = "absolute-time"
//! ```
//!
//! A pattern ending in `*` matches by prefix. A rule file replaces the
//! built-in table; it does not extend it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use pitwall_model::{ColumnRule, ColumnRules};

use crate::error::{BatchError, Result};

/// Table-file extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Everything a batch run needs.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub column_rules: ColumnRules,
    /// Extension of the files to transform, without the dot; case-insensitive.
    pub extension: String,
}

impl BatchConfig {
    /// Creates a config with the built-in rule table and the `csv` extension.
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            column_rules: ColumnRules::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Replaces the rule table.
    pub fn with_rules(mut self, column_rules: ColumnRules) -> Self {
        self.column_rules = column_rules;
        self
    }

    /// Sets the table-file extension.
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default, rename = "rule")]
    rules: Vec<ColumnRule>,
}

/// Loads and validates a TOML rule file.
pub fn load_rules(path: &Path) -> Result<ColumnRules> {
    let contents = std::fs::read_to_string(path).map_err(|e| BatchError::RulesRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_rules(&contents, path)
}

/// Parses rule-file text; `path` is only used in errors.
pub fn parse_rules(contents: &str, path: &Path) -> Result<ColumnRules> {
    let file: RuleFile = toml::from_str(contents).map_err(|e| BatchError::RulesParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    ColumnRules::new(file.rules).map_err(|e| BatchError::Rules {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use pitwall_model::{ColumnKind, RuleError};

    use super::*;

    #[test]
    fn parses_rule_file_in_precedence_order() {
        let rules = parse_rules(
            r#"
            [[rule]]
            pattern = "EventDate"
            kind = "datetime"

            [[rule]]
            pattern = "Pit*"
            kind = "absolute-time"

            [[rule]]
            pattern = "Sector*"
            kind = "duration"
            "#,
            Path::new("rules.toml"),
        )
        .unwrap();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.rules()[0].kind, ColumnKind::Duration);
        assert_eq!(rules.classify("Sector2Time"), ColumnKind::Duration);
        assert_eq!(rules.classify("PitOutTime"), ColumnKind::AbsoluteTime);
        assert_eq!(rules.classify("EventDate"), ColumnKind::Datetime);
        assert_eq!(rules.classify("Driver"), ColumnKind::Passthrough);
    }

    #[test]
    fn empty_file_is_an_empty_table() {
        let rules = parse_rules("", Path::new("rules.toml")).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = parse_rules(
            "[[rule]]\npattern = \"LapTime\"\nkind = \"speed\"\n",
            Path::new("rules.toml"),
        );
        assert!(matches!(result, Err(BatchError::RulesParse { .. })));
    }

    #[test]
    fn rejects_duplicate_patterns() {
        let result = parse_rules(
            "[[rule]]\npattern = \"Q1\"\nkind = \"duration\"\n\
             [[rule]]\npattern = \"Q1\"\nkind = \"datetime\"\n",
            Path::new("rules.toml"),
        );
        assert!(matches!(
            result,
            Err(BatchError::Rules {
                source: RuleError::DuplicatePattern { .. },
                ..
            })
        ));
    }

    #[test]
    fn builder_normalizes_extension() {
        let config = BatchConfig::new("in", "out").with_extension(".TSV");
        assert_eq!(config.extension, "TSV");
        assert_eq!(config.column_rules, ColumnRules::default());
    }
}
