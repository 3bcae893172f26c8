//! Run-level totals.

use std::path::PathBuf;

use serde::Serialize;

use pitwall_model::{FileFailure, TransformResult};

/// Totals folded from a run's per-file results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files: usize,
    pub transformed: usize,
    /// Written unchanged because no column was classified.
    pub no_classified_columns: usize,
    pub failed: usize,
    pub rows: usize,
    pub unparseable_cells: usize,
    pub failures: Vec<(PathBuf, FileFailure)>,
}

impl BatchSummary {
    pub fn record(&mut self, result: &TransformResult) {
        self.files += 1;
        self.rows += result.rows();
        self.unparseable_cells += result.unparseable_cells();
        if let Some(failure) = result.failure() {
            self.failed += 1;
            self.failures.push((result.relative.clone(), failure.clone()));
        } else if result.is_warning() {
            self.no_classified_columns += 1;
        } else {
            self.transformed += 1;
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Process exit code: 1 when any file failed. Warnings do not count.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}

impl<'a> Extend<&'a TransformResult> for BatchSummary {
    fn extend<I: IntoIterator<Item = &'a TransformResult>>(&mut self, iter: I) {
        for result in iter {
            self.record(result);
        }
    }
}

impl FromIterator<TransformResult> for BatchSummary {
    fn from_iter<I: IntoIterator<Item = TransformResult>>(iter: I) -> Self {
        let mut summary = Self::default();
        for result in iter {
            summary.record(&result);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use pitwall_model::FileOutcome;

    use super::*;

    fn result(name: &str, outcome: FileOutcome) -> TransformResult {
        TransformResult {
            input: PathBuf::from("in").join(name),
            relative: PathBuf::from(name),
            outcome,
        }
    }

    #[test]
    fn warnings_do_not_fail_the_run() {
        let summary: BatchSummary = vec![
            result(
                "weather.csv",
                FileOutcome::Transformed {
                    output: PathBuf::from("out/weather.csv"),
                    rows: 10,
                    columns: Vec::new(),
                },
            ),
            result(
                "drivers.csv",
                FileOutcome::NoClassifiedColumns {
                    output: PathBuf::from("out/drivers.csv"),
                    rows: 20,
                },
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.transformed, 1);
        assert_eq!(summary.no_classified_columns, 1);
        assert_eq!(summary.rows, 30);
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn any_failure_sets_exit_code() {
        let failed = TransformResult::failed(
            PathBuf::from("in/laps_data.csv"),
            PathBuf::from("laps_data.csv"),
            FileFailure::Load("CSV file is empty".to_string()),
        );
        let mut summary = BatchSummary::default();
        summary.extend([&failed]);

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].0, PathBuf::from("laps_data.csv"));
        assert_eq!(summary.exit_code(), 1);
    }
}
