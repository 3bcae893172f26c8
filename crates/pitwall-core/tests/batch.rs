//! End-to-end batch runs over temporary trees.

use std::fs;
use std::path::{Path, PathBuf};

use pitwall_core::{BatchConfig, BatchSummary, run_batch, transform_file};
use pitwall_model::{ColumnIssue, ColumnKind, FileFailure, TransformResult};
use tempfile::TempDir;

const LAPS: &str = "\
Driver,LapNumber,LapTime,Sector1Time,Time,PitInTime,Compound
VER,1,01:32:456,00:30:123,01:05:10:250,,SOFT
HAM,1,nan,bogus,,NaT,MEDIUM
LEC,2,95.5,00:29:900,25:10:00:000,25:09:58:100,HARD
";

const WEATHER: &str = "\
Time,AirTemp,Rainfall
00:00:30:000,25.1,False
00:01:30:000,25.30,False
";

const DRIVERS: &str = "\
Abbreviation,TeamName,CountryCode
VER,Red Bull Racing,NED
HAM,Mercedes,GBR
";

struct Tree {
    _dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn make_tree(files: &[(&str, &str)]) -> Tree {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    for (relative, contents) in files {
        let path = input.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    fs::create_dir_all(&input).unwrap();
    Tree {
        _dir: dir,
        input,
        output,
    }
}

fn run(input: &Path, output: &Path) -> Vec<TransformResult> {
    run_batch(&BatchConfig::new(input, output))
        .unwrap()
        .collect()
}

fn column<'a>(text: &'a str, index: usize) -> Vec<&'a str> {
    text.lines()
        .map(|line| line.split(',').nth(index).unwrap_or_default())
        .collect()
}

#[test]
fn corrupt_file_does_not_stop_the_batch() {
    let tree = make_tree(&[
        ("2024/Bahrain/R/1_laps_data.csv", LAPS),
        ("2024/Bahrain/R/3_weather.csv", WEATHER),
    ]);
    // UTF-16 byte-order mark: rejected at load.
    fs::write(
        tree.input.join("2024/Bahrain/R/2_corrupt.csv"),
        [0xFF, 0xFE, b'T', 0x00, b'i', 0x00],
    )
    .unwrap();

    let results = run(&tree.input, &tree.output);

    assert_eq!(results.len(), 3);
    assert!(!results[0].is_failure());
    assert!(matches!(results[1].failure(), Some(FileFailure::Load(_))));
    assert!(!results[2].is_failure());

    let out = tree.output.join("2024/Bahrain/R");
    assert!(out.join("1_laps_data.csv").is_file());
    assert!(!out.join("2_corrupt.csv").exists());
    assert_eq!(
        fs::read_to_string(out.join("3_weather.csv")).unwrap(),
        "Time,AirTemp,Rainfall\n00:00:30.000,25.1,False\n00:01:30.000,25.30,False\n"
    );

    let summary: BatchSummary = results.into_iter().collect();
    assert_eq!(summary.transformed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn laps_table_is_normalized() {
    let tree = make_tree(&[("2024/Bahrain/R/laps_data.csv", LAPS)]);

    let results = run(&tree.input, &tree.output);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rows(), 3);

    let transformed =
        fs::read_to_string(tree.output.join("2024/Bahrain/R/laps_data.csv")).unwrap();
    insta::assert_snapshot!("laps_data", transformed.trim_end());

    let reports = results[0].columns();
    let kinds: Vec<(&str, ColumnKind)> = reports
        .iter()
        .map(|report| (report.column.as_str(), report.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("LapTime", ColumnKind::Duration),
            ("Sector1Time", ColumnKind::Duration),
            ("Time", ColumnKind::AbsoluteTime),
            ("PitInTime", ColumnKind::AbsoluteTime),
        ]
    );
    assert_eq!((reports[0].parsed, reports[0].missing), (2, 1));
    assert_eq!((reports[1].parsed, reports[1].rejected), (2, 1));
    assert_eq!(results[0].unparseable_cells(), 5);
}

#[test]
fn row_count_and_passthrough_columns_are_preserved() {
    let tree = make_tree(&[("laps_data.csv", LAPS)]);
    run(&tree.input, &tree.output);

    let transformed = fs::read_to_string(tree.output.join("laps_data.csv")).unwrap();
    assert_eq!(transformed.lines().count(), LAPS.lines().count());
    for passthrough in [0, 1, 6] {
        assert_eq!(column(&transformed, passthrough), column(LAPS, passthrough));
    }
}

#[test]
fn rerunning_on_output_is_a_no_op() {
    let tree = make_tree(&[
        ("2024/Bahrain/R/laps_data.csv", LAPS),
        ("2024/Bahrain/R/weather.csv", WEATHER),
    ]);
    let second = tree.output.with_file_name("second");

    run(&tree.input, &tree.output);
    let results = run(&tree.output, &second);

    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(!result.is_failure());
        let first = fs::read_to_string(&result.input).unwrap();
        let again = fs::read_to_string(second.join(&result.relative)).unwrap();
        assert_eq!(first, again, "{}", result.relative.display());
    }
}

#[test]
fn unclassified_table_is_copied_with_a_warning() {
    let tree = make_tree(&[("drivers.csv", DRIVERS)]);

    let results = run(&tree.input, &tree.output);

    assert_eq!(results.len(), 1);
    assert!(results[0].is_warning());
    assert!(!results[0].is_failure());
    assert_eq!(
        fs::read_to_string(tree.output.join("drivers.csv")).unwrap(),
        DRIVERS
    );
    let summary: BatchSummary = results.into_iter().collect();
    assert_eq!(summary.no_classified_columns, 1);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn mixed_time_references_are_flagged_not_coerced() {
    let tree = make_tree(&[(
        "event_info.csv",
        "EventName,EventDate\nBahrain,2024-03-02\nSaudi Arabia,2024-03-09T17:00:00+03:00\n",
    )]);

    let results = run(&tree.input, &tree.output);
    let report = &results[0].columns()[0];

    assert_eq!(report.column, "EventDate");
    assert_eq!(
        report.issues,
        vec![ColumnIssue::MixedTimeReference { naive: 1, utc: 1 }]
    );
    assert_eq!(
        fs::read_to_string(tree.output.join("event_info.csv")).unwrap(),
        "EventName,EventDate\nBahrain,2024-03-02T00:00:00.000\nSaudi Arabia,2024-03-09T14:00:00.000Z\n"
    );
}

#[test]
fn batch_is_lazy() {
    let tree = make_tree(&[
        ("a/weather.csv", WEATHER),
        ("b/weather.csv", WEATHER),
    ]);
    let mut batch = run_batch(&BatchConfig::new(&tree.input, &tree.output)).unwrap();

    let first = batch.next().unwrap();
    assert_eq!(first.relative, PathBuf::from("a/weather.csv"));
    assert!(tree.output.join("a/weather.csv").is_file());
    assert!(!tree.output.join("b/weather.csv").exists());

    assert!(batch.next().is_some());
    assert!(batch.next().is_none());
}

#[test]
fn other_extensions_are_ignored() {
    let tree = make_tree(&[
        ("weather.csv", WEATHER),
        ("README.md", "# notes\n"),
    ]);

    let results = run(&tree.input, &tree.output);

    assert_eq!(results.len(), 1);
    assert!(!tree.output.join("README.md").exists());
}

#[test]
fn single_file_transform_matches_batch() {
    let tree = make_tree(&[("2024/Monaco/R/weather.csv", WEATHER)]);
    let config = BatchConfig::new(&tree.input, &tree.output);

    let result = transform_file(&config, &tree.input.join("2024/Monaco/R/weather.csv"));

    assert_eq!(result.relative, PathBuf::from("2024/Monaco/R/weather.csv"));
    assert_eq!(result.rows(), 2);
    assert!(tree.output.join("2024/Monaco/R/weather.csv").is_file());
}

#[test]
fn unwritable_destination_fails_and_batch_continues() {
    let tree = make_tree(&[("a.csv", WEATHER), ("b.csv", WEATHER)]);
    // A directory where the output file should go.
    fs::create_dir_all(tree.output.join("a.csv")).unwrap();

    let results = run(&tree.input, &tree.output);

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0].failure(), Some(FileFailure::Write(_))));
    assert!(tree.output.join("a.csv").is_dir());
    assert!(!results[1].is_failure());
    assert!(tree.output.join("b.csv").is_file());

    let summary: BatchSummary = results.into_iter().collect();
    assert_eq!((summary.transformed, summary.failed), (1, 1));
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn duplicate_header_fails_at_load() {
    let tree = make_tree(&[
        ("laps_data.csv", "Driver,LapTime,LapTime\nVER,01:23:456,bogus\n"),
        ("weather.csv", WEATHER),
    ]);

    let results = run(&tree.input, &tree.output);

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0].failure(), Some(FileFailure::Load(_))));
    assert!(!tree.output.join("laps_data.csv").exists());
    assert!(!results[1].is_failure());
}
