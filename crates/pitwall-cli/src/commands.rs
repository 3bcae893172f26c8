use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use pitwall_cli::report::{RunReport, write_report};
use pitwall_core::{BatchConfig, BatchSummary, load_rules, run_batch};
use pitwall_model::{ColumnKind, ColumnPattern, ColumnRules};
use pitwall_transform::parse_text;

use crate::cli::{ParseArgs, RulesArgs, TransformArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{ParsedValue, TransformRun};

pub fn run_transform(args: &TransformArgs) -> Result<TransformRun> {
    let rules = resolve_rules(args.rules.as_deref())?;
    let config = BatchConfig::new(&args.input_root, &args.output_root)
        .with_rules(rules)
        .with_extension(&args.extension);

    let start = Instant::now();
    let batch = run_batch(&config).context("start batch")?;
    let mut summary = BatchSummary::default();
    let mut results = Vec::new();
    for result in batch {
        summary.record(&result);
        results.push(result);
    }
    info!(
        files = summary.files,
        transformed = summary.transformed,
        warnings = summary.no_classified_columns,
        failed = summary.failed,
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );

    if let Some(path) = &args.report {
        let report = RunReport {
            input_root: &config.input_root,
            output_root: &config.output_root,
            summary: &summary,
            files: &results,
        };
        write_report(path, &report)?;
    }

    Ok(TransformRun {
        input_root: config.input_root,
        output_root: config.output_root,
        results,
        summary,
        report: args.report.clone(),
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rules = resolve_rules(args.rules.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Pattern"),
        header_cell("Match"),
        header_cell("Kind"),
    ]);
    apply_table_style(&mut table);
    for (index, rule) in rules.rules().iter().enumerate() {
        let matching = match rule.pattern {
            ColumnPattern::Exact(_) => "exact",
            ColumnPattern::Prefix(_) => "prefix",
        };
        table.add_row(vec![
            (index + 1).to_string(),
            rule.pattern.to_string(),
            matching.to_string(),
            rule.kind.to_string(),
        ]);
    }
    println!("{table}");
    println!("Columns matching no rule are left untouched.");
    Ok(())
}

pub fn run_parse(args: &ParseArgs) -> Vec<ParsedValue> {
    let kind = ColumnKind::from(args.kind);
    args.values
        .iter()
        .map(|raw| {
            let outcome = match parse_text(kind, Some(raw.as_str())) {
                Some(Ok(value)) => Ok(value.to_string()),
                Some(Err(reason)) => Err(reason.to_string()),
                None => Err("passthrough".to_string()),
            };
            ParsedValue {
                raw: raw.clone(),
                outcome,
            }
        })
        .collect()
}

fn resolve_rules(path: Option<&Path>) -> Result<ColumnRules> {
    match path {
        Some(path) => load_rules(path).context("load rules"),
        None => Ok(ColumnRules::default()),
    }
}
