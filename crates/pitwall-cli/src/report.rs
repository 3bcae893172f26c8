//! JSON run report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use pitwall_core::BatchSummary;
use pitwall_model::TransformResult;

/// Everything a finished run produced, in file order.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub input_root: &'a Path,
    pub output_root: &'a Path,
    pub summary: &'a BatchSummary,
    pub files: &'a [TransformResult],
}

/// Writes `report` as pretty-printed JSON.
pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create report: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("serialize report: {}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("write report: {}", path.display()))?;
    Ok(())
}
