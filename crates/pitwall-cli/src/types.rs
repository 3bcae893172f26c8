use std::path::PathBuf;

use pitwall_core::BatchSummary;
use pitwall_model::TransformResult;

#[derive(Debug)]
pub struct TransformRun {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub results: Vec<TransformResult>,
    pub summary: BatchSummary,
    pub report: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ParsedValue {
    pub raw: String,
    pub outcome: Result<String, String>,
}
