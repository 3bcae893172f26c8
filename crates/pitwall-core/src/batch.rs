//! File and tree transforms.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{Span, error, info, info_span, warn};

use pitwall_ingest::{
    DiscoveredTable, IngestError, TableWalk, mirror_path, read_csv_table, walk_tables,
    write_csv_table,
};
use pitwall_model::{ColumnReport, FileFailure, FileOutcome, TransformResult};
use pitwall_transform::transform_frame;

use crate::config::BatchConfig;
use crate::error::{BatchError, Result};

/// Lazy sequence of per-file results.
///
/// Each call to `next` transforms one file. Dropping the run part-way
/// leaves every file already yielded fully written; re-running over the
/// same roots overwrites them with identical content.
pub struct BatchRun {
    config: BatchConfig,
    tables: TableWalk,
    span: Span,
}

impl Iterator for BatchRun {
    type Item = TransformResult;

    fn next(&mut self) -> Option<Self::Item> {
        let _guard = self.span.enter();
        let result = match self.tables.next()? {
            Ok(table) => transform_table(&self.config, &table),
            Err(err) => {
                let path = match &err {
                    IngestError::Walk { path, .. } => path.clone(),
                    _ => self.config.input_root.clone(),
                };
                error!(path = %path.display(), error = %err, "discovery failed");
                let relative = relative_to(&self.config.input_root, &path);
                TransformResult::failed(path, relative, FileFailure::Discover(err.to_string()))
            }
        };
        Some(result)
    }
}

/// Validates the roots and starts a lazy run over the input tree.
///
/// Fails without touching any file when the input root is missing or when
/// the output root lies inside it.
pub fn run_batch(config: &BatchConfig) -> Result<BatchRun> {
    let input = config
        .input_root
        .canonicalize()
        .map_err(|_| BatchError::InputRootNotFound {
            path: config.input_root.clone(),
        })?;
    if !input.is_dir() {
        return Err(BatchError::InputRootNotFound {
            path: config.input_root.clone(),
        });
    }

    let output = resolve(&config.output_root)?;
    if output.starts_with(&input) {
        return Err(BatchError::OutputInsideInput {
            input: config.input_root.clone(),
            output: config.output_root.clone(),
        });
    }

    let span = info_span!(
        "batch",
        input = %config.input_root.display(),
        output = %config.output_root.display()
    );
    let tables = span.in_scope(|| {
        info!(rules = config.column_rules.len(), extension = %config.extension, "starting batch");
        walk_tables(&config.input_root, &config.extension)
    })?;

    Ok(BatchRun {
        config: config.clone(),
        tables,
        span,
    })
}

/// Transforms a single file and writes it to its mirrored output path.
///
/// The path is matched against the input root after both are resolved, so
/// `./in` and `in` name the same root. Paths outside the input root are
/// mirrored by file name alone.
pub fn transform_file(config: &BatchConfig, input_path: &Path) -> TransformResult {
    let table = DiscoveredTable {
        path: input_path.to_path_buf(),
        relative: relative_to(&config.input_root, input_path),
    };
    transform_table(config, &table)
}

fn transform_table(config: &BatchConfig, table: &DiscoveredTable) -> TransformResult {
    let span = info_span!("file", path = %table.relative.display());
    let _guard = span.enter();
    let start = Instant::now();

    let fail = |failure: FileFailure| {
        error!(%failure, "file failed");
        TransformResult::failed(table.path.clone(), table.relative.clone(), failure)
    };

    let mut df = match read_csv_table(&table.path) {
        Ok(df) => df,
        Err(err) => return fail(FileFailure::Load(err.to_string())),
    };
    let rows = df.height();

    let columns = match transform_frame(&mut df, &config.column_rules) {
        Ok(columns) => columns,
        Err(err) => return fail(FileFailure::Transform(err.to_string())),
    };

    let output = mirror_path(&config.output_root, &table.relative);
    if let Err(err) = write_csv_table(&mut df, &output) {
        return fail(FileFailure::Write(err.to_string()));
    }

    let outcome = if columns.is_empty() {
        warn!(rows, "no classified columns; table copied unchanged");
        FileOutcome::NoClassifiedColumns { output, rows }
    } else {
        let unparseable: usize = columns.iter().map(ColumnReport::unparseable).sum();
        info!(
            rows,
            columns = columns.len(),
            unparseable,
            duration_ms = start.elapsed().as_millis(),
            "file transformed"
        );
        FileOutcome::Transformed {
            output,
            rows,
            columns,
        }
    };

    TransformResult {
        input: table.path.clone(),
        relative: table.relative.clone(),
        outcome,
    }
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    strip_root(root, path)
        .or_else(|| {
            let root = resolve(root).ok()?;
            let path = resolve(path).ok()?;
            strip_root(&root, &path)
        })
        .or_else(|| path.file_name().map(PathBuf::from))
        .unwrap_or_else(|| path.to_path_buf())
}

fn strip_root(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Absolute form of a path that may not exist yet.
fn resolve(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }
    // Canonicalize the closest existing ancestor so symlinked roots compare equal.
    let absolute = std::path::absolute(path).map_err(|e| BatchError::Resolve {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while let Some(parent) = existing.parent() {
        if let Some(name) = existing.file_name() {
            missing.push(name.to_os_string());
        }
        existing = parent;
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            resolved.extend(missing.iter().rev());
            return Ok(resolved);
        }
    }
    Ok(absolute)
}
