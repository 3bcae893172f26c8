//! Column-wise normalization of a loaded table.
//!
//! Classified columns are rewritten in place with the canonical text of each
//! parsed value; cells that do not parse become null. Column order, column
//! names, and the frame height are unchanged, and passthrough columns are not
//! touched at all.

use polars::prelude::*;
use tracing::{debug, warn};

use pitwall_model::{ColumnKind, ColumnReport, ColumnRules, RawCell};

use crate::dispatch::parse_cell;
use crate::error::{Result, TransformError};

/// Rewrites every column that `rules` classifies.
///
/// Returns one report per rewritten column, in column order. An empty
/// result means the table had no classified columns.
pub fn transform_frame(df: &mut DataFrame, rules: &ColumnRules) -> Result<Vec<ColumnReport>> {
    let classified: Vec<(String, ColumnKind)> = df
        .get_column_names()
        .into_iter()
        .filter_map(|name| {
            let kind = rules.classify(name.as_str());
            kind.is_classified().then(|| (name.to_string(), kind))
        })
        .collect();

    let mut reports = Vec::with_capacity(classified.len());
    for (name, kind) in classified {
        reports.push(transform_column(df, &name, kind)?);
    }
    Ok(reports)
}

/// Rewrites a single column as `kind`.
pub fn transform_column(
    df: &mut DataFrame,
    column_name: &str,
    kind: ColumnKind,
) -> Result<ColumnReport> {
    let column_error = |source: PolarsError| TransformError::Column {
        column: column_name.to_string(),
        source,
    };
    let text = df
        .column(column_name)
        .map_err(|_| TransformError::ColumnNotFound {
            column: column_name.to_string(),
        })?
        .cast(&DataType::String)
        .map_err(column_error)?;
    let values = text.str().map_err(column_error)?;

    let mut report = ColumnReport::new(column_name, kind);
    let mut builder = StringChunkedBuilder::new(column_name.into(), values.len());
    for value in values {
        let raw = RawCell::read(value);
        let Some(parsed) = parse_cell(kind, &raw) else {
            // Passthrough: keep the cell exactly as loaded.
            match value {
                Some(value) => builder.append_value(value),
                None => builder.append_null(),
            }
            continue;
        };
        report.record(&parsed);
        match parsed {
            Ok(normalized) => builder.append_value(normalized.to_string()),
            Err(reason) => {
                if !reason.is_missing() {
                    debug!(
                        column = column_name,
                        value = value.unwrap_or_default(),
                        %reason,
                        "unparseable cell"
                    );
                }
                builder.append_null();
            }
        }
    }

    df.with_column(builder.finish().into_series())
        .map_err(column_error)?;

    let report = report.finish();
    for issue in &report.issues {
        warn!(column = column_name, kind = %kind, %issue, "column data-quality issue");
    }
    Ok(report)
}
