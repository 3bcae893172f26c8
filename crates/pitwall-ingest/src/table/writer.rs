//! CSV writing into the output tree.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Writes `df` as CSV to `path`, creating parent directories as needed.
///
/// The table is written to a sibling staging file first and then renamed
/// over `path`, so an interrupted write never leaves a truncated table.
pub fn write_csv_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let write_error = |source: std::io::Error| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let staging = staging_path(path);
    let mut file = File::create(&staging).map_err(write_error)?;
    let written = CsvWriter::new(&mut file).include_header(true).finish(df);
    drop(file);

    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        });
    }

    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(write_error(e));
    }
    debug!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("table"));
    name.push(".partial");
    path.with_file_name(name)
}
