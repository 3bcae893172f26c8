//! CSV file validation and loading.
//!
//! Every column is read as text. Parsing cell values is the transformer's
//! job, and passthrough columns must be written back exactly as they came in.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MiB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, err: io::Error) -> IngestError {
    if err.kind() == io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects files that start with a UTF-16 byte-order mark.
///
/// A UTF-8 BOM is accepted and skipped by both readers.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Reads the header record.
///
/// Fails with [`IngestError::EmptyCsv`] when the file has no header at all,
/// with [`IngestError::NoHeaderDetected`] when every name is blank, and with
/// [`IngestError::DuplicateColumn`] when a name appears twice. Names are
/// returned as written, minus a leading UTF-8 BOM.
pub fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    let header_error = |source: csv::Error| IngestError::CsvHeader {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(header_error)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(header_error)?
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();

    if columns.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if columns.iter().all(|name| name.trim().is_empty()) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let mut seen = HashSet::with_capacity(columns.len());
    if let Some(column) = columns.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(IngestError::DuplicateColumn {
            path: path.to_path_buf(),
            column: column.clone(),
        });
    }

    Ok(columns)
}

/// Validates a CSV file and reads it into a Polars DataFrame.
///
/// All columns are loaded as `String`; empty fields load as null. The header
/// is probed with [`read_csv_header`] first, only for its checks: Polars
/// would otherwise rename a repeated column instead of failing.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;
    read_csv_header(path)?;

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_header() {
        let file = create_temp_csv(b"Driver,LapNumber,LapTime\nVER,1,01:32.456\n");
        let columns = read_csv_header(file.path()).unwrap();
        assert_eq!(columns, vec!["Driver", "LapNumber", "LapTime"]);
    }

    #[test]
    fn test_read_csv_header_with_bom() {
        let file = create_temp_csv("\u{feff}Driver,Time\nVER,14:03:07:250\n".as_bytes());
        let columns = read_csv_header(file.path()).unwrap();
        assert_eq!(columns, vec!["Driver", "Time"]);
    }

    #[test]
    fn test_read_csv_header_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_csv_header(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_header_blank_names() {
        let file = create_temp_csv(b" , \n1,2\n");
        let result = read_csv_header(file.path());
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }

    #[test]
    fn test_read_csv_header_duplicate_names() {
        let file = create_temp_csv(b"Driver,LapTime,LapTime\nVER,01:23:456,bogus\n");
        let result = read_csv_header(file.path());
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { ref column, .. }) if column == "LapTime"
        ));
    }

    #[test]
    fn test_read_csv_table_rejects_duplicate_names() {
        let file = create_temp_csv(b"Driver,LapTime,LapTime\nVER,01:23:456,bogus\n");
        let result = read_csv_table(file.path());
        assert!(matches!(result, Err(IngestError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'D', 0x00]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let file = create_temp_csv(b"Driver\nVER\n");
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 4),
            Err(IngestError::FileTooLarge { max_size: 4, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/laps_data.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_table_keeps_text() {
        let file = create_temp_csv(b"Driver,LapNumber,Interval\nVER,1,0.737\nHAM,2,\n");
        let df = read_csv_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
        let laps: Vec<Option<&str>> = df
            .column("LapNumber")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(laps, vec![Some("1"), Some("2")]);
    }
}
