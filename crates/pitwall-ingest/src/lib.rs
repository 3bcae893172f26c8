//! Table ingestion for the batch transformer.
//!
//! - **Discovery**: walk an input tree for table files, in a stable order
//! - **CSV loading**: validate a file and read it with every column as text
//! - **CSV writing**: write a table to its mirrored location in the output tree
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pitwall_ingest::{mirror_path, read_csv_table, walk_tables, write_csv_table};
//!
//! for table in walk_tables(Path::new("data/2024"), "csv")? {
//!     let table = table?;
//!     let mut df = read_csv_table(&table.path)?;
//!     write_csv_table(&mut df, &mirror_path(Path::new("out"), &table.relative))?;
//! }
//! ```

mod table;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use table::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_header,
    read_csv_table, validate_encoding, write_csv_table,
};

// === File Discovery ===
pub use discovery::{DiscoveredTable, TableWalk, mirror_path, walk_tables};
