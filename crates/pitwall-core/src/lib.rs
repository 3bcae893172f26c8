//! Batch transformer.
//!
//! Walks an input tree, normalizes the classified columns of every table,
//! and writes each result to the same relative path under an output root.
//! One [`TransformResult`](pitwall_model::TransformResult) is produced per
//! file; a failing file never stops the run.
//!
//! ```ignore
//! use pitwall_core::{BatchConfig, BatchSummary, run_batch};
//!
//! let config = BatchConfig::new("data/2024", "transformed/2024");
//! let summary: BatchSummary = run_batch(&config)?.collect();
//! std::process::exit(summary.exit_code());
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod summary;

pub use batch::{BatchRun, run_batch, transform_file};
pub use config::{BatchConfig, DEFAULT_EXTENSION, load_rules, parse_rules};
pub use error::{BatchError, Result};
pub use summary::BatchSummary;
