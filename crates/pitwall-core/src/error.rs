//! Errors that stop a batch before any file is processed.

use std::path::PathBuf;

use pitwall_ingest::IngestError;
use pitwall_model::RuleError;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("input root not found: {path}")]
    InputRootNotFound { path: PathBuf },

    #[error("output root {output} lies inside input root {input}")]
    OutputInsideInput { input: PathBuf, output: PathBuf },

    #[error("failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read rule file {path}: {source}")]
    RulesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file {path}: {source}")]
    RulesParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid rule table in {path}: {source}")]
    Rules {
        path: PathBuf,
        #[source]
        source: RuleError,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, BatchError>;
