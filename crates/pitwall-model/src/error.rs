use thiserror::Error;

/// Errors raised while building a column rule table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("column pattern must not be empty")]
    EmptyPattern,
    #[error("column pattern '{pattern}' is listed more than once")]
    DuplicatePattern { pattern: String },
    #[error("column pattern '{pattern}' maps to passthrough; unmatched columns already pass through")]
    PassthroughRule { pattern: String },
}

pub type Result<T> = std::result::Result<T, RuleError>;
