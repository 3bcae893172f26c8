//! Library components of the pitwall CLI.

pub mod logging;
pub mod report;
