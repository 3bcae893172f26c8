//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pitwall_core::DEFAULT_EXTENSION;
use pitwall_model::ColumnKind;

#[derive(Parser)]
#[command(
    name = "pitwall",
    version,
    about = "Normalize lap, sector and session time columns in extracted timing tables",
    long_about = "Normalize lap, sector and session time columns in extracted timing tables.\n\n\
                  Walks an input tree of CSV tables, rewrites every time-typed column into a\n\
                  canonical form, and mirrors the result into an output tree. Cells that\n\
                  cannot be parsed are written empty and counted in the summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform every table under INPUT_ROOT into OUTPUT_ROOT.
    Transform(TransformArgs),

    /// Print the effective column rule table.
    Rules(RulesArgs),

    /// Parse individual values as a given column kind.
    Parse(ParseArgs),
}

#[derive(Args)]
pub struct TransformArgs {
    /// Root of the extracted table tree.
    #[arg(value_name = "INPUT_ROOT")]
    pub input_root: PathBuf,

    /// Root of the mirrored output tree; must not lie inside INPUT_ROOT.
    #[arg(value_name = "OUTPUT_ROOT")]
    pub output_root: PathBuf,

    /// TOML rule file replacing the built-in column rules.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Extension of the table files to transform.
    #[arg(long = "extension", value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Write a JSON report of every file result.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct RulesArgs {
    /// TOML rule file to validate and print instead of the built-in rules.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

#[derive(Args)]
pub struct ParseArgs {
    /// Column kind whose grammar is applied.
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    /// Raw cell values.
    #[arg(value_name = "VALUE", required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

/// Classified column kinds accepted by `parse`.
#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Duration,
    AbsoluteTime,
    Datetime,
}

impl From<KindArg> for ColumnKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Duration => ColumnKind::Duration,
            KindArg::AbsoluteTime => ColumnKind::AbsoluteTime,
            KindArg::Datetime => ColumnKind::Datetime,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
