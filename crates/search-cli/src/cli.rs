//! Argument definitions for `search-norm`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use search_fields::FieldCategory;
use search_model::Namespace;

#[derive(Parser)]
#[command(
    name = "search-norm",
    version,
    about = "Normalize search backend responses into canonical documents",
    long_about = "Normalize loosely-typed search backend responses into canonical documents.\n\n\
                  Field names and types come from a TOML or JSON field configuration.\n\
                  Also lists configured fields and buckets numeric values."
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
    /// Normalize a saved query response and print it as JSON.
    Normalize(NormalizeArgs),

    /// List configured fields.
    Fields(FieldsArgs),

    /// Bucket a JSON array of numbers into equal-width ranges.
    Buckets(BucketsArgs),
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Query response JSON (`{"documents": [...], ...}`).
    #[arg(value_name = "RESPONSE")]
    pub response: PathBuf,

    /// Field configuration (.toml or .json).
    #[arg(long = "fields", value_name = "CONFIG")]
    pub fields: PathBuf,

    /// Queried index as `domain:name`. Repeatable.
    #[arg(long = "namespace", value_name = "DOMAIN:NAME")]
    pub namespaces: Vec<Namespace>,

    /// Domain assigned to results from indexes nobody else owns.
    #[arg(long = "caller-domain", value_name = "DOMAIN", default_value = "")]
    pub caller_domain: String,

    /// Public index name, replacing the built-in list. Repeatable.
    #[arg(long = "public-index", value_name = "NAME")]
    pub public_indexes: Vec<String>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Field configuration (.toml or .json).
    #[arg(long = "fields", value_name = "CONFIG")]
    pub fields: PathBuf,

    /// Only fields in this category (parametric, numeric, date, boolean).
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<FieldCategory>,
}

#[derive(Parser)]
pub struct BucketsArgs {
    /// JSON array of numbers.
    #[arg(value_name = "VALUES")]
    pub values: PathBuf,

    /// Number of buckets.
    #[arg(long = "count", default_value_t = 10)]
    pub count: usize,

    /// Lower bound (default: smallest value).
    #[arg(long = "min", allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Upper bound (default: largest value).
    #[arg(long = "max", allow_negative_numbers = true)]
    pub max: Option<f64>,
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
