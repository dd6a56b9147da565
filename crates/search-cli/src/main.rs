//! `search-norm`: search result normalization from the command line.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use search_cli::commands::{NormalizeOptions, run_buckets, run_fields, run_normalize};
use search_cli::logging::{LogConfig, LogFormat, init_logging};
use search_cli::summary::{buckets_table, details_table, fields_table, rejected_lines};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{BucketsArgs, Cli, Command, FieldsArgs, LogFormatArg, LogLevelArg, NormalizeArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    let outcome = match &cli.command {
        Command::Normalize(args) => normalize(args),
        Command::Fields(args) => fields(args),
        Command::Buckets(args) => buckets(args),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn normalize(args: &NormalizeArgs) -> Result<()> {
    let options = NormalizeOptions {
        namespaces: args.namespaces.clone(),
        caller_domain: args.caller_domain.clone(),
        public_indexes: args.public_indexes.clone(),
    };
    let results = run_normalize(&args.response, &args.fields, &options)?;
    let rendered = if args.compact {
        serde_json::to_string(&results)
    } else {
        serde_json::to_string_pretty(&results)
    }
    .context("serialize results")?;
    println!("{rendered}");
    for line in rejected_lines(&results.rejected) {
        eprintln!("{line}");
    }
    Ok(())
}

fn fields(args: &FieldsArgs) -> Result<()> {
    let fields = run_fields(&args.fields, args.category)?;
    println!("{}", fields_table(&fields));
    Ok(())
}

fn buckets(args: &BucketsArgs) -> Result<()> {
    let report = run_buckets(&args.values, args.count, args.min, args.max)?;
    println!("{}", details_table(&report.details));
    println!("{}", buckets_table(&report.buckets));
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_ansi(with_ansi);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}
