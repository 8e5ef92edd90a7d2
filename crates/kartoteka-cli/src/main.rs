//! Kartoteka record-card analyzer CLI.

use chrono::Local;
use clap::{ColorChoice, Parser};
use kartoteka_cli::analysis::{AnalyzeRequest, run_analysis};
use kartoteka_cli::logging::{LogConfig, LogFormat, init_logging};
use kartoteka_model::AnalysisOptions;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{AnalyzeArgs, Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_name_dictionary, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Analyze(args) => match run_analysis(&request_from_args(&args)) {
            Ok(outcome) => {
                println!("{}", kartoteka_report::format_statistics(&outcome.run.summary, outcome.reference_date));
                print_summary(&outcome);
                if outcome.run.summary.errors_count > 0 { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
        Command::Names(args) => {
            let dictionary = kartoteka_ingest::load_name_dictionary(&args.names);
            if dictionary.is_empty() {
                eprintln!("error: no usable entries in {}", args.names.display());
                1
            } else {
                print_name_dictionary(&dictionary);
                0
            }
        }
    };
    std::process::exit(exit_code);
}

fn request_from_args(args: &AnalyzeArgs) -> AnalyzeRequest {
    let options = AnalysisOptions::default()
        .with_age_range(args.age_from, args.age_to)
        .with_jubilee_window(args.jubilee_days)
        .with_marriage_years(args.marriage_year_from, args.marriage_year_to);
    let output_dir = if args.dry_run {
        None
    } else {
        Some(
            args.output_dir
                .clone()
                .unwrap_or_else(|| args.folder.join("wyniki")),
        )
    };
    AnalyzeRequest {
        folder: args.folder.clone(),
        names: args.names.clone(),
        options,
        output_dir,
        reference_date: args
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive()),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
