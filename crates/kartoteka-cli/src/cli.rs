//! CLI argument definitions for the kartoteka analyzer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "kartoteka",
    version,
    about = "Kartoteka - analysis of parish family record cards",
    long_about = "Scan a folder of family record cards, extract people and \
                  marriages, detect upcoming wedding jubilees and export \
                  statistics as CSV and text reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Analyze a folder of record cards and export the results.
    Analyze(AnalyzeArgs),
    /// List the entries of a given-name dictionary.
    Names(NamesArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Folder containing the record-card CSV files.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Given-name dictionary JSON (object of name to M/K gender code).
    #[arg(long = "names", value_name = "FILE")]
    pub names: PathBuf,

    /// Inclusive lower bound of the accepted age range.
    #[arg(long = "age-from", value_name = "YEARS", default_value_t = 0)]
    pub age_from: i64,

    /// Inclusive upper bound of the accepted age range.
    #[arg(long = "age-to", value_name = "YEARS", default_value_t = 120)]
    pub age_to: i64,

    /// Jubilee lookahead window in days.
    #[arg(long = "jubilee-days", value_name = "DAYS", default_value_t = 30)]
    pub jubilee_days: i64,

    /// Inclusive lower bound of listed marriage years.
    #[arg(long = "marriage-year-from", value_name = "YEAR", default_value_t = 1900)]
    pub marriage_year_from: i32,

    /// Inclusive upper bound of listed marriage years.
    #[arg(long = "marriage-year-to", value_name = "YEAR", default_value_t = 2100)]
    pub marriage_year_to: i32,

    /// Output directory for reports (default: <FOLDER>/wyniki).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Analyze and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Reference date for ages and jubilees (default: today).
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct NamesArgs {
    /// Given-name dictionary JSON (object of name to M/K gender code).
    #[arg(value_name = "FILE")]
    pub names: PathBuf,
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
