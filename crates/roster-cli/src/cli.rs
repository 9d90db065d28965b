//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use roster_cli::config::Variant;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Personnel roster filter page generator",
    long_about = "Build a self-contained HTML page that filters personnel-change records \
                  by year and site, or run the same filter from the terminal.\n\n\
                  Inputs: .xlsx/.xlsm/.xls/.xlsb/.ods workbooks, a .csv file, a directory \
                  of .csv files, or a prebuilt .json payload."
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

    /// Log output format.
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

    /// Allow record values (names, sites, years) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the input and write the HTML page.
    Build(BuildArgs),

    /// Filter the input from the terminal and optionally export CSV.
    Query(QueryArgs),

    /// Print the year and site choices found in the input.
    Choices(ChoicesArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Workbook, CSV file, CSV directory or JSON payload.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output HTML file (default: index.html).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Filter page variant.
    #[arg(long = "variant", value_enum)]
    pub variant: Option<Variant>,

    /// Page title.
    #[arg(long = "title", value_name = "TITLE")]
    pub title: Option<String>,
}

#[derive(Parser)]
pub struct QueryArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Year to keep (repeatable; cascading accepts one).
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<String>,

    /// Site to keep (repeatable; cascading accepts one).
    #[arg(long = "site", value_name = "SITE")]
    pub sites: Vec<String>,

    #[arg(long = "variant", value_enum)]
    pub variant: Option<Variant>,

    /// Write the visible records to this CSV file.
    #[arg(long = "export", value_name = "FILE")]
    pub export: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ChoicesArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(long = "variant", value_enum)]
    pub variant: Option<Variant>,
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
