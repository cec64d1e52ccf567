use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ratecalc — tiered rate calculator.
#[derive(Parser, Debug)]
#[command(name = "ratecalc", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Table selection; falls back to RATECALC_TABLE / RATECALC_PRESET.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Built-in rate sheet (standard, partner, channel)
    #[arg(long, global = true, conflicts_with = "table")]
    pub preset: Option<String>,

    /// JSON tier table file
    #[arg(long, global = true)]
    pub table: Option<PathBuf>,

    /// Sort table files by limit before validating (--table and `check`)
    #[arg(long, global = true)]
    pub sort: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve amounts (from arguments, or one per line on stdin)
    Quote(QuoteArgs),

    /// Print the active tier table
    Table(TableArgs),

    /// Validate a JSON tier table file
    Check(CheckArgs),

    /// List the built-in rate sheets
    Presets,
}

/// Arguments for the `quote` subcommand.
#[derive(Parser, Debug)]
pub struct QuoteArgs {
    /// Amounts to price; reads stdin when omitted
    #[arg(allow_negative_numbers = true)]
    pub amounts: Vec<String>,

    /// Output as JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `table` subcommand.
#[derive(Parser, Debug)]
pub struct TableArgs {
    /// Output as JSON instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Table file to validate
    pub path: PathBuf,
}
