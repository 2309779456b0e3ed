//! Command-line parsing for the `quote` binary.
//!
//! Parsing and dispatch live here and in `app`; pricing stays in `engine`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "quote", version, about = "Combined service-fee quote calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quote one form snapshot and print the itemized breakdown.
    Price(PriceArgs),
    /// Quote a JSON-lines file of snapshots (one object per line) in parallel.
    Batch(BatchArgs),
    /// Print the effective rate table as JSON.
    Config(ConfigArgs),
}

/// Rate-table and date options shared by the quoting commands.
#[derive(Debug, Args, Clone)]
pub struct PricingArgs {
    /// Rate table JSON. Falls back to $QUOTE_PRICING_CONFIG, then built-in rates.
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Quote date (YYYY-MM-DD). A snapshot's own `asOfDate` takes precedence.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct PriceArgs {
    /// Form snapshot JSON (a single object).
    #[arg(short, long, value_name = "JSON")]
    pub input: PathBuf,

    #[command(flatten)]
    pub pricing: PricingArgs,

    /// Print the full breakdown as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Write the full breakdown JSON to a file.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Write per-service line items to CSV.
    #[arg(long = "export-lines", value_name = "CSV")]
    pub export_lines: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// JSON-lines file of form snapshots.
    #[arg(short, long, value_name = "JSONL")]
    pub input: PathBuf,

    #[command(flatten)]
    pub pricing: PricingArgs,

    /// Write one breakdown JSON object per line. Prints a summary table otherwise.
    #[arg(short, long, value_name = "JSONL")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    /// Rate table JSON. Falls back to $QUOTE_PRICING_CONFIG, then built-in rates.
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,
}
