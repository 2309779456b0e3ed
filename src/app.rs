//! Top-level application orchestration.
//!
//! `src/main.rs` only installs logging and maps errors to exit codes; this
//! module is the real main that parses arguments, runs the quote pipeline,
//! prints reports, and writes optional exports.

use clap::Parser;

use crate::cli::{BatchArgs, Cli, Command, ConfigArgs, PriceArgs};
use crate::error::{AppError, EXIT_INPUT};

pub mod pipeline;

/// Entry point for the `quote` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Price(args) => handle_price(args),
        Command::Batch(args) => handle_batch(args),
        Command::Config(args) => handle_config(args),
    }
}

fn handle_price(args: PriceArgs) -> Result<(), AppError> {
    let run = pipeline::run_price(&args.input, &args.pricing)?;

    if args.json {
        println!("{}", to_pretty_json(&run.breakdown)?);
    } else {
        println!(
            "{}",
            crate::report::format_summary(&run.breakdown, run.as_of, &run.source)
        );
        println!("{}", crate::report::format_breakdown(&run.breakdown));
    }

    if let Some(path) = &args.export {
        crate::io::write_breakdown_json(path, &run.breakdown)?;
    }
    if let Some(path) = &args.export_lines {
        crate::io::write_line_items_csv(path, &run.breakdown)?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let run = pipeline::run_batch(&args.input, &args.pricing)?;

    match &args.output {
        Some(path) => {
            crate::io::write_breakdowns_jsonl(path, &run.breakdowns)?;
            eprintln!(
                "Quoted {} snapshots ({} rates) -> {}",
                run.breakdowns.len(),
                run.source,
                path.display()
            );
        }
        None => print!("{}", crate::report::format_batch_summary(&run.breakdowns)),
    }

    Ok(())
}

fn handle_config(args: ConfigArgs) -> Result<(), AppError> {
    let (config, _) = crate::config::load_pricing_config(args.config.as_deref())?;
    println!("{}", to_pretty_json(&config)?);
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to encode JSON: {e}")))
}
