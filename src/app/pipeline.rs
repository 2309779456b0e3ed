//! Shared quoting workflow used by the CLI commands.
//!
//! load rate table -> read snapshot(s) -> normalize -> quote
//!
//! Commands then only decide how to present or export the result.

use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::cli::PricingArgs;
use crate::config::{ConfigSource, PricingConfig, load_pricing_config};
use crate::domain::FeeBreakdown;
use crate::engine::{compute_batch, quote_input};
use crate::error::AppError;
use crate::normalize::{RawInput, normalize};

/// Everything produced by `quote price`.
#[derive(Debug, Clone)]
pub struct QuoteRun {
    pub breakdown: FeeBreakdown,
    /// Effective quote date (snapshot `asOfDate`, else `--as-of`, else today).
    pub as_of: NaiveDate,
    pub source: ConfigSource,
}

/// Everything produced by `quote batch`.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub breakdowns: Vec<FeeBreakdown>,
    pub source: ConfigSource,
}

pub fn load_config(args: &PricingArgs) -> Result<(PricingConfig, ConfigSource), AppError> {
    Ok(load_pricing_config(args.config.as_deref())?)
}

fn default_date(args: &PricingArgs) -> NaiveDate {
    args.as_of.unwrap_or_else(|| Local::now().date_naive())
}

pub fn run_price(input: &Path, args: &PricingArgs) -> Result<QuoteRun, AppError> {
    let (config, source) = load_config(args)?;
    let raw = crate::io::read_snapshot(input)?;
    Ok(price_snapshot(&raw, &config, source, default_date(args)))
}

/// Quote an in-memory snapshot with an already-validated rate table.
pub fn price_snapshot(raw: &RawInput, config: &PricingConfig, source: ConfigSource, today: NaiveDate) -> QuoteRun {
    let input = normalize(raw);
    let as_of = input.as_of.unwrap_or(today);
    let breakdown = quote_input(&input, config, as_of);
    info!(
        as_of = %as_of,
        monthly = breakdown.combined.monthly_fee,
        setup = breakdown.combined.setup_fee,
        "quote computed"
    );
    QuoteRun {
        breakdown,
        as_of,
        source,
    }
}

pub fn run_batch(input: &Path, args: &PricingArgs) -> Result<BatchRun, AppError> {
    let (config, source) = load_config(args)?;
    let snapshots = crate::io::read_snapshots_jsonl(input)?;
    let breakdowns = compute_batch(&snapshots, &config, default_date(args));
    info!(count = breakdowns.len(), "batch quoted");
    Ok(BatchRun { breakdowns, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_date_wins_over_default() {
        let raw = json!({ "serviceBookkeeping": true, "asOfDate": "2025-06-01" });
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let run = price_snapshot(
            raw.as_object().unwrap(),
            &PricingConfig::default(),
            ConfigSource::BuiltIn,
            today,
        );
        assert_eq!(run.as_of, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(run.breakdown.bookkeeping.breakdown.setup_month, 6);
    }

    #[test]
    fn missing_input_file_fails_with_input_exit_code() {
        let args = PricingArgs {
            config: None,
            as_of: None,
        };
        let err = run_price(Path::new("/no/such/snapshot.json"), &args).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
