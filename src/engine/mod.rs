//! Quote engine entry points.
//!
//! ```text
//! raw snapshot -> normalize -> per-service calculators -> aggregate -> FeeBreakdown
//! ```
//!
//! Every entry point takes the rate table as an argument and keeps no state,
//! so quotes can be computed from any number of threads at once. The only
//! impure entry point is [`compute_quote`], which reads the local date when
//! the snapshot carries no `asOfDate`.

use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use tracing::warn;

use crate::config::{ConfigError, PricingConfig};
use crate::domain::{FeeBreakdown, PricingInput};
use crate::normalize::{RawInput, normalize};

pub mod aggregate;

/// Quote a raw snapshot, using today's date unless the snapshot sets one.
pub fn compute_quote(raw: &RawInput, config: &PricingConfig) -> FeeBreakdown {
    compute_quote_at(raw, config, Local::now().date_naive())
}

/// Quote a raw snapshot as of `today` (overridden by the snapshot's own
/// `asOfDate`).
///
/// An invalid rate table yields [`FeeBreakdown::zero`] and a warning. Use
/// [`try_compute_quote_at`] to get the error instead.
pub fn compute_quote_at(raw: &RawInput, config: &PricingConfig, today: NaiveDate) -> FeeBreakdown {
    try_compute_quote_at(raw, config, today).unwrap_or_else(|err| {
        warn!(error = %err, "invalid pricing config, returning zero quote");
        FeeBreakdown::zero()
    })
}

pub fn try_compute_quote_at(
    raw: &RawInput,
    config: &PricingConfig,
    today: NaiveDate,
) -> Result<FeeBreakdown, ConfigError> {
    config.validate()?;
    Ok(quote_input(&normalize(raw), config, today))
}

/// Quote an already-normalized input. Assumes `config` is valid.
pub fn quote_input(input: &PricingInput, config: &PricingConfig, today: NaiveDate) -> FeeBreakdown {
    let as_of = input.as_of.unwrap_or(today);
    let mut fees = crate::services::calculate_all(input, config, as_of);
    aggregate::aggregate(&mut fees, config);
    fees
}

/// Quote many snapshots in parallel. Output order matches input order.
pub fn compute_batch(raws: &[RawInput], config: &PricingConfig, today: NaiveDate) -> Vec<FeeBreakdown> {
    if let Err(err) = config.validate() {
        warn!(error = %err, count = raws.len(), "invalid pricing config, returning zero quotes");
        return vec![FeeBreakdown::zero(); raws.len()];
    }

    raws.par_iter()
        .map(|raw| quote_input(&normalize(raw), config, today))
        .collect()
}
