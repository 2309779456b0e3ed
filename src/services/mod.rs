//! Per-service fee calculators.
//!
//! Each calculator is a pure function of the normalized input and the rate
//! table. A calculator whose flag is off returns zeros without reading any of
//! its other fields.

pub mod addons;
pub mod advisory;
pub mod ap_ar;
pub mod bookkeeping;
pub mod payroll;
pub mod taas;

pub use addons::{qbo_fee, service_tier_fee};
pub use advisory::{agent_of_service_fee, cfo_advisory_fee};
pub use ap_ar::ap_ar_fee;
pub use bookkeeping::{bookkeeping_fee, cleanup_fee};
pub use payroll::payroll_fee;
pub use taas::{prior_years_fee, taas_fee};

use chrono::NaiveDate;

use crate::config::PricingConfig;
use crate::domain::{FeeBreakdown, PricingInput};

/// Run every calculator and collect the results.
///
/// `combined` is left zeroed; discounts and totals are applied by
/// `engine::aggregate`.
pub fn calculate_all(input: &PricingInput, config: &PricingConfig, as_of: NaiveDate) -> FeeBreakdown {
    FeeBreakdown {
        combined: Default::default(),
        includes_bookkeeping: input.bookkeeping.included,
        includes_taas: input.taas.included,
        bookkeeping: bookkeeping_fee(input, config, as_of),
        cleanup: cleanup_fee(input, config, as_of),
        taas: taas_fee(input, config),
        prior_years: prior_years_fee(input, config),
        payroll: payroll_fee(input, config),
        ap: ap_ar_fee(&input.ap, &config.ap),
        ar: ap_ar_fee(&input.ar, &config.ar),
        agent_of_service: agent_of_service_fee(input, config),
        cfo_advisory: cfo_advisory_fee(input, config),
        service_tier: service_tier_fee(input, config),
        qbo: qbo_fee(input, config),
    }
}
