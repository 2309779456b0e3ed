//! Bundle discount, value coercion, and combined totals.

use tracing::debug;

use crate::config::PricingConfig;
use crate::domain::FeeBreakdown;

/// Tolerance, in steps, below which an amount counts as an exact multiple.
const STEP_EPSILON: f64 = 1e-9;

/// Round up to the next multiple of `step`.
///
/// Any real remainder, even a fraction of a cent, costs a full step. Only
/// float noise within `STEP_EPSILON` steps of a multiple (e.g.
/// `300.0000000001`) is absorbed. A non-positive or non-finite step leaves
/// the cent-rounded amount as is.
pub fn round_up_to_step(amount: f64, step: f64) -> f64 {
    if !(step.is_finite() && step > 0.0) {
        return round_cents(amount);
    }
    let steps = (amount / step - STEP_EPSILON).ceil();
    if steps <= 0.0 { 0.0 } else { steps * step }
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Fill in `fees.combined` from the per-service results.
///
/// Order matters: bad service values are zeroed first so the discount and
/// the sums only ever see finite, non-negative amounts.
pub fn aggregate(fees: &mut FeeBreakdown, config: &PricingConfig) {
    let coerced_values = coerce_service_amounts(fees);

    let bundle = fees.includes_bookkeeping && fees.includes_taas;
    if bundle {
        apply_bundle_discount(fees, config.discounts.bookkeeping_taas_bundle);
    }

    let (monthly, setup) = fees
        .line_items()
        .iter()
        .fold((0.0, 0.0), |(m, s), item| (m + item.monthly_fee, s + item.setup_fee));

    let step = config.rounding.monthly_step;
    let monthly_subtotal = round_cents(monthly);
    let monthly_fee = round_up_to_step(monthly, step);

    let combined = &mut fees.combined;
    combined.monthly_fee = monthly_fee;
    combined.setup_fee = setup;
    combined.breakdown.monthly_subtotal = monthly_subtotal;
    combined.breakdown.rounding_step = step;
    combined.breakdown.rounding_adjustment = round_cents(monthly_fee - monthly_subtotal);
    combined.breakdown.bundle_discount_applied = bundle;
    combined.breakdown.coerced_values = coerced_values;
}

/// Bookkeeping monthly × (1 − pct). TaaS and every other service are untouched.
fn apply_bundle_discount(fees: &mut FeeBreakdown, pct: f64) {
    let bk = &mut fees.bookkeeping;
    let amount = bk.monthly_fee * pct;
    bk.monthly_fee -= amount;
    bk.breakdown.bundle_discount_pct = pct;
    bk.breakdown.bundle_discount_amount = amount;
}

/// Replace non-finite or negative service amounts with 0. Returns how many.
fn coerce_service_amounts(fees: &mut FeeBreakdown) -> u32 {
    let amounts: [(&str, &mut f64, &mut f64); 11] = [
        ("bookkeeping", &mut fees.bookkeeping.monthly_fee, &mut fees.bookkeeping.setup_fee),
        ("cleanup", &mut fees.cleanup.monthly_fee, &mut fees.cleanup.setup_fee),
        ("taas", &mut fees.taas.monthly_fee, &mut fees.taas.setup_fee),
        ("priorYears", &mut fees.prior_years.monthly_fee, &mut fees.prior_years.setup_fee),
        ("payroll", &mut fees.payroll.monthly_fee, &mut fees.payroll.setup_fee),
        ("ap", &mut fees.ap.monthly_fee, &mut fees.ap.setup_fee),
        ("ar", &mut fees.ar.monthly_fee, &mut fees.ar.setup_fee),
        (
            "agentOfService",
            &mut fees.agent_of_service.monthly_fee,
            &mut fees.agent_of_service.setup_fee,
        ),
        ("cfoAdvisory", &mut fees.cfo_advisory.monthly_fee, &mut fees.cfo_advisory.setup_fee),
        ("serviceTier", &mut fees.service_tier.monthly_fee, &mut fees.service_tier.setup_fee),
        ("qbo", &mut fees.qbo.monthly_fee, &mut fees.qbo.setup_fee),
    ];

    let mut coerced = 0;
    for (service, monthly, setup) in amounts {
        for (kind, value) in [("monthly", monthly), ("setup", setup)] {
            if !value.is_finite() || *value < 0.0 {
                debug!(service, kind, value = *value, "service amount coerced to 0");
                *value = 0.0;
                coerced += 1;
            }
        }
    }
    coerced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_next_step() {
        assert_eq!(round_up_to_step(412.5, 25.0), 425.0);
        assert_eq!(round_up_to_step(400.0, 25.0), 400.0);
        assert_eq!(round_up_to_step(400.01, 25.0), 425.0);
        assert_eq!(round_up_to_step(0.0, 25.0), 0.0);
    }

    #[test]
    fn float_noise_does_not_cost_a_step() {
        assert_eq!(round_up_to_step(300.000_000_000_1, 25.0), 300.0);
        assert_eq!(round_up_to_step(0.1 + 0.2 + 299.7, 25.0), 300.0);
    }

    #[test]
    fn sub_cent_remainder_still_rounds_up() {
        assert_eq!(round_up_to_step(300.004, 25.0), 325.0);
        assert_eq!(round_up_to_step(0.001, 25.0), 25.0);

        let mut fees = FeeBreakdown::zero();
        fees.payroll.monthly_fee = 300.004;
        aggregate(&mut fees, &PricingConfig::default());
        assert_eq!(fees.combined.breakdown.monthly_subtotal, 300.0);
        assert_eq!(fees.combined.monthly_fee, 325.0);
        assert!(fees.combined.monthly_fee >= fees.payroll.monthly_fee);
    }

    #[test]
    fn invalid_step_keeps_cents() {
        assert_eq!(round_up_to_step(12.346, 0.0), 12.35);
        assert_eq!(round_up_to_step(12.344, f64::NAN), 12.34);
    }

    #[test]
    fn discount_applies_to_bookkeeping_only() {
        let mut fees = FeeBreakdown::zero();
        fees.includes_bookkeeping = true;
        fees.includes_taas = true;
        fees.bookkeeping.monthly_fee = 300.0;
        fees.taas.monthly_fee = 150.0;

        aggregate(&mut fees, &PricingConfig::default());
        assert_eq!(fees.bookkeeping.monthly_fee, 150.0);
        assert_eq!(fees.bookkeeping.breakdown.bundle_discount_amount, 150.0);
        assert_eq!(fees.taas.monthly_fee, 150.0);
        assert_eq!(fees.combined.monthly_fee, 300.0);
        assert!(fees.combined.breakdown.bundle_discount_applied);
    }

    #[test]
    fn bad_values_count_as_zero() {
        let mut fees = FeeBreakdown::zero();
        fees.payroll.monthly_fee = f64::NAN;
        fees.ap.monthly_fee = 200.0;
        fees.cleanup.setup_fee = -50.0;
        fees.agent_of_service.setup_fee = f64::INFINITY;
        fees.cfo_advisory.setup_fee = 1750.0;

        aggregate(&mut fees, &PricingConfig::default());
        assert_eq!(fees.combined.monthly_fee, 200.0);
        assert_eq!(fees.combined.setup_fee, 1750.0);
        assert_eq!(fees.combined.breakdown.coerced_values, 3);
        assert_eq!(fees.payroll.monthly_fee, 0.0);
    }

    #[test]
    fn setup_total_is_not_rounded() {
        let mut fees = FeeBreakdown::zero();
        fees.bookkeeping.setup_fee = 112.5;
        fees.cleanup.setup_fee = 200.0;
        aggregate(&mut fees, &PricingConfig::default());
        assert_eq!(fees.combined.setup_fee, 312.5);
        assert_eq!(fees.combined.monthly_fee, 0.0);
    }
}
