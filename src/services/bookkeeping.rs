//! Monthly bookkeeping and one-time cleanup projects.
//!
//! ```text
//! monthly = (base + txUpcharge(monthlyTransactions)) × revenueMult × industryMult
//! setup   = month(asOf) × base × prorationFactor     (new clients only)
//! cleanup = billableMonths × perMonthRate(cleanupComplexity)
//! ```
//!
//! The bundle discount is not applied here; see `engine::aggregate`.

use chrono::{Datelike, NaiveDate};

use crate::config::PricingConfig;
use crate::domain::{BookkeepingBreakdown, CleanupBreakdown, CleanupPeriod, PricingInput, ServiceFee};

pub fn bookkeeping_fee(
    input: &PricingInput,
    config: &PricingConfig,
    as_of: NaiveDate,
) -> ServiceFee<BookkeepingBreakdown> {
    let bk = &input.bookkeeping;
    if !bk.included {
        return ServiceFee::excluded();
    }

    let rates = &config.bookkeeping;
    let profile = &input.profile;
    let tx = rates
        .transaction_upcharges
        .resolve(profile.monthly_transactions.as_deref());
    let revenue = config
        .multipliers
        .revenue
        .resolve(profile.monthly_revenue_range.as_deref());
    let industry = config.multipliers.industry.resolve(profile.industry.as_deref());

    let monthly = (rates.base_fee + tx.value) * revenue.value * industry.value;

    // Onboarding setup covers the current year's catch-up work, prorated by
    // how far into the year the client starts.
    let (setup_month, prorated_setup_fee) = if bk.existing_client {
        (0, 0.0)
    } else {
        let month = as_of.month();
        (month, month as f64 * rates.base_fee * rates.setup_proration_factor)
    };

    ServiceFee {
        monthly_fee: monthly,
        setup_fee: bk.custom_setup_fee.unwrap_or(prorated_setup_fee),
        breakdown: BookkeepingBreakdown {
            base_fee: rates.base_fee,
            transaction_band: tx.key,
            transaction_band_fallback: tx.fallback,
            transaction_upcharge: tx.value,
            revenue_band: revenue.key,
            revenue_band_fallback: revenue.fallback,
            revenue_multiplier: revenue.value,
            industry: industry.key,
            industry_fallback: industry.fallback,
            industry_multiplier: industry.value,
            monthly_before_discount: monthly,
            bundle_discount_pct: 0.0,
            bundle_discount_amount: 0.0,
            setup_month,
            setup_proration_factor: rates.setup_proration_factor,
            prorated_setup_fee,
            custom_setup_fee: bk.custom_setup_fee,
            override_reason: bk.override_reason.clone(),
        },
    }
}

/// One-time cleanup fee.
///
/// When monthly bookkeeping is also selected, periods in the as-of calendar
/// year are not billed: the bookkeeping setup fee already covers them.
pub fn cleanup_fee(
    input: &PricingInput,
    config: &PricingConfig,
    as_of: NaiveDate,
) -> ServiceFee<CleanupBreakdown> {
    let bk = &input.bookkeeping;
    if !bk.cleanup_included {
        return ServiceFee::excluded();
    }

    let rate = config
        .cleanup
        .per_month_rates
        .resolve(bk.cleanup_complexity.as_deref());

    let (excluded, billable): (Vec<CleanupPeriod>, Vec<CleanupPeriod>) = bk
        .cleanup_periods
        .iter()
        .copied()
        .partition(|p| bk.included && p.year == as_of.year());

    let billable_months = if bk.cleanup_periods.is_empty() {
        bk.cleanup_months
    } else {
        billable.len() as u32
    };

    ServiceFee {
        monthly_fee: 0.0,
        setup_fee: billable_months as f64 * rate.value,
        breakdown: CleanupBreakdown {
            complexity: rate.key,
            complexity_fallback: rate.fallback,
            per_month_rate: rate.value,
            billable_periods: billable,
            excluded_current_year: excluded,
            billable_months,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn bookkeeping_input() -> PricingInput {
        let mut input = PricingInput::default();
        input.bookkeeping.included = true;
        input.profile.monthly_revenue_range = Some("10k-50k".into());
        input.profile.monthly_transactions = Some("100-300".into());
        input.profile.industry = Some("real estate".into());
        input
    }

    #[test]
    fn monthly_fee_applies_upcharge_and_multipliers() {
        let config = PricingConfig::default();
        let fee = bookkeeping_fee(&bookkeeping_input(), &config, march_2025());
        // (150 + 100) × 1.5 × 1.1
        assert!((fee.monthly_fee - 412.5).abs() < 1e-9);
        assert_eq!(fee.breakdown.industry.as_deref(), Some("real-estate"));
        assert_eq!(fee.breakdown.revenue_multiplier, 1.5);
        assert!(!fee.breakdown.transaction_band_fallback);
        assert!(!fee.breakdown.industry_fallback);
    }

    #[test]
    fn unknown_bands_are_flagged_in_the_breakdown() {
        let mut input = bookkeeping_input();
        input.profile.monthly_transactions = Some("a gazillion".into());
        input.profile.industry = None;
        let fee = bookkeeping_fee(&input, &PricingConfig::default(), march_2025());
        assert!(fee.breakdown.transaction_band_fallback);
        assert_eq!(fee.breakdown.transaction_upcharge, 0.0);
        assert!(fee.breakdown.industry_fallback);
        assert!(!fee.breakdown.revenue_band_fallback);
    }

    #[test]
    fn setup_fee_prorates_by_month_unless_overridden() {
        let config = PricingConfig::default();
        let mut input = bookkeeping_input();

        let fee = bookkeeping_fee(&input, &config, march_2025());
        assert_eq!(fee.breakdown.setup_month, 3);
        assert!((fee.setup_fee - 3.0 * 150.0 * 0.25).abs() < 1e-9);

        input.bookkeeping.custom_setup_fee = Some(0.0);
        input.bookkeeping.override_reason = Some("waived for referral".into());
        let fee = bookkeeping_fee(&input, &config, march_2025());
        assert_eq!(fee.setup_fee, 0.0);
        assert!((fee.breakdown.prorated_setup_fee - 112.5).abs() < 1e-9);
        assert_eq!(fee.breakdown.override_reason.as_deref(), Some("waived for referral"));
    }

    #[test]
    fn existing_clients_pay_no_setup() {
        let mut input = bookkeeping_input();
        input.bookkeeping.existing_client = true;
        let fee = bookkeeping_fee(&input, &PricingConfig::default(), march_2025());
        assert_eq!(fee.setup_fee, 0.0);
        assert_eq!(fee.breakdown.setup_month, 0);
    }

    #[test]
    fn excluded_bookkeeping_is_zero_even_with_fields_set() {
        let mut input = bookkeeping_input();
        input.bookkeeping.included = false;
        input.bookkeeping.custom_setup_fee = Some(999.0);
        let fee = bookkeeping_fee(&input, &PricingConfig::default(), march_2025());
        assert_eq!(fee.monthly_fee, 0.0);
        assert_eq!(fee.setup_fee, 0.0);
    }

    #[test]
    fn cleanup_bills_every_period_without_bookkeeping() {
        let mut input = PricingInput::default();
        input.bookkeeping.cleanup_included = true;
        input.bookkeeping.cleanup_complexity = Some("standard".into());
        for p in ["2024-11", "2024-12", "2025-01", "2025-02"] {
            input.bookkeeping.cleanup_periods.insert(p.parse().unwrap());
        }
        let fee = cleanup_fee(&input, &PricingConfig::default(), march_2025());
        assert_eq!(fee.breakdown.billable_months, 4);
        assert_eq!(fee.setup_fee, 600.0);
        assert_eq!(fee.monthly_fee, 0.0);
    }

    #[test]
    fn cleanup_skips_current_year_when_bookkeeping_selected() {
        let mut input = bookkeeping_input();
        input.bookkeeping.cleanup_included = true;
        for p in ["2024-11", "2024-12", "2025-01", "2025-02"] {
            input.bookkeeping.cleanup_periods.insert(p.parse().unwrap());
        }
        let fee = cleanup_fee(&input, &PricingConfig::default(), march_2025());
        assert_eq!(fee.breakdown.billable_months, 2);
        assert_eq!(fee.breakdown.excluded_current_year.len(), 2);
        // Unspecified complexity bills at the cheapest rate.
        assert!(fee.breakdown.complexity_fallback);
        assert_eq!(fee.setup_fee, 200.0);
    }

    #[test]
    fn cleanup_uses_month_count_when_no_periods() {
        let mut input = PricingInput::default();
        input.bookkeeping.cleanup_included = true;
        input.bookkeeping.cleanup_months = 3;
        input.bookkeeping.cleanup_complexity = Some("complex".into());
        let fee = cleanup_fee(&input, &PricingConfig::default(), march_2025());
        assert_eq!(fee.setup_fee, 750.0);
    }
}
