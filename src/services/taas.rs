//! Tax-as-a-Service (monthly) and prior-year filings (one-time).
//!
//! ```text
//! subtotal = base + entities + states + intl + owners + quality + 1040s
//! monthly  = subtotal × industryMult × revenueMult
//! prior    = years × perYearRate
//! ```

use crate::config::PricingConfig;
use crate::domain::{PricingInput, PriorYearsBreakdown, ServiceFee, TaasBreakdown};

pub fn taas_fee(input: &PricingInput, config: &PricingConfig) -> ServiceFee<TaasBreakdown> {
    let taas = &input.taas;
    if !taas.included {
        return ServiceFee::excluded();
    }

    let rates = &config.taas;
    let profile = &input.profile;

    let entity_upcharge = rates.entities.charge(taas.num_entities);
    let state_upcharge = rates.states.charge(taas.states_filed);
    let international_upcharge = if taas.international_filing {
        rates.international_fee
    } else {
        0.0
    };
    let owner_upcharge = rates.owners.charge(taas.num_business_owners);
    let quality = rates
        .bookkeeping_quality_upcharges
        .resolve(profile.bookkeeping_quality.as_deref());
    let personal_1040_upcharge = if taas.include_1040s {
        taas.num_business_owners as f64 * rates.personal_1040_rate
    } else {
        0.0
    };

    let subtotal = rates.base_fee
        + entity_upcharge
        + state_upcharge
        + international_upcharge
        + owner_upcharge
        + quality.value
        + personal_1040_upcharge;

    let industry = config.multipliers.industry.resolve(profile.industry.as_deref());
    let revenue = config
        .multipliers
        .revenue
        .resolve(profile.monthly_revenue_range.as_deref());

    ServiceFee {
        monthly_fee: subtotal * industry.value * revenue.value,
        setup_fee: 0.0,
        breakdown: TaasBreakdown {
            base_fee: rates.base_fee,
            entity_upcharge,
            state_upcharge,
            international_upcharge,
            owner_upcharge,
            bookkeeping_quality: quality.key,
            bookkeeping_quality_fallback: quality.fallback,
            bookkeeping_quality_upcharge: quality.value,
            personal_1040_upcharge,
            subtotal,
            industry_multiplier: industry.value,
            revenue_multiplier: revenue.value,
        },
    }
}

/// Catch-up filings for unfiled prior years.
///
/// Billed per listed year; when no years are listed the `priorYearsUnfiled`
/// count is used instead.
pub fn prior_years_fee(input: &PricingInput, config: &PricingConfig) -> ServiceFee<PriorYearsBreakdown> {
    let taas = &input.taas;
    if !taas.prior_years_included {
        return ServiceFee::excluded();
    }

    let years: Vec<i32> = taas.prior_year_filings.iter().copied().collect();
    let billable_years = if years.is_empty() {
        taas.prior_years_unfiled
    } else {
        years.len() as u32
    };
    let rate = config.prior_years.per_year_rate;

    ServiceFee {
        monthly_fee: 0.0,
        setup_fee: billable_years as f64 * rate,
        breakdown: PriorYearsBreakdown {
            years,
            billable_years,
            per_year_rate: rate,
        },
    }
}
