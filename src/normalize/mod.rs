//! Form snapshot → `PricingInput` normalization.
//!
//! This is the only place raw, loosely-typed form data is read. It:
//!
//! - resolves legacy field aliases (`aliases`)
//! - coerces strings/numbers/booleans leniently (`coerce`)
//! - applies documented defaults and minimums
//! - derives `cleanupMonths` from `cleanupPeriods`
//!
//! It never fails: absent or garbage values fall back to their defaults.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{
    AgentOfServiceInput, ApArInput, ApArTier, BookkeepingInput, BusinessProfile, CfoAdvisoryInput,
    CfoAdvisoryType, CleanupPeriod, PayrollInput, PricingInput, ServiceTier, TaasInput,
};

pub mod aliases;
pub mod coerce;

use aliases::{Flag, first_parsed, first_text, resolve_flag};
use coerce::{as_count, as_date, as_f64, as_text_list, as_year};

/// A raw form snapshot: arbitrary keys, arbitrary JSON values.
pub type RawInput = Map<String, Value>;

/// Field names for one AP/AR side.
struct ApArKeys {
    flag: Flag,
    advanced_flag: Flag,
    tier: &'static str,
    band: &'static str,
    count: &'static str,
    custom_count: &'static str,
}

const AP_KEYS: ApArKeys = ApArKeys {
    flag: Flag::Ap,
    advanced_flag: Flag::ApAdvanced,
    tier: "apServiceTier",
    band: "apVendorBillsBand",
    count: "apVendorCount",
    custom_count: "customApVendorCount",
};

const AR_KEYS: ApArKeys = ApArKeys {
    flag: Flag::Ar,
    advanced_flag: Flag::ArAdvanced,
    tier: "arServiceTier",
    band: "arCustomerInvoicesBand",
    count: "arCustomerCount",
    custom_count: "customArCustomerCount",
};

/// Normalize a raw snapshot into the canonical input.
pub fn normalize(raw: &RawInput) -> PricingInput {
    PricingInput {
        as_of: first_parsed(raw, &["asOfDate", "quoteDate"], as_date),
        profile: normalize_profile(raw),
        bookkeeping: normalize_bookkeeping(raw),
        taas: normalize_taas(raw),
        payroll: PayrollInput {
            included: resolve_flag(raw, Flag::Payroll),
            employee_count: count_at_least(raw, "payrollEmployeeCount", 1),
            state_count: count_at_least(raw, "payrollStateCount", 1),
        },
        ap: normalize_ap_ar(raw, &AP_KEYS),
        ar: normalize_ap_ar(raw, &AR_KEYS),
        agent_of_service: AgentOfServiceInput {
            included: resolve_flag(raw, Flag::AgentOfService),
            additional_states: count_at_least(raw, "agentOfServiceAdditionalStates", 0),
            complex_case: resolve_flag(raw, Flag::AgentOfServiceComplexCase),
        },
        cfo_advisory: CfoAdvisoryInput {
            included: resolve_flag(raw, Flag::CfoAdvisory),
            advisory_type: parse_choice(raw, "cfoAdvisoryType", CfoAdvisoryType::parse),
            bundle_hours: first_parsed(raw, &["cfoAdvisoryBundleHours"], as_count),
        },
        qbo_subscription: resolve_flag(raw, Flag::QboSubscription),
    }
}

fn normalize_profile(raw: &RawInput) -> BusinessProfile {
    BusinessProfile {
        monthly_revenue_range: first_text(raw, &["monthlyRevenueRange", "revenueBand"]),
        monthly_transactions: first_text(raw, &["monthlyTransactions", "transactionVolume"]),
        industry: first_text(raw, &["industry"]),
        entity_type: first_text(raw, &["entityType"]),
        service_tier: parse_choice(raw, "serviceTier", ServiceTier::parse),
        bookkeeping_quality: first_text(raw, &["bookkeepingQuality"]),
    }
}

/// Unrecognized text is left unresolved for the pricing step.
fn parse_choice<T>(raw: &RawInput, field: &'static str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let text = first_text(raw, &[field])?;
    let parsed = parse(&text);
    if parsed.is_none() {
        debug!(field, value = %text, "unknown choice, priced as the cheapest option");
    }
    parsed
}

fn normalize_bookkeeping(raw: &RawInput) -> BookkeepingInput {
    let periods = parse_cleanup_periods(raw);
    let cleanup_months = if periods.is_empty() {
        count_at_least(raw, "cleanupMonths", 0)
    } else {
        periods.len() as u32
    };

    BookkeepingInput {
        included: resolve_flag(raw, Flag::Bookkeeping),
        existing_client: resolve_flag(raw, Flag::ExistingBookkeepingClient),
        cleanup_included: resolve_flag(raw, Flag::CleanupProjects),
        cleanup_months,
        cleanup_complexity: first_text(raw, &["cleanupComplexity"]),
        cleanup_periods: periods,
        custom_setup_fee: first_parsed(raw, &["customSetupFee"], as_f64).filter(|v| *v >= 0.0),
        override_reason: first_text(raw, &["overrideReason"]),
    }
}

fn normalize_taas(raw: &RawInput) -> TaasInput {
    let prior_year_filings: BTreeSet<i32> = raw
        .get("priorYearFilings")
        .map(as_text_list)
        .unwrap_or_default()
        .iter()
        .filter_map(|y| {
            let year = as_year(y);
            if year.is_none() {
                debug!(value = %y, "dropping unparsable prior-year filing");
            }
            year
        })
        .collect();

    TaasInput {
        included: resolve_flag(raw, Flag::Taas),
        num_entities: count_at_least(raw, "numEntities", 1),
        states_filed: count_at_least(raw, "statesFiled", 1),
        international_filing: resolve_flag(raw, Flag::InternationalFiling),
        num_business_owners: count_at_least(raw, "numBusinessOwners", 1),
        include_1040s: resolve_flag(raw, Flag::Include1040s),
        prior_years_included: resolve_flag(raw, Flag::PriorYearFilings),
        prior_years_unfiled: count_at_least(raw, "priorYearsUnfiled", 0),
        prior_year_filings,
    }
}

fn normalize_ap_ar(raw: &RawInput, keys: &ApArKeys) -> ApArInput {
    let tier = match first_text(raw, &[keys.tier]) {
        Some(text) => ApArTier::parse(&text).unwrap_or_else(|| {
            debug!(field = keys.tier, value = %text, "unknown service tier, using lite");
            ApArTier::Lite
        }),
        None if resolve_flag(raw, keys.advanced_flag) => ApArTier::Advanced,
        None => ApArTier::Lite,
    };

    let selector_count = first_parsed(raw, &[keys.count], as_count)
        .map_or(ApArInput::COUNT_MIN, |c| c.clamp(ApArInput::COUNT_MIN, ApArInput::COUNT_MAX));

    ApArInput {
        included: resolve_flag(raw, keys.flag),
        tier,
        volume_band: first_text(raw, &[keys.band]),
        selector_count,
        custom_count: first_parsed(raw, &[keys.custom_count], as_count).filter(|c| *c > 0),
    }
}

fn parse_cleanup_periods(raw: &RawInput) -> BTreeSet<CleanupPeriod> {
    raw.get("cleanupPeriods")
        .map(as_text_list)
        .unwrap_or_default()
        .iter()
        .filter_map(|text| match text.parse::<CleanupPeriod>() {
            Ok(p) => Some(p),
            Err(e) => {
                debug!(error = %e, "dropping cleanup period");
                None
            }
        })
        .collect()
}

/// Count field with a floor; missing or invalid values become the floor.
fn count_at_least(raw: &RawInput, key: &str, min: u32) -> u32 {
    first_parsed(raw, &[key], as_count).map_or(min, |c| c.max(min))
}
