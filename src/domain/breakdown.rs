//! Quote output: the itemized fee breakdown.
//!
//! A `FeeBreakdown` is built fresh on every calculation. Every service is
//! always present (excluded services report zeros) so downstream readers can
//! pick fields like `combined.monthlyFee` or `bookkeeping.setupFee` without
//! checking for absence. The per-service `breakdown` records carry each
//! intermediate value, so "show your work" rendering never recomputes.

use serde::{Deserialize, Serialize};

use crate::domain::{ApArTier, CfoAdvisoryType, CleanupPeriod, ServiceTier};

/// Fees for one service plus the values that produced them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFee<B> {
    pub monthly_fee: f64,
    pub setup_fee: f64,
    pub breakdown: B,
}

impl<B: Default> ServiceFee<B> {
    /// Zero fees for a service whose flag is off.
    pub fn excluded() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookkeepingBreakdown {
    pub base_fee: f64,
    pub transaction_band: Option<String>,
    /// `*_fallback`: the band was missing or unknown and the lowest rate was used.
    pub transaction_band_fallback: bool,
    pub transaction_upcharge: f64,
    pub revenue_band: Option<String>,
    pub revenue_band_fallback: bool,
    pub revenue_multiplier: f64,
    pub industry: Option<String>,
    pub industry_fallback: bool,
    pub industry_multiplier: f64,
    pub monthly_before_discount: f64,
    pub bundle_discount_pct: f64,
    pub bundle_discount_amount: f64,
    /// Calendar month (1-12) used for setup proration; 0 when not onboarding.
    pub setup_month: u32,
    pub setup_proration_factor: f64,
    pub prorated_setup_fee: f64,
    pub custom_setup_fee: Option<f64>,
    pub override_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupBreakdown {
    pub complexity: Option<String>,
    pub complexity_fallback: bool,
    pub per_month_rate: f64,
    pub billable_periods: Vec<CleanupPeriod>,
    /// Current-year periods dropped because bookkeeping setup covers them.
    pub excluded_current_year: Vec<CleanupPeriod>,
    pub billable_months: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaasBreakdown {
    pub base_fee: f64,
    pub entity_upcharge: f64,
    pub state_upcharge: f64,
    pub international_upcharge: f64,
    pub owner_upcharge: f64,
    pub bookkeeping_quality: Option<String>,
    pub bookkeeping_quality_fallback: bool,
    pub bookkeeping_quality_upcharge: f64,
    pub personal_1040_upcharge: f64,
    pub subtotal: f64,
    pub industry_multiplier: f64,
    pub revenue_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorYearsBreakdown {
    pub years: Vec<i32>,
    pub billable_years: u32,
    pub per_year_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollBreakdown {
    pub base_fee: f64,
    pub employee_count: u32,
    pub extra_employees: u32,
    pub employee_fee: f64,
    pub state_count: u32,
    pub extra_states: u32,
    pub state_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApArBreakdown {
    pub tier: ApArTier,
    pub base_fee: f64,
    pub volume_band: Option<String>,
    pub volume_band_fallback: bool,
    pub volume_surcharge: f64,
    pub effective_count: u32,
    pub extra_count: u32,
    pub count_surcharge: f64,
    pub subtotal: f64,
    pub tier_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOfServiceBreakdown {
    pub base_fee: f64,
    pub additional_states: u32,
    pub state_fee: f64,
    pub complex_case: bool,
    pub complex_case_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfoAdvisoryBreakdown {
    pub advisory_type: CfoAdvisoryType,
    pub bundle_hours: Option<u32>,
    pub deposit: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTierBreakdown {
    pub tier: ServiceTier,
    pub monthly_addon: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QboBreakdown {
    pub subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedBreakdown {
    /// Sum of service monthly fees after discounts, before rounding.
    pub monthly_subtotal: f64,
    pub rounding_step: f64,
    pub rounding_adjustment: f64,
    pub bundle_discount_applied: bool,
    /// Service values that were non-finite or negative and counted as 0.
    pub coerced_values: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedFees {
    pub monthly_fee: f64,
    pub setup_fee: f64,
    pub breakdown: CombinedBreakdown,
}

/// One flat row per service, for tables and CSV exports.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub service: &'static str,
    pub monthly_fee: f64,
    pub setup_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub combined: CombinedFees,
    pub includes_bookkeeping: bool,
    pub includes_taas: bool,
    pub bookkeeping: ServiceFee<BookkeepingBreakdown>,
    pub cleanup: ServiceFee<CleanupBreakdown>,
    pub taas: ServiceFee<TaasBreakdown>,
    pub prior_years: ServiceFee<PriorYearsBreakdown>,
    pub payroll: ServiceFee<PayrollBreakdown>,
    pub ap: ServiceFee<ApArBreakdown>,
    pub ar: ServiceFee<ApArBreakdown>,
    pub agent_of_service: ServiceFee<AgentOfServiceBreakdown>,
    pub cfo_advisory: ServiceFee<CfoAdvisoryBreakdown>,
    pub service_tier: ServiceFee<ServiceTierBreakdown>,
    pub qbo: ServiceFee<QboBreakdown>,
}

impl FeeBreakdown {
    /// The documented all-zero result used when a quote cannot be computed.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Per-service fees in display order.
    pub fn line_items(&self) -> Vec<LineItem> {
        let row = |service, monthly_fee, setup_fee| LineItem {
            service,
            monthly_fee,
            setup_fee,
        };
        vec![
            row("bookkeeping", self.bookkeeping.monthly_fee, self.bookkeeping.setup_fee),
            row("cleanup", self.cleanup.monthly_fee, self.cleanup.setup_fee),
            row("taas", self.taas.monthly_fee, self.taas.setup_fee),
            row("priorYears", self.prior_years.monthly_fee, self.prior_years.setup_fee),
            row("payroll", self.payroll.monthly_fee, self.payroll.setup_fee),
            row("ap", self.ap.monthly_fee, self.ap.setup_fee),
            row("ar", self.ar.monthly_fee, self.ar.setup_fee),
            row("agentOfService", self.agent_of_service.monthly_fee, self.agent_of_service.setup_fee),
            row("cfoAdvisory", self.cfo_advisory.monthly_fee, self.cfo_advisory.setup_fee),
            row("serviceTier", self.service_tier.monthly_fee, self.service_tier.setup_fee),
            row("qbo", self.qbo.monthly_fee, self.qbo.setup_fee),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_breakdown_reports_every_field_numerically() {
        let zero = FeeBreakdown::zero();
        let json = serde_json::to_value(&zero).unwrap();
        assert_eq!(json["combined"]["monthlyFee"], 0.0);
        assert_eq!(json["combined"]["setupFee"], 0.0);
        assert_eq!(json["bookkeeping"]["setupFee"], 0.0);
        assert_eq!(json["agentOfService"]["monthlyFee"], 0.0);
        assert!(zero.line_items().iter().all(|l| l.monthly_fee == 0.0 && l.setup_fee == 0.0));
        assert_eq!(zero.line_items().len(), 11);
    }
}
