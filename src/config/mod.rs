//! Pricing configuration (the rate table).
//!
//! A `PricingConfig` is an immutable snapshot passed explicitly to every quote.
//! The engine never caches or mutates it, and there is no global rate table:
//! callers obtain one (built-in default, JSON file, settings service, ...) and
//! hand it in.
//!
//! Every section deserializes with defaults, so a JSON file only needs to list
//! the rates it overrides.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::ServiceTier;

mod defaults;
pub mod load;
pub mod tables;

pub use load::*;
pub use tables::*;

/// Reasons a rate table is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("rate table `{0}` has no entries")]
    EmptyTable(&'static str),

    #[error("rate `{field}` must be finite and non-negative, got {value}")]
    InvalidRate { field: String, value: f64 },

    #[error("bundle discount must be within [0, 1], got {0}")]
    InvalidDiscount(f64),

    #[error("monthly rounding step must be finite and positive, got {0}")]
    InvalidRoundingStep(f64),

    #[error("failed to read pricing config '{path}': {message}")]
    Read { path: PathBuf, message: String },

    #[error("invalid pricing config JSON in '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/// Full rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    pub bookkeeping: BookkeepingRates,
    pub cleanup: CleanupRates,
    pub taas: TaasRates,
    pub prior_years: PriorYearRates,
    pub payroll: PayrollRates,
    #[serde(deserialize_with = "ApArRates::deserialize_payables")]
    pub ap: ApArRates,
    #[serde(deserialize_with = "ApArRates::deserialize_receivables")]
    pub ar: ApArRates,
    pub agent_of_service: AgentOfServiceRates,
    pub cfo_advisory: CfoAdvisoryRates,
    pub service_tiers: ServiceTierRates,
    pub qbo: QboRates,
    pub multipliers: MultiplierTables,
    pub discounts: DiscountRates,
    pub rounding: RoundingRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookkeepingRates {
    pub base_fee: f64,
    /// Monthly upcharge keyed by `monthlyTransactions` band.
    pub transaction_upcharges: BandTable,
    /// Setup fee = month-of-year × base fee × this factor.
    pub setup_proration_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CleanupRates {
    /// Per-month cleanup rate keyed by `cleanupComplexity`.
    pub per_month_rates: BandTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaasRates {
    pub base_fee: f64,
    pub entities: PerUnit,
    pub states: PerUnit,
    pub international_fee: f64,
    pub owners: PerUnit,
    pub bookkeeping_quality_upcharges: BandTable,
    /// Charged per business owner when personal 1040s are included.
    pub personal_1040_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriorYearRates {
    pub per_year_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollRates {
    pub base_fee: f64,
    pub employees: PerUnit,
    pub states: PerUnit,
}

/// Shared shape for accounts payable and accounts receivable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApArRates {
    pub base_fee: f64,
    /// Surcharge keyed by the monthly bills/invoices volume band.
    pub volume_surcharges: BandTable,
    /// Surcharge per vendor/customer beyond the included count.
    pub per_party: PerUnit,
    /// Applied to `(base + surcharges)` for the advanced (full-service) tier.
    pub advanced_multiplier: f64,
}

/// Fields present in a partial `ap`/`ar` section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApArOverrides {
    base_fee: Option<f64>,
    volume_surcharges: Option<BandTable>,
    per_party: Option<PerUnit>,
    advanced_multiplier: Option<f64>,
}

impl ApArOverrides {
    fn apply(self, mut rates: ApArRates) -> ApArRates {
        if let Some(v) = self.base_fee {
            rates.base_fee = v;
        }
        if let Some(v) = self.volume_surcharges {
            rates.volume_surcharges = v;
        }
        if let Some(v) = self.per_party {
            rates.per_party = v;
        }
        if let Some(v) = self.advanced_multiplier {
            rates.advanced_multiplier = v;
        }
        rates
    }
}

impl ApArRates {
    // A partial section fills its gaps from its own side's list prices.
    fn deserialize_payables<'de, D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        Ok(ApArOverrides::deserialize(de)?.apply(Self::payables()))
    }

    fn deserialize_receivables<'de, D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        Ok(ApArOverrides::deserialize(de)?.apply(Self::receivables()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentOfServiceRates {
    pub base_fee: f64,
    pub per_additional_state: f64,
    pub complex_case_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfoBundle {
    pub hours: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CfoAdvisoryRates {
    pub pay_as_you_go_deposit: f64,
    pub bundles: Vec<CfoBundle>,
}

impl CfoAdvisoryRates {
    /// Bundle for the requested hours; unknown hours get the cheapest bundle.
    pub fn bundle(&self, hours: Option<u32>) -> Option<&CfoBundle> {
        if let Some(h) = hours {
            if let Some(b) = self.bundles.iter().find(|b| b.hours == h) {
                return Some(b);
            }
        }
        self.bundles.iter().fold(None, |best: Option<&CfoBundle>, b| match best {
            Some(x) if x.price <= b.price => Some(x),
            _ => Some(b),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceTierRates {
    pub automated: f64,
    pub guided: f64,
    pub concierge: f64,
}

impl ServiceTierRates {
    pub fn addon(&self, tier: ServiceTier) -> f64 {
        match tier {
            ServiceTier::Automated => self.automated,
            ServiceTier::Guided => self.guided,
            ServiceTier::Concierge => self.concierge,
        }
    }

    /// Tier with the smallest add-on. Ties go to the less involved tier.
    pub fn cheapest(&self) -> ServiceTier {
        [ServiceTier::Automated, ServiceTier::Guided, ServiceTier::Concierge]
            .into_iter()
            .fold(ServiceTier::Automated, |best, tier| {
                if self.addon(tier) < self.addon(best) { tier } else { best }
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QboRates {
    pub monthly_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiplierTables {
    /// Keyed by `monthlyRevenueRange`.
    pub revenue: BandTable,
    /// Keyed by `industry`.
    pub industry: BandTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountRates {
    /// Fraction taken off bookkeeping's monthly fee when TaaS is also included.
    pub bookkeeping_taas_bundle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundingRules {
    /// Combined monthly totals are rounded up to a multiple of this.
    pub monthly_step: f64,
}

impl PricingConfig {
    /// Check that every table is populated and every rate is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tables: [(&'static str, &BandTable); 7] = [
            ("bookkeeping.transactionUpcharges", &self.bookkeeping.transaction_upcharges),
            ("cleanup.perMonthRates", &self.cleanup.per_month_rates),
            ("taas.bookkeepingQualityUpcharges", &self.taas.bookkeeping_quality_upcharges),
            ("ap.volumeSurcharges", &self.ap.volume_surcharges),
            ("ar.volumeSurcharges", &self.ar.volume_surcharges),
            ("multipliers.revenue", &self.multipliers.revenue),
            ("multipliers.industry", &self.multipliers.industry),
        ];
        for (name, table) in tables {
            if table.is_empty() {
                return Err(ConfigError::EmptyTable(name));
            }
            for entry in table.entries() {
                check_rate(&format!("{name}.{}", entry.key), entry.value)?;
            }
        }
        if self.cfo_advisory.bundles.is_empty() {
            return Err(ConfigError::EmptyTable("cfoAdvisory.bundles"));
        }
        for bundle in &self.cfo_advisory.bundles {
            check_rate(&format!("cfoAdvisory.bundles.{}h", bundle.hours), bundle.price)?;
        }

        let rates = [
            ("bookkeeping.baseFee", self.bookkeeping.base_fee),
            ("bookkeeping.setupProrationFactor", self.bookkeeping.setup_proration_factor),
            ("taas.baseFee", self.taas.base_fee),
            ("taas.entities.rate", self.taas.entities.rate),
            ("taas.states.rate", self.taas.states.rate),
            ("taas.internationalFee", self.taas.international_fee),
            ("taas.owners.rate", self.taas.owners.rate),
            ("taas.personal1040Rate", self.taas.personal_1040_rate),
            ("priorYears.perYearRate", self.prior_years.per_year_rate),
            ("payroll.baseFee", self.payroll.base_fee),
            ("payroll.employees.rate", self.payroll.employees.rate),
            ("payroll.states.rate", self.payroll.states.rate),
            ("ap.baseFee", self.ap.base_fee),
            ("ap.perParty.rate", self.ap.per_party.rate),
            ("ap.advancedMultiplier", self.ap.advanced_multiplier),
            ("ar.baseFee", self.ar.base_fee),
            ("ar.perParty.rate", self.ar.per_party.rate),
            ("ar.advancedMultiplier", self.ar.advanced_multiplier),
            ("agentOfService.baseFee", self.agent_of_service.base_fee),
            ("agentOfService.perAdditionalState", self.agent_of_service.per_additional_state),
            ("agentOfService.complexCaseFee", self.agent_of_service.complex_case_fee),
            ("cfoAdvisory.payAsYouGoDeposit", self.cfo_advisory.pay_as_you_go_deposit),
            ("serviceTiers.automated", self.service_tiers.automated),
            ("serviceTiers.guided", self.service_tiers.guided),
            ("serviceTiers.concierge", self.service_tiers.concierge),
            ("qbo.monthlyFee", self.qbo.monthly_fee),
        ];
        for (field, value) in rates {
            check_rate(field, value)?;
        }

        let discount = self.discounts.bookkeeping_taas_bundle;
        if !(discount.is_finite() && (0.0..=1.0).contains(&discount)) {
            return Err(ConfigError::InvalidDiscount(discount));
        }

        let step = self.rounding.monthly_step;
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::InvalidRoundingStep(step));
        }

        Ok(())
    }
}

fn check_rate(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        PricingConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_empty_tables() {
        let mut config = PricingConfig::default();
        config.multipliers.industry = BandTable::default();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyTable("multipliers.industry"))
        );

        let mut config = PricingConfig::default();
        config.cfo_advisory.bundles.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyTable("cfoAdvisory.bundles"))
        );
    }

    #[test]
    fn validate_rejects_bad_rates_discounts_and_steps() {
        let mut config = PricingConfig::default();
        config.payroll.base_fee = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate { ref field, .. }) if field == "payroll.baseFee"
        ));

        let mut config = PricingConfig::default();
        config.discounts.bookkeeping_taas_bundle = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDiscount(1.5)));

        let mut config = PricingConfig::default();
        config.rounding.monthly_step = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRoundingStep(0.0)));
    }

    #[test]
    fn cfo_bundle_lookup_falls_back_to_cheapest() {
        let rates = CfoAdvisoryRates::default();
        let exact = rates.bundle(Some(16)).unwrap();
        assert_eq!(exact.hours, 16);

        let cheapest = rates.bundle(Some(7)).unwrap();
        let min_price = rates.bundles.iter().map(|b| b.price).fold(f64::INFINITY, f64::min);
        assert_eq!(cheapest.price, min_price);
        assert_eq!(rates.bundle(None).unwrap().price, min_price);
    }

    #[test]
    fn partial_json_fills_remaining_sections_with_defaults() {
        let json = r#"{ "bookkeeping": { "baseFee": 200 }, "rounding": { "monthlyStep": 10 } }"#;
        let config: PricingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bookkeeping.base_fee, 200.0);
        assert_eq!(config.rounding.monthly_step, 10.0);
        assert_eq!(config.bookkeeping.setup_proration_factor, 0.25);
        assert_eq!(config.ar, ApArRates::receivables());
        config.validate().unwrap();
    }

    #[test]
    fn partial_ap_ar_sections_keep_their_own_list_prices() {
        let json = r#"{ "ar": { "baseFee": 200 }, "ap": { "advancedMultiplier": 3 } }"#;
        let config: PricingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.ar.base_fee, 200.0);
        assert_eq!(config.ar.volume_surcharges.resolve(Some("26-100")).value, 125.0);
        assert_eq!(config.ar.volume_surcharges, ApArRates::receivables().volume_surcharges);

        assert_eq!(config.ap.advanced_multiplier, 3.0);
        assert_eq!(config.ap.base_fee, 150.0);
        assert_eq!(config.ap.volume_surcharges.resolve(Some("26-100")).value, 100.0);
        config.validate().unwrap();
    }

    #[test]
    fn cheapest_tier_follows_the_configured_addons() {
        assert_eq!(ServiceTierRates::default().cheapest(), ServiceTier::Automated);

        let inverted = ServiceTierRates {
            automated: 120.0,
            guided: 40.0,
            concierge: 90.0,
        };
        assert_eq!(inverted.cheapest(), ServiceTier::Guided);

        let flat = ServiceTierRates {
            automated: 50.0,
            guided: 50.0,
            concierge: 50.0,
        };
        assert_eq!(flat.cheapest(), ServiceTier::Automated);
    }
}
