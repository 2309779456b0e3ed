//! Canonical, fully-typed quote input.
//!
//! Nothing in `services` ever sees the raw form record; the normalizer turns
//! it into a `PricingInput` first. Band-valued fields stay as strings here
//! because the bands themselves are defined by the rate table.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Support level surcharge applied on top of recurring services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceTier {
    #[default]
    Automated,
    Guided,
    Concierge,
}

impl ServiceTier {
    /// `None` for unrecognized text; pricing then picks the cheapest tier.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "automated" => Some(ServiceTier::Automated),
            "guided" => Some(ServiceTier::Guided),
            "concierge" => Some(ServiceTier::Concierge),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceTier::Automated => "Automated",
            ServiceTier::Guided => "Guided",
            ServiceTier::Concierge => "Concierge",
        }
    }
}

/// AP/AR service level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApArTier {
    #[default]
    Lite,
    Advanced,
}

impl ApArTier {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lite" | "basic" => Some(ApArTier::Lite),
            "advanced" | "full" | "full-service" => Some(ApArTier::Advanced),
            _ => None,
        }
    }
}

/// How CFO advisory hours are sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CfoAdvisoryType {
    #[default]
    PayAsYouGo,
    Bundled,
}

impl CfoAdvisoryType {
    /// Separators and case are ignored, so `pay_as_you_go` and
    /// `Pay-As-You-Go` both match.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "payasyougo" | "payg" => Some(CfoAdvisoryType::PayAsYouGo),
            "bundled" | "bundle" | "prepaid" | "prepaidbundle" => Some(CfoAdvisoryType::Bundled),
            _ => None,
        }
    }
}

/// A `YYYY-MM` month selected for cleanup work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CleanupPeriod {
    pub year: i32,
    pub month: u32,
}

impl FromStr for CleanupPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|_| format!("Invalid cleanup period '{s}'. Expected YYYY-MM."))?;
        Ok(Self {
            year: chrono::Datelike::year(&date),
            month: chrono::Datelike::month(&date),
        })
    }
}

impl std::fmt::Display for CleanupPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<CleanupPeriod> for String {
    fn from(value: CleanupPeriod) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CleanupPeriod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Global business profile fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusinessProfile {
    pub monthly_revenue_range: Option<String>,
    pub monthly_transactions: Option<String>,
    pub industry: Option<String>,
    pub entity_type: Option<String>,
    /// `None` when missing or unrecognized.
    pub service_tier: Option<ServiceTier>,
    pub bookkeeping_quality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookkeepingInput {
    pub included: bool,
    /// Already a bookkeeping client, so no onboarding setup fee.
    pub existing_client: bool,
    pub cleanup_included: bool,
    /// Equals `cleanup_periods.len()` whenever periods were supplied.
    pub cleanup_months: u32,
    pub cleanup_complexity: Option<String>,
    pub cleanup_periods: BTreeSet<CleanupPeriod>,
    pub custom_setup_fee: Option<f64>,
    pub override_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaasInput {
    pub included: bool,
    pub num_entities: u32,
    pub states_filed: u32,
    pub international_filing: bool,
    pub num_business_owners: u32,
    pub include_1040s: bool,
    pub prior_years_included: bool,
    pub prior_years_unfiled: u32,
    pub prior_year_filings: BTreeSet<i32>,
}

impl Default for TaasInput {
    fn default() -> Self {
        Self {
            included: false,
            num_entities: 1,
            states_filed: 1,
            international_filing: false,
            num_business_owners: 1,
            include_1040s: false,
            prior_years_included: false,
            prior_years_unfiled: 0,
            prior_year_filings: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayrollInput {
    pub included: bool,
    pub employee_count: u32,
    pub state_count: u32,
}

impl Default for PayrollInput {
    fn default() -> Self {
        Self {
            included: false,
            employee_count: 1,
            state_count: 1,
        }
    }
}

/// Accounts payable or receivable selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ApArInput {
    pub included: bool,
    pub tier: ApArTier,
    pub volume_band: Option<String>,
    /// Selector value in `COUNT_MIN..=COUNT_MAX`; the max means "10+".
    pub selector_count: u32,
    pub custom_count: Option<u32>,
}

impl ApArInput {
    pub const COUNT_MIN: u32 = 5;
    pub const COUNT_MAX: u32 = 10;

    /// Count used for pricing: the custom count when the selector is at "10+".
    ///
    /// A custom count below the selector max is lifted to it, since "10+"
    /// already promises at least ten.
    pub fn effective_count(&self) -> u32 {
        if self.selector_count >= Self::COUNT_MAX {
            self.custom_count
                .map_or(Self::COUNT_MAX, |c| c.max(Self::COUNT_MAX))
        } else {
            self.selector_count
        }
    }
}

impl Default for ApArInput {
    fn default() -> Self {
        Self {
            included: false,
            tier: ApArTier::Lite,
            volume_band: None,
            selector_count: Self::COUNT_MIN,
            custom_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgentOfServiceInput {
    pub included: bool,
    pub additional_states: u32,
    pub complex_case: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CfoAdvisoryInput {
    pub included: bool,
    /// `None` when missing or unrecognized; priced as the cheaper option.
    pub advisory_type: Option<CfoAdvisoryType>,
    pub bundle_hours: Option<u32>,
}

/// The normalized quote form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricingInput {
    /// Quote date; `None` means "today" as seen by the caller.
    pub as_of: Option<NaiveDate>,
    pub profile: BusinessProfile,
    pub bookkeeping: BookkeepingInput,
    pub taas: TaasInput,
    pub payroll: PayrollInput,
    pub ap: ApArInput,
    pub ar: ApArInput,
    pub agent_of_service: AgentOfServiceInput,
    pub cfo_advisory: CfoAdvisoryInput,
    pub qbo_subscription: bool,
}

impl PricingInput {
    /// True when any monthly (recurring) service is selected.
    pub fn has_recurring_service(&self) -> bool {
        self.bookkeeping.included
            || self.taas.included
            || self.payroll.included
            || self.ap.included
            || self.ar.included
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_period_parses_and_orders() {
        let a: CleanupPeriod = "2024-11".parse().unwrap();
        let b: CleanupPeriod = "2025-02".parse().unwrap();
        assert!(a < b);
        assert_eq!(a.to_string(), "2024-11");
        assert!("2024-13".parse::<CleanupPeriod>().is_err());
        assert!("nope".parse::<CleanupPeriod>().is_err());
    }

    #[test]
    fn cleanup_period_serializes_as_string() {
        let p = CleanupPeriod { year: 2025, month: 3 };
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"2025-03\"");
        let back: CleanupPeriod = serde_json::from_str("\"2025-03\"").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn enum_parsing_leaves_unknown_values_unresolved() {
        assert_eq!(ServiceTier::parse(" Concierge "), Some(ServiceTier::Concierge));
        assert_eq!(ServiceTier::parse("automated"), Some(ServiceTier::Automated));
        assert_eq!(ServiceTier::parse("platinum"), None);
        assert_eq!(CfoAdvisoryType::parse("Bundled"), Some(CfoAdvisoryType::Bundled));
        assert_eq!(CfoAdvisoryType::parse("pay_as_you_go"), Some(CfoAdvisoryType::PayAsYouGo));
        assert_eq!(CfoAdvisoryType::parse("Pay-As-You-Go"), Some(CfoAdvisoryType::PayAsYouGo));
        assert_eq!(CfoAdvisoryType::parse("???"), None);
        assert_eq!(ApArTier::parse("Advanced"), Some(ApArTier::Advanced));
        assert_eq!(ApArTier::parse("gold"), None);
    }

    #[test]
    fn effective_count_uses_custom_only_at_selector_max() {
        let mut ap = ApArInput {
            selector_count: 7,
            custom_count: Some(25),
            ..ApArInput::default()
        };
        assert_eq!(ap.effective_count(), 7);

        ap.selector_count = 10;
        assert_eq!(ap.effective_count(), 25);

        ap.custom_count = None;
        assert_eq!(ap.effective_count(), 10);

        ap.custom_count = Some(3);
        assert_eq!(ap.effective_count(), 10);
    }
}
