//! Built-in rate table.
//!
//! These are the list prices the quote calculator ships with. Deployments
//! override them with a JSON file (see `config::load`).

use super::*;

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            bookkeeping: BookkeepingRates::default(),
            cleanup: CleanupRates::default(),
            taas: TaasRates::default(),
            prior_years: PriorYearRates::default(),
            payroll: PayrollRates::default(),
            ap: ApArRates::payables(),
            ar: ApArRates::receivables(),
            agent_of_service: AgentOfServiceRates::default(),
            cfo_advisory: CfoAdvisoryRates::default(),
            service_tiers: ServiceTierRates::default(),
            qbo: QboRates::default(),
            multipliers: MultiplierTables::default(),
            discounts: DiscountRates::default(),
            rounding: RoundingRules::default(),
        }
    }
}

impl Default for BookkeepingRates {
    fn default() -> Self {
        Self {
            base_fee: 150.0,
            transaction_upcharges: BandTable::new(vec![
                BandEntry::new("0-100", 0.0).aka(&["<100"]),
                BandEntry::new("100-300", 100.0),
                BandEntry::new("300-600", 250.0),
                BandEntry::new("600-1000", 400.0),
                BandEntry::new("1000-2000", 650.0),
                BandEntry::new("2000+", 1000.0),
            ]),
            setup_proration_factor: 0.25,
        }
    }
}

impl Default for CleanupRates {
    fn default() -> Self {
        Self {
            per_month_rates: BandTable::new(vec![
                BandEntry::new("clean", 100.0).aka(&["low", "simple"]),
                BandEntry::new("standard", 150.0).aka(&["medium", "moderate"]),
                BandEntry::new("complex", 250.0).aka(&["high", "messy"]),
            ]),
        }
    }
}

impl Default for TaasRates {
    fn default() -> Self {
        Self {
            base_fee: 150.0,
            entities: PerUnit::new(1, 75.0),
            states: PerUnit::new(1, 50.0),
            international_fee: 200.0,
            owners: PerUnit::new(1, 25.0),
            bookkeeping_quality_upcharges: BandTable::new(vec![
                BandEntry::new("clean", 0.0).aka(&["clean-seed", "seed"]),
                BandEntry::new("outside-cpa", 25.0).aka(&["outside"]),
                BandEntry::new("not-done", 50.0).aka(&["messy", "not-done-messy"]),
            ]),
            personal_1040_rate: 25.0,
        }
    }
}

impl Default for PriorYearRates {
    fn default() -> Self {
        Self {
            per_year_rate: 1200.0,
        }
    }
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            base_fee: 100.0,
            employees: PerUnit::new(3, 12.0),
            states: PerUnit::new(1, 25.0),
        }
    }
}

impl ApArRates {
    /// Accounts payable list prices (bands are vendor bills per month).
    pub fn payables() -> Self {
        Self {
            base_fee: 150.0,
            volume_surcharges: BandTable::new(vec![
                BandEntry::new("0-25", 0.0).aka(&["<25"]),
                BandEntry::new("26-100", 100.0),
                BandEntry::new("101-250", 250.0),
                BandEntry::new("251+", 500.0),
            ]),
            per_party: PerUnit::new(5, 12.0),
            advanced_multiplier: 2.5,
        }
    }

    /// Accounts receivable list prices (bands are customer invoices per month).
    pub fn receivables() -> Self {
        Self {
            volume_surcharges: BandTable::new(vec![
                BandEntry::new("0-25", 0.0).aka(&["<25"]),
                BandEntry::new("26-100", 125.0),
                BandEntry::new("101-250", 300.0),
                BandEntry::new("251+", 600.0),
            ]),
            ..Self::payables()
        }
    }
}

impl Default for ApArRates {
    fn default() -> Self {
        Self::payables()
    }
}

impl Default for AgentOfServiceRates {
    fn default() -> Self {
        Self {
            base_fee: 150.0,
            per_additional_state: 150.0,
            complex_case_fee: 300.0,
        }
    }
}

impl Default for CfoAdvisoryRates {
    fn default() -> Self {
        Self {
            pay_as_you_go_deposit: 1750.0,
            bundles: vec![
                CfoBundle { hours: 8, price: 2400.0 },
                CfoBundle { hours: 16, price: 4560.0 },
                CfoBundle { hours: 32, price: 8640.0 },
                CfoBundle { hours: 40, price: 10400.0 },
            ],
        }
    }
}

impl Default for ServiceTierRates {
    fn default() -> Self {
        Self {
            automated: 0.0,
            guided: 79.0,
            concierge: 249.0,
        }
    }
}

impl Default for QboRates {
    fn default() -> Self {
        Self { monthly_fee: 60.0 }
    }
}

impl Default for MultiplierTables {
    fn default() -> Self {
        Self {
            revenue: BandTable::new(vec![
                BandEntry::new("<10k", 1.0).aka(&["0-10k"]),
                BandEntry::new("10k-50k", 1.5),
                BandEntry::new("50k-100k", 2.0),
                BandEntry::new("100k-250k", 3.0),
                BandEntry::new("250k-1m", 4.5),
                BandEntry::new("1m+", 6.0),
            ]),
            industry: BandTable::new(vec![
                BandEntry::new("generic", 1.0).aka(&["other"]),
                BandEntry::new("software", 1.0).aka(&["software-saas", "saas"]),
                BandEntry::new("professional-services", 1.0),
                BandEntry::new("nonprofit", 1.0),
                BandEntry::new("real-estate", 1.1),
                BandEntry::new("healthcare", 1.15),
                BandEntry::new("construction", 1.2).aka(&["construction-trades"]),
                BandEntry::new("e-commerce", 1.25).aka(&["ecommerce", "e-commerce-retail", "retail"]),
                BandEntry::new("restaurant", 1.3).aka(&["hospitality"]),
                BandEntry::new("multi-entity", 1.35).aka(&["holding-company"]),
            ]),
        }
    }
}

impl Default for DiscountRates {
    fn default() -> Self {
        Self {
            bookkeeping_taas_bundle: 0.5,
        }
    }
}

impl Default for RoundingRules {
    fn default() -> Self {
        Self { monthly_step: 25.0 }
    }
}
