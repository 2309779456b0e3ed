//! Flat monthly add-ons: support tier and QuickBooks Online subscription.

use crate::config::PricingConfig;
use crate::domain::{PricingInput, QboBreakdown, ServiceFee, ServiceTierBreakdown};

/// Support tier surcharge. Only charged alongside a recurring service.
///
/// A missing or unrecognized tier is billed as the tier with the smallest
/// configured add-on.
pub fn service_tier_fee(input: &PricingInput, config: &PricingConfig) -> ServiceFee<ServiceTierBreakdown> {
    if !input.has_recurring_service() {
        return ServiceFee::excluded();
    }
    let tier = input
        .profile
        .service_tier
        .unwrap_or_else(|| config.service_tiers.cheapest());
    let addon = config.service_tiers.addon(tier);
    ServiceFee {
        monthly_fee: addon,
        setup_fee: 0.0,
        breakdown: ServiceTierBreakdown {
            tier,
            monthly_addon: addon,
        },
    }
}

pub fn qbo_fee(input: &PricingInput, config: &PricingConfig) -> ServiceFee<QboBreakdown> {
    if !input.qbo_subscription {
        return ServiceFee::excluded();
    }
    ServiceFee {
        monthly_fee: config.qbo.monthly_fee,
        setup_fee: 0.0,
        breakdown: QboBreakdown { subscribed: true },
    }
}
