//! Accounts payable / accounts receivable (same rules, separate rate tables).
//!
//! ```text
//! subtotal = base + bandSurcharge + extraParties × rate
//! monthly  = subtotal × (lite ? 1 : advancedMultiplier)
//! ```
//!
//! The advanced tier is full-service, so it scales the whole subtotal rather
//! than adding a flat amount.

use crate::config::ApArRates;
use crate::domain::{ApArBreakdown, ApArInput, ApArTier, ServiceFee};

pub fn ap_ar_fee(side: &ApArInput, rates: &ApArRates) -> ServiceFee<ApArBreakdown> {
    if !side.included {
        return ServiceFee::excluded();
    }

    let band = rates.volume_surcharges.resolve(side.volume_band.as_deref());
    let effective_count = side.effective_count();
    let count_surcharge = rates.per_party.charge(effective_count);
    let subtotal = rates.base_fee + band.value + count_surcharge;
    let tier_multiplier = match side.tier {
        ApArTier::Lite => 1.0,
        ApArTier::Advanced => rates.advanced_multiplier,
    };

    ServiceFee {
        monthly_fee: subtotal * tier_multiplier,
        setup_fee: 0.0,
        breakdown: ApArBreakdown {
            tier: side.tier,
            base_fee: rates.base_fee,
            volume_band: band.key,
            volume_band_fallback: band.fallback,
            volume_surcharge: band.value,
            effective_count,
            extra_count: rates.per_party.extra_units(effective_count),
            count_surcharge,
            subtotal,
            tier_multiplier,
        },
    }
}
