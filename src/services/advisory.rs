//! One-time engagements: agent of service and CFO advisory deposits.

use crate::config::PricingConfig;
use crate::domain::{
    AgentOfServiceBreakdown, CfoAdvisoryBreakdown, CfoAdvisoryType, PricingInput, ServiceFee,
};

/// `base + additionalStates × perState + (complex ? complexFee : 0)`.
pub fn agent_of_service_fee(
    input: &PricingInput,
    config: &PricingConfig,
) -> ServiceFee<AgentOfServiceBreakdown> {
    let agent = &input.agent_of_service;
    if !agent.included {
        return ServiceFee::excluded();
    }

    let rates = &config.agent_of_service;
    let state_fee = agent.additional_states as f64 * rates.per_additional_state;
    let complex_case_fee = if agent.complex_case {
        rates.complex_case_fee
    } else {
        0.0
    };

    ServiceFee {
        monthly_fee: 0.0,
        setup_fee: rates.base_fee + state_fee + complex_case_fee,
        breakdown: AgentOfServiceBreakdown {
            base_fee: rates.base_fee,
            additional_states: agent.additional_states,
            state_fee,
            complex_case: agent.complex_case,
            complex_case_fee,
        },
    }
}

/// Deposit collected up front for CFO advisory work.
///
/// A missing or unrecognized advisory type is priced as whichever of the
/// pay-as-you-go deposit and the matching bundle costs less (ties go to
/// pay-as-you-go).
pub fn cfo_advisory_fee(input: &PricingInput, config: &PricingConfig) -> ServiceFee<CfoAdvisoryBreakdown> {
    let cfo = &input.cfo_advisory;
    if !cfo.included {
        return ServiceFee::excluded();
    }

    let rates = &config.cfo_advisory;
    let bundle = rates.bundle(cfo.bundle_hours);
    let pay_as_you_go = CfoAdvisoryBreakdown {
        advisory_type: CfoAdvisoryType::PayAsYouGo,
        bundle_hours: None,
        deposit: rates.pay_as_you_go_deposit,
    };
    let bundled = CfoAdvisoryBreakdown {
        advisory_type: CfoAdvisoryType::Bundled,
        bundle_hours: bundle.map(|b| b.hours),
        deposit: bundle.map_or(0.0, |b| b.price),
    };

    let breakdown = match cfo.advisory_type {
        Some(CfoAdvisoryType::PayAsYouGo) => pay_as_you_go,
        Some(CfoAdvisoryType::Bundled) => bundled,
        None if bundled.deposit < pay_as_you_go.deposit => bundled,
        None => pay_as_you_go,
    };

    ServiceFee {
        monthly_fee: 0.0,
        setup_fee: breakdown.deposit,
        breakdown,
    }
}
