//! Payroll: `base + extraEmployees × rate + extraStates × rate`, monthly only.

use crate::config::PricingConfig;
use crate::domain::{PayrollBreakdown, PricingInput, ServiceFee};

pub fn payroll_fee(input: &PricingInput, config: &PricingConfig) -> ServiceFee<PayrollBreakdown> {
    let payroll = &input.payroll;
    if !payroll.included {
        return ServiceFee::excluded();
    }

    let rates = &config.payroll;
    let employee_fee = rates.employees.charge(payroll.employee_count);
    let state_fee = rates.states.charge(payroll.state_count);

    ServiceFee {
        monthly_fee: rates.base_fee + employee_fee + state_fee,
        setup_fee: 0.0,
        breakdown: PayrollBreakdown {
            base_fee: rates.base_fee,
            employee_count: payroll.employee_count,
            extra_employees: rates.employees.extra_units(payroll.employee_count),
            employee_fee,
            state_count: payroll.state_count,
            extra_states: rates.states.extra_units(payroll.state_count),
            state_fee,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_is_monotone_in_employee_count() {
        let config = PricingConfig::default();
        let mut input = PricingInput::default();
        input.payroll.included = true;
        input.payroll.state_count = 2;

        let mut previous = 0.0;
        for employees in 1..=60 {
            input.payroll.employee_count = employees;
            let fee = payroll_fee(&input, &config).monthly_fee;
            assert!(fee >= previous, "fee dropped at {employees} employees");
            previous = fee;
        }
    }

    #[test]
    fn charges_only_beyond_included_counts() {
        let config = PricingConfig::default();
        let mut input = PricingInput::default();
        input.payroll.included = true;
        input.payroll.employee_count = 8;
        input.payroll.state_count = 3;

        let fee = payroll_fee(&input, &config);
        assert_eq!(fee.breakdown.extra_employees, 5);
        assert_eq!(fee.breakdown.employee_fee, 60.0);
        assert_eq!(fee.breakdown.state_fee, 50.0);
        assert_eq!(fee.monthly_fee, 210.0);
        assert_eq!(fee.setup_fee, 0.0);
    }
}
