//! Formatted terminal output.
//!
//! Everything here renders from a finished `FeeBreakdown`; no fee is ever
//! recomputed for display.

use chrono::NaiveDate;

use crate::config::ConfigSource;
use crate::domain::{ApArBreakdown, ApArTier, CfoAdvisoryType, FeeBreakdown, ServiceFee};

/// Header plus the itemized fee table and totals.
pub fn format_summary(breakdown: &FeeBreakdown, as_of: NaiveDate, source: &ConfigSource) -> String {
    let mut out = String::new();

    out.push_str("=== quote - Combined Service Fees ===\n");
    out.push_str(&format!("As-of: {as_of}\n"));
    out.push_str(&format!("Rates: {source}\n\n"));

    out.push_str(&format!("{:<16} {:>12} {:>12}\n", "service", "monthly", "setup"));
    out.push_str(&format!("{:-<16} {:-<12} {:-<12}\n", "", "", ""));
    for item in breakdown.line_items() {
        if item.monthly_fee == 0.0 && item.setup_fee == 0.0 {
            continue;
        }
        out.push_str(&format!(
            "{:<16} {:>12} {:>12}\n",
            item.service,
            money(item.monthly_fee),
            money(item.setup_fee)
        ));
    }
    out.push_str(&format!("{:-<16} {:-<12} {:-<12}\n", "", "", ""));
    out.push_str(&format!(
        "{:<16} {:>12} {:>12}\n",
        "total",
        money(breakdown.combined.monthly_fee),
        money(breakdown.combined.setup_fee)
    ));

    out
}

/// Step-by-step formula lines for every included service.
pub fn format_breakdown(breakdown: &FeeBreakdown) -> String {
    let mut out = String::new();
    out.push_str("How this quote was calculated:\n");

    let bk = &breakdown.bookkeeping;
    if breakdown.includes_bookkeeping {
        let b = &bk.breakdown;
        out.push_str("\nBookkeeping\n");
        out.push_str(&format!(
            "  ({} base + {} transactions [{}]) x {} revenue [{}] x {} industry [{}] = {}\n",
            money(b.base_fee),
            money(b.transaction_upcharge),
            band(&b.transaction_band, b.transaction_band_fallback),
            mult(b.revenue_multiplier),
            band(&b.revenue_band, b.revenue_band_fallback),
            mult(b.industry_multiplier),
            band(&b.industry, b.industry_fallback),
            money(b.monthly_before_discount),
        ));
        if b.bundle_discount_amount > 0.0 {
            out.push_str(&format!(
                "  - {:.0}% bundle discount with TaaS: -{} = {}/mo\n",
                b.bundle_discount_pct * 100.0,
                money(b.bundle_discount_amount),
                money(bk.monthly_fee),
            ));
        }
        match (b.custom_setup_fee, b.setup_month) {
            (Some(custom), _) => out.push_str(&format!(
                "  setup: custom {} (prorated would be {}){}\n",
                money(custom),
                money(b.prorated_setup_fee),
                b.override_reason
                    .as_deref()
                    .map(|r| format!(", reason: {r}"))
                    .unwrap_or_default(),
            )),
            (None, 0) => out.push_str("  setup: none (existing client)\n"),
            (None, month) => out.push_str(&format!(
                "  setup: month {month} x {} base x {} = {}\n",
                money(b.base_fee),
                b.setup_proration_factor,
                money(b.prorated_setup_fee),
            )),
        }
    }

    let cleanup = &breakdown.cleanup;
    if cleanup.setup_fee > 0.0 || !cleanup.breakdown.excluded_current_year.is_empty() {
        let b = &cleanup.breakdown;
        out.push_str("\nCleanup (one-time)\n");
        out.push_str(&format!(
            "  {} months x {} [{}] = {}\n",
            b.billable_months,
            money(b.per_month_rate),
            band(&b.complexity, b.complexity_fallback),
            money(cleanup.setup_fee),
        ));
        if !b.excluded_current_year.is_empty() {
            let months: Vec<String> = b.excluded_current_year.iter().map(ToString::to_string).collect();
            out.push_str(&format!(
                "  not billed (covered by bookkeeping setup): {}\n",
                months.join(", ")
            ));
        }
    }

    if breakdown.includes_taas {
        let b = &breakdown.taas.breakdown;
        out.push_str("\nTax-as-a-Service\n");
        out.push_str(&format!(
            "  {} base + {} entities + {} states + {} international + {} owners + {} quality [{}] + {} 1040s = {}\n",
            money(b.base_fee),
            money(b.entity_upcharge),
            money(b.state_upcharge),
            money(b.international_upcharge),
            money(b.owner_upcharge),
            money(b.bookkeeping_quality_upcharge),
            band(&b.bookkeeping_quality, b.bookkeeping_quality_fallback),
            money(b.personal_1040_upcharge),
            money(b.subtotal),
        ));
        out.push_str(&format!(
            "  x {} industry x {} revenue = {}/mo\n",
            mult(b.industry_multiplier),
            mult(b.revenue_multiplier),
            money(breakdown.taas.monthly_fee),
        ));
    }

    let prior = &breakdown.prior_years;
    if prior.setup_fee > 0.0 {
        let b = &prior.breakdown;
        let years: Vec<String> = b.years.iter().map(ToString::to_string).collect();
        out.push_str("\nPrior-year filings (one-time)\n");
        out.push_str(&format!(
            "  {} years{} x {} = {}\n",
            b.billable_years,
            if years.is_empty() {
                String::new()
            } else {
                format!(" ({})", years.join(", "))
            },
            money(b.per_year_rate),
            money(prior.setup_fee),
        ));
    }

    let payroll = &breakdown.payroll;
    if payroll.monthly_fee > 0.0 {
        let b = &payroll.breakdown;
        out.push_str("\nPayroll\n");
        out.push_str(&format!(
            "  {} base + {} extra employees ({}) + {} extra states ({}) = {}/mo\n",
            money(b.base_fee),
            b.extra_employees,
            money(b.employee_fee),
            b.extra_states,
            money(b.state_fee),
            money(payroll.monthly_fee),
        ));
    }

    push_ap_ar(&mut out, "Accounts payable", &breakdown.ap, "vendors");
    push_ap_ar(&mut out, "Accounts receivable", &breakdown.ar, "customers");

    let agent = &breakdown.agent_of_service;
    if agent.setup_fee > 0.0 {
        let b = &agent.breakdown;
        out.push_str("\nAgent of Service (one-time)\n");
        out.push_str(&format!(
            "  {} base + {} additional states ({}) + {} complex case = {}\n",
            money(b.base_fee),
            b.additional_states,
            money(b.state_fee),
            money(b.complex_case_fee),
            money(agent.setup_fee),
        ));
    }

    let cfo = &breakdown.cfo_advisory;
    if cfo.setup_fee > 0.0 {
        let b = &cfo.breakdown;
        out.push_str("\nCFO Advisory (deposit)\n");
        match (b.advisory_type, b.bundle_hours) {
            (CfoAdvisoryType::Bundled, Some(hours)) => {
                out.push_str(&format!("  {hours}-hour bundle = {}\n", money(b.deposit)));
            }
            _ => out.push_str(&format!("  pay-as-you-go deposit = {}\n", money(b.deposit))),
        }
    }

    let tier = &breakdown.service_tier;
    if tier.monthly_fee > 0.0 {
        out.push_str(&format!(
            "\n{} support tier: +{}/mo\n",
            tier.breakdown.tier.display_name(),
            money(tier.monthly_fee)
        ));
    }
    if breakdown.qbo.monthly_fee > 0.0 {
        out.push_str(&format!("\nQuickBooks Online: +{}/mo\n", money(breakdown.qbo.monthly_fee)));
    }

    let c = &breakdown.combined.breakdown;
    out.push_str("\nTotals\n");
    out.push_str(&format!(
        "  monthly {} rounded up to {} step = {} (+{})\n",
        money(c.monthly_subtotal),
        money(c.rounding_step),
        money(breakdown.combined.monthly_fee),
        money(c.rounding_adjustment),
    ));
    out.push_str(&format!("  setup {}\n", money(breakdown.combined.setup_fee)));
    if c.coerced_values > 0 {
        out.push_str(&format!("  ({} invalid amounts counted as $0.00)\n", c.coerced_values));
    }

    out
}

fn push_ap_ar(out: &mut String, title: &str, fee: &ServiceFee<ApArBreakdown>, parties: &str) {
    if fee.monthly_fee <= 0.0 {
        return;
    }
    let b = &fee.breakdown;
    let tier = match b.tier {
        ApArTier::Lite => "lite",
        ApArTier::Advanced => "advanced",
    };
    out.push_str(&format!("\n{title} ({tier})\n"));
    out.push_str(&format!(
        "  ({} base + {} volume [{}] + {} extra {parties} ({})) x {} = {}/mo\n",
        money(b.base_fee),
        money(b.volume_surcharge),
        band(&b.volume_band, b.volume_band_fallback),
        b.extra_count,
        money(b.count_surcharge),
        mult(b.tier_multiplier),
        money(fee.monthly_fee),
    ));
}

/// One row per batch quote.
pub fn format_batch_summary(breakdowns: &[FeeBreakdown]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6} {:>12} {:>12}\n", "#", "monthly", "setup"));
    out.push_str(&format!("{:-<6} {:-<12} {:-<12}\n", "", "", ""));
    for (idx, b) in breakdowns.iter().enumerate() {
        out.push_str(&format!(
            "{:>6} {:>12} {:>12}\n",
            idx + 1,
            money(b.combined.monthly_fee),
            money(b.combined.setup_fee)
        ));
    }
    let monthly: f64 = breakdowns.iter().map(|b| b.combined.monthly_fee).sum();
    let setup: f64 = breakdowns.iter().map(|b| b.combined.setup_fee).sum();
    out.push_str(&format!("{:-<6} {:-<12} {:-<12}\n", "", "", ""));
    out.push_str(&format!("{:>6} {:>12} {:>12}\n", "total", money(monthly), money(setup)));
    out
}

pub fn money(v: f64) -> String {
    format!("${v:.2}")
}

fn mult(v: f64) -> String {
    format!("{v}x")
}

/// Band label; bands billed at the lowest rate because the input was missing
/// or unrecognized are marked `(default)`.
fn band(key: &Option<String>, fallback: bool) -> String {
    let key = key.as_deref().unwrap_or("-");
    if fallback { format!("{key} (default)") } else { key.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::engine::compute_quote_at;
    use serde_json::json;

    fn march_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn bundle_quote() -> FeeBreakdown {
        let raw = json!({
            "serviceBookkeeping": true,
            "serviceTaas": true,
            "monthlyRevenueRange": "10k-50k",
            "monthlyTransactions": "100-300",
            "industry": "Real Estate",
        });
        compute_quote_at(raw.as_object().unwrap(), &PricingConfig::default(), march_2025())
    }

    #[test]
    fn summary_lists_only_charged_services() {
        let text = format_summary(&bundle_quote(), march_2025(), &ConfigSource::BuiltIn);
        assert!(text.contains("As-of: 2025-03-15"));
        assert!(text.contains("Rates: built-in"));
        assert!(text.contains("bookkeeping"));
        assert!(text.contains("taas"));
        assert!(!text.contains("payroll"));
        assert!(text.contains("$475.00"));
    }

    #[test]
    fn breakdown_shows_discount_and_rounding_steps() {
        let text = format_breakdown(&bundle_quote());
        assert!(text.contains("50% bundle discount"));
        assert!(text.contains("[real-estate]"));
        assert!(text.contains("setup: month 3"));
        assert!(text.contains("rounded up to $25.00 step = $475.00"));
        assert!(!text.contains("Payroll"));
    }

    #[test]
    fn defaulted_bands_are_marked() {
        let raw = json!({
            "serviceBookkeeping": true,
            "monthlyRevenueRange": "10k-50k",
            "monthlyTransactions": "a gazillion",
            "industry": "Real Estate",
        });
        let quote = compute_quote_at(raw.as_object().unwrap(), &PricingConfig::default(), march_2025());
        let text = format_breakdown(&quote);
        assert!(text.contains("[0-100 (default)]"));
        assert!(text.contains("[real-estate]"));
        assert!(!text.contains("[10k-50k (default)]"));
    }

    #[test]
    fn batch_summary_totals_rows() {
        let quotes = vec![bundle_quote(), FeeBreakdown::zero()];
        let text = format_batch_summary(&quotes);
        assert_eq!(text.lines().count(), 2 + 2 + 2);
        assert!(text.lines().last().unwrap().contains("$475.00"));
    }

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(412.5), "$412.50");
        assert_eq!(money(0.0), "$0.00");
    }
}
