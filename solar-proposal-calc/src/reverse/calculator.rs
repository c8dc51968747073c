use log::debug;
use proposal_model::{Configuration, Recommendation, ReverseCalcResult};
use std::collections::HashSet;

use crate::error::{CalcError, CalcResult, require_positive};
use crate::reverse::{cash, financing, lcoe, projection, sizing};

/// Sizes a system for a monthly budget and builds the full proposal.
///
/// Inputs and configuration are validated once, up front; no partial result
/// is returned on failure.
pub fn compute(
    client_budget: f64,
    current_tariff: f64,
    config: &Configuration,
) -> CalcResult<ReverseCalcResult> {
    validate_configuration(config)?;
    require_positive("client budget", client_budget)?;
    require_positive("current tariff", current_tariff)?;

    debug!(
        "Computing proposal for budget {:.2} at tariff {:.4}",
        client_budget, current_tariff
    );
    let recommendation = sizing::solve(client_budget, current_tariff, config)?;
    assemble(recommendation, Some(client_budget), current_tariff, config)
}

/// Builds the full proposal for a known system size and the client's current bill
pub fn compute_for_system(
    power_kwp: f64,
    monthly_bill: f64,
    current_tariff: f64,
    config: &Configuration,
) -> CalcResult<ReverseCalcResult> {
    validate_configuration(config)?;
    require_positive("system power", power_kwp)?;
    require_positive("monthly bill", monthly_bill)?;
    require_positive("current tariff", current_tariff)?;

    debug!(
        "Computing proposal for {:.3} kWp, bill {:.2} at tariff {:.4}",
        power_kwp, monthly_bill, current_tariff
    );
    let recommendation = sizing::size_system(power_kwp, monthly_bill, current_tariff, config)?;
    assemble(recommendation, None, current_tariff, config)
}

fn assemble(
    recommendation: Recommendation,
    client_budget: Option<f64>,
    current_tariff: f64,
    config: &Configuration,
) -> CalcResult<ReverseCalcResult> {
    let cash_option = cash::build_cash_option(&recommendation, config)?;
    let financing_options = financing::generate_options(&recommendation, client_budget, config)?;
    let long_term_projection = projection::project(&recommendation, current_tariff, config)?;
    let lcoe = lcoe::compare_with_grid(&recommendation, current_tariff, config)?;

    Ok(ReverseCalcResult {
        recommendation,
        cash_option,
        financing_options,
        long_term_projection,
        lcoe,
    })
}

/// Checks that the configuration keeps every calculation well defined
pub fn validate_configuration(config: &Configuration) -> CalcResult<()> {
    check_non_negative("generation yield", config.generation_yield_kwh_per_kwp_month)?;
    if !(config.cost_per_kwp.is_finite() && config.cost_per_kwp > 0.0) {
        return degenerate(format!(
            "cost per kWp must be positive, got {}",
            config.cost_per_kwp
        ));
    }
    check_range("cash discount", config.cash_discount, 0.0, 1.0)?;
    if config.cash_discount >= 1.0 {
        return degenerate("cash discount must be below 100%".to_string());
    }
    if !(config.tariff_escalation_rate.is_finite() && config.tariff_escalation_rate > -1.0) {
        return degenerate(format!(
            "tariff escalation rate must be above -100%, got {}",
            config.tariff_escalation_rate
        ));
    }
    check_range("degradation rate", config.degradation_rate, 0.0, 1.0)?;
    check_range("compensation factor", config.compensation_factor, 0.0, 1.0)?;
    if config.horizon_years == 0 {
        return degenerate("projection horizon must be at least one year".to_string());
    }

    validate_terms(config)?;
    validate_thresholds(config)?;

    let sizing = &config.sizing;
    if !(sizing.min_power_kwp.is_finite() && sizing.min_power_kwp > 0.0) {
        return degenerate(format!(
            "minimum system size must be positive, got {}",
            sizing.min_power_kwp
        ));
    }
    check_non_negative("module increment", sizing.module_increment_kwp)?;

    Ok(())
}

fn validate_terms(config: &Configuration) -> CalcResult<()> {
    if config.financing_terms.is_empty() {
        return degenerate("no financing terms are configured".to_string());
    }

    let mut seen = HashSet::new();
    for term in &config.financing_terms {
        if term.months == 0 {
            return degenerate("financing term with zero installments".to_string());
        }
        if !seen.insert(term.months) {
            return degenerate(format!("financing term of {} months is duplicated", term.months));
        }
        if !term.rate.is_valid() {
            return degenerate(format!(
                "interest rate of the {} month term is invalid",
                term.months
            ));
        }
    }

    if config.reference_term().is_none() {
        return degenerate(format!(
            "reference term of {} months is not among the offered terms",
            config.sizing.reference_term_months
        ));
    }
    Ok(())
}

fn validate_thresholds(config: &Configuration) -> CalcResult<()> {
    let good = &config.viability.good;
    let fair = &config.viability.fair;
    for (name, value) in [
        ("good deficit fraction", good.fraction_of_economy),
        ("good deficit amount", good.absolute),
        ("fair deficit fraction", fair.fraction_of_economy),
        ("fair deficit amount", fair.absolute),
    ] {
        check_non_negative(name, value)?;
    }

    // The fair limit must never fall below the good one, whatever the economy
    if fair.fraction_of_economy < good.fraction_of_economy || fair.absolute < good.absolute {
        return degenerate("fair deficit threshold is below the good one".to_string());
    }
    Ok(())
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        degenerate(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        ))
    }
}

fn check_non_negative(name: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        degenerate(format!("{} must be zero or positive, got {}", name, value))
    }
}

fn degenerate(message: String) -> CalcResult<()> {
    Err(CalcError::DegenerateConfiguration(message))
}
