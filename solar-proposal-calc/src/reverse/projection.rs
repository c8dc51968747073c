use log::debug;
use proposal_model::{Configuration, LongTermProjection, ProjectionYear, Recommendation};
use serde::Serialize;

use crate::error::{CalcError, CalcResult, require_positive};

/// Escalated and flat-tariff cumulative savings for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsComparison {
    pub year: u32,
    pub escalated_cumulative: f64,
    pub flat_cumulative: f64,
}

/// Generation of a given 0-based year, per month
pub fn effective_generation(monthly_generation_kwh: f64, degradation_rate: f64, year: u32) -> f64 {
    monthly_generation_kwh * (1.0 - degradation_rate).powi(year as i32)
}

/// Tariff of a given 0-based year
pub fn effective_tariff(current_tariff: f64, escalation_rate: f64, year: u32) -> f64 {
    current_tariff * (1.0 + escalation_rate).powi(year as i32)
}

/// Year-by-year savings using the configured escalation rate
pub fn yearly_breakdown(
    recommendation: &Recommendation,
    current_tariff: f64,
    config: &Configuration,
) -> Vec<ProjectionYear> {
    breakdown_with_escalation(
        recommendation,
        current_tariff,
        config.tariff_escalation_rate,
        config,
    )
}

/// Year-by-year savings for an explicit escalation rate.
///
/// The annual economy is the degraded generation valued at the escalated
/// tariff and the compensation factor, capped by the escalated bill.
pub fn breakdown_with_escalation(
    recommendation: &Recommendation,
    current_tariff: f64,
    escalation_rate: f64,
    config: &Configuration,
) -> Vec<ProjectionYear> {
    let mut cumulative_savings = 0.0;
    (0..config.horizon_years)
        .map(|year| {
            let monthly_generation = effective_generation(
                recommendation.monthly_generation_kwh,
                config.degradation_rate,
                year,
            );
            let tariff = effective_tariff(current_tariff, escalation_rate, year);
            let bill_cap = recommendation.reference_monthly_bill
                * 12.0
                * (1.0 + escalation_rate).powi(year as i32);

            let annual_economy = (monthly_generation * 12.0 * tariff * config.compensation_factor)
                .min(bill_cap)
                .max(0.0);
            cumulative_savings += annual_economy;

            ProjectionYear {
                year,
                generation_kwh: monthly_generation * 12.0,
                tariff,
                annual_economy,
                cumulative_savings,
            }
        })
        .collect()
}

/// Projects savings over the configured horizon.
///
/// The crossover year is the first 0-based year whose cumulative savings reach
/// the system value. Payback interpolates linearly inside that year, the way
/// the cumulative sum grows within it.
pub fn project(
    recommendation: &Recommendation,
    current_tariff: f64,
    config: &Configuration,
) -> CalcResult<LongTermProjection> {
    require_positive("current tariff", current_tariff)?;
    let system_value = require_positive("system value", recommendation.system_value)?;
    if config.horizon_years == 0 {
        return Err(CalcError::DegenerateConfiguration(
            "projection horizon must be at least one year".to_string(),
        ));
    }

    let years = yearly_breakdown(recommendation, current_tariff, config);

    let mut crossover_year = None;
    let mut payback_years = None;
    let mut previous_cumulative = 0.0;
    for year in &years {
        if year.cumulative_savings >= system_value {
            crossover_year = Some(year.year);
            payback_years = Some(
                year.year as f64 + (system_value - previous_cumulative) / year.annual_economy,
            );
            break;
        }
        previous_cumulative = year.cumulative_savings;
    }

    let total_savings = years
        .last()
        .map(|year| year.cumulative_savings)
        .unwrap_or(0.0);
    let horizon_years = config.horizon_years;

    debug!(
        "Projected {:.2} over {} years, crossover {:?}",
        total_savings, horizon_years, crossover_year
    );

    Ok(LongTermProjection {
        total_savings,
        roi: (total_savings - system_value) / system_value * 100.0,
        average_annual_savings: total_savings / horizon_years as f64,
        crossover_year,
        payback_years,
        horizon_years,
    })
}

/// Cumulative savings with the configured escalation next to a flat tariff
pub fn comparison_series(
    recommendation: &Recommendation,
    current_tariff: f64,
    config: &Configuration,
) -> Vec<SavingsComparison> {
    let escalated = yearly_breakdown(recommendation, current_tariff, config);
    let flat = breakdown_with_escalation(recommendation, current_tariff, 0.0, config);
    escalated
        .iter()
        .zip(flat.iter())
        .map(|(escalated, flat)| SavingsComparison {
            year: escalated.year,
            escalated_cumulative: escalated.cumulative_savings,
            flat_cumulative: flat.cumulative_savings,
        })
        .collect()
}
