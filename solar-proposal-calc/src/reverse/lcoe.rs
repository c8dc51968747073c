use proposal_model::{Configuration, LcoeComparison, Recommendation};

use crate::error::{CalcError, CalcResult, require_positive};
use crate::reverse::projection::{effective_generation, effective_tariff};

/// Energy produced over the horizon, following the projection's degradation curve
pub fn lifetime_generation_kwh(recommendation: &Recommendation, config: &Configuration) -> f64 {
    (0..config.horizon_years)
        .map(|year| {
            effective_generation(
                recommendation.monthly_generation_kwh,
                config.degradation_rate,
                year,
            ) * 12.0
        })
        .sum()
}

/// Levelized cost of energy: system value per kWh generated over the horizon
pub fn compute_lcoe(recommendation: &Recommendation, config: &Configuration) -> CalcResult<f64> {
    let lifetime_kwh = lifetime_generation_kwh(recommendation, config);
    if !lifetime_kwh.is_finite() || lifetime_kwh <= 0.0 {
        return Err(CalcError::DegenerateConfiguration(format!(
            "lifetime generation is {} kWh, LCOE is undefined",
            lifetime_kwh
        )));
    }
    Ok(recommendation.system_value / lifetime_kwh)
}

/// Compares the solar LCOE with the mean escalated grid tariff over the horizon
pub fn compare_with_grid(
    recommendation: &Recommendation,
    current_tariff: f64,
    config: &Configuration,
) -> CalcResult<LcoeComparison> {
    require_positive("current tariff", current_tariff)?;
    let solar_lcoe = compute_lcoe(recommendation, config)?;

    let tariff_sum: f64 = (0..config.horizon_years)
        .map(|year| effective_tariff(current_tariff, config.tariff_escalation_rate, year))
        .sum();
    let average_grid_tariff = tariff_sum / config.horizon_years as f64;

    Ok(LcoeComparison {
        solar_lcoe,
        average_grid_tariff,
        savings_per_kwh_percent: (average_grid_tariff - solar_lcoe) / average_grid_tariff * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation() -> Recommendation {
        Recommendation {
            power_kwp: 4.0,
            monthly_generation_kwh: 500.0,
            monthly_economy: 427.5,
            system_value: 12_800.0,
            reference_monthly_bill: 600.0,
            budget_constrained: false,
        }
    }

    #[test]
    fn test_lcoe_without_degradation() {
        let mut config = Configuration::default();
        config.degradation_rate = 0.0;
        let lcoe = compute_lcoe(&recommendation(), &config).unwrap();
        // 12800 / (500 * 12 * 25)
        assert!((lcoe - 12_800.0 / 150_000.0).abs() < 1e-12);
    }

    #[test]
    fn test_degradation_raises_lcoe() {
        let mut flat = Configuration::default();
        flat.degradation_rate = 0.0;
        let degraded = Configuration::default();
        assert!(
            compute_lcoe(&recommendation(), &degraded).unwrap()
                > compute_lcoe(&recommendation(), &flat).unwrap()
        );
    }

    #[test]
    fn test_zero_generation_is_degenerate() {
        let mut zero = recommendation();
        zero.monthly_generation_kwh = 0.0;
        assert!(matches!(
            compute_lcoe(&zero, &Configuration::default()),
            Err(CalcError::DegenerateConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_horizon_is_degenerate() {
        let mut config = Configuration::default();
        config.horizon_years = 0;
        assert!(compute_lcoe(&recommendation(), &config).is_err());
    }

    #[test]
    fn test_compare_with_grid() {
        let mut config = Configuration::default();
        config.tariff_escalation_rate = 0.0;
        config.degradation_rate = 0.0;
        let comparison = compare_with_grid(&recommendation(), 0.95, &config).unwrap();
        assert!((comparison.average_grid_tariff - 0.95).abs() < 1e-12);
        let expected = (0.95 - comparison.solar_lcoe) / 0.95 * 100.0;
        assert!((comparison.savings_per_kwh_percent - expected).abs() < 1e-9);
        assert!(comparison.savings_per_kwh_percent > 0.0);
    }
}
