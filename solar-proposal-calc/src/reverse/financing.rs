use indexmap::IndexMap;
use log::debug;
use proposal_model::settings::ViabilityThresholds;
use proposal_model::{Configuration, FinancingOption, Recommendation, Viability};

use crate::error::{CalcError, CalcResult};
use crate::general::finance::installment_for;

/// One installment plan per offered term, shortest term first.
///
/// `client_budget` is the most the client said they can pay each month;
/// plans above it are always `poor`. Pass `None` when no budget is known.
pub fn generate_options(
    recommendation: &Recommendation,
    client_budget: Option<f64>,
    config: &Configuration,
) -> CalcResult<Vec<FinancingOption>> {
    if config.financing_terms.is_empty() {
        return Err(CalcError::DegenerateConfiguration(
            "no financing terms are configured".to_string(),
        ));
    }

    let principal = recommendation.system_value;
    let mut options = Vec::with_capacity(config.financing_terms.len());
    for term in &config.financing_terms {
        if term.months == 0 {
            return Err(CalcError::DegenerateConfiguration(
                "financing term with zero installments".to_string(),
            ));
        }

        let (monthly_rate, installment_value) = installment_for(principal, &term.rate, term.months);
        let monthly_cashflow = recommendation.monthly_economy - installment_value;
        let viability = classify(
            monthly_cashflow,
            recommendation.monthly_economy,
            installment_value,
            client_budget,
            &config.viability,
        );
        debug!(
            "{} x {:.2} at {:.4} a.m.: cashflow {:.2} ({})",
            term.months, installment_value, monthly_rate, monthly_cashflow, viability
        );

        options.push(FinancingOption {
            installments: term.months,
            monthly_rate,
            installment_value,
            total_paid: installment_value * term.months as f64,
            monthly_cashflow,
            viability,
        });
    }

    options.sort_by_key(|option| option.installments);
    Ok(options)
}

/// Viability tier of a plan; the first matching rule wins:
///
/// 1. `Excellent` when the economy covers the installment (cashflow >= 0)
/// 2. `Poor` when the installment is above the client's budget
/// 3. `Good` when the deficit is within the good threshold
/// 4. `Fair` when the deficit is within the fair threshold
/// 5. `Poor` otherwise
pub fn classify(
    monthly_cashflow: f64,
    monthly_economy: f64,
    installment_value: f64,
    client_budget: Option<f64>,
    thresholds: &ViabilityThresholds,
) -> Viability {
    if monthly_cashflow >= 0.0 {
        return Viability::Excellent;
    }
    if client_budget.is_some_and(|budget| installment_value > budget) {
        return Viability::Poor;
    }

    let deficit = -monthly_cashflow;
    if deficit <= thresholds.good.limit(monthly_economy) {
        Viability::Good
    } else if deficit < thresholds.fair.limit(monthly_economy) {
        Viability::Fair
    } else {
        Viability::Poor
    }
}

/// Options grouped by tier, best tier first; every tier is present
pub fn group_by_viability(options: &[FinancingOption]) -> IndexMap<Viability, Vec<FinancingOption>> {
    let mut groups: IndexMap<Viability, Vec<FinancingOption>> = Viability::ALL
        .iter()
        .map(|viability| (*viability, Vec::new()))
        .collect();
    for option in options {
        groups
            .entry(option.viability)
            .or_default()
            .push(option.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proposal_model::settings::{FinancingTerm, InterestRate, RateBand};

    fn recommendation(system_value: f64, monthly_economy: f64) -> Recommendation {
        Recommendation {
            power_kwp: system_value / 3200.0,
            monthly_generation_kwh: system_value / 3200.0 * 125.0,
            monthly_economy,
            system_value,
            reference_monthly_bill: 500.0,
            budget_constrained: false,
        }
    }

    #[test]
    fn test_one_option_per_term_ascending() {
        let mut config = Configuration::default();
        config.financing_terms = vec![
            FinancingTerm::fixed(60, 0.0169),
            FinancingTerm::fixed(12, 0.0129),
            FinancingTerm::fixed(36, 0.0149),
        ];
        let options = generate_options(&recommendation(12_320.0, 411.47), Some(500.0), &config)
            .unwrap();
        let terms: Vec<u32> = options.iter().map(|option| option.installments).collect();
        assert_eq!(terms, vec![12, 36, 60]);
    }

    #[test]
    fn test_default_options() {
        let config = Configuration::default();
        let options = generate_options(&recommendation(12_320.0, 411.47), Some(500.0), &config)
            .unwrap();
        assert_eq!(options.len(), 5);

        // 12 x 1114 is far over the budget
        assert_eq!(options[0].viability, Viability::Poor);
        // 60 x 328 is covered by the economy
        assert_eq!(options[4].viability, Viability::Excellent);
        assert!((options[4].installment_value - 328.3).abs() < 0.5);

        for option in &options {
            assert!(
                (option.monthly_cashflow - (411.47 - option.installment_value)).abs() < 1e-9
            );
            assert!(
                (option.total_paid - option.installment_value * option.installments as f64).abs()
                    < 1e-9
            );
        }
    }

    #[test]
    fn test_tiered_rate_applied_by_principal() {
        let mut config = Configuration::default();
        config.financing_terms = vec![FinancingTerm {
            months: 24,
            rate: InterestRate::tiered(vec![
                RateBand::new(Some(10_000.0), 0.0119),
                RateBand::new(None, 0.0139),
            ]),
        }];
        let small = generate_options(&recommendation(8_000.0, 300.0), None, &config).unwrap();
        let large = generate_options(&recommendation(16_000.0, 300.0), None, &config).unwrap();
        assert_eq!(small[0].monthly_rate, 0.0119);
        assert_eq!(large[0].monthly_rate, 0.0139);
    }

    #[test]
    fn test_empty_term_table() {
        let mut config = Configuration::default();
        config.financing_terms.clear();
        assert!(matches!(
            generate_options(&recommendation(12_320.0, 411.47), None, &config),
            Err(CalcError::DegenerateConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_month_term() {
        let mut config = Configuration::default();
        config.financing_terms = vec![FinancingTerm::fixed(0, 0.01)];
        assert!(matches!(
            generate_options(&recommendation(12_320.0, 411.47), None, &config),
            Err(CalcError::DegenerateConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_cashflow_is_excellent() {
        let thresholds = ViabilityThresholds::default();
        assert_eq!(
            classify(0.0, 400.0, 400.0, Some(500.0), &thresholds),
            Viability::Excellent
        );
    }

    #[test]
    fn test_threshold_boundaries() {
        // economy 400: good limit max(40, 50) = 50, fair limit max(120, 150) = 150
        let thresholds = ViabilityThresholds::default();
        let tier = |cashflow: f64| classify(cashflow, 400.0, 400.0 - cashflow, None, &thresholds);

        assert_eq!(tier(10.0), Viability::Excellent);
        assert_eq!(tier(-50.0), Viability::Good);
        assert_eq!(tier(-50.01), Viability::Fair);
        assert_eq!(tier(-149.99), Viability::Fair);
        assert_eq!(tier(-150.0), Viability::Poor);
        assert_eq!(tier(-1000.0), Viability::Poor);
    }

    #[test]
    fn test_installment_over_budget_is_poor() {
        let thresholds = ViabilityThresholds::default();
        // small deficit, but the installment is over the stated budget
        assert_eq!(
            classify(-10.0, 490.0, 500.0, Some(495.0), &thresholds),
            Viability::Poor
        );
        assert_eq!(
            classify(-10.0, 490.0, 500.0, None, &thresholds),
            Viability::Good
        );
    }

    #[test]
    fn test_tier_never_improves_as_deficit_grows() {
        let thresholds = ViabilityThresholds::default();
        let mut previous = Viability::Excellent;
        for step in 0..2000 {
            let cashflow = 50.0 - step as f64 * 0.25;
            let tier = classify(cashflow, 400.0, 400.0 - cashflow, Some(600.0), &thresholds);
            assert!(tier >= previous, "tier improved at cashflow {}", cashflow);
            previous = tier;
        }
        assert_eq!(previous, Viability::Poor);
    }

    #[test]
    fn test_group_by_viability() {
        let config = Configuration::default();
        let options = generate_options(&recommendation(12_320.0, 411.47), Some(500.0), &config)
            .unwrap();
        let groups = group_by_viability(&options);

        let tiers: Vec<Viability> = groups.keys().copied().collect();
        assert_eq!(tiers, Viability::ALL.to_vec());
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, options.len());
        assert!(groups[&Viability::Excellent].iter().any(|option| option.installments == 60));
    }
}
