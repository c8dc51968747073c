pub mod financing_terms;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

pub use financing_terms::{FinancingTerm, InterestRate, RateBand};

/// Commercial parameters used by every proposal calculation.
///
/// Supplied by the settings store. The calculator never falls back to
/// these defaults on its own; callers pass the configuration explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(default)]
#[ts(export, export_to = "./settings.ts")]
pub struct Configuration {
    /// kWh produced per installed kWp per month (regional constant)
    pub generation_yield_kwh_per_kwp_month: f64,
    /// Installed cost per kWp in R$
    pub cost_per_kwp: f64,
    /// Cash purchase discount as a fraction (0.08 = 8%)
    pub cash_discount: f64,
    /// Annual tariff increase as a fraction
    pub tariff_escalation_rate: f64,
    /// Annual loss of module output as a fraction
    pub degradation_rate: f64,
    /// Number of years covered by the savings projection
    pub horizon_years: u32,
    /// Share of the generated energy value credited on the bill (compensation law)
    pub compensation_factor: f64,
    /// Offered installment plans, in presentation order
    pub financing_terms: Vec<FinancingTerm>,
    /// Deficit limits used to classify financing plans
    pub viability: ViabilityThresholds,
    /// How a monthly budget is turned into a system size
    pub sizing: SizingPolicy,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            generation_yield_kwh_per_kwp_month: 125.0,
            cost_per_kwp: 3200.0,
            cash_discount: 0.08,
            tariff_escalation_rate: 0.08,
            degradation_rate: 0.006,
            horizon_years: 25,
            compensation_factor: 0.9,
            financing_terms: vec![
                FinancingTerm::fixed(12, 0.0129),
                FinancingTerm::fixed(24, 0.0139),
                FinancingTerm::fixed(36, 0.0149),
                FinancingTerm::fixed(48, 0.0159),
                FinancingTerm::fixed(60, 0.0169),
            ],
            viability: ViabilityThresholds::default(),
            sizing: SizingPolicy::default(),
        }
    }
}

impl Configuration {
    /// Looks up an offered term by its number of installments
    pub fn term(&self, months: u32) -> Option<&FinancingTerm> {
        self.financing_terms.iter().find(|term| term.months == months)
    }

    /// Term used to turn a monthly budget into an affordable system value
    pub fn reference_term(&self) -> Option<&FinancingTerm> {
        self.term(self.sizing.reference_term_months)
    }
}

/// A monthly deficit limit: `max(fraction_of_economy * economy, absolute)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./settings.ts")]
pub struct DeficitThreshold {
    /// Deficit allowed relative to the monthly economy
    pub fraction_of_economy: f64,
    /// Deficit allowed in R$ regardless of the economy
    pub absolute: f64,
}

impl DeficitThreshold {
    pub fn new(fraction_of_economy: f64, absolute: f64) -> Self {
        Self {
            fraction_of_economy,
            absolute,
        }
    }

    /// Largest deficit (R$/month) still inside this threshold
    pub fn limit(&self, monthly_economy: f64) -> f64 {
        (self.fraction_of_economy * monthly_economy.max(0.0)).max(self.absolute)
    }
}

/// Limits separating `good` from `fair` and `fair` from `poor` plans
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(default)]
#[ts(export, export_to = "./settings.ts")]
pub struct ViabilityThresholds {
    pub good: DeficitThreshold,
    pub fair: DeficitThreshold,
}

impl Default for ViabilityThresholds {
    fn default() -> Self {
        Self {
            good: DeficitThreshold::new(0.10, 50.0),
            fair: DeficitThreshold::new(0.30, 150.0),
        }
    }
}

/// Budget inversion settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(default)]
#[ts(export, export_to = "./settings.ts")]
pub struct SizingPolicy {
    /// Installment count of the plan the budget is assumed to pay for
    pub reference_term_months: u32,
    /// Smallest system ever recommended, in kWp
    pub min_power_kwp: f64,
    /// Commercial module granularity in kWp; 0 disables rounding
    pub module_increment_kwp: f64,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            reference_term_months: 36,
            min_power_kwp: 1.0,
            module_increment_kwp: 0.55,
        }
    }
}
