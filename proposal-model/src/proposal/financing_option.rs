use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use utoipa::ToSchema;

/// How a plan's installment compares to the bill savings it unlocks.
///
/// Variants are declared best first, so the derived ordering sorts
/// `Excellent` before `Poor`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "./proposal.ts")]
pub enum Viability {
    /// Installment fully covered by the economy
    Excellent,
    /// Small monthly deficit
    Good,
    /// Noticeable deficit, still below the upper limit
    Fair,
    /// Deficit at or over the upper limit, or installment over budget
    Poor,
}

impl Viability {
    /// All tiers, best first
    pub const ALL: [Viability; 4] = [
        Viability::Excellent,
        Viability::Good,
        Viability::Fair,
        Viability::Poor,
    ];

    /// Tiers worth presenting as a recommended plan
    pub fn is_viable(&self) -> bool {
        matches!(self, Viability::Excellent | Viability::Good)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Viability::Excellent => "excellent",
            Viability::Good => "good",
            Viability::Fair => "fair",
            Viability::Poor => "poor",
        }
    }
}

impl fmt::Display for Viability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An installment plan for the recommended system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "./proposal.ts")]
pub struct FinancingOption {
    /// Number of monthly installments
    pub installments: u32,
    /// Monthly rate applied to the financed amount
    pub monthly_rate: f64,
    pub installment_value: f64,
    /// Installment value times the number of installments
    pub total_paid: f64,
    /// Monthly economy minus installment; negative means out-of-pocket
    pub monthly_cashflow: f64,
    pub viability: Viability,
}

impl FinancingOption {
    /// Interest paid over the whole plan
    pub fn total_interest(&self, principal: f64) -> f64 {
        self.total_paid - principal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_interest() {
        let option = FinancingOption {
            installments: 36,
            monthly_rate: 0.0149,
            installment_value: 444.66,
            total_paid: 444.66 * 36.0,
            monthly_cashflow: -33.19,
            viability: Viability::Good,
        };
        assert!((option.total_interest(12_320.0) - 3687.76).abs() < 1e-6);
    }

    #[test]
    fn test_viability_order() {
        let mut tiers = vec![Viability::Poor, Viability::Excellent, Viability::Fair, Viability::Good];
        tiers.sort();
        assert_eq!(tiers, Viability::ALL.to_vec());
    }

    #[test]
    fn test_viable_tiers() {
        assert!(Viability::Excellent.is_viable());
        assert!(Viability::Good.is_viable());
        assert!(!Viability::Fair.is_viable());
        assert!(!Viability::Poor.is_viable());
    }

    #[test]
    fn test_viability_serializes_lowercase() {
        assert_eq!(Viability::Excellent.to_string(), "excellent");
        assert_eq!(Viability::Poor.label(), "poor");
    }
}
