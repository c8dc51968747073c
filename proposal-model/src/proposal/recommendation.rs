use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// The system size offered to a client and the economy it unlocks.
///
/// `monthly_generation_kwh` and `system_value` are always derived from
/// `power_kwp`; `monthly_economy` never exceeds `reference_monthly_bill`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "./proposal.ts")]
pub struct Recommendation {
    /// Installed power in kWp
    pub power_kwp: f64,
    /// Expected generation in the first year, per month
    pub monthly_generation_kwh: f64,
    /// Expected bill reduction in the first year, per month (R$)
    pub monthly_economy: f64,
    /// Installed price of the system (R$)
    pub system_value: f64,
    /// Bill the economy is capped by (R$/month)
    pub reference_monthly_bill: f64,
    /// True when the budget could not pay for the smallest offered system
    pub budget_constrained: bool,
}

impl Recommendation {
    /// Share of the reference bill covered by the first-year economy, in percent
    pub fn bill_offset_percent(&self) -> f64 {
        if self.reference_monthly_bill <= 0.0 {
            return 0.0;
        }
        self.monthly_economy / self.reference_monthly_bill * 100.0
    }

    /// First-year economy over twelve months
    pub fn annual_economy(&self) -> f64 {
        self.monthly_economy * 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(monthly_economy: f64, reference_monthly_bill: f64) -> Recommendation {
        Recommendation {
            power_kwp: 3.85,
            monthly_generation_kwh: 481.25,
            monthly_economy,
            system_value: 12_320.0,
            reference_monthly_bill,
            budget_constrained: false,
        }
    }

    #[test]
    fn test_annual_economy() {
        assert!((recommendation(411.47, 500.0).annual_economy() - 4937.64).abs() < 1e-9);
    }

    #[test]
    fn test_bill_offset_percent() {
        assert!((recommendation(250.0, 500.0).bill_offset_percent() - 50.0).abs() < 1e-12);
        assert_eq!(recommendation(250.0, 0.0).bill_offset_percent(), 0.0);
    }
}
