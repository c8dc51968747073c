use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Savings over the projection horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "./proposal.ts")]
pub struct LongTermProjection {
    /// Cumulative escalated, degradation-adjusted savings at the last year
    #[serde(rename = "totalSavings25Years")]
    pub total_savings: f64,
    /// Return on the system value, in percent
    pub roi: f64,
    pub average_annual_savings: f64,
    /// First 0-based year whose cumulative savings reach the system value
    pub crossover_year: Option<u32>,
    /// Payback in fractional years, interpolated inside the crossover year
    pub payback_years: Option<f64>,
    pub horizon_years: u32,
}

impl LongTermProjection {
    pub fn pays_back(&self) -> bool {
        self.crossover_year.is_some()
    }
}

/// One year of the projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "./proposal.ts")]
pub struct ProjectionYear {
    /// 0-based year of operation
    pub year: u32,
    /// Energy generated over the year (kWh)
    pub generation_kwh: f64,
    /// Escalated tariff for the year (R$/kWh)
    pub tariff: f64,
    pub annual_economy: f64,
    pub cumulative_savings: f64,
}

/// Levelized cost of solar energy compared with buying from the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "./proposal.ts")]
pub struct LcoeComparison {
    /// System value divided by lifetime generation (R$/kWh)
    pub solar_lcoe: f64,
    /// Mean escalated grid tariff over the horizon (R$/kWh)
    pub average_grid_tariff: f64,
    /// How much cheaper each solar kWh is, in percent of the grid tariff
    pub savings_per_kwh_percent: f64,
}
