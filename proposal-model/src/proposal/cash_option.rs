use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// One-time purchase with the cash discount applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "./proposal.ts")]
pub struct CashOption {
    pub original_value: f64,
    /// Discount as a fraction (0.08 = 8%)
    pub discount_percent: f64,
    pub discounted_value: f64,
    pub discount_savings: f64,
    /// Simple payback in years; `None` when the economy cannot recover the price
    pub payback_years: Option<f64>,
}

impl CashOption {
    pub fn is_recoverable(&self) -> bool {
        self.payback_years.is_some()
    }
}
