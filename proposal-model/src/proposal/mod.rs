pub mod cash_option;
pub mod financing_option;
pub mod projection;
pub mod recommendation;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

pub use cash_option::CashOption;
pub use financing_option::{FinancingOption, Viability};
pub use projection::{LcoeComparison, LongTermProjection, ProjectionYear};
pub use recommendation::Recommendation;

/// Everything a proposal shows for one budget.
///
/// Produced once per calculation and never modified afterwards. KPI tiles,
/// charts and share texts read these fields as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "./proposal.ts")]
pub struct ReverseCalcResult {
    pub recommendation: Recommendation,
    pub cash_option: CashOption,
    /// One plan per offered term, in configured order
    pub financing_options: Vec<FinancingOption>,
    pub long_term_projection: LongTermProjection,
    pub lcoe: LcoeComparison,
}

impl ReverseCalcResult {
    /// The first `count` excellent or good plans, keeping configured order
    pub fn top_viable_options(&self, count: usize) -> Vec<&FinancingOption> {
        self.financing_options
            .iter()
            .filter(|option| option.viability.is_viable())
            .take(count)
            .collect()
    }

    /// Best tier available; the shortest term wins among equals
    pub fn best_option(&self) -> Option<&FinancingOption> {
        self.financing_options
            .iter()
            .min_by_key(|option| (option.viability, option.installments))
    }
}
