pub mod proposal;
pub mod settings;

pub use proposal::{
    CashOption, FinancingOption, LcoeComparison, LongTermProjection, ProjectionYear,
    Recommendation, ReverseCalcResult, Viability,
};
pub use settings::{
    Configuration, DeficitThreshold, FinancingTerm, InterestRate, RateBand, SizingPolicy,
    ViabilityThresholds,
};
