use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Interest charged on a financing term, expressed per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "./settings.ts")]
pub enum InterestRate {
    /// Same monthly rate whatever amount is financed
    Fixed {
        /// Monthly rate as a fraction (0.0149 = 1.49% a.m.)
        monthly_rate: f64,
    },
    /// Monthly rate depends on the financed amount
    Tiered {
        /// Principal bands, ascending by ceiling; the last one has no ceiling
        bands: Vec<RateBand>,
    },
}

/// A principal band of a tiered interest rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./settings.ts")]
pub struct RateBand {
    /// Largest principal (inclusive) this band applies to; `None` is open-ended
    pub up_to: Option<f64>,
    /// Monthly rate as a fraction
    pub monthly_rate: f64,
}

/// One installment plan offered by the financing partners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./settings.ts")]
pub struct FinancingTerm {
    /// Number of monthly installments
    pub months: u32,
    /// Interest applied on the financed amount
    pub rate: InterestRate,
}

impl InterestRate {
    /// Creates a new fixed interest rate
    pub fn fixed(monthly_rate: f64) -> Self {
        Self::Fixed { monthly_rate }
    }

    /// Creates a new tiered interest rate
    pub fn tiered(bands: Vec<RateBand>) -> Self {
        Self::Tiered { bands }
    }

    /// Whether the payment can be inverted without a numeric search
    pub fn is_closed_form(&self) -> bool {
        matches!(self, InterestRate::Fixed { .. })
    }

    /// Gets the monthly rate applied to the given principal
    pub fn rate_for_principal(&self, principal: f64) -> f64 {
        match self {
            InterestRate::Fixed { monthly_rate } => *monthly_rate,
            InterestRate::Tiered { bands } => {
                // First band whose ceiling covers the principal
                for band in bands {
                    if band.covers(principal) {
                        return band.monthly_rate;
                    }
                }
                // Unreachable for valid tables: the last band is open-ended
                bands.last().map(|band| band.monthly_rate).unwrap_or(0.0)
            }
        }
    }

    /// Validates the rate definition
    ///
    /// Rates must be finite and non-negative. Tiered rates need at least one band,
    /// strictly ascending ceilings, exactly one open-ended band in last position
    /// and non-decreasing rates so the installment grows with the principal.
    pub fn is_valid(&self) -> bool {
        match self {
            InterestRate::Fixed { monthly_rate } => valid_rate(*monthly_rate),
            InterestRate::Tiered { bands } => {
                let Some((last, bounded)) = bands.split_last() else {
                    return false;
                };
                if last.up_to.is_some() || !valid_rate(last.monthly_rate) {
                    return false;
                }

                let mut previous_ceiling = 0.0;
                let mut previous_rate = 0.0;
                for band in bounded {
                    let Some(ceiling) = band.up_to else {
                        return false; // open-ended band before the last one
                    };
                    if !ceiling.is_finite()
                        || ceiling <= previous_ceiling
                        || !valid_rate(band.monthly_rate)
                        || band.monthly_rate < previous_rate
                    {
                        return false;
                    }
                    previous_ceiling = ceiling;
                    previous_rate = band.monthly_rate;
                }
                last.monthly_rate >= previous_rate
            }
        }
    }
}

impl RateBand {
    /// Creates a new rate band
    pub fn new(up_to: Option<f64>, monthly_rate: f64) -> Self {
        Self {
            up_to,
            monthly_rate,
        }
    }

    /// Checks if this band applies to the given principal
    pub fn covers(&self, principal: f64) -> bool {
        match self.up_to {
            Some(ceiling) => principal <= ceiling,
            None => true,
        }
    }
}

impl FinancingTerm {
    /// Creates a financing term with a fixed monthly rate
    pub fn fixed(months: u32, monthly_rate: f64) -> Self {
        Self {
            months,
            rate: InterestRate::fixed(monthly_rate),
        }
    }
}

fn valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered_rate() -> InterestRate {
        InterestRate::tiered(vec![
            RateBand::new(Some(10_000.0), 0.0129),
            RateBand::new(Some(30_000.0), 0.0149),
            RateBand::new(None, 0.0169),
        ])
    }

    #[test]
    fn test_fixed_rate() {
        let rate = InterestRate::fixed(0.0149);
        assert_eq!(rate.rate_for_principal(1.0), 0.0149);
        assert_eq!(rate.rate_for_principal(1_000_000.0), 0.0149);
        assert!(rate.is_closed_form());
        assert!(rate.is_valid());
    }

    #[test]
    fn test_tiered_rate_lookup() {
        let rate = tiered_rate();
        assert!(!rate.is_closed_form());
        assert_eq!(rate.rate_for_principal(5_000.0), 0.0129);
        // Ceilings are inclusive
        assert_eq!(rate.rate_for_principal(10_000.0), 0.0129);
        assert_eq!(rate.rate_for_principal(10_000.01), 0.0149);
        assert_eq!(rate.rate_for_principal(50_000.0), 0.0169);
    }

    #[test]
    fn test_valid_tiered_rate() {
        assert!(tiered_rate().is_valid());
    }

    #[test]
    fn test_invalid_tiered_rate_without_open_band() {
        let rate = InterestRate::tiered(vec![RateBand::new(Some(10_000.0), 0.0129)]);
        assert!(!rate.is_valid());
    }

    #[test]
    fn test_invalid_tiered_rate_empty() {
        assert!(!InterestRate::tiered(Vec::new()).is_valid());
    }

    #[test]
    fn test_invalid_tiered_rate_descending_ceilings() {
        let rate = InterestRate::tiered(vec![
            RateBand::new(Some(30_000.0), 0.0129),
            RateBand::new(Some(10_000.0), 0.0149),
            RateBand::new(None, 0.0169),
        ]);
        assert!(!rate.is_valid());
    }

    #[test]
    fn test_invalid_tiered_rate_decreasing_rates() {
        let rate = InterestRate::tiered(vec![
            RateBand::new(Some(10_000.0), 0.0169),
            RateBand::new(None, 0.0129),
        ]);
        assert!(!rate.is_valid());
    }

    #[test]
    fn test_invalid_negative_rate() {
        assert!(!InterestRate::fixed(-0.01).is_valid());
        assert!(!InterestRate::fixed(f64::NAN).is_valid());
    }
}
