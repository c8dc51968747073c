use proposal_model::{CashOption, Configuration, Recommendation};

use crate::error::{CalcError, CalcResult, require_finite};

/// Builds the one-time purchase option.
///
/// Payback is `None` when the economy is zero or negative: the price is never
/// recovered, which is not the same as a long payback.
pub fn build_cash_option(
    recommendation: &Recommendation,
    config: &Configuration,
) -> CalcResult<CashOption> {
    let original_value = require_finite("system value", recommendation.system_value)?;
    let monthly_economy = require_finite("monthly economy", recommendation.monthly_economy)?;
    let discount = require_finite("cash discount", config.cash_discount)?;
    if !(0.0..1.0).contains(&discount) {
        return Err(CalcError::DegenerateConfiguration(format!(
            "cash discount must be in [0, 1), got {}",
            discount
        )));
    }

    let discounted_value = original_value * (1.0 - discount);
    let payback_years = if monthly_economy > 0.0 {
        Some(discounted_value / (monthly_economy * 12.0))
    } else {
        None
    };

    Ok(CashOption {
        original_value,
        discount_percent: discount,
        discounted_value,
        discount_savings: original_value - discounted_value,
        payback_years,
    })
}
