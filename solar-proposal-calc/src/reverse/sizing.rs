use log::{debug, warn};
use proposal_model::{Configuration, Recommendation};

use crate::error::{CalcError, CalcResult, require_positive};
use crate::general::finance::affordable_principal;

/// Turns a monthly budget into a system recommendation.
///
/// The budget is what the client pays today and is ready to keep paying as an
/// installment of the reference term. The affordable system value follows from
/// inverting the amortization formula, is converted to kWp, rounded down to the
/// module increment and clamped to the minimum size. A budget below the minimum
/// size yields the minimum size marked as budget-constrained.
pub fn solve(
    client_budget: f64,
    current_tariff: f64,
    config: &Configuration,
) -> CalcResult<Recommendation> {
    require_positive("client budget", client_budget)?;
    require_positive("current tariff", current_tariff)?;

    let term = config.reference_term().ok_or_else(|| {
        CalcError::DegenerateConfiguration(format!(
            "reference term of {} months is not among the offered terms",
            config.sizing.reference_term_months
        ))
    })?;

    let max_system_value = affordable_principal(client_budget, &term.rate, term.months);
    let raw_power_kwp = max_system_value / config.cost_per_kwp;
    let rounded_kwp = round_down_to_increment(raw_power_kwp, config.sizing.module_increment_kwp);

    let floor = config.sizing.min_power_kwp;
    // Constrained only when the budget itself cannot pay for the floor size;
    // rounding down to whole modules may still land below it
    let budget_constrained = raw_power_kwp < floor;
    let power_kwp = rounded_kwp.max(floor);

    debug!(
        "Sizing budget {:.2} over {} months: affordable value {:.2}, {:.3} kWp -> {:.3} kWp",
        client_budget, term.months, max_system_value, raw_power_kwp, power_kwp
    );
    if budget_constrained {
        warn!(
            "Budget {:.2} only affords {:.3} kWp, recommending the minimum of {:.3} kWp",
            client_budget, raw_power_kwp, floor
        );
    }

    Ok(recommend(
        power_kwp,
        client_budget,
        current_tariff,
        config,
        budget_constrained,
    ))
}

/// Builds a recommendation for a known system size.
///
/// `monthly_bill` is the client's current bill; the economy is capped by it.
pub fn size_system(
    power_kwp: f64,
    monthly_bill: f64,
    current_tariff: f64,
    config: &Configuration,
) -> CalcResult<Recommendation> {
    require_positive("system power", power_kwp)?;
    require_positive("monthly bill", monthly_bill)?;
    require_positive("current tariff", current_tariff)?;

    if power_kwp < config.sizing.min_power_kwp {
        return Err(CalcError::InvalidInput(format!(
            "system power {} kWp is below the minimum of {} kWp",
            power_kwp, config.sizing.min_power_kwp
        )));
    }

    Ok(recommend(power_kwp, monthly_bill, current_tariff, config, false))
}

/// Monthly bill reduction of a system producing `monthly_generation_kwh`.
///
/// Generation is valued at the tariff times the compensation factor and can
/// never save more than the whole bill.
pub fn monthly_economy(
    monthly_generation_kwh: f64,
    current_tariff: f64,
    monthly_bill: f64,
    config: &Configuration,
) -> f64 {
    let credited = monthly_generation_kwh * current_tariff * config.compensation_factor;
    credited.min(monthly_bill).max(0.0)
}

fn recommend(
    power_kwp: f64,
    monthly_bill: f64,
    current_tariff: f64,
    config: &Configuration,
    budget_constrained: bool,
) -> Recommendation {
    let monthly_generation_kwh = power_kwp * config.generation_yield_kwh_per_kwp_month;
    Recommendation {
        power_kwp,
        monthly_generation_kwh,
        monthly_economy: monthly_economy(
            monthly_generation_kwh,
            current_tariff,
            monthly_bill,
            config,
        ),
        system_value: power_kwp * config.cost_per_kwp,
        reference_monthly_bill: monthly_bill,
        budget_constrained,
    }
}

/// Largest multiple of `increment` not above `power_kwp`; no rounding for a zero increment
fn round_down_to_increment(power_kwp: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return power_kwp;
    }
    // Tolerance keeps exact multiples from dropping a module through float error
    let modules = (power_kwp / increment + 1e-9).floor();
    modules * increment
}
