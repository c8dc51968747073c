use proposal_model::settings::InterestRate;

/// Width of the principal interval the bisection narrows down to, in R$
pub const PRINCIPAL_TOLERANCE: f64 = 1e-6;

const MAX_ITERATIONS: usize = 200;

/// Capital recovery factor: the installment per unit of principal.
///
/// `r / (1 - (1 + r)^-n)` for a positive monthly rate, `1 / n` without interest.
pub fn annuity_factor(monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return f64::INFINITY;
    }
    if monthly_rate == 0.0 {
        return 1.0 / months as f64;
    }
    monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(months as i32)))
}

/// Fixed monthly payment that amortizes `principal` over `months`
pub fn installment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    principal * annuity_factor(monthly_rate, months)
}

/// Monthly payment under a possibly tiered rate, with the rate that was applied
pub fn installment_for(principal: f64, rate: &InterestRate, months: u32) -> (f64, f64) {
    let monthly_rate = rate.rate_for_principal(principal);
    (monthly_rate, installment(principal, monthly_rate, months))
}

/// Largest principal whose installment does not exceed `payment`.
///
/// Closed form for fixed rates. Tiered rates are inverted by bisection over
/// `[0, payment * months]`. With non-negative rates no larger principal can be
/// affordable, and valid bands keep the installment non-decreasing in the
/// principal, so the search stays on a monotone domain. The interval is
/// narrowed to `PRINCIPAL_TOLERANCE` rather than stopping at the first
/// principal within a cent, so a larger payment never yields a smaller result.
pub fn affordable_principal(payment: f64, rate: &InterestRate, months: u32) -> f64 {
    if payment <= 0.0 || months == 0 {
        return 0.0;
    }

    if let InterestRate::Fixed { monthly_rate } = rate {
        return payment / annuity_factor(*monthly_rate, months);
    }

    let payment_at = |principal: f64| installment_for(principal, rate, months).1;

    let mut low = 0.0;
    let mut high = payment * months as f64;
    if payment_at(high) <= payment {
        return high;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        if payment_at(mid) <= payment {
            low = mid;
        } else {
            high = mid;
        }

        if high - low < PRINCIPAL_TOLERANCE {
            break;
        }
    }

    low
}
