use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A caller-supplied value (budget, tariff, power, bill) is unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The settings make the arithmetic undefined
    #[error("Degenerate configuration: {0}")]
    DegenerateConfiguration(String),
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// Fails unless `value` is finite and strictly positive
pub(crate) fn require_positive(name: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

/// Fails unless `value` is finite
pub(crate) fn require_finite(name: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("budget", 10.0), Ok(10.0));
        assert!(matches!(
            require_positive("budget", 0.0),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(require_positive("budget", -1.0).is_err());
        assert!(require_positive("budget", f64::NAN).is_err());
        assert!(require_positive("budget", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = require_finite("tariff", f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: tariff must be finite, got NaN");
    }
}
