//! Input validation errors.

use thiserror::Error;

/// Validation failures for engine inputs.
///
/// The numeric engine never returns these: every valuation degrades to a
/// sentinel instead. Callers use them to warn an operator before evaluating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A price, amount or count that must be strictly positive was not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was supplied.
        value: f64,
    },

    /// A price that may be zero was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was supplied.
        value: f64,
    },

    /// A value was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was supplied.
        value: f64,
    },

    /// Fear & greed readings live on a 0..=100 scale.
    #[error("fear & greed index must be within 0..=100, got {0}")]
    SentimentOutOfRange(u32),

    /// Platform trust scores live on a 1..=5 scale.
    #[error("trust score must be within 1..=5, got {0}")]
    TrustScoreOutOfRange(u8),

    /// Percentile reporting needs a minimum number of samples.
    #[error("sample count must be at least {min}, got {value}")]
    TooFewSamples {
        /// Smallest accepted sample count.
        min: usize,
        /// Sample count that was requested.
        value: usize,
    },

    /// A risk category label could not be parsed.
    #[error("unknown risk category: {0}")]
    UnknownCategory(String),
}

/// Checks that `value` is finite and strictly positive.
pub fn ensure_positive(field: &'static str, value: f64) -> Result<(), InputError> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(InputError::NonPositive { field, value });
    }
    Ok(())
}

/// Checks that `value` is finite and not negative.
pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(())
}

/// Checks that `value` is finite.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("price", 1.5).is_ok());
        assert_eq!(
            ensure_positive("price", 0.0),
            Err(InputError::NonPositive {
                field: "price",
                value: 0.0
            })
        );
        assert!(matches!(
            ensure_positive("price", f64::NAN),
            Err(InputError::NotFinite { field: "price", .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = InputError::SentimentOutOfRange(140);
        assert_eq!(
            err.to_string(),
            "fear & greed index must be within 0..=100, got 140"
        );
    }
}
