//! # Rounding Policies
//!
//! A single entry point over six rounding policies. `Nearest`, `Floor`,
//! `Ceil`, and `Truncate` work at integer scale; `DecimalPlaces` and
//! `SignificantFigures` take a digit count. All six are idempotent:
//! rounding an already-rounded value is a no-op.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Rounding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMethod {
    /// Round half away from zero to the nearest integer
    Nearest,
    /// Round toward negative infinity
    Floor,
    /// Round toward positive infinity
    Ceil,
    /// Drop the fractional part (round toward zero)
    Truncate,
    /// Round half away from zero to `digits` decimal places
    DecimalPlaces,
    /// Round to `digits` significant figures
    SignificantFigures,
}

/// Input parameters for a rounding operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundingInput {
    /// Value to round
    pub value: f64,

    /// Policy to apply
    pub method: RoundingMethod,

    /// Digit count for DecimalPlaces / SignificantFigures (ignored otherwise)
    pub digits: u32,
}

impl RoundingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.value.is_finite() {
            return Err(CalcError::invalid_input(
                "value",
                self.value.to_string(),
                "Value must be a finite number",
            ));
        }
        if self.method == RoundingMethod::SignificantFigures && self.digits == 0 {
            return Err(CalcError::invalid_input(
                "digits",
                "0",
                "Significant figures must be at least 1",
            ));
        }
        if self.digits > 15 {
            return Err(CalcError::invalid_input(
                "digits",
                self.digits.to_string(),
                "Digit count must be at most 15",
            ));
        }
        Ok(())
    }
}

/// Results from a rounding operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundingResult {
    /// Rounded value
    pub value: f64,

    /// Policy applied
    pub method: RoundingMethod,
}

/// Apply a rounding policy.
pub fn round_with(value: f64, method: RoundingMethod, digits: u32) -> CalcResult<f64> {
    let input = RoundingInput {
        value,
        method,
        digits,
    };
    input.validate()?;

    let rounded = match method {
        RoundingMethod::Nearest => value.round(),
        RoundingMethod::Floor => value.floor(),
        RoundingMethod::Ceil => value.ceil(),
        RoundingMethod::Truncate => value.trunc(),
        RoundingMethod::DecimalPlaces => {
            let scale = 10f64.powi(digits as i32);
            (value * scale).round() / scale
        }
        RoundingMethod::SignificantFigures => {
            if value == 0.0 {
                0.0
            } else {
                let magnitude = value.abs().log10().floor();
                let scale = 10f64.powf(digits as f64 - 1.0 - magnitude);
                (value * scale).round() / scale
            }
        }
    };

    Ok(rounded)
}

/// Calculate entry point matching the other calculators.
pub fn calculate(input: &RoundingInput) -> CalcResult<RoundingResult> {
    Ok(RoundingResult {
        value: round_with(input.value, input.method, input.digits)?,
        method: input.method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METHODS: [RoundingMethod; 6] = [
        RoundingMethod::Nearest,
        RoundingMethod::Floor,
        RoundingMethod::Ceil,
        RoundingMethod::Truncate,
        RoundingMethod::DecimalPlaces,
        RoundingMethod::SignificantFigures,
    ];

    #[test]
    fn test_integer_scale_methods() {
        assert_eq!(round_with(2.5, RoundingMethod::Nearest, 0).unwrap(), 3.0);
        assert_eq!(round_with(-2.5, RoundingMethod::Nearest, 0).unwrap(), -3.0);
        assert_eq!(round_with(2.7, RoundingMethod::Floor, 0).unwrap(), 2.0);
        assert_eq!(round_with(-2.1, RoundingMethod::Floor, 0).unwrap(), -3.0);
        assert_eq!(round_with(2.1, RoundingMethod::Ceil, 0).unwrap(), 3.0);
        assert_eq!(round_with(-2.9, RoundingMethod::Ceil, 0).unwrap(), -2.0);
        assert_eq!(round_with(2.9, RoundingMethod::Truncate, 0).unwrap(), 2.0);
        assert_eq!(round_with(-2.9, RoundingMethod::Truncate, 0).unwrap(), -2.0);
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(
            round_with(3.14159, RoundingMethod::DecimalPlaces, 2).unwrap(),
            3.14
        );
        assert_eq!(
            round_with(3.14159, RoundingMethod::DecimalPlaces, 4).unwrap(),
            3.1416
        );
    }

    #[test]
    fn test_significant_figures() {
        assert_eq!(
            round_with(123_456.0, RoundingMethod::SignificantFigures, 3).unwrap(),
            123_000.0
        );
        assert_eq!(
            round_with(0.001234, RoundingMethod::SignificantFigures, 2).unwrap(),
            0.0012
        );
        assert_eq!(
            round_with(-98.76, RoundingMethod::SignificantFigures, 2).unwrap(),
            -99.0
        );
        assert_eq!(
            round_with(0.0, RoundingMethod::SignificantFigures, 3).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_idempotence_all_methods() {
        let samples = [3.14159, -2.71828, 123_456.789, 0.000123, -0.5, 42.0];
        for &method in &ALL_METHODS {
            for &x in &samples {
                let once = round_with(x, method, 3).unwrap();
                let twice = round_with(once, method, 3).unwrap();
                assert_eq!(once, twice, "{:?} not idempotent on {}", method, x);
            }
        }
    }

    #[test]
    fn test_zero_sig_figs_rejected() {
        let err = round_with(1.5, RoundingMethod::SignificantFigures, 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(round_with(f64::NAN, RoundingMethod::Nearest, 0).is_err());
        assert!(round_with(f64::INFINITY, RoundingMethod::Floor, 0).is_err());
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&RoundingMethod::SignificantFigures).unwrap();
        assert_eq!(json, "\"SignificantFigures\"");
    }
}
