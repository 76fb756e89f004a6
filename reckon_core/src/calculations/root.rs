//! # Nth Root
//!
//! Closed-form nth root with sign handling for odd roots of negatives, and
//! an optional Newton-Raphson refinement that records its iteration trace
//! for display.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Newton refinement iteration cap
const REFINE_MAX_ITERATIONS: u32 = 50;

/// Refinement convergence tolerance on the residual
const REFINE_TOLERANCE: f64 = 1e-12;

/// Input parameters for an nth-root calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootInput {
    /// Value to take the root of
    pub radicand: f64,

    /// Root degree (2 = square root, 3 = cube root, ...)
    pub degree: i32,

    /// Run Newton-Raphson refinement and record the iteration trace
    pub refine: bool,
}

impl RootInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.radicand.is_finite() {
            return Err(CalcError::invalid_input(
                "radicand",
                self.radicand.to_string(),
                "Value must be a finite number",
            ));
        }
        if self.degree == 0 {
            return Err(CalcError::domain("nth_root", "Root degree cannot be zero"));
        }
        if self.radicand < 0.0 && self.degree % 2 == 0 {
            return Err(CalcError::domain(
                "nth_root",
                "Even root of a negative number has no real value",
            ));
        }
        Ok(())
    }
}

/// One Newton refinement step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewtonStep {
    /// Iteration number, starting at 1
    pub iteration: u32,

    /// Current root estimate
    pub estimate: f64,

    /// Residual yⁿ - x at this estimate
    pub residual: f64,
}

/// Results from an nth-root calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResult {
    /// The computed root
    pub value: f64,

    /// Newton iteration trace (empty unless refinement was requested)
    pub trace: Vec<NewtonStep>,
}

/// Compute the nth root of a value.
///
/// Negative radicands with odd degree return -|x|^(1/n). Negative degrees
/// return the reciprocal of the positive-degree root.
pub fn calculate(input: &RootInput) -> CalcResult<RootResult> {
    input.validate()?;

    let n = input.degree.unsigned_abs();
    let sign = if input.radicand < 0.0 { -1.0 } else { 1.0 };
    let magnitude = input.radicand.abs();

    let mut value = sign * magnitude.powf(1.0 / n as f64);
    let mut trace = Vec::new();

    if input.refine && magnitude > 0.0 {
        value = refine(input.radicand, n as i32, value, &mut trace)?;
    }

    if input.degree < 0 {
        value = 1.0 / value;
    }

    Ok(RootResult { value, trace })
}

/// Newton-Raphson refinement: y ← y - (yⁿ - x) / (n·yⁿ⁻¹).
fn refine(x: f64, n: i32, initial: f64, trace: &mut Vec<NewtonStep>) -> CalcResult<f64> {
    let mut y = initial;

    for iteration in 1..=REFINE_MAX_ITERATIONS {
        let residual = y.powi(n) - x;
        trace.push(NewtonStep {
            iteration,
            estimate: y,
            residual,
        });

        if residual.abs() <= REFINE_TOLERANCE * x.abs().max(1.0) {
            return Ok(y);
        }

        let derivative = n as f64 * y.powi(n - 1);
        if derivative.abs() < f64::MIN_POSITIVE {
            return Err(CalcError::non_convergence("Newton-Raphson root", iteration));
        }
        y -= residual / derivative;
    }

    Err(CalcError::non_convergence(
        "Newton-Raphson root",
        REFINE_MAX_ITERATIONS,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(radicand: f64, degree: i32, refine: bool) -> CalcResult<RootResult> {
        calculate(&RootInput {
            radicand,
            degree,
            refine,
        })
    }

    #[test]
    fn test_square_root() {
        let result = root(16.0, 2, false).unwrap();
        assert!((result.value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_odd_root_of_negative() {
        let result = root(-27.0, 3, false).unwrap();
        assert!((result.value + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_even_root_of_negative_rejected() {
        let err = root(-16.0, 2, false).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
        assert!(root(-16.0, 4, false).is_err());
    }

    #[test]
    fn test_degree_zero_rejected() {
        assert!(root(16.0, 0, false).is_err());
    }

    #[test]
    fn test_negative_degree_is_reciprocal() {
        let result = root(16.0, -2, false).unwrap();
        assert!((result.value - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_property() {
        // root(x, n)^n ≈ x across a spread of valid inputs
        let cases = [
            (2.0, 2),
            (10.0, 3),
            (123_456.0, 5),
            (0.5, 2),
            (-8.0, 3),
            (-1000.0, 7),
        ];
        for &(x, n) in &cases {
            let result = root(x, n, true).unwrap();
            let back = result.value.powi(n);
            assert!(
                (back - x).abs() < 1e-9 * x.abs().max(1.0),
                "root({}, {})^{} = {} != {}",
                x,
                n,
                n,
                back,
                x
            );
        }
    }

    #[test]
    fn test_refinement_trace_recorded() {
        let result = root(2.0, 2, true).unwrap();
        assert!(!result.trace.is_empty());
        assert_eq!(result.trace[0].iteration, 1);
        // Residual shrinks monotonically to tolerance
        let first = result.trace.first().unwrap().residual.abs();
        let last = result.trace.last().unwrap().residual.abs();
        assert!(last <= first);
    }

    #[test]
    fn test_no_trace_without_refinement() {
        let result = root(2.0, 2, false).unwrap();
        assert!(result.trace.is_empty());
    }

    #[test]
    fn test_root_of_zero() {
        let result = root(0.0, 3, true).unwrap();
        assert_eq!(result.value, 0.0);
        assert!(result.trace.is_empty());
    }
}
