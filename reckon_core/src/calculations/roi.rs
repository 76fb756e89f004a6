//! # Return on Investment
//!
//! NPV, IRR, simple ROI, and payback period for a cash-flow series. The
//! series starts with the initial outlay (negative) followed by periodic
//! flows.
//!
//! IRR uses Newton's method with an analytic derivative. A series with no
//! sign change, or one whose iteration wanders, simply yields `irr_pct:
//! None` - the frontend shows "N/A" rather than an error.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validate::check_range;

/// Newton iteration cap for the IRR solve
const IRR_MAX_ITERATIONS: u32 = 1000;

/// Convergence tolerance on the rate step
const IRR_TOLERANCE: f64 = 1e-4;

/// Starting guess for the IRR rate
const IRR_INITIAL_GUESS: f64 = 0.1;

/// Input parameters for an ROI analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    /// User label
    pub label: String,

    /// Cash flows by period; index 0 is the initial outlay (negative)
    pub cash_flows: Vec<f64>,

    /// Discount rate for NPV, in percent
    pub discount_rate_pct: f64,
}

impl RoiInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.cash_flows.len() < 2 {
            return Err(CalcError::invalid_input(
                "cash_flows",
                self.cash_flows.len().to_string(),
                "At least an initial outlay and one flow are required",
            ));
        }
        if self.cash_flows.iter().any(|f| !f.is_finite()) {
            return Err(CalcError::invalid_input(
                "cash_flows",
                "non-finite".to_string(),
                "All cash flows must be finite numbers",
            ));
        }
        if self.cash_flows[0] >= 0.0 {
            return Err(CalcError::invalid_input(
                "cash_flows",
                self.cash_flows[0].to_string(),
                "The first cash flow must be a negative initial outlay",
            ));
        }
        check_range("discount_rate_pct", self.discount_rate_pct, 0.0, 100.0)?;
        Ok(())
    }
}

/// Results from an ROI analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiResult {
    /// Net present value at the discount rate
    pub npv: f64,

    /// Internal rate of return in percent; None when the solve did not
    /// converge (shown as "N/A")
    pub irr_pct: Option<f64>,

    /// Periods until cumulative flows turn non-negative, interpolated
    /// within the crossing period; None when never recovered
    pub payback_period: Option<f64>,

    /// Simple ROI: (total inflows - outlay) / outlay, in percent
    pub roi_pct: f64,
}

/// Net present value of a cash-flow series at a fractional rate.
pub fn npv(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Derivative of NPV with respect to the rate.
fn npv_derivative(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, cf)| -(t as f64) * cf / (1.0 + rate).powi(t as i32 + 1))
        .sum()
}

/// IRR via Newton's method. Returns None on non-convergence or when the
/// iteration leaves the valid rate domain.
pub fn irr(cash_flows: &[f64]) -> Option<f64> {
    let mut rate = IRR_INITIAL_GUESS;

    for _ in 0..IRR_MAX_ITERATIONS {
        let value = npv(cash_flows, rate);
        let derivative = npv_derivative(cash_flows, rate);
        if derivative.abs() < 1e-12 {
            return None;
        }

        let next = rate - value / derivative;
        if !next.is_finite() || next <= -1.0 {
            return None;
        }
        if (next - rate).abs() < IRR_TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    None
}

/// Payback period with fractional interpolation inside the crossing period.
fn payback_period(cash_flows: &[f64]) -> Option<f64> {
    let mut cumulative = cash_flows[0];
    if cumulative >= 0.0 {
        return Some(0.0);
    }

    for (t, cf) in cash_flows.iter().enumerate().skip(1) {
        let previous = cumulative;
        cumulative += cf;
        if cumulative >= 0.0 {
            // Fraction of the period needed to cover the remaining deficit
            let fraction = if *cf > 0.0 { -previous / cf } else { 0.0 };
            return Some((t - 1) as f64 + fraction);
        }
    }
    None
}

/// Analyze a cash-flow series.
pub fn calculate(input: &RoiInput) -> CalcResult<RoiResult> {
    input.validate()?;

    let discount = input.discount_rate_pct / 100.0;
    let outlay = -input.cash_flows[0];
    let inflows: f64 = input.cash_flows[1..].iter().sum();

    Ok(RoiResult {
        npv: npv(&input.cash_flows, discount),
        irr_pct: irr(&input.cash_flows).map(|r| r * 100.0),
        payback_period: payback_period(&input.cash_flows),
        roi_pct: (inflows - outlay) / outlay * 100.0,
    })
}
