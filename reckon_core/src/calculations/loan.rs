//! # Amortization Schedule Generator
//!
//! Builds a full payment schedule for a fixed-rate loan. Loan flavors are a
//! tagged enum rather than string dispatch: each variant carries only the
//! fields relevant to it (sales tax and trade-in for auto, escrow for
//! mortgage, minimum-payment rules for credit cards).
//!
//! ## Assumptions
//!
//! - Monthly compounding at annual_rate / 12
//! - Fixed payment computed once from the financed principal
//! - Extra payments apply straight to principal
//! - Mortgage escrow (tax/insurance/HOA) is reported in the monthly payment
//!   but never amortized
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use reckon_core::calculations::loan::{calculate, LoanInput, LoanKind};
//!
//! let input = LoanInput {
//!     label: "Car loan".to_string(),
//!     amount: 25_000.0,
//!     annual_rate_pct: 6.0,
//!     term_months: 60,
//!     extra_monthly: 0.0,
//!     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     kind: LoanKind::Personal,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.monthly_payment - 483.32).abs() < 0.01);
//! assert_eq!(result.schedule.len(), 60);
//! ```

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Percent;
use crate::validate::{check_min, check_range};

/// Hard cap on schedule length for minimum-payment loans that may never
/// reach zero at low percentages.
const MAX_PERIODS: u32 = 600;

/// Balances below this are considered paid off.
const PAYOFF_EPSILON: f64 = 0.005;

/// Loan flavor, each variant carrying only its own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoanKind {
    /// Plain installment loan
    Personal,

    /// Vehicle loan: financed principal = (price - trade_in) * (1 + tax) + fees
    Auto {
        /// Sales tax applied to the price net of trade-in (percent)
        sales_tax_pct: f64,
        /// Dealer/title fees added after tax
        fees: f64,
        /// Trade-in credit subtracted from the price before tax
        trade_in: f64,
    },

    /// Home loan with escrow items added to the reported monthly payment
    Mortgage {
        /// Annual property tax
        property_tax_annual: f64,
        /// Annual homeowner's insurance
        insurance_annual: f64,
        /// Monthly HOA dues
        hoa_monthly: f64,
    },

    /// Revolving balance paid down by minimum payments.
    ///
    /// Payment each period is max(min_payment_pct of balance, floor),
    /// clamped so the final payment never exceeds balance plus interest.
    CreditCard {
        /// Minimum payment as percent of current balance
        min_payment_pct: f64,
        /// Fixed dollar floor on the payment
        min_payment_floor: f64,
    },
}

/// Input parameters for a loan calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// User label (e.g., "Car loan", "House")
    pub label: String,

    /// Loan amount (purchase price for Auto, balance for CreditCard)
    pub amount: f64,

    /// Annual interest rate in percent (e.g., 6.5 for 6.5%)
    pub annual_rate_pct: f64,

    /// Term in months (ignored by CreditCard, which pays until zero)
    pub term_months: u32,

    /// Extra principal payment per month
    pub extra_monthly: f64,

    /// Date of the first payment
    pub start_date: NaiveDate,

    /// Loan flavor
    pub kind: LoanKind,
}

impl LoanInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_min("amount", self.amount, 100.0)?;
        check_range("annual_rate_pct", self.annual_rate_pct, 0.1, 30.0)?;
        if !(1..=360).contains(&self.term_months) {
            return Err(CalcError::invalid_input(
                "term_months",
                self.term_months.to_string(),
                "Term must be between 1 and 360 months",
            ));
        }
        check_min("extra_monthly", self.extra_monthly, 0.0)?;

        match &self.kind {
            LoanKind::Personal => {}
            LoanKind::Auto {
                sales_tax_pct,
                fees,
                trade_in,
            } => {
                check_range("sales_tax_pct", *sales_tax_pct, 0.0, 25.0)?;
                check_min("fees", *fees, 0.0)?;
                check_min("trade_in", *trade_in, 0.0)?;
                if *trade_in >= self.amount {
                    return Err(CalcError::invalid_input(
                        "trade_in",
                        trade_in.to_string(),
                        "Trade-in must be less than the purchase price",
                    ));
                }
            }
            LoanKind::Mortgage {
                property_tax_annual,
                insurance_annual,
                hoa_monthly,
            } => {
                check_min("property_tax_annual", *property_tax_annual, 0.0)?;
                check_min("insurance_annual", *insurance_annual, 0.0)?;
                check_min("hoa_monthly", *hoa_monthly, 0.0)?;
            }
            LoanKind::CreditCard {
                min_payment_pct,
                min_payment_floor,
            } => {
                if !(*min_payment_pct > 0.0 && *min_payment_pct <= 100.0) {
                    return Err(CalcError::invalid_input(
                        "min_payment_pct",
                        min_payment_pct.to_string(),
                        "Minimum payment percent must be in (0, 100]",
                    ));
                }
                check_min("min_payment_floor", *min_payment_floor, 0.0)?;
            }
        }
        Ok(())
    }

    /// The principal actually financed, after kind-specific adjustments.
    pub fn financed_principal(&self) -> f64 {
        match &self.kind {
            LoanKind::Auto {
                sales_tax_pct,
                fees,
                trade_in,
            } => (self.amount - trade_in) * (1.0 + Percent(*sales_tax_pct).fraction()) + fees,
            _ => self.amount,
        }
    }

    /// Monthly escrow added on top of principal and interest (mortgage only).
    pub fn monthly_escrow(&self) -> f64 {
        match &self.kind {
            LoanKind::Mortgage {
                property_tax_annual,
                insurance_annual,
                hoa_monthly,
            } => property_tax_annual / 12.0 + insurance_annual / 12.0 + hoa_monthly,
            _ => 0.0,
        }
    }
}

/// One row of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Period number, starting at 1
    pub period: u32,

    /// Payment date
    pub date: NaiveDate,

    /// Total payment this period (principal + interest, excl. escrow)
    pub payment: f64,

    /// Principal portion of the payment
    pub principal: f64,

    /// Interest portion of the payment
    pub interest: f64,

    /// Remaining balance after the payment
    pub balance: f64,
}

/// Results from a loan calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanResult {
    /// Principal actually financed (after tax/fees/trade-in)
    pub financed_principal: f64,

    /// Level monthly payment including escrow for mortgages.
    /// For credit cards this is the first period's payment.
    pub monthly_payment: f64,

    /// Escrow portion of the monthly payment (0 except mortgages)
    pub monthly_escrow: f64,

    /// Number of periods until the balance reached zero
    pub months_to_payoff: u32,

    /// False when the schedule ended with a balance still outstanding
    /// (credit cards at the runaway cap)
    pub paid_off: bool,

    /// Sum of principal portions over the schedule
    pub total_principal_paid: f64,

    /// Sum of interest portions over the schedule
    pub total_interest: f64,

    /// Total of all payments (principal + interest, excl. escrow)
    pub total_paid: f64,

    /// Per-period schedule
    pub schedule: Vec<ScheduleRow>,
}

/// Level payment for a fixed-rate loan: M = P·r(1+r)^n / ((1+r)^n − 1).
///
/// Guards the rate-zero case with the linear formula P/n; the division by
/// zero in the closed form must never be reachable even though validation
/// currently bounds the rate away from zero.
pub fn level_payment(principal: f64, monthly_rate: f64, term_months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return principal / term_months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(term_months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Generate the amortization schedule for a loan.
///
/// # Returns
///
/// * `Ok(LoanResult)` - schedule plus totals; final balance is 0 within
///   rounding unless the credit-card runaway cap was hit
/// * `Err(CalcError)` - structured validation error
pub fn calculate(input: &LoanInput) -> CalcResult<LoanResult> {
    input.validate()?;

    let principal = input.financed_principal();
    let monthly_rate = Percent(input.annual_rate_pct).monthly_fraction();
    let escrow = input.monthly_escrow();

    let mut schedule = Vec::new();
    let mut balance = principal;
    let mut total_interest = 0.0;
    let mut total_principal = 0.0;
    let mut date = input.start_date;

    let (level, max_periods) = match input.kind {
        LoanKind::CreditCard { .. } => (0.0, MAX_PERIODS),
        _ => (
            level_payment(principal, monthly_rate, input.term_months),
            input.term_months,
        ),
    };

    let mut period = 0;
    while balance > PAYOFF_EPSILON && period < max_periods {
        period += 1;

        let interest = balance * monthly_rate;
        let mut payment = match input.kind {
            LoanKind::CreditCard {
                min_payment_pct,
                min_payment_floor,
            } => (balance * min_payment_pct / 100.0).max(min_payment_floor),
            _ => level + input.extra_monthly,
        };

        // Final payment clears the balance exactly
        if payment > balance + interest {
            payment = balance + interest;
        }

        let principal_portion = payment - interest;
        balance -= principal_portion;
        if balance < PAYOFF_EPSILON {
            balance = 0.0;
        }

        total_interest += interest;
        total_principal += principal_portion;

        schedule.push(ScheduleRow {
            period,
            date,
            payment,
            principal: principal_portion,
            interest,
            balance,
        });

        date = date
            .checked_add_months(Months::new(1))
            .ok_or_else(|| CalcError::Internal {
                message: "Schedule date overflow".to_string(),
            })?;
    }

    let first_payment = schedule.first().map(|r| r.payment).unwrap_or(0.0);
    let monthly_payment = match input.kind {
        LoanKind::CreditCard { .. } => first_payment,
        _ => level + escrow,
    };

    Ok(LoanResult {
        financed_principal: principal,
        monthly_payment,
        monthly_escrow: escrow,
        months_to_payoff: period,
        paid_off: balance <= PAYOFF_EPSILON,
        total_principal_paid: total_principal,
        total_interest,
        total_paid: total_principal + total_interest,
        schedule,
    })
}
