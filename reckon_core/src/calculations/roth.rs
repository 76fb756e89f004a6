//! # Roth IRA Projection
//!
//! Projects a Roth IRA balance with annual contributions clamped to the
//! statutory limit, including the catch-up limit from age 50, and compares
//! against the same contributions in a taxable account where gains are
//! dragged by capital-gains tax.

use serde::{Deserialize, Serialize};

use crate::calculations::growth::GrowthYear;
use crate::errors::CalcResult;
use crate::validate::{check_min, check_range};

/// Annual contribution limit (2024 figures)
const CONTRIBUTION_LIMIT: f64 = 7_000.0;

/// Annual limit from age 50 (includes the catch-up allowance)
const CONTRIBUTION_LIMIT_50_PLUS: f64 = 8_000.0;

/// Age at which the catch-up limit applies
const CATCH_UP_AGE: u32 = 50;

/// Input parameters for a Roth IRA projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RothIraInput {
    /// User label
    pub label: String,

    /// Current account balance
    pub current_balance: f64,

    /// Intended contribution per year (clamped to the statutory limit)
    pub annual_contribution: f64,

    /// Expected annual return in percent
    pub annual_return_pct: f64,

    /// Current age
    pub current_age: u32,

    /// Age at which contributions stop
    pub retirement_age: u32,

    /// Capital-gains tax rate in percent, for the taxable comparison
    pub capital_gains_tax_pct: f64,
}

impl RothIraInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_min("current_balance", self.current_balance, 0.0)?;
        check_min("annual_contribution", self.annual_contribution, 0.0)?;
        check_range("annual_return_pct", self.annual_return_pct, 0.0, 30.0)?;
        check_range("current_age", self.current_age as f64, 18.0, 99.0)?;
        check_range("retirement_age", self.retirement_age as f64, 19.0, 100.0)?;
        if self.retirement_age <= self.current_age {
            return Err(crate::errors::CalcError::invalid_input(
                "retirement_age",
                self.retirement_age.to_string(),
                "Retirement age must be greater than current age",
            ));
        }
        check_range(
            "capital_gains_tax_pct",
            self.capital_gains_tax_pct,
            0.0,
            50.0,
        )?;
        Ok(())
    }

    /// Contribution limit at a given age.
    pub fn limit_at_age(age: u32) -> f64 {
        if age >= CATCH_UP_AGE {
            CONTRIBUTION_LIMIT_50_PLUS
        } else {
            CONTRIBUTION_LIMIT
        }
    }
}

/// Results from a Roth IRA projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RothIraResult {
    /// Tax-free balance at retirement age
    pub balance_at_retirement: f64,

    /// Total contributed (after per-year clamping)
    pub total_contributions: f64,

    /// Total tax-free growth
    pub total_growth: f64,

    /// True when any requested contribution was clamped to the limit
    pub contributions_clamped: bool,

    /// Balance if the same contributions went to a taxable account with
    /// annual gains taxed at the capital-gains rate
    pub taxable_equivalent: f64,

    /// Advantage of the Roth over the taxable account
    pub tax_savings: f64,

    /// Year-by-year accumulation
    pub projection: Vec<GrowthYear>,
}

/// Project a Roth IRA to retirement age.
pub fn calculate(input: &RothIraInput) -> CalcResult<RothIraResult> {
    input.validate()?;

    let rate = input.annual_return_pct / 100.0;
    let tax = input.capital_gains_tax_pct / 100.0;
    let years = input.retirement_age - input.current_age;

    let mut balance = input.current_balance;
    let mut taxable = input.current_balance;
    let mut contributed = 0.0;
    let mut clamped = false;
    let mut projection = Vec::with_capacity(years as usize);

    for year in 1..=years {
        // Limit is checked against the age during the contribution year,
        // so the catch-up allowance starts exactly at the year age 50 is hit
        let age = input.current_age + year - 1;
        let limit = RothIraInput::limit_at_age(age);
        let contribution = if input.annual_contribution > limit {
            clamped = true;
            limit
        } else {
            input.annual_contribution
        };

        balance = balance * (1.0 + rate) + contribution;
        // Taxable account: same contribution, annual gains taxed each year
        taxable = taxable * (1.0 + rate * (1.0 - tax)) + contribution;
        contributed += contribution;

        projection.push(GrowthYear {
            year,
            balance,
            contributions: contributed,
            growth: balance - input.current_balance - contributed,
        });
    }

    Ok(RothIraResult {
        balance_at_retirement: balance,
        total_contributions: contributed,
        total_growth: balance - input.current_balance - contributed,
        contributions_clamped: clamped,
        taxable_equivalent: taxable,
        tax_savings: balance - taxable,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> RothIraInput {
        RothIraInput {
            label: "Roth".to_string(),
            current_balance: 10_000.0,
            annual_contribution: 6_000.0,
            annual_return_pct: 7.0,
            current_age: 30,
            retirement_age: 65,
            capital_gains_tax_pct: 15.0,
        }
    }

    #[test]
    fn test_under_limit_contributions_unclamped() {
        let result = calculate(&test_input()).unwrap();
        assert!(!result.contributions_clamped);
        assert!((result.total_contributions - 6_000.0 * 35.0).abs() < 1e-6);
    }

    #[test]
    fn test_over_limit_contributions_clamped() {
        let mut input = test_input();
        input.annual_contribution = 20_000.0;
        let result = calculate(&input).unwrap();
        assert!(result.contributions_clamped);

        // 20 years under 50 at 7000, 15 years at 8000
        let expected = 20.0 * CONTRIBUTION_LIMIT + 15.0 * CONTRIBUTION_LIMIT_50_PLUS;
        assert!((result.total_contributions - expected).abs() < 1e-6);
    }

    #[test]
    fn test_catch_up_limit_switch() {
        assert_eq!(RothIraInput::limit_at_age(49), CONTRIBUTION_LIMIT);
        assert_eq!(RothIraInput::limit_at_age(50), CONTRIBUTION_LIMIT_50_PLUS);
    }

    #[test]
    fn test_roth_beats_taxable_account() {
        let result = calculate(&test_input()).unwrap();
        assert!(result.balance_at_retirement > result.taxable_equivalent);
        assert!(result.tax_savings > 0.0);
    }

    #[test]
    fn test_zero_tax_rate_matches_roth() {
        let mut input = test_input();
        input.capital_gains_tax_pct = 0.0;
        let result = calculate(&input).unwrap();
        assert!((result.balance_at_retirement - result.taxable_equivalent).abs() < 1e-6);
    }

    #[test]
    fn test_age_ordering_enforced() {
        let mut input = test_input();
        input.retirement_age = 30;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_projection_years() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.projection.len(), 35);
    }
}
