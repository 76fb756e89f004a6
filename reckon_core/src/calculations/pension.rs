//! # Pension Projection
//!
//! Projects a retirement balance from current savings and annual
//! contributions, then reports an inflation-adjusted ("real") value and a
//! level monthly drawdown over the retirement years.

use serde::{Deserialize, Serialize};

use crate::calculations::growth::{present_value, project, GrowthYear};
use crate::errors::CalcResult;
use crate::validate::{check_min, check_range};

/// Input parameters for a pension projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionInput {
    /// User label
    pub label: String,

    /// Current retirement savings
    pub current_balance: f64,

    /// Contribution per year until retirement
    pub annual_contribution: f64,

    /// Expected annual return in percent
    pub annual_return_pct: f64,

    /// Years until retirement
    pub years_to_retirement: u32,

    /// Expected length of retirement in years
    pub retirement_years: u32,

    /// Expected annual inflation in percent
    pub inflation_pct: f64,
}

impl PensionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_min("current_balance", self.current_balance, 0.0)?;
        check_min("annual_contribution", self.annual_contribution, 0.0)?;
        check_range("annual_return_pct", self.annual_return_pct, 0.0, 30.0)?;
        check_range(
            "years_to_retirement",
            self.years_to_retirement as f64,
            1.0,
            70.0,
        )?;
        check_range("retirement_years", self.retirement_years as f64, 1.0, 60.0)?;
        check_range("inflation_pct", self.inflation_pct, 0.0, 20.0)?;
        Ok(())
    }
}

/// Results from a pension projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionResult {
    /// Balance at retirement
    pub balance_at_retirement: f64,

    /// Total contributed over the accumulation years
    pub total_contributions: f64,

    /// Total investment growth
    pub total_growth: f64,

    /// Inflation-adjusted balance at retirement.
    ///
    /// Discounted over accumulation plus half the retirement years: the
    /// balance is spent gradually, so its purchasing power is measured at
    /// the midpoint of the drawdown rather than at the retirement date.
    pub real_balance: f64,

    /// Level monthly withdrawal that exhausts the balance over the
    /// retirement years, with the balance still earning the same return
    pub monthly_drawdown: f64,

    /// Year-by-year accumulation
    pub projection: Vec<GrowthYear>,
}

/// Project a pension to retirement and through drawdown.
pub fn calculate(input: &PensionInput) -> CalcResult<PensionResult> {
    input.validate()?;

    let rate = input.annual_return_pct / 100.0;
    let projection = project(
        input.current_balance,
        input.annual_contribution,
        rate,
        12,
        input.years_to_retirement,
    );

    let final_year = projection
        .last()
        .cloned()
        .unwrap_or(GrowthYear {
            year: 0,
            balance: input.current_balance,
            contributions: 0.0,
            growth: 0.0,
        });

    let discount_years =
        input.years_to_retirement as f64 + input.retirement_years as f64 / 2.0;
    let real_balance = present_value(
        final_year.balance,
        input.inflation_pct / 100.0,
        discount_years,
    );

    // Annuity payment over the retirement months at the same monthly return
    let n = input.retirement_years * 12;
    let monthly_rate = rate / 12.0;
    let monthly_drawdown = if monthly_rate == 0.0 {
        final_year.balance / n as f64
    } else {
        let growth = (1.0 + monthly_rate).powi(n as i32);
        final_year.balance * monthly_rate * growth / (growth - 1.0)
    };

    Ok(PensionResult {
        balance_at_retirement: final_year.balance,
        total_contributions: final_year.contributions,
        total_growth: final_year.growth,
        real_balance,
        monthly_drawdown,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> PensionInput {
        PensionInput {
            label: "Retirement".to_string(),
            current_balance: 50_000.0,
            annual_contribution: 12_000.0,
            annual_return_pct: 7.0,
            years_to_retirement: 25,
            retirement_years: 20,
            inflation_pct: 2.5,
        }
    }

    #[test]
    fn test_projection_length_and_totals() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.projection.len(), 25);
        assert!((result.total_contributions - 300_000.0).abs() < 1e-6);
        assert!(
            (result.balance_at_retirement
                - (50_000.0 + result.total_contributions + result.total_growth))
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn test_real_balance_discounts_past_retirement_date() {
        let result = calculate(&test_input()).unwrap();
        // Discounted over 25 + 20/2 = 35 years, so strictly less than
        // discounting to the retirement date alone
        let at_retirement =
            result.balance_at_retirement / 1.025_f64.powf(25.0);
        assert!(result.real_balance < at_retirement);
        let expected = result.balance_at_retirement / 1.025_f64.powf(35.0);
        assert!((result.real_balance - expected).abs() < 0.01);
    }

    #[test]
    fn test_drawdown_exhausts_balance() {
        let result = calculate(&test_input()).unwrap();

        // Simulate the drawdown month by month
        let mut balance = result.balance_at_retirement;
        let monthly_rate = 0.07 / 12.0;
        for _ in 0..(20 * 12) {
            balance = balance * (1.0 + monthly_rate) - result.monthly_drawdown;
        }
        assert!(balance.abs() < 1.0);
    }

    #[test]
    fn test_validation_bounds() {
        let mut input = test_input();
        input.years_to_retirement = 0;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.annual_return_pct = 31.0;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.current_balance = -1.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = test_input();
        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: PensionInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.years_to_retirement, 25);
    }
}
