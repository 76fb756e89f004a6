//! # Compound Growth Projection
//!
//! Shared year-by-year compounding loop used by the pension and Roth IRA
//! calculators. Contributions are spread evenly across the compounding
//! periods of each year.

use serde::{Deserialize, Serialize};

/// One projected year of a growing balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthYear {
    /// Year number, starting at 1
    pub year: u32,

    /// Balance at the end of the year
    pub balance: f64,

    /// Cumulative contributions through the end of the year
    pub contributions: f64,

    /// Cumulative growth (balance - starting balance - contributions)
    pub growth: f64,
}

/// Project a balance forward with periodic compounding and contributions.
///
/// Each period: `balance = balance * (1 + rate/periods) + contribution/periods`.
///
/// # Arguments
///
/// * `starting_balance` - balance at year zero
/// * `annual_contribution` - contribution per year, split across periods
/// * `annual_rate` - return rate as a fraction (0.07 for 7%)
/// * `periods_per_year` - compounding frequency (12 = monthly)
/// * `years` - projection horizon
pub fn project(
    starting_balance: f64,
    annual_contribution: f64,
    annual_rate: f64,
    periods_per_year: u32,
    years: u32,
) -> Vec<GrowthYear> {
    let periodic_rate = annual_rate / periods_per_year as f64;
    let periodic_contribution = annual_contribution / periods_per_year as f64;

    let mut balance = starting_balance;
    let mut contributed = 0.0;
    let mut projection = Vec::with_capacity(years as usize);

    for year in 1..=years {
        for _ in 0..periods_per_year {
            balance = balance * (1.0 + periodic_rate) + periodic_contribution;
            contributed += periodic_contribution;
        }
        projection.push(GrowthYear {
            year,
            balance,
            contributions: contributed,
            growth: balance - starting_balance - contributed,
        });
    }

    projection
}

/// Present value of a future amount under constant inflation:
/// `future / (1 + inflation)^years`.
pub fn present_value(future: f64, inflation_rate: f64, years: f64) -> f64 {
    future / (1.0 + inflation_rate).powf(years)
}
