//! # Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - input parameters (JSON-serializable)
//! - `*Result` - calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - pure calculation function
//!
//! The calculators are fully independent of each other; the only shared
//! machinery is validation, units, and the error type.
//!
//! ## Available Calculators
//!
//! - [`loan`] - amortization schedules (personal, auto, mortgage, credit card)
//! - [`pension`] / [`roth`] / [`roi`] - compound growth and investment returns
//! - [`rounding`] / [`root`] / [`expression`] - math utilities
//! - [`bmi`] / [`calorie`] - health formulas
//! - [`shm`] / [`nuclear`] / [`quantum`] - physics formulas

pub mod bmi;
pub mod calorie;
pub mod expression;
pub mod growth;
pub mod loan;
pub mod nuclear;
pub mod pension;
pub mod quantum;
pub mod roi;
pub mod root;
pub mod roth;
pub mod rounding;
pub mod shm;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::formatter::{display_or_na, format_currency, format_number};

// Re-export commonly used types
pub use loan::{LoanInput, LoanKind, LoanResult, ScheduleRow};
pub use roi::{RoiInput, RoiResult};

/// Enum wrapper for all calculator inputs.
///
/// This allows a frontend holding untyped JSON to deserialize into one type
/// and dispatch without string-tag branching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationInput {
    Loan(loan::LoanInput),
    Pension(pension::PensionInput),
    RothIra(roth::RothIraInput),
    Roi(roi::RoiInput),
    Rounding(rounding::RoundingInput),
    Root(root::RootInput),
    Expression(expression::ExpressionInput),
    Bmi(bmi::BmiInput),
    Calorie(calorie::CalorieInput),
    Shm(shm::ShmInput),
    BindingEnergy(nuclear::BindingEnergyInput),
    Quantum(quantum::QuantumInput),
}

impl CalculationInput {
    /// Get the calculator type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationInput::Loan(_) => "Loan",
            CalculationInput::Pension(_) => "Pension",
            CalculationInput::RothIra(_) => "RothIra",
            CalculationInput::Roi(_) => "Roi",
            CalculationInput::Rounding(_) => "Rounding",
            CalculationInput::Root(_) => "Root",
            CalculationInput::Expression(_) => "Expression",
            CalculationInput::Bmi(_) => "Bmi",
            CalculationInput::Calorie(_) => "Calorie",
            CalculationInput::Shm(_) => "Shm",
            CalculationInput::BindingEnergy(_) => "BindingEnergy",
            CalculationInput::Quantum(_) => "Quantum",
        }
    }

    /// Short human-readable description of the inputs, for history entries
    pub fn params_summary(&self) -> String {
        match self {
            CalculationInput::Loan(i) => format!(
                "{} at {}% for {} months",
                format_currency(i.amount),
                i.annual_rate_pct,
                i.term_months
            ),
            CalculationInput::Pension(i) => format!(
                "{} + {}/yr at {}% for {} yrs",
                format_currency(i.current_balance),
                format_currency(i.annual_contribution),
                i.annual_return_pct,
                i.years_to_retirement
            ),
            CalculationInput::RothIra(i) => format!(
                "{}/yr at {}%, age {} to {}",
                format_currency(i.annual_contribution),
                i.annual_return_pct,
                i.current_age,
                i.retirement_age
            ),
            CalculationInput::Roi(i) => {
                format!("{} flows at {}%", i.cash_flows.len(), i.discount_rate_pct)
            }
            CalculationInput::Rounding(i) => format!("{} via {:?}", i.value, i.method),
            CalculationInput::Root(i) => format!("root({}, {})", i.radicand, i.degree),
            CalculationInput::Expression(i) => i.expression.clone(),
            CalculationInput::Bmi(i) => format!("{} / {} ({:?})", i.weight, i.height, i.units),
            CalculationInput::Calorie(i) => {
                format!("{} kg, {} cm, age {}", i.weight_kg, i.height_cm, i.age)
            }
            CalculationInput::Shm(i) => format!("A = {} m at t = {} s", i.amplitude_m, i.time_s),
            CalculationInput::BindingEnergy(i) => {
                format!("Z = {}, N = {}", i.protons, i.neutrons)
            }
            CalculationInput::Quantum(i) => {
                format!("{} points, {} steps", i.grid_points, i.steps)
            }
        }
    }
}

/// Enum wrapper for all calculator results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Loan(loan::LoanResult),
    Pension(pension::PensionResult),
    RothIra(roth::RothIraResult),
    Roi(roi::RoiResult),
    Rounding(rounding::RoundingResult),
    Root(root::RootResult),
    Expression(expression::ExpressionResult),
    Bmi(bmi::BmiResult),
    Calorie(calorie::CalorieResult),
    Shm(shm::ShmResult),
    BindingEnergy(nuclear::BindingEnergyResult),
    Quantum(quantum::QuantumResult),
}

impl CalculationOutput {
    /// Short human-readable result line, for history entries
    pub fn summary(&self) -> String {
        match self {
            CalculationOutput::Loan(r) => format!(
                "{}/mo, {} interest",
                format_currency(r.monthly_payment),
                format_currency(r.total_interest)
            ),
            CalculationOutput::Pension(r) => format!(
                "{} at retirement ({} real)",
                format_currency(r.balance_at_retirement),
                format_currency(r.real_balance)
            ),
            CalculationOutput::RothIra(r) => {
                format!("{} tax-free", format_currency(r.balance_at_retirement))
            }
            CalculationOutput::Roi(r) => format!(
                "NPV {}, IRR {}%",
                format_currency(r.npv),
                display_or_na(r.irr_pct, 2)
            ),
            CalculationOutput::Rounding(r) => format_number(r.value, 6),
            CalculationOutput::Root(r) => format_number(r.value, 6),
            CalculationOutput::Expression(r) => format_number(r.value, 6),
            CalculationOutput::Bmi(r) => format!("BMI {} ({})", r.bmi, r.category.label()),
            CalculationOutput::Calorie(r) => format!(
                "BMR {} kcal, TDEE {} kcal",
                format_number(r.bmr, 0),
                format_number(r.tdee, 0)
            ),
            CalculationOutput::Shm(r) => format!(
                "x = {} m, v = {} m/s",
                format_number(r.displacement, 4),
                format_number(r.velocity, 4)
            ),
            CalculationOutput::BindingEnergy(r) => format!(
                "{} MeV ({} MeV/nucleon)",
                format_number(r.binding_energy_mev, 1),
                format_number(r.per_nucleon_mev, 2)
            ),
            CalculationOutput::Quantum(r) => {
                format!("norm drift {}", format_number(r.norm_drift, 6))
            }
        }
    }
}

/// Run any calculator by dispatching on the input variant.
pub fn run(input: &CalculationInput) -> CalcResult<CalculationOutput> {
    let output = match input {
        CalculationInput::Loan(i) => CalculationOutput::Loan(loan::calculate(i)?),
        CalculationInput::Pension(i) => CalculationOutput::Pension(pension::calculate(i)?),
        CalculationInput::RothIra(i) => CalculationOutput::RothIra(roth::calculate(i)?),
        CalculationInput::Roi(i) => CalculationOutput::Roi(roi::calculate(i)?),
        CalculationInput::Rounding(i) => CalculationOutput::Rounding(rounding::calculate(i)?),
        CalculationInput::Root(i) => CalculationOutput::Root(root::calculate(i)?),
        CalculationInput::Expression(i) => {
            CalculationOutput::Expression(expression::calculate(i)?)
        }
        CalculationInput::Bmi(i) => CalculationOutput::Bmi(bmi::calculate(i)?),
        CalculationInput::Calorie(i) => CalculationOutput::Calorie(calorie::calculate(i)?),
        CalculationInput::Shm(i) => CalculationOutput::Shm(shm::calculate(i)?),
        CalculationInput::BindingEnergy(i) => {
            CalculationOutput::BindingEnergy(nuclear::calculate(i)?)
        }
        CalculationInput::Quantum(i) => CalculationOutput::Quantum(quantum::calculate(i)?),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_from_json() {
        let json = r#"{
            "type": "Bmi",
            "weight": 70.0,
            "height": 175.0,
            "units": "Metric"
        }"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.calc_type(), "Bmi");

        let output = run(&input).unwrap();
        match &output {
            CalculationOutput::Bmi(r) => assert_eq!(r.bmi, 22.9),
            other => panic!("wrong output variant: {:?}", other),
        }
        assert!(output.summary().contains("22.9"));
    }

    #[test]
    fn test_dispatch_expression() {
        let input = CalculationInput::Expression(expression::ExpressionInput {
            expression: "2 + 2".to_string(),
        });
        let output = run(&input).unwrap();
        assert!(matches!(
            output,
            CalculationOutput::Expression(expression::ExpressionResult { value }) if value == 4.0
        ));
    }

    #[test]
    fn test_dispatch_propagates_errors() {
        let input = CalculationInput::Root(root::RootInput {
            radicand: -4.0,
            degree: 2,
            refine: false,
        });
        let err = run(&input).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_output_serialization_tagged() {
        let input = CalculationInput::Rounding(rounding::RoundingInput {
            value: 3.14159,
            method: rounding::RoundingMethod::DecimalPlaces,
            digits: 2,
        });
        let output = run(&input).unwrap();
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"type\":\"Rounding\""));
    }
}
