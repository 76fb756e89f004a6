//! # Body Mass Index
//!
//! BMI = weight (kg) / height (m)². Imperial inputs are converted through
//! the unit wrappers before the formula. Classification bands are half-open
//! intervals [lo, hi): a BMI of exactly 18.5 is Normal, not Underweight.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::units::{Centimeters, Inches, Kilograms, Meters, PoundsMass};
use crate::validate::check_range;

/// Unit system for the raw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Weight in kilograms, height in centimeters
    Metric,
    /// Weight in pounds, height in inches
    Imperial,
}

/// BMI classification bands (WHO cut-offs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value using half-open [lo, hi) bands.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Display label for the band.
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Input parameters for a BMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiInput {
    /// Weight in kg (metric) or lb (imperial)
    pub weight: f64,

    /// Height in cm (metric) or in (imperial)
    pub height: f64,

    /// Unit system of the two fields above
    pub units: UnitSystem,
}

impl BmiInput {
    /// Weight normalized to kilograms.
    pub fn weight_kg(&self) -> Kilograms {
        match self.units {
            UnitSystem::Metric => Kilograms(self.weight),
            UnitSystem::Imperial => PoundsMass(self.weight).into(),
        }
    }

    /// Height normalized to centimeters.
    pub fn height_cm(&self) -> Centimeters {
        match self.units {
            UnitSystem::Metric => Centimeters(self.height),
            UnitSystem::Imperial => Inches(self.height).into(),
        }
    }

    /// Validate input parameters (bounds applied after unit normalization).
    pub fn validate(&self) -> CalcResult<()> {
        check_range("weight", self.weight_kg().0, 10.0, 500.0)?;
        check_range("height", self.height_cm().0, 50.0, 250.0)?;
        Ok(())
    }
}

/// Results from a BMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to 1 decimal place
    pub bmi: f64,

    /// Classification band
    pub category: BmiCategory,

    /// Weight range (kg) that would put this height in the Normal band
    pub normal_weight_range_kg: (f64, f64),
}

/// Calculate BMI and its classification.
pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;

    let kg = input.weight_kg().0;
    let m: Meters = input.height_cm().into();
    let m2 = m.0 * m.0;

    let bmi = (kg / m2 * 10.0).round() / 10.0;

    Ok(BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
        normal_weight_range_kg: (
            (18.5 * m2 * 10.0).round() / 10.0,
            (24.9 * m2 * 10.0).round() / 10.0,
        ),
    })
}
