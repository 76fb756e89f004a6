//! # Calorie Expenditure
//!
//! Mifflin-St Jeor basal metabolic rate, TDEE via activity multipliers, and
//! MET-based burn for individual activities looked up from a static table.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validate::check_range;

/// MET values per activity (Compendium of Physical Activities, rounded)
static MET_TABLE: Lazy<Vec<(&'static str, f64)>> = Lazy::new(|| {
    vec![
        ("sleeping", 0.95),
        ("sitting", 1.3),
        ("walking", 3.5),
        ("walking_brisk", 4.3),
        ("cycling", 7.5),
        ("cycling_leisure", 4.0),
        ("running", 9.8),
        ("running_fast", 11.8),
        ("swimming", 8.0),
        ("weightlifting", 6.0),
        ("yoga", 2.5),
        ("basketball", 6.5),
        ("soccer", 7.0),
        ("hiking", 6.0),
        ("dancing", 4.5),
    ]
});

/// Look up an activity's MET value.
pub fn met_for(activity: &str) -> Option<f64> {
    MET_TABLE
        .iter()
        .find(|(name, _)| *name == activity)
        .map(|(_, met)| *met)
}

/// Biological sex, for the Mifflin-St Jeor offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Overall activity level for the TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    /// Standard TDEE multiplier on BMR.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

/// Input parameters for a calorie calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieInput {
    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Height in centimeters
    pub height_cm: f64,

    /// Age in years
    pub age: u32,

    /// Biological sex
    pub sex: Sex,

    /// Overall activity level
    pub activity_level: ActivityLevel,

    /// Optional single activity to estimate a MET burn for
    pub activity: Option<String>,

    /// Duration of the activity in hours
    pub activity_hours: f64,
}

impl CalorieInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_range("weight_kg", self.weight_kg, 10.0, 500.0)?;
        check_range("height_cm", self.height_cm, 50.0, 250.0)?;
        check_range("age", self.age as f64, 10.0, 120.0)?;
        check_range("activity_hours", self.activity_hours, 0.0, 24.0)?;
        if let Some(activity) = &self.activity {
            if met_for(activity).is_none() {
                return Err(CalcError::invalid_input(
                    "activity",
                    activity.clone(),
                    "Unknown activity",
                ));
            }
        }
        Ok(())
    }
}

/// Results from a calorie calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieResult {
    /// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
    pub bmr: f64,

    /// Total daily energy expenditure (BMR x activity multiplier)
    pub tdee: f64,

    /// Calories burned by the requested activity, if one was given
    pub activity_burn: Option<f64>,
}

/// Mifflin-St Jeor BMR: 10·kg + 6.25·cm − 5·age + s, with s = +5 for men
/// and −161 for women.
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + offset
}

/// Calculate BMR, TDEE, and an optional MET-based activity burn.
pub fn calculate(input: &CalorieInput) -> CalcResult<CalorieResult> {
    input.validate()?;

    let bmr = mifflin_st_jeor(input.weight_kg, input.height_cm, input.age, input.sex);
    let tdee = bmr * input.activity_level.multiplier();

    // MET burn: kcal = MET x kg x hours
    let activity_burn = input.activity.as_deref().map(|activity| {
        let met = met_for(activity).unwrap_or(0.0);
        met * input.weight_kg * input.activity_hours
    });

    Ok(CalorieResult {
        bmr,
        tdee,
        activity_burn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> CalorieInput {
        CalorieInput {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30,
            sex: Sex::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            activity: None,
            activity_hours: 0.0,
        }
    }

    #[test]
    fn test_mifflin_st_jeor_male() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
        let bmr = mifflin_st_jeor(70.0, 175.0, 30, Sex::Male);
        assert!((bmr - 1648.75).abs() < 1e-9);
    }

    #[test]
    fn test_mifflin_st_jeor_female() {
        // 10*60 + 6.25*165 - 5*25 - 161 = 1345.25
        let bmr = mifflin_st_jeor(60.0, 165.0, 25, Sex::Female);
        assert!((bmr - 1345.25).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_multiplier() {
        let result = calculate(&test_input()).unwrap();
        assert!((result.tdee - result.bmr * 1.55).abs() < 1e-9);
    }

    #[test]
    fn test_met_burn() {
        let mut input = test_input();
        input.activity = Some("running".to_string());
        input.activity_hours = 1.0;
        let result = calculate(&input).unwrap();
        // 9.8 MET * 70 kg * 1 h = 686 kcal
        assert!((result.activity_burn.unwrap() - 686.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_activity_rejected() {
        let mut input = test_input();
        input.activity = Some("skydiving".to_string());
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_met_table_lookup() {
        assert_eq!(met_for("walking"), Some(3.5));
        assert_eq!(met_for("unknown"), None);
    }

    #[test]
    fn test_age_bounds() {
        let mut input = test_input();
        input.age = 5;
        assert!(calculate(&input).is_err());
    }
}
