//! # Unit Types
//!
//! Type-safe wrappers for the quantities that cross calculator boundaries.
//! These are lightweight f64 newtypes rather than a full units library:
//!
//! - each calculator uses a small, fixed set of units
//! - JSON serialization stays clean (just numbers)
//! - no runtime overhead
//!
//! `Percent` carries the rate conversions the loan math depends on; the
//! mass and length types back the BMI unit systems.
//!
//! ## Example
//!
//! ```rust
//! use reckon_core::units::{PoundsMass, Kilograms, Percent};
//!
//! let weight = PoundsMass(154.0);
//! let kg: Kilograms = weight.into();
//! assert!((kg.0 - 69.853).abs() < 0.01);
//!
//! let rate = Percent(6.0);
//! assert!((rate.monthly_fraction() - 0.005).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Rates
// ============================================================================

/// Rate expressed in percent (6.0 means 6%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// The rate as a fraction (6.0% -> 0.06)
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// The rate as a monthly fraction (6.0% annual -> 0.005 per month)
    pub fn monthly_fraction(self) -> f64 {
        self.0 / 100.0 / 12.0
    }
}

// ============================================================================
// Mass
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds (avoirdupois)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoundsMass(pub f64);

const KG_PER_LB: f64 = 0.453_592_37;

impl From<PoundsMass> for Kilograms {
    fn from(lb: PoundsMass) -> Self {
        Kilograms(lb.0 * KG_PER_LB)
    }
}

impl From<Kilograms> for PoundsMass {
    fn from(kg: Kilograms) -> Self {
        PoundsMass(kg.0 / KG_PER_LB)
    }
}

// ============================================================================
// Length
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

const CM_PER_IN: f64 = 2.54;

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_IN)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_IN)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Percent);
impl_arithmetic!(Kilograms);
impl_arithmetic!(PoundsMass);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Inches);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_to_kilograms() {
        let lb = PoundsMass(220.462);
        let kg: Kilograms = lb.into();
        assert!((kg.0 - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_inches_to_centimeters() {
        let inches = Inches(69.0);
        let cm: Centimeters = inches.into();
        assert!((cm.0 - 175.26).abs() < 0.01);
    }

    #[test]
    fn test_percent_fractions() {
        let rate = Percent(12.0);
        assert!((rate.fraction() - 0.12).abs() < 1e-12);
        assert!((rate.monthly_fraction() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilograms(100.0);
        let b = Kilograms(40.0);
        assert_eq!((a + b).0, 140.0);
        assert_eq!((a - b).0, 60.0);
        assert_eq!((a * 2.0).0, 200.0);
        assert_eq!((a / 4.0).0, 25.0);
    }

    #[test]
    fn test_serialization() {
        let rate = Percent(6.5);
        let json = serde_json::to_string(&rate).unwrap();
        assert_eq!(json, "6.5");

        let roundtrip: Percent = serde_json::from_str(&json).unwrap();
        assert_eq!(rate, roundtrip);
    }
}
