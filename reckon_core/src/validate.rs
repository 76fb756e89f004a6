//! # Input Validation
//!
//! Shared validation helpers used by every calculator, plus a schema-driven
//! combinator for validating raw string inputs coming from a form-like
//! frontend in one pass instead of ad hoc per-field checks.
//!
//! Two layers:
//!
//! - low-level range checks (`check_range`, `check_positive`, `check_min`)
//!   used by the typed `*Input::validate()` methods
//! - `Schema` / `Validated` for callers holding untyped
//!   `HashMap<String, String>` input (a web form, a REPL)
//!
//! All bounds are inclusive: a loan amount of exactly 100 passes a
//! `range(100, ...)` check, 99.99 does not.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use reckon_core::validate::{FieldSpec, Schema};
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::number("amount").range(100.0, 1_000_000.0),
//!     FieldSpec::number("rate").range(0.1, 30.0),
//!     FieldSpec::integer("term").range(1.0, 360.0),
//! ]);
//!
//! let mut inputs = HashMap::new();
//! inputs.insert("amount".to_string(), "25000".to_string());
//! inputs.insert("rate".to_string(), "6.5".to_string());
//! inputs.insert("term".to_string(), "60".to_string());
//!
//! let validated = schema.validate(&inputs).unwrap();
//! assert_eq!(validated.get("amount").unwrap(), 25000.0);
//! assert_eq!(validated.get_usize("term").unwrap(), 60);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Check that a value lies in the inclusive range [min, max].
pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    if value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Check that a value is strictly positive.
pub fn check_positive(field: &str, value: f64) -> CalcResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be positive",
        ));
    }
    Ok(())
}

/// Check that a value is at least `min` (inclusive).
pub fn check_min(field: &str, value: f64, min: f64) -> CalcResult<()> {
    if !value.is_finite() || value < min {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must be at least {}", min),
        ));
    }
    Ok(())
}

/// Declarative description of one numeric input field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in the raw input map
    pub name: String,

    /// Inclusive lower bound, if any
    pub min: Option<f64>,

    /// Inclusive upper bound, if any
    pub max: Option<f64>,

    /// Require the parsed value to be a whole number
    pub integer: bool,

    /// Missing field is an error when true (default)
    pub required: bool,
}

impl FieldSpec {
    /// A required floating-point field.
    pub fn number(name: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            min: None,
            max: None,
            integer: false,
            required: true,
        }
    }

    /// A required whole-number field.
    pub fn integer(name: impl Into<String>) -> Self {
        FieldSpec {
            integer: true,
            ..FieldSpec::number(name)
        }
    }

    /// Constrain the field to the inclusive range [min, max].
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Constrain the field to be at least `min`.
    pub fn at_least(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Mark the field as optional (absent fields are skipped, not errors).
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn check(&self, raw: &str) -> CalcResult<f64> {
        let value: f64 = raw.trim().parse().map_err(|_| {
            CalcError::invalid_input(&self.name, raw, "Value must be a number")
        })?;
        if !value.is_finite() {
            return Err(CalcError::invalid_input(
                &self.name,
                raw,
                "Value must be a finite number",
            ));
        }
        if self.integer && value.fract() != 0.0 {
            return Err(CalcError::invalid_input(
                &self.name,
                raw,
                "Value must be a whole number",
            ));
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(CalcError::invalid_input(
                    &self.name,
                    raw,
                    format!("Value must be at least {}", min),
                ));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(CalcError::invalid_input(
                    &self.name,
                    raw,
                    format!("Value must be at most {}", max),
                ));
            }
        }
        Ok(value)
    }
}

/// A set of field specs validated together against a raw input map.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Schema { fields }
    }

    /// Validate raw string inputs against the schema.
    ///
    /// Fails fast on the first bad field, matching the single inline error
    /// a calculator form shows.
    pub fn validate(&self, inputs: &HashMap<String, String>) -> CalcResult<Validated> {
        let mut values = HashMap::new();
        for spec in &self.fields {
            match inputs.get(&spec.name) {
                Some(raw) => {
                    values.insert(spec.name.clone(), spec.check(raw)?);
                }
                None if spec.required => {
                    return Err(CalcError::missing_field(&spec.name));
                }
                None => {}
            }
        }
        Ok(Validated { values })
    }
}

/// Parsed and range-checked values keyed by field name.
#[derive(Debug, Clone)]
pub struct Validated {
    values: HashMap<String, f64>,
}

impl Validated {
    /// Get a validated value by field name.
    pub fn get(&self, name: &str) -> CalcResult<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| CalcError::missing_field(name))
    }

    /// Get a validated value as usize (for term counts, grid sizes).
    pub fn get_usize(&self, name: &str) -> CalcResult<usize> {
        Ok(self.get(name)? as usize)
    }

    /// Get an optional value that may not have been supplied.
    pub fn get_opt(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::number("amount").range(100.0, 10_000_000.0),
            FieldSpec::number("rate").range(0.1, 30.0),
            FieldSpec::integer("term").range(1.0, 360.0),
            FieldSpec::number("extra").at_least(0.0).optional(),
        ])
    }

    fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_inputs() {
        let v = loan_schema()
            .validate(&inputs(&[("amount", "25000"), ("rate", "6.5"), ("term", "60")]))
            .unwrap();
        assert_eq!(v.get("amount").unwrap(), 25000.0);
        assert_eq!(v.get_usize("term").unwrap(), 60);
        assert!(v.get_opt("extra").is_none());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // Exactly 100 is accepted
        let ok = loan_schema()
            .validate(&inputs(&[("amount", "100"), ("rate", "0.1"), ("term", "360")]));
        assert!(ok.is_ok());

        // 99.99 is rejected
        let err = loan_schema()
            .validate(&inputs(&[("amount", "99.99"), ("rate", "6.5"), ("term", "60")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_required_field() {
        let err = loan_schema()
            .validate(&inputs(&[("amount", "25000"), ("term", "60")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = loan_schema()
            .validate(&inputs(&[("amount", "lots"), ("rate", "6.5"), ("term", "60")]))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_integer_constraint() {
        let err = loan_schema()
            .validate(&inputs(&[("amount", "25000"), ("rate", "6.5"), ("term", "60.5")]))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_range_helpers() {
        assert!(check_range("rate", 0.1, 0.1, 30.0).is_ok());
        assert!(check_range("rate", 30.0001, 0.1, 30.0).is_err());
        assert!(check_range("rate", f64::NAN, 0.1, 30.0).is_err());
        assert!(check_positive("amount", 1.0).is_ok());
        assert!(check_positive("amount", 0.0).is_err());
        assert!(check_min("extra", 0.0, 0.0).is_ok());
        assert!(check_min("extra", -1.0, 0.0).is_err());
    }
}
