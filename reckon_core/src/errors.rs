//! # Error Types
//!
//! Structured error types for reckon_core. Errors carry enough context for a
//! frontend to display a useful inline message and for callers to branch
//! programmatically on the error code.
//!
//! ## Example
//!
//! ```rust
//! use reckon_core::errors::{CalcError, CalcResult};
//!
//! fn validate_amount(amount: f64) -> CalcResult<()> {
//!     if amount < 100.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "amount".to_string(),
//!             value: amount.to_string(),
//!             reason: "Amount must be at least 100".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for reckon_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Two broad families: input validation failures (bad or missing fields)
/// and numeric failures (domain violations, non-convergence). The remaining
/// variants cover history-store I/O.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The input is outside the mathematical domain of the operation
    /// (even root of a negative, log of a non-positive, empty expression)
    #[error("Domain error in {operation}: {reason}")]
    DomainError { operation: String, reason: String },

    /// An iterative solver failed to converge within its iteration cap
    #[error("{method} did not converge after {iterations} iterations")]
    NonConvergence { method: String, iterations: u32 },

    /// Expression could not be tokenized or parsed
    #[error("Parse error in '{expression}' at position {position}: {reason}")]
    ParseError {
        expression: String,
        position: usize,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/CSV serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// History file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DomainError
    pub fn domain(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a NonConvergence error
    pub fn non_convergence(method: impl Into<String>, iterations: u32) -> Self {
        CalcError::NonConvergence {
            method: method.into(),
            iterations,
        }
    }

    /// Create a ParseError
    pub fn parse(
        expression: impl Into<String>,
        position: usize,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::ParseError {
            expression: expression.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by user input rather than engine internals
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::ParseError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::NonConvergence { .. } => "NON_CONVERGENCE",
            CalcError::ParseError { .. } => "PARSE_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("amount", "-500", "Amount must be at least 100");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("rate").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::domain("nth_root", "even root of negative").error_code(),
            "DOMAIN_ERROR"
        );
        assert_eq!(
            CalcError::non_convergence("Newton-Raphson IRR", 1000).error_code(),
            "NON_CONVERGENCE"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::missing_field("x").is_input_error());
        assert!(CalcError::parse("2+", 2, "unexpected end").is_input_error());
        assert!(!CalcError::domain("sqrt", "negative").is_input_error());
    }
}
