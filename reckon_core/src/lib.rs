//! # reckon_core - Everyday Calculation Engine
//!
//! `reckon_core` is the computational heart of Reckon, a suite of finance,
//! math, health, and physics calculators with a clean, frontend-agnostic API.
//! All inputs and outputs are JSON-serializable, so any shell (CLI, desktop,
//! web, or an AI assistant speaking JSON) can drive it the same way.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Injected Storage**: History lives behind a trait, never a global
//!
//! ## Quick Start
//!
//! ```rust
//! use reckon_core::calculations::{run, CalculationInput};
//! use reckon_core::calculations::bmi::{BmiInput, UnitSystem};
//!
//! let input = CalculationInput::Bmi(BmiInput {
//!     weight: 70.0,
//!     height: 175.0,
//!     units: UnitSystem::Metric,
//! });
//!
//! let output = run(&input).unwrap();
//! println!("{}", output.summary());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculator types (loan, growth, math, health, physics)
//! - [`validate`] - Shared range/positivity checks and the field-schema combinator
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`formatter`] - Display formatting ("N/A" convention, currency grouping)
//! - [`history`] - Injected calculation history (memory and file backed)
//! - [`export`] - CSV export of schedules and history

pub mod calculations;
pub mod errors;
pub mod export;
pub mod formatter;
pub mod history;
pub mod units;
pub mod validate;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run, CalculationInput, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use history::{FileHistory, HistoryEntry, HistoryStore, MemoryHistory};
