//! Error types for the calculators.

use thiserror::Error;

/// A specialized Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised for caller mistakes.
///
/// Invalid user input is reported through
/// [`ValidationResult`](crate::validate::ValidationResult) and undefined math
/// through `Option::None`; neither goes through this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// The TVM dispatcher was asked to solve for an unknown variable.
    #[error("Unsupported TVM variable: {0}")]
    UnsupportedVariable(String),
}
