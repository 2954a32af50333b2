//! Calculation records and their per-variant evaluation.
//!
//! Every calculation variant shares one flat record shape. The
//! [`CalculationType`] tag selects which reduction [`Calculation::evaluate`]
//! applies to the stored [`CalculationInputs`].

mod inputs;
mod kind;
mod record;

pub use inputs::CalculationInputs;
pub use kind::CalculationType;
pub use record::{Calculation, CalculationDraft};

/// Failures raised while building or evaluating a calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    /// The type tag names none of the known variants.
    #[error("unsupported calculation type: {tag}")]
    UnsupportedType { tag: String },
    /// The inputs are not a list of finite numbers.
    #[error("inputs must be a list of numbers: {reason}")]
    InvalidInput { reason: String },
    /// Fewer than two operands were supplied.
    #[error("inputs must be a list with at least two numbers (got {count})")]
    InsufficientInputs { count: usize },
    /// A divisor after the first operand is zero.
    #[error("cannot divide by zero (input {position})")]
    DivisionByZero { position: usize },
    /// Finite operands reduced to NaN or an infinity.
    #[error("calculation result is not a finite number")]
    ResultOutOfRange,
}

impl CalculationError {
    /// Stable snake_case identifier for the failure, suitable for payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::InvalidInput { .. } => "invalid_input",
            Self::InsufficientInputs { .. } => "insufficient_inputs",
            Self::DivisionByZero { .. } => "division_by_zero",
            Self::ResultOutOfRange => "result_out_of_range",
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
