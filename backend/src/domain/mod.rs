//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed calculation entities and the services that
//! orchestrate them. Types keep their invariants behind constructors; the
//! persistence layer rehydrates them through validated drafts.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`): transport-agnostic failure payload.
//! - ErrorCode: stable error identifier.
//! - UserId: owner reference for calculations.
//! - Calculation, CalculationType, CalculationInputs: the calculation record,
//!   its variant tag, and its operands.
//! - CalculationService: create, evaluate, and manage owned calculations.

pub mod calculation;
pub mod calculation_service;
pub mod error;
pub mod ports;
pub mod user;

pub use self::calculation::{
    Calculation, CalculationDraft, CalculationError, CalculationInputs, CalculationType,
};
pub use self::calculation_service::{CalculationService, CreateCalculationRequest};
pub use self::error::{DomainError as Error, DomainErrorValidationError, ErrorCode};
pub use self::user::{UserId, UserValidationError};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use calc_backend::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("calculation not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
