//! The persisted calculation entity and its factory.

use std::fmt;

use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

use super::{CalculationError, CalculationInputs, CalculationType};

/// Every column of a stored calculation, used to rehydrate a [`Calculation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDraft {
    pub id: Uuid,
    pub owner_id: UserId,
    #[serde(rename = "type")]
    pub kind: CalculationType,
    pub inputs: Vec<f64>,
    #[serde(default)]
    pub result: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user-owned calculation.
///
/// `id`, `owner_id`, the type tag and `created_at` are fixed once built.
/// Inputs may be replaced and the result cached; both refresh `updated_at`.
///
/// # Examples
/// ```
/// use calc_backend::domain::{Calculation, CalculationType, UserId};
///
/// let calculation = Calculation::create("Division", UserId::random(), vec![1.0, 2.0, 3.0])?;
/// assert_eq!(calculation.kind(), CalculationType::Division);
/// assert_eq!(calculation.evaluate()?, 1.0 / 6.0);
/// assert!(calculation.result().is_none());
/// # Ok::<(), calc_backend::domain::CalculationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalculationDraft", into = "CalculationDraft")]
pub struct Calculation {
    id: Uuid,
    owner_id: UserId,
    kind: CalculationType,
    inputs: CalculationInputs,
    result: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Calculation {
    /// Build a calculation for `owner_id`, selecting the variant from
    /// `type_tag` (case-insensitive).
    ///
    /// Only the tag and the finiteness of the inputs are checked; operand
    /// count is enforced at evaluation time.
    pub fn create(
        type_tag: &str,
        owner_id: UserId,
        inputs: Vec<f64>,
    ) -> Result<Self, CalculationError> {
        Self::create_with_clock(type_tag, owner_id, inputs, &DefaultClock)
    }

    /// Same as [`Calculation::create`], stamping timestamps from `clock`.
    pub fn create_with_clock(
        type_tag: &str,
        owner_id: UserId,
        inputs: Vec<f64>,
        clock: &dyn Clock,
    ) -> Result<Self, CalculationError> {
        let kind = type_tag.parse::<CalculationType>()?;
        let inputs = CalculationInputs::new(inputs)?;
        let now = clock.utc();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            kind,
            inputs,
            result: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate a calculation from stored columns.
    pub fn new(draft: CalculationDraft) -> Result<Self, CalculationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn kind(&self) -> CalculationType {
        self.kind
    }

    pub fn inputs(&self) -> &CalculationInputs {
        &self.inputs
    }

    /// Cached result, if one has been computed since the inputs last changed.
    pub fn result(&self) -> Option<f64> {
        self.result
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user_id` owns this calculation.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Evaluate the inputs without touching the record.
    pub fn evaluate(&self) -> Result<f64, CalculationError> {
        self.kind.evaluate(self.inputs.as_slice())
    }

    /// Evaluate and cache the result.
    ///
    /// On failure the record is left unchanged.
    pub fn compute_result(&mut self, now: DateTime<Utc>) -> Result<f64, CalculationError> {
        let value = self.evaluate()?;
        self.result = Some(value);
        self.updated_at = now;
        Ok(value)
    }

    /// Swap the operands, discarding any cached result.
    pub fn replace_inputs(
        &mut self,
        inputs: Vec<f64>,
        now: DateTime<Utc>,
    ) -> Result<(), CalculationError> {
        self.inputs = CalculationInputs::new(inputs)?;
        self.result = None;
        self.updated_at = now;
        Ok(())
    }
}

impl fmt::Display for Calculation {
    /// Compact form, e.g. `Calculation(type=addition, inputs=[1.0, 2.0])`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calculation(type={}, inputs={:?})",
            self.kind,
            self.inputs.as_slice()
        )
    }
}

impl TryFrom<CalculationDraft> for Calculation {
    type Error = CalculationError;

    fn try_from(value: CalculationDraft) -> Result<Self, Self::Error> {
        let CalculationDraft {
            id,
            owner_id,
            kind,
            inputs,
            result,
            created_at,
            updated_at,
        } = value;

        if result.is_some_and(|value| !value.is_finite()) {
            return Err(CalculationError::ResultOutOfRange);
        }

        Ok(Self {
            id,
            owner_id,
            kind,
            inputs: CalculationInputs::new(inputs)?,
            result,
            created_at,
            updated_at,
        })
    }
}

impl From<Calculation> for CalculationDraft {
    fn from(value: Calculation) -> Self {
        let Calculation {
            id,
            owner_id,
            kind,
            inputs,
            result,
            created_at,
            updated_at,
        } = value;

        Self {
            id,
            owner_id,
            kind,
            inputs: inputs.into(),
            result,
            created_at,
            updated_at,
        }
    }
}
