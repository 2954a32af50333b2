//! Calculation variant tags and their reductions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CalculationError;

/// Closed set of calculation variants.
///
/// The lowercase tag is what gets stored in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl CalculationType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
    ];

    /// Stored tag for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
        }
    }

    /// Reduce `inputs` to a single value.
    ///
    /// Every variant requires at least two operands. Subtraction and division
    /// fold left to right from the first operand; division rejects any zero
    /// divisor. A reduction that overflows to an infinity or NaN fails with
    /// [`CalculationError::ResultOutOfRange`].
    ///
    /// # Examples
    /// ```
    /// use calc_backend::domain::CalculationType;
    ///
    /// assert_eq!(CalculationType::Subtraction.evaluate(&[1.0, 2.0, 3.0]), Ok(-4.0));
    /// assert!(CalculationType::Addition.evaluate(&[5.0]).is_err());
    /// ```
    pub fn evaluate(self, inputs: &[f64]) -> Result<f64, CalculationError> {
        let (first, rest) = operands(inputs)?;
        let value = match self {
            Self::Addition => rest.iter().fold(first, |acc, value| acc + value),
            Self::Subtraction => rest.iter().fold(first, |acc, value| acc - value),
            Self::Multiplication => rest.iter().fold(first, |acc, value| acc * value),
            Self::Division => {
                rest.iter()
                    .enumerate()
                    .try_fold(first, |acc, (offset, divisor)| {
                        if *divisor == 0.0 {
                            Err(CalculationError::DivisionByZero {
                                position: offset + 1,
                            })
                        } else {
                            Ok(acc / divisor)
                        }
                    })?
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalculationError::ResultOutOfRange)
        }
    }
}

fn operands(inputs: &[f64]) -> Result<(f64, &[f64]), CalculationError> {
    match inputs.split_first() {
        Some((first, rest)) if !rest.is_empty() => Ok((*first, rest)),
        _ => Err(CalculationError::InsufficientInputs {
            count: inputs.len(),
        }),
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationType {
    type Err = CalculationError;

    /// Parse a type tag, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| CalculationError::UnsupportedType {
                tag: value.to_owned(),
            })
    }
}
