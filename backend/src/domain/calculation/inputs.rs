//! Ordered numeric operands of a calculation.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::CalculationError;

/// Operands in submission order.
///
/// ## Invariants
/// - Every value is finite. JSON storage cannot carry NaN or infinities.
///
/// Length is unchecked here: a calculation may hold fewer than
/// two operands and only fails once evaluated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CalculationInputs(Vec<f64>);

impl CalculationInputs {
    /// Validate operands supplied by a caller.
    ///
    /// # Examples
    /// ```
    /// use calc_backend::domain::CalculationInputs;
    ///
    /// let inputs = CalculationInputs::new(vec![1.0, 2.5]).unwrap();
    /// assert_eq!(inputs.as_slice(), &[1.0, 2.5]);
    /// assert!(CalculationInputs::new(vec![1.0, f64::NAN]).is_err());
    /// ```
    pub fn new(values: Vec<f64>) -> Result<Self, CalculationError> {
        if let Some(index) = values.iter().position(|value| !value.is_finite()) {
            return Err(CalculationError::invalid_input(format!(
                "input {index} is not a finite number"
            )));
        }
        Ok(Self(values))
    }

    /// Decode operands from their stored JSON form.
    ///
    /// Anything other than an array of numbers is rejected with
    /// [`CalculationError::InvalidInput`].
    pub fn from_json(value: &Value) -> Result<Self, CalculationError> {
        let Value::Array(items) = value else {
            return Err(CalculationError::invalid_input(format!(
                "expected a JSON array, found {}",
                json_kind(value)
            )));
        };

        let values = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_f64().ok_or_else(|| {
                    CalculationError::invalid_input(format!(
                        "input {index} is {}, not a number",
                        json_kind(item)
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(values)
    }

    /// Encode operands as a JSON array of numbers.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|value| Number::from_f64(*value).map_or(Value::Null, Value::Number))
                .collect(),
        )
    }

    /// Operands as a slice.
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Number of operands.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no operands at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Vec<f64>> for CalculationInputs {
    type Error = CalculationError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CalculationInputs> for Vec<f64> {
    fn from(value: CalculationInputs) -> Self {
        value.0
    }
}
