use std::str::FromStr;

use serde::Deserialize;

use crate::models::Parameter;
use crate::prelude::*;

/// Single form field value: finite and non-negative.
///
/// An empty field reads as zero, like an untouched number input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct InputValue(f64);

impl InputValue {
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for InputValue {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            Err(anyhow!("{} is not a finite number", value))
        } else if value < 0.0 {
            Err(anyhow!("{} is negative, expected a value of at least 0.0", value))
        } else {
            // `-0.0` passes the bound check, store it as `0.0`.
            Ok(Self(value.abs()))
        }
    }
}

impl TryFrom<String> for InputValue {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::default());
        }
        let value = f64::from_str(value).with_context(|| format!("`{}` is not a number", value))?;
        Self::try_from(value)
    }
}

/// The seven dimensionless terms, in the model's feature order.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PredictionRequest([f64; 7]);

impl PredictionRequest {
    pub const N_FEATURES: usize = Parameter::ALL.len();

    #[cfg(test)]
    pub fn new(values: [f64; Self::N_FEATURES]) -> Result<Self> {
        for (parameter, value) in Parameter::ALL.into_iter().zip(values) {
            InputValue::try_from(value)
                .with_context(|| format!("invalid {}", parameter.label()))?;
        }
        Ok(Self(values))
    }

    /// All the values are exactly zero, which the model cannot make sense of.
    pub fn is_degenerate(&self) -> bool {
        self.0.iter().all(|value| *value == 0.0)
    }

    pub const fn get(&self, parameter: Parameter) -> f64 {
        self.0[parameter.index()]
    }

    pub const fn features(&self) -> &[f64; Self::N_FEATURES] {
        &self.0
    }
}

impl From<[InputValue; PredictionRequest::N_FEATURES]> for PredictionRequest {
    fn from(values: [InputValue; PredictionRequest::N_FEATURES]) -> Self {
        Self(values.map(InputValue::get))
    }
}
