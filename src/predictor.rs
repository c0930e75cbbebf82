//! Validates a submission, runs the inference and classifies the outcome.

use std::panic::{catch_unwind, AssertUnwindSafe};

pub use self::ensemble::TreeEnsemble;
pub use self::error::{ModelNotFoundError, PredictionError};
pub use self::loader::{ModelHandle, ModelLoader};
use crate::models::PredictionRequest;
use crate::prelude::*;

mod ensemble;
mod error;
mod loader;

/// Pre-trained regression model.
pub trait Regressor: Send + Sync {
    /// Predicts the wedge length ratio from a single row of features.
    fn predict(&self, features: &[f64]) -> Result<f64>;
}

/// Result of a single submission.
#[must_use]
#[derive(Debug)]
pub enum Outcome {
    /// All the inputs are zero, the model has not been consulted.
    Warned,

    /// Predicted wedge length ratio, `L/Lo`.
    Succeeded(f64),

    Failed(PredictionError),
}

/// Handles a single submission: `Validating → {Warned | Predicting → {Succeeded | Failed}}`.
#[instrument(level = "debug", skip_all)]
pub fn submit(model: &dyn Regressor, request: &PredictionRequest) -> Outcome {
    if request.is_degenerate() {
        debug!("all the inputs are zero, skipping the inference");
        return Outcome::Warned;
    }
    match predict(model, request) {
        Ok(prediction) => {
            debug!(prediction);
            Outcome::Succeeded(prediction)
        }
        Err(error) => {
            warn!(?request, "prediction failed: {}", error);
            Outcome::Failed(error)
        }
    }
}

/// Runs the inference. Neither errors nor panics escape this function.
pub fn predict(model: &dyn Regressor, request: &PredictionRequest) -> Result<f64, PredictionError> {
    match catch_unwind(AssertUnwindSafe(|| model.predict(request.features()))) {
        Ok(result) => result.map_err(PredictionError::from),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|message| message.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(anyhow!("the model panicked: {}", message).into())
        }
    }
}
