use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// The model artifact does not exist. Nothing can be served without it.
#[derive(Debug)]
pub struct ModelNotFoundError {
    pub path: PathBuf,
}

impl Display for ModelNotFoundError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "Model file not found: {}", self.path.display())
    }
}

impl std::error::Error for ModelNotFoundError {}

/// Inference failed. Terminal for the current submission only.
#[derive(Debug)]
pub struct PredictionError(anyhow::Error);

impl From<anyhow::Error> for PredictionError {
    fn from(error: anyhow::Error) -> Self {
        Self(error)
    }
}

impl Display for PredictionError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:#}", self.0)
    }
}

impl std::error::Error for PredictionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}
