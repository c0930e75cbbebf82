use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;
use tokio::task::spawn_blocking;

use crate::predictor::{ModelNotFoundError, Regressor, TreeEnsemble};
use crate::prelude::*;
use crate::tracing::format_elapsed;

/// Shared read-only model, cloned into every request.
pub type ModelHandle = Arc<dyn Regressor>;

/// Loads the model artifact once per process lifetime.
///
/// A failed load is not remembered, the next call retries.
pub struct ModelLoader {
    path: PathBuf,
    model: OnceCell<ModelHandle>,
}

impl ModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            model: OnceCell::new(),
        }
    }

    /// Wraps an already loaded model.
    #[cfg(test)]
    pub fn preloaded(model: ModelHandle) -> Self {
        Self {
            path: PathBuf::new(),
            model: OnceCell::new_with(Some(model)),
        }
    }

    #[instrument(skip_all, fields(path = ?self.path))]
    pub async fn load(&self) -> Result<ModelHandle> {
        let model = self
            .model
            .get_or_try_init(|| load_model(self.path.clone()))
            .await?;
        Ok(Arc::clone(model))
    }
}

async fn load_model(path: PathBuf) -> Result<ModelHandle> {
    let start_instant = Instant::now();
    let model = spawn_blocking(move || read_artifact(&path)).await??;
    info!(
        n_trees = model.trees.len(),
        n_features = model.n_features,
        elapsed = %format_elapsed(start_instant),
        "loaded the model"
    );
    Ok(Arc::new(model))
}

/// Encoding of the model artifact, chosen by the file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ArtifactFormat {
    Json,
    Pickle,
}

impl ArtifactFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("pkl" | "pickle") => Ok(Self::Pickle),
            _ => Err(anyhow!(
                "unsupported model format `{}`, expected `.json`, `.pkl` or `.pickle`",
                path.display(),
            )),
        }
    }

    fn deserialize(self, bytes: &[u8]) -> Result<TreeEnsemble> {
        match self {
            Self::Json => serde_json::from_slice(bytes).context("failed to parse the JSON model"),
            Self::Pickle => serde_pickle::from_slice(bytes, serde_pickle::DeOptions::new())
                .context("failed to unpickle the model"),
        }
    }
}

#[instrument(level = "debug")]
fn read_artifact(path: &Path) -> Result<TreeEnsemble> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(ModelNotFoundError {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(error) => {
            return Err(Error::new(error).context(format!("failed to read `{}`", path.display())));
        }
    };
    debug!(n_bytes = bytes.len(), "read the artifact");
    ArtifactFormat::from_path(path)?.deserialize(&bytes)
}
