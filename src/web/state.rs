use std::path::PathBuf;

use crate::opts::PresentationOpts;
use crate::predictor::ModelLoader;
use crate::prelude::*;
use crate::web::session::SessionStore;

/// Web application global state.
#[derive(Clone)]
pub struct State {
    pub model_loader: Arc<ModelLoader>,
    pub sessions: SessionStore,
    pub presentation: PresentationOpts,

    /// Optional sketch of the problem, skipped when the file does not exist.
    pub image_path: Arc<PathBuf>,
}

impl State {
    pub fn new(
        model_loader: ModelLoader,
        presentation: PresentationOpts,
        image_path: PathBuf,
        session_ttl: StdDuration,
    ) -> Result<Self> {
        Ok(Self {
            model_loader: Arc::new(model_loader),
            sessions: SessionStore::new(session_ttl)?,
            presentation,
            image_path: Arc::new(image_path),
        })
    }

    pub async fn has_image(&self) -> bool {
        tokio::fs::metadata(self.image_path.as_path())
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }
}
