use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;
use crate::web::state::State;

const CACHE_CONTROL: &str = "public, max-age=3600";

/// Serves the problem sketch. Its absence is not an error, the page simply skips it.
#[handler]
#[instrument(skip_all, level = "debug")]
pub async fn get_sketch(Data(state): Data<&State>) -> Result<Response> {
    let path = state.image_path.as_path();
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(?path, "no sketch");
            return Ok(StatusCode::NOT_FOUND.into_response());
        }
        Err(error) => {
            return Err(Error::new(error).context(format!("failed to read `{}`", path.display())));
        }
    };
    Ok(content
        .with_content_type(content_type(path))
        .with_header("Cache-Control", CACHE_CONTROL)
        .into_response())
}

fn content_type(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
