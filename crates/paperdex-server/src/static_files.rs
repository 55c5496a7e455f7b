//! Static serving of the bundled front-end
//!
//! Assets are probed against a short list of candidate directories so the
//! server works whether it was started from the project root or a
//! subdirectory, mirroring how PDF resolution behaves.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::AppState;

/// GET /frontend
pub async fn frontend_index(State(state): State<Arc<AppState>>) -> Response {
    serve_asset(&state, "index.html").await
}

/// GET /frontend/{*path}
pub async fn frontend_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    serve_asset(&state, &path).await
}

async fn serve_asset(state: &AppState, path: &str) -> Response {
    let rel = path.trim_start_matches('/');
    let rel = if rel.is_empty() { "index.html" } else { rel };

    // Asset paths may contain subdirectories but never traversal segments.
    if rel.split(['/', '\\']).any(|seg| seg == "..") {
        return (StatusCode::NOT_FOUND, "404 Not Found").into_response();
    }

    let candidates: [PathBuf; 3] = [
        state.frontend_dir.clone(),
        PathBuf::from("frontend"),
        PathBuf::from("../frontend"),
    ];

    for base in candidates {
        let candidate = base.join(rel);
        if !candidate.is_file() {
            continue;
        }

        return match tokio::fs::read(&candidate).await {
            Ok(bytes) => {
                ([(header::CONTENT_TYPE, content_type_for(rel))], bytes).into_response()
            }
            Err(e) => {
                tracing::error!(path = %candidate.display(), "failed to read asset: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error").into_response()
            }
        };
    }

    tracing::debug!(path = rel, "static asset not found");
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".js") {
        "text/javascript"
    } else {
        "text/html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("app.css"), "text/css");
        assert_eq!(content_type_for("js/main.js"), "text/javascript");
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("README"), "text/html");
    }
}
