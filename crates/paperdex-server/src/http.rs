//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use paperdex_core::resolver::base_name;
use paperdex_core::{NewPaper, Paper, PaperdexError};

use crate::AppState;

/// Error responses are `{"error": "..."}` JSON with a matching status code.
pub type ApiError = (StatusCode, Json<Value>);

fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn map_error(err: PaperdexError) -> ApiError {
    match err {
        PaperdexError::NotFound(_) => error_body(StatusCode::NOT_FOUND, err.to_string()),
        PaperdexError::Validation(_) => error_body(StatusCode::BAD_REQUEST, err.to_string()),
        _ => {
            tracing::error!(error = %err, "request failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl AppState {
    /// Lock the registry, converting a poisoned lock into a 500.
    fn registry(&self) -> Result<std::sync::MutexGuard<'_, paperdex_core::PaperRegistry>, ApiError> {
        self.registry.lock().map_err(|e| {
            tracing::error!("registry lock poisoned: {e}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "internal state error")
        })
    }
}

/// GET /papers
pub async fn list_papers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Paper>>, ApiError> {
    let registry = state.registry()?;
    registry.list().map(Json).map_err(map_error)
}

/// POST /papers/add
pub async fn add_paper(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewPaper>,
) -> Result<Json<Value>, ApiError> {
    let registry = state.registry()?;
    let id = registry.add(request).map_err(map_error)?;

    Ok(Json(json!({
        "message": "Paper added successfully",
        "id": id
    })))
}

/// Query parameters for paper search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub subject: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<i32>,
}

/// GET /papers/search?subject=&year=&semester=
pub async fn search_papers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Paper>>, ApiError> {
    let (Some(subject), Some(year), Some(semester)) = (query.subject, query.year, query.semester)
    else {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "subject, year and semester query parameters are required",
        ));
    };

    let registry = state.registry()?;
    registry
        .search(&subject, year, semester)
        .map(Json)
        .map_err(map_error)
}

/// DELETE /papers/{id}
pub async fn delete_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let registry = state.registry()?;
    registry.delete(id).map_err(map_error)?;

    Ok(Json(json!({ "message": "Paper deleted" })))
}

/// Query parameters for the email endpoint
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(rename = "recipientEmail")]
    pub recipient_email: Option<String>,
}

/// POST /papers/{id}/email?recipientEmail=
pub async fn email_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Value>, ApiError> {
    let recipient = query
        .recipient_email
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            error_body(
                StatusCode::BAD_REQUEST,
                "recipientEmail query parameter is required",
            )
        })?;

    let Some(mailer) = state.mailer.clone() else {
        return Err(error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            "email delivery is not configured",
        ));
    };

    // Resolve the paper and its file while holding the lock, then release
    // it for the duration of the SMTP round-trip.
    let (paper, file) = {
        let registry = state.registry()?;
        let paper = registry
            .find_by_id(id)
            .map_err(map_error)?
            .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "Paper not found"))?;

        let file = registry.resolver().resolve(&paper.file_path).ok_or_else(|| {
            let available = registry.resolver().available_pdfs();
            tracing::warn!(
                file_path = %paper.file_path,
                ?available,
                "PDF for email request not found"
            );
            error_body(
                StatusCode::NOT_FOUND,
                format!("PDF file not found: {}", paper.file_path),
            )
        })?;

        (paper, file)
    };

    let result = tokio::task::spawn_blocking(move || {
        mailer.send_question_paper(&recipient, &paper, &file)
    })
    .await
    .map_err(|e| {
        tracing::error!("email task failed: {e}");
        error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
    })?;

    match result {
        Ok(()) => Ok(Json(json!({ "message": "Email sent" }))),
        Err(e) => {
            tracing::error!(error = %e, "email delivery failed");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send email",
            ))
        }
    }
}

/// GET /pdf/{filename} — raw PDF bytes, inline disposition.
///
/// The filename is reduced to its base name before lookup; traversal input
/// never escapes the configured base folder.
pub async fn serve_pdf(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let name = base_name(&filename).to_string();

    let resolved = {
        let registry = state.registry()?;
        registry.resolver().resolve(&name)
    };

    let Some(path) = resolved else {
        return Err(error_body(
            StatusCode::NOT_FOUND,
            format!("PDF file not found: {name}"),
        ));
    };

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!(path = %path.display(), "failed to read PDF: {e}");
        error_body(StatusCode::INTERNAL_SERVER_ERROR, "failed to read PDF")
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{name}\""),
            ),
        ],
        bytes,
    ))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
