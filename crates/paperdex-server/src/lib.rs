//! Paperdex Server
//!
//! HTTP front door for the question paper catalog: JSON API, raw PDF
//! serving, and static front-end assets.

pub mod http;
pub mod static_files;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use paperdex_core::{Mailer, PaperRegistry, Result, ServiceConfig};

/// Shared application state
pub struct AppState {
    /// The registry is synchronous (rusqlite); concurrent requests
    /// serialize through this lock.
    pub registry: Mutex<PaperRegistry>,
    /// `None` when SMTP credentials are not configured.
    pub mailer: Option<Mailer>,
    pub frontend_dir: PathBuf,
}

impl AppState {
    pub fn new(registry: PaperRegistry, mailer: Option<Mailer>, frontend_dir: PathBuf) -> Self {
        Self {
            registry: Mutex::new(registry),
            mailer,
            frontend_dir,
        }
    }

    /// Build state from service configuration, opening the database.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let registry = PaperRegistry::open(&config.db_path, &config.pdf_dir)?;
        let mailer = config.smtp.clone().map(Mailer::new);

        Ok(Self::new(registry, mailer, config.frontend_dir.clone()))
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Catalog endpoints
        .route("/papers", get(http::list_papers))
        .route("/papers/add", post(http::add_paper))
        .route("/papers/search", get(http::search_papers))
        .route("/papers/{id}", delete(http::delete_paper))
        .route("/papers/{id}/email", post(http::email_paper))
        // File serving
        .route("/pdf/{filename}", get(http::serve_pdf))
        .route("/frontend", get(static_files::frontend_index))
        .route("/frontend/{*path}", get(static_files::frontend_asset))
        // System
        .route("/health", get(http::health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("paperdex server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
