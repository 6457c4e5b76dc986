//! HTTP server setup: shared state, router, and the `serve` entry point.

use anyhow::{Context, Result};
use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analysis::{self, VisionBackend};
use crate::api;
use crate::config::DietMoodConfig;
use crate::db;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    /// `None` when no API key is configured; analysis requests then fail with 500.
    pub vision: Option<Arc<dyn VisionBackend>>,
    pub config: Arc<DietMoodConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        conn: Connection,
        vision: Option<Arc<dyn VisionBackend>>,
        config: DietMoodConfig,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            vision,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

/// All routes with permissive CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/health", get(api::health::health_check))
        .route("/api/analyze", post(api::analyze::analyze))
        .route(
            "/api/entries",
            get(api::entries::list).post(api::entries::create),
        )
        .route("/api/entries/{id}", delete(api::entries::delete))
        .route("/api/insights", get(api::insights::insights))
        .route("/api/export", get(api::entries::export))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the database, build the vision backend, and serve until ctrl-c.
pub async fn serve(config: DietMoodConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let vision = analysis::create_backend(&config.analysis)?;
    if vision.is_none() {
        tracing::warn!("no API key configured, /api/analyze will return 500");
    }

    let bind_addr = config.bind_addr();
    let state = AppState::new(conn, vision, config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "dietmood listening at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
