//! HTTP handlers for the journal, insights, health, and analysis proxy routes.
//!
//! Every error leaves the server as a flat JSON `{"error": "..."}` body. Store
//! calls hold the connection lock on a blocking thread via [`with_db`].

pub mod analyze;
pub mod entries;
pub mod health;
pub mod insights;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rusqlite::Connection;
use serde_json::json;
use std::sync::{Arc, Mutex};

use crate::error::JournalError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// The AI provider answered with a non-2xx status; it is passed through.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        raw: String,
    },

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": msg }))
            }
            ApiError::Upstream {
                status,
                message,
                raw,
            } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, json!({ "error": message, "raw": raw }))
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::NotFound(id) => ApiError::NotFound(format!("entry not found: {id}")),
            JournalError::Validation(e) => ApiError::Validation(e.to_string()),
            JournalError::Database(e) => {
                tracing::error!(error = %e, "database error");
                ApiError::Internal("Internal server error".into())
            }
            JournalError::Corrupt(msg) => ApiError::Internal(msg),
        }
    }
}

/// Run a store operation on a blocking thread with the connection locked.
pub(crate) async fn with_db<T, F>(db: &Arc<Mutex<Connection>>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut Connection) -> Result<T, JournalError> + Send + 'static,
{
    let db = Arc::clone(db);
    tokio::task::spawn_blocking(move || {
        let mut conn = db
            .lock()
            .map_err(|e| ApiError::Internal(format!("db lock poisoned: {e}")))?;
        op(&mut conn).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
}
