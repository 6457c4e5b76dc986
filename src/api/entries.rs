use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use super::{with_db, ApiError};
use crate::journal::export::export_all;
use crate::journal::store;
use crate::journal::types::{Entry, NewEntry};
use crate::server::AppState;

/// `GET /api/entries`, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, ApiError> {
    let entries = with_db(&state.db, |conn| store::list_entries(conn)).await?;
    Ok(Json(entries))
}

/// `POST /api/entries`. Malformed JSON is a 400, a well-formed body with bad
/// fields a 422.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let entry: NewEntry = serde_json::from_slice(&body).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            ApiError::BadRequest(format!("invalid JSON body: {e}"))
        } else {
            ApiError::Validation(e.to_string())
        }
    })?;
    let id = with_db(&state.db, move |conn| store::add_entry(conn, &entry)).await?;
    tracing::info!(id, "entry created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `DELETE /api/entries/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid entry id: {id}")))?;
    with_db(&state.db, move |conn| store::delete_entry(conn, id)).await?;
    tracing::info!(id, "entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/export`: the whole journal as a downloadable document.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let document = with_db(&state.db, |conn| export_all(conn, Utc::now())).await?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(document)))
}
