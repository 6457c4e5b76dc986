use axum::extract::State;
use axum::Json;
use chrono::Utc;

use super::{with_db, ApiError};
use crate::insights::InsightsReport;
use crate::journal::store;
use crate::server::AppState;

/// `GET /api/insights`, computed against the clock at request time.
pub async fn insights(State(state): State<AppState>) -> Result<Json<InsightsReport>, ApiError> {
    let entries = with_db(&state.db, |conn| store::list_entries(conn)).await?;
    let report = InsightsReport::compute(&entries, &state.config.insights, Utc::now());
    Ok(Json(report))
}
