use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::server::AppState;

pub const SERVICE_NAME: &str = "dietmood";

/// `GET /api/health`: liveness plus seconds since the server started.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "service": SERVICE_NAME,
        "uptime": state.started_at.elapsed().as_secs_f64(),
    }))
}
