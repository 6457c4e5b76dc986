use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::analysis::{self, AnalysisError, FoodAnalysis};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    image: Option<String>,
}

/// `POST /api/analyze`: forward a food photo to the vision model.
///
/// The body is parsed by hand so malformed JSON reports as a 500 `{error}`
/// rather than an extractor rejection.
pub async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FoodAnalysis>, ApiError> {
    let request: AnalyzeRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::Internal(e.to_string()))?;

    let image = request
        .image
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No image provided".into()))?;

    let backend = state
        .vision
        .as_deref()
        .ok_or_else(|| ApiError::Internal(AnalysisError::MissingApiKey.to_string()))?;

    let result = analysis::analyze_image(backend, &image)
        .await
        .map_err(|e| match e {
            AnalysisError::Upstream { status, body } => {
                tracing::warn!(status, "analysis provider returned an error");
                ApiError::Upstream {
                    status,
                    message: format!("API error: {status}"),
                    raw: body,
                }
            }
            other => ApiError::Internal(other.to_string()),
        })?;

    Ok(Json(result))
}
