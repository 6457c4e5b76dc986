mod helpers;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use dietmood::analysis::{AnalysisError, ImagePayload, VisionBackend};
use dietmood::config::DietMoodConfig;
use dietmood::server::{build_router, AppState};

const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

struct CannedBackend(&'static str);

#[async_trait]
impl VisionBackend for CannedBackend {
    async fn describe(&self, image: &ImagePayload) -> Result<String, AnalysisError> {
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");
        Ok(self.0.to_string())
    }
}

struct RateLimitedBackend;

#[async_trait]
impl VisionBackend for RateLimitedBackend {
    async fn describe(&self, _image: &ImagePayload) -> Result<String, AnalysisError> {
        Err(AnalysisError::Upstream {
            status: 429,
            body: "{\"error\":\"rate limited\"}".into(),
        })
    }
}

fn setup_test_app(vision: Option<Arc<dyn VisionBackend>>) -> Router {
    let state = AppState::new(helpers::test_db(), vision, DietMoodConfig::default());
    build_router(state)
}

async fn get_body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("origin", "http://localhost:5173")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health_reports_healthy() {
    let app = setup_test_app(None);

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "dietmood");
    assert!(json["uptime"].as_f64().unwrap() >= 0.0);
    assert!(json["timestamp"].is_string());
}

// ========== Analysis proxy ==========

#[tokio::test]
async fn test_preflight_allows_any_origin() {
    let app = setup_test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/analyze")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
}

#[tokio::test]
async fn test_analyze_without_image_is_bad_request() {
    let app = setup_test_app(Some(Arc::new(CannedBackend("{}"))));

    let response = app
        .clone()
        .oneshot(post_json("/api/analyze", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_body_json(response).await["error"], "No image provided");

    let response = app
        .oneshot(post_json("/api/analyze", &json!({ "image": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_without_api_key_is_server_error() {
    let app = setup_test_app(None);

    let response = app
        .oneshot(post_json("/api/analyze", &json!({ "image": IMAGE })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(get_body_json(response).await["error"], "API key not configured");
}

#[tokio::test]
async fn test_analyze_returns_structured_result() {
    let reply = "```json\n{\"foodName\":\"Pancakes\",\"ingredients\":[\"flour\",\"egg\"],\"calories\":420,\"notes\":\"with syrup\"}\n```";
    let app = setup_test_app(Some(Arc::new(CannedBackend(reply))));

    let response = app
        .oneshot(post_json("/api/analyze", &json!({ "image": IMAGE })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["foodName"], "Pancakes");
    assert_eq!(json["ingredients"], "flour, egg");
    assert_eq!(json["calories"], 420.0);
    assert_eq!(json["notes"], "with syrup");
    assert_eq!(json["raw"], reply);
}

#[tokio::test]
async fn test_analyze_passes_upstream_status_through() {
    let app = setup_test_app(Some(Arc::new(RateLimitedBackend)));

    let response = app
        .oneshot(post_json("/api/analyze", &json!({ "image": IMAGE })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "API error: 429");
    assert_eq!(json["raw"], "{\"error\":\"rate limited\"}");
}

#[tokio::test]
async fn test_analyze_malformed_body_is_server_error() {
    let app = setup_test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(get_body_json(response).await["error"].is_string());
}

// ========== Journal ==========

#[tokio::test]
async fn test_entry_lifecycle() {
    let app = setup_test_app(None);

    let entry = json!({
        "mood": 4,
        "food": "coffee and toast",
        "energy": 7,
        "symptoms": ["bloating"],
        "notes": "busy morning"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/entries", &entry))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = app.clone().oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = get_body_json(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["food"], "coffee and toast");
    assert_eq!(list[0]["symptoms"], json!(["bloating"]));
    assert!(list[0]["timestamp"].is_i64());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/entries/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/entries")).await.unwrap();
    assert!(get_body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_entry_is_unprocessable() {
    let app = setup_test_app(None);

    let response = app
        .oneshot(post_json(
            "/api/entries",
            &json!({ "mood": 3, "food": "  ", "energy": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        get_body_json(response).await["error"],
        "Please enter what you ate or wait for analysis to complete"
    );
}

#[tokio::test]
async fn test_undeserializable_entry_reports_json_error() {
    let app = setup_test_app(None);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/entries",
            &json!({ "mood": 300, "food": "rice", "energy": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(get_body_json(response).await["error"].is_string());

    let response = app
        .clone()
        .oneshot(post_json("/api/entries", &json!({ "food": "rice" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(get_body_json(response).await["error"].is_string());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/entries")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(get_body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_delete_non_numeric_id_reports_json_error() {
    let app = setup_test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/entries/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_body_json(response).await["error"], "invalid entry id: abc");
}

#[tokio::test]
async fn test_delete_missing_entry_is_not_found() {
    let app = setup_test_app(None);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/entries",
            &json!({ "mood": 3, "food": "rice", "energy": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/entries/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_insights_report_shape() {
    let app = setup_test_app(None);

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/entries",
                &json!({ "mood": 5, "food": "coffee", "energy": 8 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/api/insights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["stats"]["avgMood"], "5.0");
    assert_eq!(json["stats"]["avgEnergy"], "8.0");
    assert_eq!(json["stats"]["total"], 3);
    assert_eq!(json["trend"].as_array().unwrap().len(), 7);
    assert_eq!(json["trend"][6]["meanMood"], 5.0);

    let titles: Vec<&str> = json["patterns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Coffee Pattern", "Mood Boosters"]);
}

#[tokio::test]
async fn test_export_is_downloadable() {
    let app = setup_test_app(None);

    let response = app.oneshot(get("/api/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"diet-mood-export-"));
    assert!(disposition.ends_with(".json\""));

    let json = get_body_json(response).await;
    assert!(json["exportDate"].is_string());
    assert!(json["entries"].as_array().unwrap().is_empty());
}
