//! AI food-photo analysis.
//!
//! Provides the [`VisionBackend`] trait (one image in, the model's reply text
//! out), an Anthropic-Messages-compatible implementation in [`client`], and the
//! lenient reply parsing in [`parsing`]. [`analyze_image`] ties them together:
//! parse failures degrade to a placeholder result, only transport and upstream
//! HTTP failures surface as errors.

pub mod client;
pub mod parsing;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AnalysisConfig;

/// Media type assumed when a data URL does not declare one.
pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Instruction sent as the system prompt.
pub const SYSTEM_PROMPT: &str = "You are a food recognition expert. Analyze the food image and respond ONLY with valid JSON in this exact format: {\"foodName\": \"string\", \"ingredients\": [\"item1\", \"item2\"], \"calories\": number, \"notes\": \"string\"}. Be specific and accurate.";

/// Text accompanying the image in the user turn.
pub const USER_PROMPT: &str =
    "What food is this? List ingredients and estimate calories. Return JSON only.";

/// Result of analyzing one food photo. This is also the proxy's success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub food_name: String,
    /// Comma-joined ingredient list, empty when unknown.
    pub ingredients: String,
    /// Estimated calories, 0 when unknown.
    pub calories: f64,
    pub notes: String,
    /// Unmodified model reply text.
    pub raw: String,
}

/// Base64 image payload split out of a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub media_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Split `data:<media-type>;base64,<data>`. Input without a comma is taken
    /// as bare base64.
    pub fn from_data_url(url: &str) -> Self {
        match url.split_once(',') {
            Some((header, data)) => {
                let media_type = header
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .filter(|mt| mt.starts_with("image/"))
                    .unwrap_or(DEFAULT_MEDIA_TYPE);
                Self {
                    media_type: media_type.to_string(),
                    data: data.to_string(),
                }
            }
            None => Self {
                media_type: DEFAULT_MEDIA_TYPE.to_string(),
                data: url.to_string(),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("API key not configured")]
    MissingApiKey,

    /// The upstream answered with a non-2xx status.
    #[error("API error: {status}")]
    Upstream { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}

/// A vision model that can describe a food photo.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Send the image with the fixed prompts and return the model's reply text.
    async fn describe(&self, image: &ImagePayload) -> Result<String, AnalysisError>;
}

/// Create a vision backend from config.
///
/// Returns `Ok(None)` when no API key is configured so the server can still
/// start and report the problem per request.
pub fn create_backend(config: &AnalysisConfig) -> Result<Option<Arc<dyn VisionBackend>>> {
    let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Ok(None);
    };

    match config.provider.as_str() {
        "anthropic" => {
            let backend = client::MessagesClient::new(config, api_key)?;
            Ok(Some(Arc::new(backend)))
        }
        other => anyhow::bail!("unknown analysis provider: {other}. Supported: anthropic"),
    }
}

/// Analyze one photo given as a data URL.
pub async fn analyze_image(
    backend: &dyn VisionBackend,
    data_url: &str,
) -> Result<FoodAnalysis, AnalysisError> {
    let image = ImagePayload::from_data_url(data_url);
    tracing::info!(media_type = %image.media_type, bytes = image.data.len(), "analyzing food photo");

    let reply = backend.describe(&image).await?;
    let analysis = parsing::interpret(&reply);

    tracing::info!(food = %analysis.food_name, calories = analysis.calories, "analysis complete");
    Ok(analysis)
}
