//! Anthropic Messages API client for food-photo analysis.
//!
//! Sends one user turn (image block plus [`super::USER_PROMPT`]) with
//! [`super::SYSTEM_PROMPT`] to `<endpoint>/v1/messages` and returns the text of
//! the first content block. No retries. The request timeout comes from
//! `analysis.timeout_secs`; when unset the client waits indefinitely.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AnalysisError, ImagePayload, VisionBackend, SYSTEM_PROMPT, USER_PROMPT};
use crate::config::AnalysisConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Reply text used when the response carries no text block.
const EMPTY_REPLY: &str = "{}";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Vision backend speaking the Anthropic Messages protocol.
pub struct MessagesClient {
    http: Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl MessagesClient {
    pub fn new(config: &AnalysisConfig, api_key: &str) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            http,
            url: format!("{}/v1/messages", config.endpoint.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn request_body<'a>(&'a self, image: &'a ImagePayload) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: &image.media_type,
                            data: &image.data,
                        },
                    },
                    ContentBlock::Text { text: USER_PROMPT },
                ],
            }],
        }
    }
}

#[async_trait]
impl VisionBackend for MessagesClient {
    async fn describe(&self, image: &ImagePayload) -> Result<String, AnalysisError> {
        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(image))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "vision API returned an error");
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        reply_text(&body)
    }
}

/// Text of the first content block, or `"{}"` when it is missing or empty.
fn reply_text(body: &str) -> Result<String, AnalysisError> {
    let parsed: MessagesResponse =
        serde_json::from_str(body).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY.to_string()))
}
