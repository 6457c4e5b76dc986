use chrono::Utc;
use serde_json::{json, Value};
use std::time::Duration;

use dietmood::config::DietMoodConfig;

const TIMEOUT: Duration = Duration::from_secs(5);

pub fn default_url(config: &DietMoodConfig) -> String {
    format!("http://{}/api/health", config.bind_addr())
}

/// Probe `url` and print the result as JSON. Returns whether the server is healthy.
pub async fn healthcheck(url: &str) -> bool {
    match probe(url).await {
        Ok(body) => {
            println!("{body}");
            true
        }
        Err(e) => {
            let report = json!({
                "status": "unhealthy",
                "error": e.to_string(),
                "timestamp": Utc::now().to_rfc3339(),
            });
            println!("{report}");
            false
        }
    }
}

async fn probe(url: &str) -> anyhow::Result<Value> {
    let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
    let response = client.get(url).send().await?;

    let status = response.status();
    anyhow::ensure!(status.is_success(), "health endpoint returned HTTP {status}");

    let mut body: Value = response.json().await?;
    if let Some(obj) = body.as_object_mut() {
        obj.entry("checkedAt")
            .or_insert_with(|| json!(Utc::now().to_rfc3339()));
    }
    Ok(body)
}
