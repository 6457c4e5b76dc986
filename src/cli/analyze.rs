use anyhow::Result;
use std::path::Path;

use dietmood::analysis;
use dietmood::config::DietMoodConfig;

/// Analyze one photo and print the result as JSON.
pub async fn analyze(config: &DietMoodConfig, image: &Path) -> Result<()> {
    let Some(backend) = analysis::create_backend(&config.analysis)? else {
        anyhow::bail!("API key not configured. Set DIETMOOD_API_KEY or analysis.api_key");
    };

    let data_url = super::image_data_url(image)?;
    let result = analysis::analyze_image(backend.as_ref(), &data_url).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
