pub mod analyze;
pub mod delete;
pub mod doctor;
pub mod export;
pub mod healthcheck;
pub mod history;
pub mod insights;
pub mod log;

use anyhow::{Context, Result};
use base64::Engine;
use std::path::Path;

/// Read an image file into a `data:` URL, guessing the media type from the
/// extension.
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let media_type = match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => dietmood::analysis::DEFAULT_MEDIA_TYPE,
    };

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{media_type};base64,{encoded}"))
}

/// Render a 1-5 mood score as its emoji.
pub fn mood_emoji(mood: u8) -> &'static str {
    match mood {
        1 => "😢",
        2 => "😕",
        3 => "😐",
        4 => "🙂",
        5 => "😄",
        _ => "?",
    }
}
