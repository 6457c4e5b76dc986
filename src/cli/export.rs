use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use dietmood::config::DietMoodConfig;
use dietmood::journal::export::export_all;

/// Export all entries as pretty JSON to stdout or `output`.
pub fn export(config: &DietMoodConfig, output: Option<&Path>) -> Result<()> {
    let conn = dietmood::db::open_database(config.resolved_db_path())?;
    let document = export_all(&conn, Utc::now())?;
    let json = document.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Exported {} entries to {}", document.entries.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
