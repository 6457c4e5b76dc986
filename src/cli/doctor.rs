//! CLI `doctor` command: run database diagnostics and print a health report.

use anyhow::{Context, Result};

use dietmood::config::DietMoodConfig;
use dietmood::db;

pub fn doctor(config: &DietMoodConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `dietmood log` or `dietmood serve` to create it.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;
    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("DietMood Health Report");
    println!("======================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!();
    println!("Row counts:");
    println!("  Entries:         {}", report.entry_count);
    println!("  Food items:      {}", report.food_item_count);
    if let (Some(oldest), Some(newest)) = (report.oldest_date, report.newest_date) {
        println!("  Date range:      {oldest} .. {newest}");
    }
    println!();
    let key_state = match config.analysis.api_key.as_deref() {
        Some(k) if !k.is_empty() => "configured",
        _ => "missing (photo analysis disabled)",
    };
    println!("Analysis:");
    println!("  Endpoint:        {}", config.analysis.endpoint);
    println!("  Model:           {}", config.analysis.model);
    println!("  API key:         {key_state}");
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery steps:");
        println!("  1. Restore from a backup: cp backup.db {}", db_path.display());
        println!("  2. Or keep an export of a good copy: dietmood export -o backup.json");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
