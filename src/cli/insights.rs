use anyhow::Result;
use chrono::Utc;

use dietmood::config::DietMoodConfig;
use dietmood::insights::InsightsReport;
use dietmood::journal::store;

/// Display statistics, detected patterns, and the weekly trend.
pub fn insights(config: &DietMoodConfig, json: bool) -> Result<()> {
    let conn = dietmood::db::open_database(config.resolved_db_path())?;
    let entries = store::list_entries(&conn)?;
    let report = InsightsReport::compute(&entries, &config.insights, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let window = config.insights.stats_window_days;
    println!("Last {window} days");
    println!("{}", "=".repeat(40));
    println!("  Average mood:        {}", report.stats.avg_mood);
    println!("  Average energy:      {}", report.stats.avg_energy);
    println!("  Entries:             {}", report.stats.total);
    println!();

    println!("Patterns:");
    if report.patterns.is_empty() {
        println!("  Keep logging to discover patterns.");
    }
    for pattern in &report.patterns {
        println!("  {} {}: {}", pattern.icon, pattern.title, pattern.description);
    }
    println!();

    println!("This week:");
    for point in &report.trend {
        let mood = point.mean_mood.map_or("-".to_string(), |m| format!("{m:.1}"));
        let energy = point.mean_energy.map_or("-".to_string(), |e| format!("{e:.1}"));
        println!("  {} {}  mood {:>4}  energy {:>4}", point.label, point.date, mood, energy);
    }

    Ok(())
}
