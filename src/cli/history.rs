use anyhow::Result;
use chrono::NaiveDate;

use dietmood::config::DietMoodConfig;
use dietmood::journal::store;

/// Print entries grouped by day, newest day first.
pub fn history(config: &DietMoodConfig, date: Option<NaiveDate>) -> Result<()> {
    let conn = dietmood::db::open_database(config.resolved_db_path())?;

    let entries = match date {
        Some(date) => store::entries_for_date(&conn, date)?,
        None => store::list_entries(&conn)?,
    };

    if entries.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }

    for (day, group) in store::group_by_date(&entries) {
        println!("{}", day.format("%A, %B %-d %Y"));
        println!("{}", "=".repeat(40));
        for entry in &group {
            let id = entry.id.map(|id| format!("#{id}")).unwrap_or_default();
            println!(
                "  {:<6} {} {}  energy {}/10",
                id,
                super::mood_emoji(entry.mood),
                entry.food,
                entry.energy
            );
            for item in entry.foods.iter().filter(|f| f.calories.is_some()) {
                println!(
                    "         - {} ({:.0} kcal)",
                    item.name,
                    item.calories.unwrap_or_default()
                );
            }
            if !entry.symptoms.is_empty() {
                println!("         symptoms: {}", entry.symptoms.join(", "));
            }
            if !entry.notes.is_empty() {
                println!("         notes: {}", entry.notes);
            }
        }
        println!();
    }

    Ok(())
}
