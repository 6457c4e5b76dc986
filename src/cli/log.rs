use anyhow::{Context, Result};
use std::path::PathBuf;

use dietmood::analysis;
use dietmood::config::DietMoodConfig;
use dietmood::journal::capture::{Draft, SYMPTOM_TAGS};
use dietmood::journal::store;

pub struct LogArgs {
    pub mood: Option<u8>,
    pub food: Option<String>,
    pub energy: u8,
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
    pub photo: Option<PathBuf>,
}

/// Build an entry through the capture flow and store it.
pub async fn log(config: &DietMoodConfig, args: LogArgs) -> Result<()> {
    let mut draft = Draft::new();
    draft.mood = args.mood;
    draft.energy = args.energy;
    draft.food_input = args.food.unwrap_or_default();
    draft.notes = args.notes.unwrap_or_default();

    for tag in &args.symptoms {
        anyhow::ensure!(
            SYMPTOM_TAGS.contains(&tag.as_str()),
            "unknown symptom '{tag}'. Known: {}",
            SYMPTOM_TAGS.join(", ")
        );
        if !draft.symptoms().contains(tag) {
            draft.toggle_symptom(tag);
        }
    }

    if let Some(ref path) = args.photo {
        let data_url = super::image_data_url(path)?;
        let food_id = draft.begin_analysis(Some(data_url.clone()));

        match analysis::create_backend(&config.analysis)? {
            Some(backend) => match analysis::analyze_image(backend.as_ref(), &data_url).await {
                Ok(result) => {
                    println!("Recognised: {} ({} kcal)", result.food_name, result.calories);
                    draft.apply_analysis(&food_id, &result);
                }
                Err(e) => {
                    eprintln!("Analysis failed: {e}");
                    draft.fail_analysis(&food_id, &e.to_string());
                }
            },
            None => {
                eprintln!("Analysis skipped: API key not configured");
                draft.fail_analysis(&food_id, "API key not configured");
            }
        }
    }

    let entry = draft.finalize()?;

    let db_path = config.resolved_db_path();
    let mut conn = dietmood::db::open_database(&db_path)?;
    let id = store::add_entry(&mut conn, &entry).context("failed to store entry")?;

    println!(
        "Logged entry #{id}: {} {} (energy {}/10)",
        super::mood_emoji(entry.mood),
        entry.food,
        entry.energy
    );
    Ok(())
}
