//! Heuristic behavioral patterns.
//!
//! Three independent checks run against the same window, always in this order:
//! coffee, sugar crashes, mood boosters. Each yields at most one [`Pattern`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::window::{mean, within_days};
use crate::journal::types::{Entry, ENERGY_CRASH};

const COFFEE_KEYWORDS: &[&str] = &["coffee", "caffeine"];
const SUGAR_KEYWORDS: &[&str] = &["sugar", "sweet", "cake", "candy"];

const MIN_COFFEE_MATCHES: usize = 3;
const COFFEE_ENERGY_THRESHOLD: f64 = 6.0;
const MIN_SUGAR_MATCHES: usize = 2;
const MIN_BOOSTER_OCCURRENCES: usize = 2;
const BOOSTER_MOOD_THRESHOLD: f64 = 4.0;
const MAX_BOOSTERS_SHOWN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl Pattern {
    fn new(icon: &str, title: &str, description: impl Into<String>) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// Run every check over the entries logged in the last `window_days` days.
/// Only patterns that fired are returned.
pub fn detect_patterns(entries: &[Entry], window_days: u32, now: DateTime<Utc>) -> Vec<Pattern> {
    let recent = within_days(entries, window_days, now);

    [
        coffee_pattern(&recent),
        sugar_pattern(&recent),
        mood_boosters(&recent),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn mentions_any(entry: &Entry, keywords: &[&str]) -> bool {
    let food = entry.food.to_lowercase();
    keywords.iter().any(|k| food.contains(k))
}

fn coffee_pattern(recent: &[&Entry]) -> Option<Pattern> {
    let matches: Vec<&Entry> = recent
        .iter()
        .copied()
        .filter(|e| mentions_any(e, COFFEE_KEYWORDS))
        .collect();
    if matches.len() < MIN_COFFEE_MATCHES {
        return None;
    }

    let avg_energy = mean(matches.iter().map(|e| f64::from(e.energy)))?;
    let description = if avg_energy > COFFEE_ENERGY_THRESHOLD {
        "Coffee seems to boost your energy"
    } else {
        "Coffee may not be helping your energy"
    };
    Some(Pattern::new("☕", "Coffee Pattern", description))
}

fn sugar_pattern(recent: &[&Entry]) -> Option<Pattern> {
    let matches: Vec<&Entry> = recent
        .iter()
        .copied()
        .filter(|e| mentions_any(e, SUGAR_KEYWORDS))
        .collect();
    if matches.len() < MIN_SUGAR_MATCHES {
        return None;
    }

    let crashes = matches.iter().filter(|e| e.has_symptom(ENERGY_CRASH)).count();
    if crashes == 0 {
        return None;
    }
    Some(Pattern::new(
        "🍬",
        "Sugar & Energy Crashes",
        format!("{crashes}/{} sugary foods led to energy crashes", matches.len()),
    ))
}

fn mood_boosters(recent: &[&Entry]) -> Option<Pattern> {
    // Groups keep first-seen order.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for entry in recent {
        let key = entry.food.to_lowercase().trim().to_string();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(f64::from(entry.mood));
    }

    let boosters: Vec<&str> = groups
        .iter()
        .filter(|(_, moods)| {
            moods.len() >= MIN_BOOSTER_OCCURRENCES
                && mean(moods.iter().copied()).is_some_and(|m| m >= BOOSTER_MOOD_THRESHOLD)
        })
        .map(|(food, _)| food.as_str())
        .collect();

    if boosters.is_empty() {
        return None;
    }
    let shown: Vec<&str> = boosters.into_iter().take(MAX_BOOSTERS_SHOWN).collect();
    Some(Pattern::new(
        "🌟",
        "Mood Boosters",
        format!("You tend to feel good after: {}", shown.join(", ")),
    ))
}
