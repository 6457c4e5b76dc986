use chrono::NaiveDate;
use serde::Serialize;

use super::window::{mean, trailing_dates};
use crate::journal::types::Entry;

/// Daily means for one calendar day. Days without entries carry `None`
/// (JSON `null`), never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Short weekday name for chart axes, e.g. `Mon`.
    pub label: String,
    pub mean_mood: Option<f64>,
    pub mean_energy: Option<f64>,
}

/// One point per day for the `window_days` days ending on `today`, oldest first.
pub fn compute_trend(entries: &[Entry], window_days: u32, today: NaiveDate) -> Vec<TrendPoint> {
    trailing_dates(window_days, today)
        .into_iter()
        .map(|date| {
            let day: Vec<&Entry> = entries.iter().filter(|e| e.date == date).collect();
            TrendPoint {
                date,
                label: date.format("%a").to_string(),
                mean_mood: mean(day.iter().map(|e| f64::from(e.mood))),
                mean_energy: mean(day.iter().map(|e| f64::from(e.energy))),
            }
        })
        .collect()
}
