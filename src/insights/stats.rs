use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::window::{mean, within_days};
use crate::journal::types::Entry;

/// A one-decimal average, or the "no data" sentinel `-`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    NoData,
    Value(f64),
}

impl Average {
    fn from_mean(value: Option<f64>) -> Self {
        value.map_or(Self::NoData, Self::Value)
    }
}

impl std::fmt::Display for Average {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => f.write_str("-"),
            Self::Value(v) => f.write_str(&one_decimal(*v)),
        }
    }
}

/// One-decimal rendering of the exact binary value, with exact ties rounded
/// up. Plain `{:.1}` rounds ties to even.
fn one_decimal(v: f64) -> String {
    // A tie at one decimal is an exact .x5, only possible for fractions .25/.75.
    let quarters = v * 4.0;
    let is_tie = quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0;
    if is_tie {
        format!("{:.1}", (v * 10.0).ceil() / 10.0)
    } else {
        format!("{v:.1}")
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rolling averages over the statistics window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub avg_mood: Average,
    pub avg_energy: Average,
    pub total: usize,
}

/// Average mood and energy over the entries logged in the last `window_days` days.
pub fn compute_stats(entries: &[Entry], window_days: u32, now: DateTime<Utc>) -> Stats {
    let recent = within_days(entries, window_days, now);

    Stats {
        avg_mood: Average::from_mean(mean(recent.iter().map(|e| f64::from(e.mood)))),
        avg_energy: Average::from_mean(mean(recent.iter().map(|e| f64::from(e.energy)))),
        total: recent.len(),
    }
}
