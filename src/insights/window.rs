//! Trailing-window selection over an entry snapshot.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::journal::types::Entry;

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Entries whose timestamp falls within the last `days` days before `now`,
/// in snapshot order.
pub fn within_days(entries: &[Entry], days: u32, now: DateTime<Utc>) -> Vec<&Entry> {
    let cutoff = now.timestamp_millis() - i64::from(days) * DAY_MS;
    entries.iter().filter(|e| e.timestamp >= cutoff).collect()
}

/// The `days` calendar dates ending on `today`, oldest first.
pub fn trailing_dates(days: u32, today: NaiveDate) -> Vec<NaiveDate> {
    (0..i64::from(days))
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
