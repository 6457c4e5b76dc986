#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use dietmood::db;
use dietmood::journal::store;
use dietmood::journal::types::{Entry, NewEntry};
use rusqlite::Connection;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// Fixed reference clock: 2024-03-15 12:00 UTC, a Friday.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn new_entry(mood: u8, food: &str, energy: u8) -> NewEntry {
    NewEntry {
        mood,
        food: food.to_string(),
        foods: Vec::new(),
        energy,
        symptoms: Vec::new(),
        notes: String::new(),
    }
}

pub fn with_symptoms(mut entry: NewEntry, symptoms: &[&str]) -> NewEntry {
    entry.symptoms = symptoms.iter().map(|s| s.to_string()).collect();
    entry
}

/// Build a stored-looking entry created at `at`, without touching a database.
pub fn entry_at(mood: u8, food: &str, energy: u8, at: DateTime<Utc>) -> Entry {
    new_entry(mood, food, energy).into_entry(at.timestamp_millis(), at)
}

/// Insert through the store as if created at `at`. Returns the id.
pub fn insert_at(conn: &mut Connection, entry: &NewEntry, at: DateTime<Utc>) -> i64 {
    store::add_entry_at(conn, entry, at).unwrap()
}
