//! JSON export of the whole journal. There is no import path.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::journal::store;
use crate::journal::types::Entry;

/// Export format: every entry plus the time of export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub export_date: DateTime<Utc>,
    pub entries: Vec<Entry>,
}

impl ExportDocument {
    pub fn new(entries: Vec<Entry>, now: DateTime<Utc>) -> Self {
        Self {
            export_date: now,
            entries,
        }
    }

    /// Suggested download name, e.g. `diet-mood-export-2024-05-01.json`.
    pub fn file_name(&self) -> String {
        format!("diet-mood-export-{}.json", self.export_date.format("%Y-%m-%d"))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Snapshot every stored entry, newest first.
pub fn export_all(conn: &Connection, now: DateTime<Utc>) -> Result<ExportDocument> {
    let entries = store::list_entries(conn)?;
    Ok(ExportDocument::new(entries, now))
}
