//! SQL DDL for all journal tables.
//!
//! Defines the `entries`, `food_items`, and `schema_meta` tables, plus the
//! timestamp and date indexes the history and insights queries rely on. All DDL
//! uses `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

/// Version-1 schema. Later columns are added by [`super::migrations`].
const SCHEMA_SQL: &str = r#"
-- One logged moment
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    mood INTEGER NOT NULL CHECK(mood BETWEEN 1 AND 5),
    food TEXT NOT NULL DEFAULT '',
    energy INTEGER NOT NULL CHECK(energy BETWEEN 1 AND 10),
    symptoms TEXT NOT NULL DEFAULT '[]',
    notes TEXT NOT NULL DEFAULT '',
    timestamp INTEGER NOT NULL,
    date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp);
CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);

-- Foods attached to an entry, in display order
CREATE TABLE IF NOT EXISTS food_items (
    entry_id INTEGER NOT NULL REFERENCES entries(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    id TEXT NOT NULL,
    name TEXT NOT NULL,
    photo TEXT,
    ingredients TEXT,
    calories REAL CHECK(calories IS NULL OR calories >= 0),
    ai_notes TEXT,
    PRIMARY KEY (entry_id, id)
);

CREATE INDEX IF NOT EXISTS idx_food_items_entry ON food_items(entry_id, position);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
