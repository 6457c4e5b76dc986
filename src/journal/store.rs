//! Entry store: create, list, and delete journal entries.
//!
//! Entries are never updated in place. [`add_entry`] stamps `timestamp` and
//! `date` at call time and writes the entry row plus its food items inside one
//! transaction. Listing returns entries newest first.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::error::{JournalError, Result};
use crate::journal::types::{Entry, FoodItem, FoodStatus, NewEntry};

const ENTRY_COLUMNS: &str = "id, mood, food, energy, symptoms, notes, timestamp, date";

/// Store a new entry, stamped with the current time. Returns the assigned id.
pub fn add_entry(conn: &mut Connection, entry: &NewEntry) -> Result<i64> {
    add_entry_at(conn, entry, Utc::now())
}

/// Store a new entry as if created at `now`. Returns the assigned id.
pub fn add_entry_at(conn: &mut Connection, entry: &NewEntry, now: DateTime<Utc>) -> Result<i64> {
    entry.validate()?;

    let symptoms = serde_json::to_string(&entry.symptoms)
        .map_err(|e| JournalError::Corrupt(format!("symptoms not serializable: {e}")))?;
    let timestamp = now.timestamp_millis();
    let date = now.date_naive();

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO entries (mood, food, energy, symptoms, notes, timestamp, date) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.mood,
            entry.food,
            entry.energy,
            symptoms,
            entry.notes,
            timestamp,
            date,
        ],
    )?;
    let id = tx.last_insert_rowid();

    for (position, item) in entry.foods.iter().enumerate() {
        tx.execute(
            "INSERT INTO food_items (entry_id, position, id, name, photo, ingredients, calories, ai_notes, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                position as i64,
                item.id,
                item.name,
                item.photo,
                item.ingredients,
                item.calories,
                item.ai_notes,
                item.status.as_str(),
            ],
        )?;
    }

    tx.commit()?;

    tracing::debug!(id, %date, foods = entry.foods.len(), "entry stored");
    Ok(id)
}

/// All entries, newest first.
pub fn list_entries(conn: &Connection) -> Result<Vec<Entry>> {
    query_entries(
        conn,
        &format!("SELECT {ENTRY_COLUMNS} FROM entries ORDER BY id DESC"),
        [],
    )
}

/// Entries whose timestamp is at or after `cutoff_ms`, newest first.
pub fn entries_since(conn: &Connection, cutoff_ms: i64) -> Result<Vec<Entry>> {
    query_entries(
        conn,
        &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE timestamp >= ?1 ORDER BY id DESC"),
        params![cutoff_ms],
    )
}

/// Entries logged on a calendar date, newest first.
pub fn entries_for_date(conn: &Connection, date: NaiveDate) -> Result<Vec<Entry>> {
    query_entries(
        conn,
        &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE date = ?1 ORDER BY id DESC"),
        params![date],
    )
}

/// Fetch a single entry by id.
pub fn get_entry(conn: &Connection, id: i64) -> Result<Entry> {
    let row = conn
        .query_row(
            &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1"),
            params![id],
            EntryRow::from_row,
        )
        .optional()?;

    match row {
        Some(row) => hydrate(conn, row),
        None => Err(JournalError::NotFound(id)),
    }
}

/// Delete an entry and its food items. Fails with [`JournalError::NotFound`]
/// when the id does not exist, leaving the collection untouched.
pub fn delete_entry(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    // food_items cascade via FK
    let rows = tx.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(JournalError::NotFound(id));
    }
    tx.commit()?;

    tracing::debug!(id, "entry deleted");
    Ok(())
}

/// Group entries by calendar date, newest date first. Entries keep their
/// relative order within a day.
pub fn group_by_date(entries: &[Entry]) -> Vec<(NaiveDate, Vec<Entry>)> {
    let mut groups: Vec<(NaiveDate, Vec<Entry>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(date, _)| *date == entry.date) {
            Some((_, day)) => day.push(entry.clone()),
            None => groups.push((entry.date, vec![entry.clone()])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

/// Raw `entries` row before symptoms are decoded and foods attached.
struct EntryRow {
    id: i64,
    mood: u8,
    food: String,
    energy: u8,
    symptoms: String,
    notes: String,
    timestamp: i64,
    date: NaiveDate,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            mood: row.get(1)?,
            food: row.get(2)?,
            energy: row.get(3)?,
            symptoms: row.get(4)?,
            notes: row.get(5)?,
            timestamp: row.get(6)?,
            date: row.get(7)?,
        })
    }
}

fn query_entries<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Entry>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, EntryRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter().map(|row| hydrate(conn, row)).collect()
}

/// Decode symptoms and attach food items in display order.
fn hydrate(conn: &Connection, row: EntryRow) -> Result<Entry> {
    let symptoms: Vec<String> = serde_json::from_str(&row.symptoms).map_err(|e| {
        JournalError::Corrupt(format!("entry {} has invalid symptoms: {e}", row.id))
    })?;

    Ok(Entry {
        id: Some(row.id),
        mood: row.mood,
        food: row.food,
        foods: load_food_items(conn, row.id)?,
        energy: row.energy,
        symptoms,
        notes: row.notes,
        timestamp: row.timestamp,
        date: row.date,
    })
}

fn load_food_items(conn: &Connection, entry_id: i64) -> Result<Vec<FoodItem>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, photo, ingredients, calories, ai_notes, status \
         FROM food_items WHERE entry_id = ?1 ORDER BY position",
    )?;

    let rows = stmt
        .query_map(params![entry_id], |row| {
            Ok((
                FoodItem {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    photo: row.get(2)?,
                    ingredients: row.get(3)?,
                    calories: row.get(4)?,
                    ai_notes: row.get(5)?,
                    status: FoodStatus::Ready,
                },
                row.get::<_, String>(6)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(mut item, status)| {
            item.status = status.parse().map_err(JournalError::Corrupt)?;
            Ok(item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::TimeZone;

    fn new_entry(food: &str, created_at: DateTime<Utc>) -> Entry {
        NewEntry {
            mood: 3,
            food: food.into(),
            foods: vec![],
            energy: 5,
            symptoms: vec![],
            notes: String::new(),
        }
        .into_entry(created_at.timestamp_millis(), created_at)
    }

    #[test]
    fn test_ids_auto_increment() {
        let mut conn = db::open_memory_database().unwrap();
        let entry = NewEntry {
            mood: 3,
            food: "toast".into(),
            foods: vec![],
            energy: 5,
            symptoms: vec![],
            notes: String::new(),
        };
        let a = add_entry(&mut conn, &entry).unwrap();
        let b = add_entry(&mut conn, &entry).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_undecodable_symptoms_report_corrupt() {
        let conn = db::open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO entries (mood, food, energy, symptoms, timestamp, date) \
             VALUES (3, 'toast', 5, 'not json', 0, '2024-01-01')",
            [],
        )
        .unwrap();

        assert!(matches!(list_entries(&conn), Err(JournalError::Corrupt(_))));
    }

    #[test]
    fn test_group_by_date_keeps_order_within_day() {
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap();
        let entries = vec![
            new_entry("mon-pm", at(1, 20)),
            new_entry("tue", at(2, 8)),
            new_entry("mon-am", at(1, 8)),
        ];

        let groups = group_by_date(&entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        let monday: Vec<&str> = groups[1].1.iter().map(|e| e.food.as_str()).collect();
        assert_eq!(monday, vec!["mon-pm", "mon-am"]);
    }
}
