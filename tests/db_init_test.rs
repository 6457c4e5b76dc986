use dietmood::db;
use rusqlite::Connection;

#[test]
fn full_schema_creates_all_tables_and_indexes() {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&conn).unwrap();

    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert!(tables.contains(&"entries".to_string()), "entries table missing");
    assert!(tables.contains(&"food_items".to_string()), "food_items table missing");
    assert!(tables.contains(&"schema_meta".to_string()), "schema_meta table missing");

    let indexes: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%' ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert!(indexes.contains(&"idx_entries_timestamp".to_string()));
    assert!(indexes.contains(&"idx_entries_date".to_string()));
    assert!(indexes.contains(&"idx_food_items_entry".to_string()));
}

#[test]
fn check_constraints_reject_out_of_range_scores() {
    let conn = db::open_memory_database().unwrap();

    let ok = conn.execute(
        "INSERT INTO entries (mood, food, energy, timestamp, date) VALUES (3, 'toast', 5, 0, '2024-01-01')",
        [],
    );
    assert!(ok.is_ok());

    let bad_mood = conn.execute(
        "INSERT INTO entries (mood, food, energy, timestamp, date) VALUES (6, 'toast', 5, 0, '2024-01-01')",
        [],
    );
    assert!(bad_mood.is_err(), "mood 6 should be rejected by CHECK constraint");

    let bad_energy = conn.execute(
        "INSERT INTO entries (mood, food, energy, timestamp, date) VALUES (3, 'toast', 0, 0, '2024-01-01')",
        [],
    );
    assert!(bad_energy.is_err(), "energy 0 should be rejected by CHECK constraint");
}

#[test]
fn food_items_cascade_with_their_entry() {
    let conn = db::open_memory_database().unwrap();
    conn.execute(
        "INSERT INTO entries (mood, food, energy, timestamp, date) VALUES (4, 'salad', 6, 0, '2024-01-01')",
        [],
    )
    .unwrap();
    let entry_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO food_items (entry_id, position, id, name) VALUES (?1, 0, 'f1', 'salad')",
        [entry_id],
    )
    .unwrap();

    conn.execute("DELETE FROM entries WHERE id = ?1", [entry_id]).unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM food_items", [], |r| r.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}
