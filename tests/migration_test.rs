mod helpers;

use dietmood::db;
use dietmood::db::migrations::{get_schema_version, run_migrations, CURRENT_SCHEMA_VERSION};

fn has_status_column(conn: &rusqlite::Connection) -> bool {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info('food_items')")
        .unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    columns.iter().any(|name| name == "status")
}

#[test]
fn fresh_db_migrates_to_current_version() {
    let conn = helpers::test_db();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    assert!(has_status_column(&conn));
}

#[test]
fn migrations_are_idempotent() {
    let conn = helpers::test_db();
    run_migrations(&conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn manual_v1_db_upgrades_correctly() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();

    assert_eq!(get_schema_version(&conn).unwrap(), 1);
    assert!(!has_status_column(&conn));

    // A food item written before the status column existed
    conn.execute(
        "INSERT INTO entries (mood, food, energy, timestamp, date) VALUES (4, 'soup', 6, 0, '2024-01-01')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO food_items (entry_id, position, id, name) VALUES (1, 0, 'f1', 'soup')",
        [],
    )
    .unwrap();

    run_migrations(&conn).unwrap();

    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    let status: String = conn
        .query_row("SELECT status FROM food_items WHERE id = 'f1'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(status, "ready");
}
