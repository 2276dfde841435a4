use georemind_core::db::schema::{REMINDER_COLUMNS, SCHEMA_VERSION};
use georemind_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn fresh_database_gets_reminders_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    let mut stmt = conn
        .prepare("SELECT name, type, pk FROM pragma_table_info('reminders');")
        .unwrap();
    let columns: Vec<(String, String, i64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let names: Vec<&str> = columns.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(names, REMINDER_COLUMNS);
    assert_eq!(columns[0], ("id".to_string(), "TEXT".to_string(), 1));
    assert_eq!(columns[4].1, "REAL");
    assert_eq!(columns[5].1, "REAL");
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("georemind.db");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO reminders (id, title) VALUES ('kept', 'Pick up parcel');",
        [],
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    let title: String = conn
        .query_row("SELECT title FROM reminders WHERE id = 'kept';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(title, "Pick up parcel");
}

#[test]
fn database_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 7;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::NewerSchema { found, supported } => {
            assert_eq!(found, 7);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn legacy_table_without_coordinates_is_refused_and_left_unstamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE reminders (id TEXT PRIMARY KEY NOT NULL, title TEXT);")
        .unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::RemindersTableMismatch { missing_columns } => {
            assert_eq!(
                missing_columns,
                vec!["description", "location", "latitude", "longitude"]
            );
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
}

#[test]
fn dropped_reminders_table_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dropped.db");
    open_db(&path)
        .unwrap()
        .execute_batch("DROP TABLE reminders;")
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(
        matches!(&err, DbError::RemindersTableMismatch { missing_columns } if missing_columns.len() == REMINDER_COLUMNS.len()),
        "got {err}"
    );
}

#[test]
fn unusable_parent_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let err = open_db(blocker.join("inner").join("georemind.db")).unwrap_err();
    match err {
        DbError::CreateDir { path, .. } => assert_eq!(path, blocker.join("inner")),
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
