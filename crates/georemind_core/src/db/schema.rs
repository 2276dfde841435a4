//! Reminder table schema.
//!
//! # Invariants
//! - A database is stamped with `SCHEMA_VERSION` only after its `reminders`
//!   table is verified.
//! - A pre-existing table missing a record column is refused, never patched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema revision written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Columns of the `reminders` table, one per record field.
pub const REMINDER_COLUMNS: [&str; 6] = [
    "id",
    "title",
    "description",
    "location",
    "latitude",
    "longitude",
];

const CREATE_REMINDERS_SQL: &str = "CREATE TABLE IF NOT EXISTS reminders (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT,
    description TEXT,
    location TEXT,
    latitude REAL,
    longitude REAL
);";

/// Creates the `reminders` table on a fresh database, or verifies it on an
/// existing one.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = user_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::NewerSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return check_reminders_columns(conn);
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_REMINDERS_SQL)?;
    check_reminders_columns(&tx)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!(
        "event=db_schema module=db status=ok from_version={found} to_version={SCHEMA_VERSION}"
    );
    Ok(())
}

fn user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn check_reminders_columns(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('reminders');")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let missing_columns: Vec<&'static str> = REMINDER_COLUMNS
        .into_iter()
        .filter(|column| !present.iter().any(|name| name.as_str() == *column))
        .collect();
    if missing_columns.is_empty() {
        Ok(())
    } else {
        Err(DbError::RemindersTableMismatch { missing_columns })
    }
}
