//! Reminder storage backends.
//!
//! # Responsibility
//! - Provide single-table CRUD over reminder records keyed by `id`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` is an upsert: one row per `id`, last write replaces the row.
//! - Point lookups and deletes of absent ids are not errors.
//! - Every backend refuses to store a record with an empty `id`, so every
//!   stored row can be listed again.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::DbError;
use crate::model::reminder::{Reminder, ReminderId};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, RwLock};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    location,
    latitude,
    longitude
FROM reminders";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a storage backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
    /// A previous holder of the backend lock panicked.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted reminder data: {message}"),
            Self::Poisoned => write!(f, "reminder storage lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for reminder records.
///
/// Implementations are called from blocking worker threads and must be
/// shareable across them.
pub trait ReminderStore: Send + Sync {
    fn get_all(&self) -> StoreResult<Vec<Reminder>>;
    fn get_by_id(&self, id: &str) -> StoreResult<Option<Reminder>>;
    fn save(&self, reminder: &Reminder) -> StoreResult<()>;
    fn delete_by_id(&self, id: &str) -> StoreResult<()>;
    fn delete_all(&self) -> StoreResult<()>;
}

/// SQLite-backed reminder store.
///
/// Owns its connection behind a mutex; rusqlite connections are `Send` but
/// not `Sync`.
pub struct SqliteReminderStore {
    conn: Mutex<Connection>,
}

impl SqliteReminderStore {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Number of stored rows.
    pub fn count(&self) -> StoreResult<u64> {
        let conn = self.lock()?;
        let count = conn.query_row("SELECT COUNT(*) FROM reminders;", [], |row| {
            row.get::<_, i64>(0)
        })?;
        u64::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("negative row count `{count}`")))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl std::fmt::Debug for SqliteReminderStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteReminderStore").finish()
    }
}

impl ReminderStore for SqliteReminderStore {
    fn get_all(&self) -> StoreResult<Vec<Reminder>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(REMINDER_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut reminders = Vec::new();

        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        debug!(
            "event=store_get_all module=store status=ok count={}",
            reminders.len()
        );
        Ok(reminders)
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Option<Reminder>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reminder_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, reminder: &Reminder) -> StoreResult<()> {
        ensure_storable(reminder)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO reminders (
                id,
                title,
                description,
                location,
                latitude,
                longitude
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                reminder.id.as_str(),
                reminder.title.as_deref(),
                reminder.description.as_deref(),
                reminder.location.as_deref(),
                reminder.latitude,
                reminder.longitude,
            ],
        )?;

        debug!("event=store_save module=store status=ok id={}", reminder.id);
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM reminders WHERE id = ?1;", [id])?;
        debug!("event=store_delete module=store status=ok id={id} changed={changed}");
        Ok(())
    }

    fn delete_all(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM reminders;", [])?;
        debug!("event=store_delete_all module=store status=ok changed={changed}");
        Ok(())
    }
}

fn ensure_storable(reminder: &Reminder) -> StoreResult<()> {
    if reminder.id.is_empty() {
        return Err(StoreError::InvalidData(
            "refusing to store reminder with empty id".to_string(),
        ));
    }
    Ok(())
}

fn parse_reminder_row(row: &Row<'_>) -> StoreResult<Reminder> {
    let id: ReminderId = row.get("id")?;
    if id.is_empty() {
        return Err(StoreError::InvalidData(
            "empty id in reminders.id".to_string(),
        ));
    }

    Ok(Reminder {
        title: row.get("title")?,
        description: row.get("description")?,
        location: row.get("location")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        id,
    })
}

/// Map-backed store with the same upsert/delete semantics as SQLite.
///
/// Used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct InMemoryReminderStore {
    reminders: RwLock<HashMap<ReminderId, Reminder>>,
}

impl InMemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReminderStore for InMemoryReminderStore {
    fn get_all(&self) -> StoreResult<Vec<Reminder>> {
        let reminders = self.reminders.read().map_err(|_| StoreError::Poisoned)?;
        Ok(reminders.values().cloned().collect())
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Option<Reminder>> {
        let reminders = self.reminders.read().map_err(|_| StoreError::Poisoned)?;
        Ok(reminders.get(id).cloned())
    }

    fn save(&self, reminder: &Reminder) -> StoreResult<()> {
        ensure_storable(reminder)?;
        let mut reminders = self.reminders.write().map_err(|_| StoreError::Poisoned)?;
        reminders.insert(reminder.id.clone(), reminder.clone());
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut reminders = self.reminders.write().map_err(|_| StoreError::Poisoned)?;
        reminders.remove(id);
        Ok(())
    }

    fn delete_all(&self) -> StoreResult<()> {
        let mut reminders = self.reminders.write().map_err(|_| StoreError::Poisoned)?;
        reminders.clear();
        Ok(())
    }
}
