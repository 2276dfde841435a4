//! SQLite connection bootstrap for the reminders table.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Create or verify the reminder schema before any row is touched.
//!
//! # Invariants
//! - The schema revision is tracked via `PRAGMA user_version`.
//! - No reminder row is read or written through a connection whose
//!   `reminders` table lacks a record column.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening a reminder database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The parent directory of a database file could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file was written by a newer build.
    NewerSchema { found: u32, supported: u32 },
    /// An existing `reminders` table does not carry every record column.
    RemindersTableMismatch { missing_columns: Vec<&'static str> },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::CreateDir { path, source } => write!(
                f,
                "cannot create database directory `{}`: {source}",
                path.display()
            ),
            Self::NewerSchema { found, supported } => write!(
                f,
                "reminder schema version {found} is newer than supported {supported}"
            ),
            Self::RemindersTableMismatch { missing_columns } => write!(
                f,
                "reminders table is missing column(s): {}",
                missing_columns.join(", ")
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::CreateDir { source, .. } => Some(source),
            Self::NewerSchema { .. } | Self::RemindersTableMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
