//! Reminder persistence: storage backends and the repository over them.
//!
//! # Responsibility
//! - `reminder_store`: synchronous single-table CRUD (SQLite or in-memory).
//! - `local_repository`: async, result-wrapped access used by everything else.
//!
//! # Invariants
//! - Storage backends report failures as `StoreError`.
//! - The repository reports failures as `DataResult::Error` or logs them.

pub mod local_repository;
pub mod reminder_store;
