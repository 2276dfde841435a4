//! Domain model for location-based reminders.
//!
//! # Responsibility
//! - Define the canonical reminder record shared by storage, geofencing and
//!   notification paths.
//!
//! # Invariants
//! - Every reminder is identified by a stable `ReminderId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod reminder;
