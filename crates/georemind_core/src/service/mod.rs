//! Core use-case services behind the reminder screens.
//!
//! # Responsibility
//! - Orchestrate repository and geofencing calls into screen-level actions.
//! - Publish UI signals as `UiEvent`s instead of touching any UI toolkit.
//!
//! # Invariants
//! - Services never bypass the `ReminderDataSource` contract.
//! - Services receive collaborators through their constructors.

pub mod events;
pub mod reminders_list;
pub mod save_reminder;
