//! Core domain logic for GeoRemind.
//! This crate owns reminder persistence and the geofence-to-notification flow;
//! platform shells reach it through `georemind_ffi`.

pub mod config;
pub mod db;
pub mod geofence;
pub mod logging;
pub mod model;
pub mod repo;
pub mod result;
pub mod runtime;
pub mod service;

pub use config::CoreConfig;
pub use geofence::client::{
    GeofenceExpiration, GeofenceOutcome, GeofenceRequest, GeofenceTransition, GeofencingClient,
};
pub use geofence::transitions::{
    notify_for_request, GeofenceEvent, GeofenceTransitionHandler, ReminderNotifier, WorkOutcome,
};
pub use geofence::GEOFENCE_RADIUS_IN_METERS;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::reminder::{Reminder, ReminderId, ValidationError};
pub use repo::local_repository::{ReminderDataSource, RemindersLocalRepository};
pub use repo::reminder_store::{
    InMemoryReminderStore, ReminderStore, SqliteReminderStore, StoreError, StoreResult,
};
pub use result::{DataResult, REMINDER_NOT_FOUND};
pub use runtime::AppScope;
pub use service::events::{ui_event_channel, NavigationCommand, UiEvent, UiEventSender};
pub use service::reminders_list::{RemindersListService, RemoveOutcome};
pub use service::save_reminder::{ReminderDraft, SaveOutcome, SaveReminderService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
