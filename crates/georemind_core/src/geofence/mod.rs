//! Geofencing collaborator boundary.
//!
//! # Responsibility
//! - Describe circular regions registered with the platform, keyed by
//!   reminder id.
//! - Resolve region-entered deliveries back into reminders for notification.
//!
//! # Invariants
//! - A reminder is persisted only after its geofence registration succeeds.
//! - Registration failures are reported, never retried here.

pub mod client;
pub mod transitions;

/// Radius used when no configuration overrides it.
pub const GEOFENCE_RADIUS_IN_METERS: f32 = 100.0;
