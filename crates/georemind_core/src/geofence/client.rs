//! Registration contract for the platform geofencing service.

use crate::model::reminder::{Reminder, ReminderId};
use async_trait::async_trait;
use std::fmt::{Display, Formatter};

/// How long a registered region stays monitored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceExpiration {
    Never,
    AfterMillis(u64),
}

/// Boundary crossings a region reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceTransition {
    Enter,
    Exit,
    Dwell,
}

/// A circular region to monitor, tagged with the reminder id.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceRequest {
    pub request_id: ReminderId,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f32,
    pub expiration: GeofenceExpiration,
    pub transition: GeofenceTransition,
    /// Fire immediately when the device is already inside at registration.
    pub initial_trigger_on_enter: bool,
}

impl GeofenceRequest {
    /// Builds a never-expiring enter-only region around the reminder point.
    ///
    /// Returns `None` when the reminder has no complete coordinates.
    pub fn for_reminder(reminder: &Reminder, radius_meters: f32) -> Option<Self> {
        let (latitude, longitude) = reminder.coordinates()?;
        Some(Self {
            request_id: reminder.id.clone(),
            latitude,
            longitude,
            radius_meters,
            expiration: GeofenceExpiration::Never,
            transition: GeofenceTransition::Enter,
            initial_trigger_on_enter: true,
        })
    }
}

/// Completion signal of a geofencing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeofenceOutcome {
    Success,
    Cancelled,
    Failure(String),
}

impl Display for GeofenceOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Failure(reason) => write!(f, "failure: {reason}"),
        }
    }
}

/// Platform geofencing service.
#[async_trait]
pub trait GeofencingClient: Send + Sync {
    async fn add_geofences(&self, request: &GeofenceRequest) -> GeofenceOutcome;
    async fn remove_geofences(&self, ids: &[ReminderId]) -> GeofenceOutcome;
}
