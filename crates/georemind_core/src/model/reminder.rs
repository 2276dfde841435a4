//! Reminder domain model.
//!
//! # Responsibility
//! - Define the record persisted for every location-based reminder.
//! - Provide the draft-level validation used before a reminder is saved.
//!
//! # Invariants
//! - `id` is assigned once and never changes; it is the only identity key.
//! - A resave with the same `id` replaces the stored record as a whole.
//! - Text and coordinate fields are optional at the storage level.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier shared by the stored reminder and its geofence.
///
/// Kept as plain text because the platform geofencing service hands ids back
/// as opaque request strings.
pub type ReminderId = String;

/// A user-created reminder pairing free text with a geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Display name of the selected point of interest.
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub id: ReminderId,
}

/// Reason a reminder draft cannot be saved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is missing or empty.
    EnterTitle,
    /// Location name or one of the coordinates is missing.
    SelectLocation,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnterTitle => write!(f, "Please enter title"),
            Self::SelectLocation => write!(f, "Please select location"),
        }
    }
}

impl Error for ValidationError {}

impl Reminder {
    /// Creates a reminder with a freshly generated id.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            title,
            description,
            location,
            latitude,
            longitude,
        )
    }

    /// Creates a reminder with a caller-provided id.
    ///
    /// Used when an id already exists externally, e.g. a registered geofence.
    pub fn with_id(
        id: impl Into<ReminderId>,
        title: Option<String>,
        description: Option<String>,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            title,
            description,
            location,
            latitude,
            longitude,
            id: id.into(),
        }
    }

    /// Checks that the draft carries everything a geofenced reminder needs.
    ///
    /// # Errors
    /// - `EnterTitle` when the title is absent or empty.
    /// - `SelectLocation` when the location name is absent or empty, or
    ///   either coordinate is absent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::EnterTitle);
        }

        if self.location.as_deref().map_or(true, str::is_empty)
            || self.latitude.is_none()
            || self.longitude.is_none()
        {
            return Err(ValidationError::SelectLocation);
        }

        Ok(())
    }

    /// Returns both coordinates when the reminder has a complete point.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}
