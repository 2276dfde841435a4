//! Save-reminder use case.
//!
//! # Responsibility
//! - Hold the reminder draft being edited.
//! - Validate the draft, register its geofence, then persist it.
//!
//! # Invariants
//! - Persistence starts only after geofence registration succeeds.
//! - The persistence job runs on the process-wide scope and is not
//!   cancelled when the caller goes away.

use crate::geofence::client::{GeofenceOutcome, GeofenceRequest, GeofencingClient};
use crate::geofence::GEOFENCE_RADIUS_IN_METERS;
use crate::model::reminder::{Reminder, ValidationError};
use crate::repo::local_repository::ReminderDataSource;
use crate::runtime::AppScope;
use crate::service::events::{NavigationCommand, UiEvent, UiEventSender};
use log::{info, warn};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub const REMINDER_SAVED: &str = "Reminder Saved !";
pub const OPERATION_CANCELLED: &str = "Operation cancelled";
pub const ERR_ADDING_GEOFENCE: &str = "Failed to add geofence";

/// Fields collected by the save screen before a reminder exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ReminderDraft {
    /// Builds a reminder with a fresh id from the current fields.
    pub fn to_reminder(&self) -> Reminder {
        Reminder::new(
            self.title.clone(),
            self.description.clone(),
            self.location.clone(),
            self.latitude,
            self.longitude,
        )
    }
}

/// How a save attempt ended.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Geofence registered; the handle completes once the row is written.
    Saved(JoinHandle<()>),
    Invalid(ValidationError),
    Cancelled,
    GeofenceFailed(String),
}

pub struct SaveReminderService {
    data_source: Arc<dyn ReminderDataSource>,
    geofencing: Arc<dyn GeofencingClient>,
    scope: AppScope,
    events: UiEventSender,
    radius_meters: f32,
    draft: Mutex<ReminderDraft>,
}

impl SaveReminderService {
    pub fn new(
        data_source: Arc<dyn ReminderDataSource>,
        geofencing: Arc<dyn GeofencingClient>,
        scope: AppScope,
        events: UiEventSender,
    ) -> Self {
        Self {
            data_source,
            geofencing,
            scope,
            events,
            radius_meters: GEOFENCE_RADIUS_IN_METERS,
            draft: Mutex::new(ReminderDraft::default()),
        }
    }

    pub fn with_radius_meters(mut self, radius_meters: f32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    pub fn draft(&self) -> ReminderDraft {
        self.lock_draft().clone()
    }

    /// Applies an edit to the draft.
    pub fn update_draft(&self, edit: impl FnOnce(&mut ReminderDraft)) {
        edit(&mut self.lock_draft());
    }

    /// Resets the draft so the next visit starts fresh.
    pub fn on_clear(&self) {
        *self.lock_draft() = ReminderDraft::default();
    }

    /// Asks the presentation layer to open the location picker.
    pub fn select_location(&self) {
        self.events
            .publish(UiEvent::Navigate(NavigationCommand::ToSelectLocation));
    }

    /// Validates a reminder, publishing a snackbar when it is incomplete.
    pub fn validate_entered_data(&self, reminder: &Reminder) -> Result<(), ValidationError> {
        reminder.validate().map_err(|err| {
            self.events.publish(UiEvent::ShowSnackBar(err.to_string()));
            err
        })
    }

    /// Saves the current draft as a new reminder.
    pub async fn save_draft(&self) -> SaveOutcome {
        let reminder = self.draft().to_reminder();
        self.save_reminder(reminder).await
    }

    /// Registers the reminder's geofence and persists it on success.
    pub async fn save_reminder(&self, reminder: Reminder) -> SaveOutcome {
        if let Err(err) = self.validate_entered_data(&reminder) {
            return SaveOutcome::Invalid(err);
        }

        let Some(request) = GeofenceRequest::for_reminder(&reminder, self.radius_meters) else {
            return SaveOutcome::Invalid(ValidationError::SelectLocation);
        };

        match self.geofencing.add_geofences(&request).await {
            GeofenceOutcome::Success => {
                info!(
                    "event=geofence_add module=service status=ok id={} radius_m={}",
                    reminder.id, self.radius_meters
                );
                let handle = self.persist(reminder);
                self.events
                    .publish(UiEvent::ShowToast(REMINDER_SAVED.to_string()));
                self.events
                    .publish(UiEvent::Navigate(NavigationCommand::Back));
                SaveOutcome::Saved(handle)
            }
            GeofenceOutcome::Cancelled => {
                warn!(
                    "event=geofence_add module=service status=cancelled id={}",
                    reminder.id
                );
                self.events
                    .publish(UiEvent::ShowSnackBar(OPERATION_CANCELLED.to_string()));
                self.events
                    .publish(UiEvent::Navigate(NavigationCommand::Back));
                SaveOutcome::Cancelled
            }
            GeofenceOutcome::Failure(reason) => {
                warn!(
                    "event=geofence_add module=service status=error id={} error={}",
                    reminder.id, reason
                );
                self.events
                    .publish(UiEvent::ShowSnackBar(ERR_ADDING_GEOFENCE.to_string()));
                SaveOutcome::GeofenceFailed(reason)
            }
        }
    }

    fn persist(&self, reminder: Reminder) -> JoinHandle<()> {
        self.events.publish(UiEvent::ShowLoading(true));
        let data_source = Arc::clone(&self.data_source);
        let events = self.events.clone();
        self.scope.launch(async move {
            data_source.save_reminder(reminder).await;
            events.publish(UiEvent::ShowLoading(false));
        })
    }

    fn lock_draft(&self) -> std::sync::MutexGuard<'_, ReminderDraft> {
        // The draft is plain data; a poisoned lock still holds a usable value.
        self.draft
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
