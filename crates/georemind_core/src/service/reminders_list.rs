//! Reminder list use case.
//!
//! # Responsibility
//! - Load the stored reminders and publish empty-state signals.
//! - Clear reminders together with their registered geofences.
//!
//! # Invariants
//! - Stored reminders are deleted only after their geofences were removed.

use crate::geofence::client::{GeofenceOutcome, GeofencingClient};
use crate::model::reminder::{Reminder, ReminderId};
use crate::repo::local_repository::ReminderDataSource;
use crate::result::DataResult;
use crate::service::events::{NavigationCommand, UiEvent, UiEventSender};
use crate::service::save_reminder::OPERATION_CANCELLED;
use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

pub const ERR_REMOVING_GEOFENCES: &str = "Failed to remove geofences";

/// How a removal attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Nothing matched; no collaborator was called.
    Nothing,
    Removed(usize),
    Cancelled,
    GeofenceFailed(String),
}

pub struct RemindersListService {
    data_source: Arc<dyn ReminderDataSource>,
    geofencing: Arc<dyn GeofencingClient>,
    events: UiEventSender,
    reminders: Mutex<Vec<Reminder>>,
}

impl RemindersListService {
    pub fn new(
        data_source: Arc<dyn ReminderDataSource>,
        geofencing: Arc<dyn GeofencingClient>,
        events: UiEventSender,
    ) -> Self {
        Self {
            data_source,
            geofencing,
            events,
            reminders: Mutex::new(Vec::new()),
        }
    }

    /// Last loaded reminders.
    pub fn reminders(&self) -> Vec<Reminder> {
        self.lock().clone()
    }

    /// Reloads the list from the data source.
    ///
    /// Errors surface as a snackbar; the previous list is kept.
    pub async fn load_reminders(&self) {
        self.events.publish(UiEvent::ShowLoading(true));

        match self.data_source.get_reminders().await {
            DataResult::Success(reminders) => {
                info!(
                    "event=reminders_load module=service status=ok count={}",
                    reminders.len()
                );
                *self.lock() = reminders;
            }
            DataResult::Error { message, .. } => {
                warn!("event=reminders_load module=service status=error error={message}");
                self.events.publish(UiEvent::ShowSnackBar(message));
            }
        }

        self.events.publish(UiEvent::ShowLoading(false));
        self.invalidate_show_no_data();
    }

    /// Removes every listed reminder and its geofence.
    pub async fn clear_list(&self) -> RemoveOutcome {
        let ids: Vec<ReminderId> = self.lock().iter().map(|r| r.id.clone()).collect();
        if ids.is_empty() {
            return RemoveOutcome::Nothing;
        }

        let outcome = self.remove_geofences(&ids).await;
        if outcome != GeofenceOutcome::Success {
            return self.report_removal_failure(outcome);
        }

        self.data_source.delete_all_reminders().await;
        self.lock().clear();
        self.invalidate_show_no_data();
        RemoveOutcome::Removed(ids.len())
    }

    /// Removes one listed reminder and its geofence.
    pub async fn delete_reminder(&self, id: &str) -> RemoveOutcome {
        if !self.lock().iter().any(|r| r.id == id) {
            return RemoveOutcome::Nothing;
        }

        let outcome = self.remove_geofences(&[id.to_string()]).await;
        if outcome != GeofenceOutcome::Success {
            return self.report_removal_failure(outcome);
        }

        self.data_source.delete_reminder_by_id(id).await;
        self.lock().retain(|r| r.id != id);
        self.invalidate_show_no_data();
        RemoveOutcome::Removed(1)
    }

    /// Asks the presentation layer to open the save screen.
    pub fn navigate_to_add_reminder(&self) {
        self.events
            .publish(UiEvent::Navigate(NavigationCommand::ToSaveReminder));
    }

    async fn remove_geofences(&self, ids: &[ReminderId]) -> GeofenceOutcome {
        let outcome = self.geofencing.remove_geofences(ids).await;
        info!(
            "event=geofence_remove module=service status={} count={}",
            outcome,
            ids.len()
        );
        outcome
    }

    fn report_removal_failure(&self, outcome: GeofenceOutcome) -> RemoveOutcome {
        match outcome {
            GeofenceOutcome::Cancelled => {
                self.events
                    .publish(UiEvent::ShowSnackBar(OPERATION_CANCELLED.to_string()));
                RemoveOutcome::Cancelled
            }
            GeofenceOutcome::Failure(reason) => {
                self.events
                    .publish(UiEvent::ShowSnackBar(ERR_REMOVING_GEOFENCES.to_string()));
                RemoveOutcome::GeofenceFailed(reason)
            }
            GeofenceOutcome::Success => RemoveOutcome::Nothing,
        }
    }

    fn invalidate_show_no_data(&self) {
        let empty = self.lock().is_empty();
        self.events.publish(UiEvent::ShowNoData(empty));
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Reminder>> {
        self.reminders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
