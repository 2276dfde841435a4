//! Handling of region-entered deliveries.
//!
//! # Responsibility
//! - Filter platform deliveries down to successful enter transitions.
//! - Launch one background job per triggering id that resolves the reminder
//!   and hands it to the notifier.
//!
//! # Invariants
//! - Jobs run on the process-wide scope; no screen needs to be alive.
//! - A delivery with an error code never reaches the data source.

use crate::geofence::client::GeofenceTransition;
use crate::model::reminder::{Reminder, ReminderId};
use crate::repo::local_repository::ReminderDataSource;
use crate::result::DataResult;
use crate::runtime::AppScope;
use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One delivery from the platform geofencing service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceEvent {
    /// Platform status code when the delivery itself failed.
    pub error_code: Option<i32>,
    pub transition: GeofenceTransition,
    pub triggering_ids: Vec<ReminderId>,
}

/// Displays a reminder to the user.
#[async_trait]
pub trait ReminderNotifier: Send + Sync {
    async fn send_reminder_notification(&self, reminder: &Reminder);
}

/// Result of one resolve-and-notify job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOutcome {
    Success,
    Failure,
}

/// Resolves triggered geofence ids into notifications.
pub struct GeofenceTransitionHandler {
    data_source: Arc<dyn ReminderDataSource>,
    notifier: Arc<dyn ReminderNotifier>,
    scope: AppScope,
}

impl GeofenceTransitionHandler {
    pub fn new(
        data_source: Arc<dyn ReminderDataSource>,
        notifier: Arc<dyn ReminderNotifier>,
        scope: AppScope,
    ) -> Self {
        Self {
            data_source,
            notifier,
            scope,
        }
    }

    /// Processes a delivery and returns handles to the launched jobs.
    ///
    /// Deliveries with an error code or a non-enter transition launch nothing.
    pub fn handle_event(&self, event: GeofenceEvent) -> Vec<JoinHandle<WorkOutcome>> {
        if let Some(code) = event.error_code {
            error!("event=geofence_delivery module=geofence status=error error_code={code}");
            return Vec::new();
        }

        if event.transition != GeofenceTransition::Enter {
            warn!(
                "event=geofence_delivery module=geofence status=ignored transition={:?}",
                event.transition
            );
            return Vec::new();
        }

        if event.triggering_ids.is_empty() {
            warn!("event=geofence_delivery module=geofence status=ignored reason=no_triggering_ids");
            return Vec::new();
        }

        info!(
            "event=geofence_delivery module=geofence status=ok count={}",
            event.triggering_ids.len()
        );

        event
            .triggering_ids
            .into_iter()
            .map(|request_id| self.enqueue(request_id))
            .collect()
    }

    /// Launches the resolve-and-notify job for one request id.
    pub fn enqueue(&self, request_id: ReminderId) -> JoinHandle<WorkOutcome> {
        let data_source = Arc::clone(&self.data_source);
        let notifier = Arc::clone(&self.notifier);
        self.scope.launch(async move {
            notify_for_request(data_source.as_ref(), notifier.as_ref(), &request_id).await
        })
    }
}

/// Resolves `request_id` and notifies on success.
pub async fn notify_for_request(
    data_source: &dyn ReminderDataSource,
    notifier: &dyn ReminderNotifier,
    request_id: &str,
) -> WorkOutcome {
    if request_id.is_empty() {
        warn!("event=geofence_work module=geofence status=error error_code=empty_request_id");
        return WorkOutcome::Failure;
    }

    match data_source.get_reminder_by_id(request_id).await {
        DataResult::Success(reminder) => {
            notifier.send_reminder_notification(&reminder).await;
            info!("event=geofence_work module=geofence status=ok id={request_id}");
            WorkOutcome::Success
        }
        DataResult::Error { message, .. } => {
            warn!(
                "event=geofence_work module=geofence status=error id={request_id} error={message}"
            );
            WorkOutcome::Failure
        }
    }
}
