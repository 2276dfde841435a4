//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use georemind_core::{
    DataResult, GeofenceOutcome, GeofenceRequest, GeofencingClient, Reminder, ReminderDataSource,
    ReminderId, ReminderNotifier, UiEvent,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

pub fn reminder(id: &str, lat: f64, lng: f64) -> Reminder {
    Reminder::with_id(
        id,
        Some(format!("Title {id}")),
        Some(format!("Description {id}")),
        Some(format!("Location {id}")),
        Some(lat),
        Some(lng),
    )
}

/// Map-backed data source that can be switched into an error mode.
#[derive(Default)]
pub struct FakeReminderDataSource {
    reminders: Mutex<HashMap<ReminderId, Reminder>>,
    should_return_error: Mutex<bool>,
}

impl FakeReminderDataSource {
    pub fn with(reminders: Vec<Reminder>) -> Self {
        let source = Self::default();
        for reminder in reminders {
            source
                .reminders
                .lock()
                .unwrap()
                .insert(reminder.id.clone(), reminder);
        }
        source
    }

    pub fn set_should_return_error(&self, flag: bool) {
        *self.should_return_error.lock().unwrap() = flag;
    }

    pub fn stored(&self, id: &str) -> Option<Reminder> {
        self.reminders.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.reminders.lock().unwrap().len()
    }

    fn failing(&self) -> bool {
        *self.should_return_error.lock().unwrap()
    }
}

#[async_trait]
impl ReminderDataSource for FakeReminderDataSource {
    async fn get_reminders(&self) -> DataResult<Vec<Reminder>> {
        if self.failing() {
            return DataResult::error("Error");
        }
        DataResult::Success(self.reminders.lock().unwrap().values().cloned().collect())
    }

    async fn save_reminder(&self, reminder: Reminder) {
        self.reminders
            .lock()
            .unwrap()
            .insert(reminder.id.clone(), reminder);
    }

    async fn get_reminder_by_id(&self, id: &str) -> DataResult<Reminder> {
        if self.failing() {
            return DataResult::error("Error");
        }
        match self.reminders.lock().unwrap().get(id) {
            Some(reminder) => DataResult::Success(reminder.clone()),
            None => DataResult::not_found(),
        }
    }

    async fn delete_reminder_by_id(&self, id: &str) {
        self.reminders.lock().unwrap().remove(id);
    }

    async fn delete_all_reminders(&self) {
        self.reminders.lock().unwrap().clear();
    }
}

/// Geofencing client answering every call with a fixed outcome.
pub struct FakeGeofencingClient {
    outcome: GeofenceOutcome,
    pub added: Mutex<Vec<GeofenceRequest>>,
    pub removed: Mutex<Vec<ReminderId>>,
}

impl FakeGeofencingClient {
    pub fn answering(outcome: GeofenceOutcome) -> Self {
        Self {
            outcome,
            added: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GeofencingClient for FakeGeofencingClient {
    async fn add_geofences(&self, request: &GeofenceRequest) -> GeofenceOutcome {
        self.added.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }

    async fn remove_geofences(&self, ids: &[ReminderId]) -> GeofenceOutcome {
        self.removed.lock().unwrap().extend_from_slice(ids);
        self.outcome.clone()
    }
}

/// Notifier that records which reminders it was asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<Reminder>>,
}

#[async_trait]
impl ReminderNotifier for RecordingNotifier {
    async fn send_reminder_notification(&self, reminder: &Reminder) {
        self.shown.lock().unwrap().push(reminder.clone());
    }
}

/// Collects every event currently queued on the channel.
pub fn drain(rx: &mut UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
