//! Reminder data source contract and its storage-backed implementation.
//!
//! # Responsibility
//! - Be the single entry point callers use to read and write reminders.
//! - Move storage calls onto the blocking pool and await their result.
//! - Turn every storage failure into a `DataResult` or a logged no-op.
//! - Offer `try_*` writes for callers that must report a failed write.
//!
//! # Invariants
//! - No storage error crosses the `ReminderDataSource` boundary as a panic.
//! - Only the `try_*` methods return write failures, as a message.
//! - The repository keeps no reminder state of its own.

use crate::model::reminder::Reminder;
use crate::repo::reminder_store::{ReminderStore, StoreResult};
use crate::result::DataResult;
use crate::runtime::AppScope;
use async_trait::async_trait;
use log::{error, warn};
use std::sync::Arc;

/// Async reminder access used by services and background jobs.
#[async_trait]
pub trait ReminderDataSource: Send + Sync {
    async fn get_reminders(&self) -> DataResult<Vec<Reminder>>;
    async fn save_reminder(&self, reminder: Reminder);
    async fn get_reminder_by_id(&self, id: &str) -> DataResult<Reminder>;
    async fn delete_reminder_by_id(&self, id: &str);
    async fn delete_all_reminders(&self);
}

/// Repository over a local `ReminderStore`.
pub struct RemindersLocalRepository<S: ReminderStore> {
    store: Arc<S>,
    scope: AppScope,
}

impl<S: ReminderStore + 'static> RemindersLocalRepository<S> {
    /// Creates a repository that dispatches storage calls onto `scope`.
    pub fn new(store: Arc<S>, scope: AppScope) -> Self {
        Self { store, scope }
    }

    /// Saves `reminder` and reports whether the write landed.
    ///
    /// # Errors
    /// Returns the logged storage or task failure message.
    pub async fn try_save_reminder(&self, reminder: Reminder) -> Result<(), String> {
        self.dispatch("repo_save_reminder", move |store| store.save(&reminder))
            .await
    }

    /// Deletes the reminder with `id`; absent ids succeed.
    ///
    /// # Errors
    /// Returns the logged storage or task failure message.
    pub async fn try_delete_reminder_by_id(&self, id: &str) -> Result<(), String> {
        let id = id.to_string();
        self.dispatch("repo_delete_reminder", move |store| store.delete_by_id(&id))
            .await
    }

    /// Deletes every reminder.
    ///
    /// # Errors
    /// Returns the logged storage or task failure message.
    pub async fn try_delete_all_reminders(&self) -> Result<(), String> {
        self.dispatch("repo_delete_all", |store| store.delete_all())
            .await
    }

    /// Runs one store call on the blocking pool.
    ///
    /// Store errors and failed tasks are logged and reduced to a message.
    async fn dispatch<T, F>(&self, op: &'static str, f: F) -> Result<T, String>
    where
        F: FnOnce(&S) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        match self.scope.run_blocking(move || f(store.as_ref())).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!("event={op} module=repo status=error error={err}");
                Err(err.to_string())
            }
            Err(err) => {
                error!("event={op} module=repo status=error error_code=task_failed error={err}");
                Err(format!("storage task failed: {err}"))
            }
        }
    }
}

#[async_trait]
impl<S: ReminderStore + 'static> ReminderDataSource for RemindersLocalRepository<S> {
    async fn get_reminders(&self) -> DataResult<Vec<Reminder>> {
        match self.dispatch("repo_get_reminders", |store| store.get_all()).await {
            Ok(reminders) => DataResult::Success(reminders),
            Err(message) => DataResult::error(message),
        }
    }

    async fn save_reminder(&self, reminder: Reminder) {
        // Failure is already logged by dispatch; saves are fire-and-forget.
        let _ = self.try_save_reminder(reminder).await;
    }

    async fn get_reminder_by_id(&self, id: &str) -> DataResult<Reminder> {
        let id = id.to_string();
        match self
            .dispatch("repo_get_reminder", move |store| store.get_by_id(&id))
            .await
        {
            Ok(Some(reminder)) => DataResult::Success(reminder),
            Ok(None) => DataResult::not_found(),
            Err(message) => DataResult::error(message),
        }
    }

    async fn delete_reminder_by_id(&self, id: &str) {
        let _ = self.try_delete_reminder_by_id(id).await;
    }

    async fn delete_all_reminders(&self) {
        let _ = self.try_delete_all_reminders().await;
    }
}
