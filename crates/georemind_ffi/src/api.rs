//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose reminder persistence and geofence resolution to Dart via FRB.
//! - Own the process-wide runtime, database and repository.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through response envelopes, never thrown.
//! - Persistence calls are made by the shell only after its geofence
//!   registration succeeded.

use async_trait::async_trait;
use georemind_core::db::open_db;
use georemind_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    init_logging_from_config, ping as ping_inner, AppScope, CoreConfig, DataResult,
    GeofenceEvent, GeofenceTransition, GeofenceTransitionHandler, Reminder, ReminderDataSource,
    ReminderNotifier, ReminderStore, RemindersLocalRepository, SqliteReminderStore,
};
use log::{info, warn};
use std::sync::{Arc, Mutex, OnceLock};
use tokio::runtime::Runtime;

static CORE: OnceLock<Result<CoreContext, String>> = OnceLock::new();

/// Everything the exported functions share for the process lifetime.
struct CoreContext {
    runtime: Runtime,
    repository: Arc<RemindersLocalRepository<SqliteReminderStore>>,
    config: CoreConfig,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Reminder shape exchanged with Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderItem {
    /// Empty when Dart wants the core to assign a fresh id.
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Reminder> for ReminderItem {
    fn from(value: Reminder) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            location: value.location,
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl From<ReminderItem> for Reminder {
    fn from(value: ReminderItem) -> Self {
        let ReminderItem {
            id,
            title,
            description,
            location,
            latitude,
            longitude,
        } = value;
        let id = id.trim().to_string();
        if id.is_empty() {
            Reminder::new(title, description, location, latitude, longitude)
        } else {
            Reminder::with_id(id, title, description, location, latitude, longitude)
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderActionResponse {
    pub ok: bool,
    /// Id of the affected reminder, when there is exactly one.
    pub reminder_id: Option<String>,
    pub message: String,
}

impl ReminderActionResponse {
    fn success(message: impl Into<String>, reminder_id: Option<String>) -> Self {
        Self {
            ok: true,
            reminder_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            reminder_id: None,
            message: message.into(),
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderListResponse {
    pub ok: bool,
    pub items: Vec<ReminderItem>,
    pub message: String,
}

impl ReminderListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Point-lookup response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderLookupResponse {
    pub ok: bool,
    pub item: Option<ReminderItem>,
    pub message: String,
}

/// Validates and persists a reminder whose geofence was just registered.
///
/// # FFI contract
/// - Sync call, DB-backed execution; returns after the row is written.
/// - Same id replaces the stored reminder.
/// - Incomplete drafts are rejected with the validation message.
/// - `ok` is true only when the write landed.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_save(item: ReminderItem) -> ReminderActionResponse {
    let reminder = Reminder::from(item);
    if let Err(err) = reminder.validate() {
        return ReminderActionResponse::failure(err.to_string());
    }

    with_core(|core| save_into(&core.runtime, &core.repository, reminder))
        .unwrap_or_else(|err| {
            ReminderActionResponse::failure(format!("reminder_save failed: {err}"))
        })
}

/// Lists every stored reminder.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_list() -> ReminderListResponse {
    match with_core(|core| core.runtime.block_on(core.repository.get_reminders())) {
        Ok(DataResult::Success(reminders)) => {
            let items = reminders
                .into_iter()
                .map(ReminderItem::from)
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No Data".to_string()
            } else {
                format!("Found {} reminder(s).", items.len())
            };
            ReminderListResponse {
                ok: true,
                items,
                message,
            }
        }
        Ok(DataResult::Error { message, .. }) => ReminderListResponse::failure(message),
        Err(err) => ReminderListResponse::failure(format!("reminders_list failed: {err}")),
    }
}

/// Looks up one reminder by id.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_get(id: String) -> ReminderLookupResponse {
    let id = id.trim().to_string();
    match with_core(|core| core.runtime.block_on(core.repository.get_reminder_by_id(&id))) {
        Ok(DataResult::Success(reminder)) => ReminderLookupResponse {
            ok: true,
            item: Some(reminder.into()),
            message: String::new(),
        },
        Ok(DataResult::Error { message, .. }) => ReminderLookupResponse {
            ok: false,
            item: None,
            message,
        },
        Err(err) => ReminderLookupResponse {
            ok: false,
            item: None,
            message: format!("reminder_get failed: {err}"),
        },
    }
}

/// Deletes one reminder; absent ids succeed.
///
/// The shell removes the matching geofence before calling this.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_delete(id: String) -> ReminderActionResponse {
    let id = id.trim().to_string();
    with_core(|core| delete_from(&core.runtime, &core.repository, id))
        .unwrap_or_else(|err| {
            ReminderActionResponse::failure(format!("reminder_delete failed: {err}"))
        })
}

/// Deletes every reminder.
///
/// The shell removes all geofences before calling this.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_clear() -> ReminderActionResponse {
    with_core(|core| clear_from(&core.runtime, &core.repository))
        .unwrap_or_else(|err| {
            ReminderActionResponse::failure(format!("reminders_clear failed: {err}"))
        })
}

/// Resolves triggering geofence ids into reminders to notify about.
///
/// # FFI contract
/// - Callable from a background isolate with no screen alive.
/// - Unknown ids are skipped; the response lists resolved reminders only.
#[flutter_rust_bridge::frb(sync)]
pub fn geofence_entered(triggering_ids: Vec<String>) -> ReminderListResponse {
    let resolved = with_core(|core| {
        let notifier = Arc::new(CollectingNotifier::default());
        let handler = GeofenceTransitionHandler::new(
            core.repository.clone(),
            notifier.clone(),
            AppScope::new(core.runtime.handle().clone()),
        );
        let event = GeofenceEvent {
            error_code: None,
            transition: GeofenceTransition::Enter,
            triggering_ids,
        };

        core.runtime.block_on(async {
            for job in handler.handle_event(event) {
                if let Err(err) = job.await {
                    warn!("event=ffi_geofence_entered module=ffi status=error error={err}");
                }
            }
        });
        notifier.take()
    });

    match resolved {
        Ok(reminders) => ReminderListResponse {
            ok: true,
            message: format!("Resolved {} reminder(s).", reminders.len()),
            items: reminders.into_iter().map(ReminderItem::from).collect(),
        },
        Err(err) => ReminderListResponse::failure(format!("geofence_entered failed: {err}")),
    }
}

/// Radius the shell should use when registering a reminder's geofence.
#[flutter_rust_bridge::frb(sync)]
pub fn geofence_radius_meters() -> f32 {
    with_core(|core| core.config.geofence_radius_meters)
        .unwrap_or(georemind_core::GEOFENCE_RADIUS_IN_METERS)
}

/// Notifier that hands resolved reminders back to the caller.
#[derive(Default)]
struct CollectingNotifier {
    resolved: Mutex<Vec<Reminder>>,
}

impl CollectingNotifier {
    fn take(&self) -> Vec<Reminder> {
        match self.resolved.lock() {
            Ok(mut resolved) => std::mem::take(&mut *resolved),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl ReminderNotifier for CollectingNotifier {
    async fn send_reminder_notification(&self, reminder: &Reminder) {
        match self.resolved.lock() {
            Ok(mut resolved) => resolved.push(reminder.clone()),
            Err(poisoned) => poisoned.into_inner().push(reminder.clone()),
        }
    }
}

fn save_into<S: ReminderStore + 'static>(
    runtime: &Runtime,
    repository: &RemindersLocalRepository<S>,
    reminder: Reminder,
) -> ReminderActionResponse {
    let id = reminder.id.clone();
    match runtime.block_on(repository.try_save_reminder(reminder)) {
        Ok(()) => ReminderActionResponse::success("Reminder Saved !", Some(id)),
        Err(err) => ReminderActionResponse::failure(format!("reminder_save failed: {err}")),
    }
}

fn delete_from<S: ReminderStore + 'static>(
    runtime: &Runtime,
    repository: &RemindersLocalRepository<S>,
    id: String,
) -> ReminderActionResponse {
    match runtime.block_on(repository.try_delete_reminder_by_id(&id)) {
        Ok(()) => ReminderActionResponse::success("Reminder deleted.", Some(id)),
        Err(err) => ReminderActionResponse::failure(format!("reminder_delete failed: {err}")),
    }
}

fn clear_from<S: ReminderStore + 'static>(
    runtime: &Runtime,
    repository: &RemindersLocalRepository<S>,
) -> ReminderActionResponse {
    match runtime.block_on(repository.try_delete_all_reminders()) {
        Ok(()) => ReminderActionResponse::success("Reminders cleared.", None),
        Err(err) => ReminderActionResponse::failure(format!("reminders_clear failed: {err}")),
    }
}

fn with_core<T>(f: impl FnOnce(&CoreContext) -> T) -> Result<T, String> {
    match CORE.get_or_init(build_core) {
        Ok(core) => Ok(f(core)),
        Err(err) => Err(err.clone()),
    }
}

fn build_core() -> Result<CoreContext, String> {
    let config = CoreConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        warn!("event=ffi_init module=ffi status=degraded error_code=logging_failed error={err}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("georemind-core")
        .enable_all()
        .build()
        .map_err(|err| format!("core runtime start failed: {err}"))?;
    let conn = open_db(&config.db_path).map_err(|err| format!("DB open failed: {err}"))?;
    let store = Arc::new(SqliteReminderStore::new(conn));
    let repository = Arc::new(RemindersLocalRepository::new(
        store,
        AppScope::new(runtime.handle().clone()),
    ));

    info!(
        "event=ffi_init module=ffi status=ok db_path={}",
        config.db_path.display()
    );
    Ok(CoreContext {
        runtime,
        repository,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        clear_from, core_version, delete_from, geofence_entered, geofence_radius_meters,
        init_logging, ping, reminder_delete, reminder_get, reminder_save, reminders_clear,
        reminders_list, save_into, ReminderItem,
    };
    use georemind_core::{
        AppScope, Reminder, ReminderStore, RemindersLocalRepository, StoreError, StoreResult,
    };
    use std::sync::{Arc, Mutex};
    use std::time::{SystemTime, UNIX_EPOCH};

    // All DB-backed tests share one process-wide database.
    static DB_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn save_then_get_returns_same_fields() {
        let _guard = DB_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        let id = unique_id("save-get");

        let saved = reminder_save(item(&id));
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.reminder_id.as_deref(), Some(id.as_str()));

        let loaded = reminder_get(id.clone());
        assert!(loaded.ok, "{}", loaded.message);
        assert_eq!(loaded.item, Some(item(&id)));
        assert!(reminders_list().items.iter().any(|r| r.id == id));
    }

    #[test]
    fn save_without_id_assigns_one() {
        let _guard = DB_LOCK.lock().unwrap_or_else(|p| p.into_inner());

        let saved = reminder_save(item(""));
        assert!(saved.ok, "{}", saved.message);
        let id = saved.reminder_id.expect("id should be assigned");
        assert!(!id.is_empty());
        assert!(reminder_get(id).ok);
    }

    #[test]
    fn save_rejects_missing_title() {
        let mut draft = item(&unique_id("no-title"));
        draft.title = None;

        let response = reminder_save(draft);
        assert!(!response.ok);
        assert_eq!(response.message, "Please enter title");
    }

    #[test]
    fn get_missing_reports_not_found() {
        let _guard = DB_LOCK.lock().unwrap_or_else(|p| p.into_inner());

        let response = reminder_get(unique_id("missing"));
        assert!(!response.ok);
        assert_eq!(response.item, None);
        assert_eq!(response.message, "Reminder not found!");
    }

    #[test]
    fn delete_and_clear_remove_rows() {
        let _guard = DB_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        let first = unique_id("delete");
        let second = unique_id("clear");
        assert!(reminder_save(item(&first)).ok);
        assert!(reminder_save(item(&second)).ok);

        assert!(reminder_delete(first.clone()).ok);
        assert!(!reminder_get(first).ok);
        assert!(reminder_delete(unique_id("absent")).ok);

        assert!(reminders_clear().ok);
        let listed = reminders_list();
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.is_empty());
        assert!(!reminder_get(second).ok);
    }

    #[test]
    fn geofence_entered_resolves_known_ids_only() {
        let _guard = DB_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        let id = unique_id("entered");
        assert!(reminder_save(item(&id)).ok);

        let response = geofence_entered(vec![id.clone(), unique_id("unknown")]);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.items, vec![item(&id)]);
    }

    /// Store that can be read but refuses every write.
    struct ReadOnlyStore;

    impl ReminderStore for ReadOnlyStore {
        fn get_all(&self) -> StoreResult<Vec<Reminder>> {
            Ok(Vec::new())
        }

        fn get_by_id(&self, _id: &str) -> StoreResult<Option<Reminder>> {
            Ok(None)
        }

        fn save(&self, _reminder: &Reminder) -> StoreResult<()> {
            Err(StoreError::InvalidData("attempt to write a readonly database".to_string()))
        }

        fn delete_by_id(&self, _id: &str) -> StoreResult<()> {
            Err(StoreError::InvalidData("attempt to write a readonly database".to_string()))
        }

        fn delete_all(&self) -> StoreResult<()> {
            Err(StoreError::InvalidData("attempt to write a readonly database".to_string()))
        }
    }

    #[test]
    fn failed_writes_are_reported_in_envelope() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap();
        let scope = AppScope::new(runtime.handle().clone());
        let repository = RemindersLocalRepository::new(Arc::new(ReadOnlyStore), scope);

        let saved = save_into(&runtime, &repository, Reminder::from(item("read-only")));
        assert!(!saved.ok);
        assert_eq!(saved.reminder_id, None);
        assert!(saved.message.starts_with("reminder_save failed:"), "{}", saved.message);
        assert!(saved.message.contains("readonly"), "{}", saved.message);

        let deleted = delete_from(&runtime, &repository, "read-only".to_string());
        assert!(!deleted.ok);
        assert!(deleted.message.starts_with("reminder_delete failed:"));

        let cleared = clear_from(&runtime, &repository);
        assert!(!cleared.ok);
        assert!(cleared.message.starts_with("reminders_clear failed:"));
    }

    #[test]
    fn geofence_radius_is_positive() {
        assert!(geofence_radius_meters() > 0.0);
    }

    fn item(id: &str) -> ReminderItem {
        ReminderItem {
            id: id.to_string(),
            title: Some("Buy stamps".to_string()),
            description: Some("Two books".to_string()),
            location: Some("Post office".to_string()),
            latitude: Some(37.4219),
            longitude: Some(-122.084),
        }
    }

    fn unique_id(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
