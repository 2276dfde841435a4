mod support;

use georemind_core::db::open_db_in_memory;
use georemind_core::{
    notify_for_request, AppScope, GeofenceEvent, GeofenceTransition, GeofenceTransitionHandler,
    ReminderDataSource, RemindersLocalRepository, SqliteReminderStore, WorkOutcome,
};
use std::sync::Arc;
use support::{reminder, FakeReminderDataSource, RecordingNotifier};

fn handler(
    data_source: Arc<dyn ReminderDataSource>,
) -> (GeofenceTransitionHandler, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let handler = GeofenceTransitionHandler::new(
        data_source,
        notifier.clone(),
        AppScope::current().expect("inside runtime"),
    );
    (handler, notifier)
}

fn enter(ids: &[&str]) -> GeofenceEvent {
    GeofenceEvent {
        error_code: None,
        transition: GeofenceTransition::Enter,
        triggering_ids: ids.iter().map(|id| id.to_string()).collect(),
    }
}

#[tokio::test]
async fn enter_event_notifies_each_known_reminder() {
    let data_source = Arc::new(FakeReminderDataSource::with(vec![
        reminder("home", 1.0, 1.0),
        reminder("work", 2.0, 2.0),
    ]));
    let (handler, notifier) = handler(data_source);

    let jobs = handler.handle_event(enter(&["home", "work", "gone"]));
    let mut outcomes = Vec::new();
    for job in jobs {
        outcomes.push(job.await.unwrap());
    }

    assert_eq!(
        outcomes,
        vec![WorkOutcome::Success, WorkOutcome::Success, WorkOutcome::Failure]
    );
    let mut shown: Vec<String> = notifier
        .shown
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.id.clone())
        .collect();
    shown.sort();
    assert_eq!(shown, vec!["home", "work"]);
}

#[tokio::test]
async fn delivery_with_error_code_launches_nothing() {
    let data_source = Arc::new(FakeReminderDataSource::with(vec![reminder("home", 1.0, 1.0)]));
    let (handler, notifier) = handler(data_source);

    let mut event = enter(&["home"]);
    event.error_code = Some(1000);

    assert!(handler.handle_event(event).is_empty());
    assert!(notifier.shown.lock().unwrap().is_empty());
}

#[tokio::test]
async fn exit_transition_is_ignored() {
    let data_source = Arc::new(FakeReminderDataSource::with(vec![reminder("home", 1.0, 1.0)]));
    let (handler, _) = handler(data_source);

    let mut event = enter(&["home"]);
    event.transition = GeofenceTransition::Exit;

    assert!(handler.handle_event(event).is_empty());
}

#[tokio::test]
async fn empty_request_id_fails_without_lookup() {
    let data_source = FakeReminderDataSource::default();
    data_source.set_should_return_error(true);
    let notifier = RecordingNotifier::default();

    let outcome = notify_for_request(&data_source, &notifier, "").await;

    assert_eq!(outcome, WorkOutcome::Failure);
}

#[tokio::test]
async fn data_source_error_fails_job() {
    let data_source = FakeReminderDataSource::with(vec![reminder("home", 1.0, 1.0)]);
    data_source.set_should_return_error(true);
    let notifier = RecordingNotifier::default();

    assert_eq!(
        notify_for_request(&data_source, &notifier, "home").await,
        WorkOutcome::Failure
    );
    assert!(notifier.shown.lock().unwrap().is_empty());
}

#[tokio::test]
async fn resolves_against_sqlite_repository() {
    let store = Arc::new(SqliteReminderStore::new(open_db_in_memory().unwrap()));
    let scope = AppScope::current().unwrap();
    let repository = Arc::new(RemindersLocalRepository::new(store, scope));
    let saved = reminder("cafe", 48.85, 2.35);
    repository.save_reminder(saved.clone()).await;
    let (handler, notifier) = handler(repository);

    let outcome = handler.enqueue("cafe".to_string()).await.unwrap();

    assert_eq!(outcome, WorkOutcome::Success);
    assert_eq!(*notifier.shown.lock().unwrap(), vec![saved]);
}
