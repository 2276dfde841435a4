//! UI signals published by services.

use log::debug;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Screen transition requested by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    Back,
    ToSelectLocation,
    ToSaveReminder,
}

/// One-shot signal for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowLoading(bool),
    ShowSnackBar(String),
    ShowToast(String),
    ShowNoData(bool),
    Navigate(NavigationCommand),
}

/// Sending half handed to services.
///
/// Publishing never fails: once the UI side hangs up, events are dropped.
#[derive(Debug, Clone)]
pub struct UiEventSender {
    tx: UnboundedSender<UiEvent>,
}

impl UiEventSender {
    pub fn publish(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            debug!("event=ui_event module=service status=dropped reason=receiver_closed");
        }
    }
}

/// Creates a connected sender/receiver pair.
pub fn ui_event_channel() -> (UiEventSender, UnboundedReceiver<UiEvent>) {
    let (tx, rx) = unbounded_channel();
    (UiEventSender { tx }, rx)
}
