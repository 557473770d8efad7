//! In-process lifecycle event stream for presentation layers.

use crate::registry::RecordView;
use crate::types::{NotificationId, Outcome};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// Appended to the registry and visible
    Shown { record: RecordView },
    /// Visibility flipped to false; exit presentation may start
    Hidden { id: NotificationId, outcome: Outcome },
    /// Removed from the registry and settled
    Removed {
        id: NotificationId,
        outcome: Outcome,
        /// False when no caller was holding the deferred result
        delivered: bool,
    },
}

impl NotificationEvent {
    pub fn id(&self) -> NotificationId {
        match self {
            NotificationEvent::Shown { record } => record.id,
            NotificationEvent::Hidden { id, .. } | NotificationEvent::Removed { id, .. } => *id,
        }
    }
}

/// Fan-out of lifecycle events to any number of subscribers
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<NotificationEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<NotificationEvent> {
        let (sender, receiver) = channel();
        self.subscribers.lock().push(sender);
        receiver
    }

    /// Best effort: subscribers whose receiver is gone are dropped silently
    pub fn emit(&self, event: NotificationEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
