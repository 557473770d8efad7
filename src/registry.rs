//! Notification registry: the ordered set of live records.
//!
//! Insertion order is display order. Records are only touched through the
//! [`crate::center::NotificationCenter`]; presentation code reads [`RecordView`] snapshots.

use crate::error::NoticeError;
use crate::scheduler::TimerHandle;
use crate::types::{
    Action, ActionDescriptor, NotificationId, NotificationKind, NotificationRequest, Outcome,
    Resolution,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::oneshot;

pub(crate) type Settlement = Result<Resolution, NoticeError>;

/// Per-record lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Visible,
    /// Hidden and lingering until removal; carries how it was closed
    Closing(Outcome),
}

/// One-shot settlement for a single record.
///
/// `settle` takes `self`, so a handle can fire at most once.
#[derive(Debug)]
pub(crate) struct SettlementHandle {
    sender: oneshot::Sender<Settlement>,
}

impl SettlementHandle {
    pub(crate) fn new(sender: oneshot::Sender<Settlement>) -> Self {
        Self { sender }
    }

    /// Returns false when nobody holds the deferred result any more
    pub(crate) fn settle(self, settlement: Settlement) -> bool {
        self.sender.send(settlement).is_ok()
    }
}

/// A queued notification with its runtime state
#[derive(Debug)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    pub auto_close: bool,
    pub persistent: bool,
    pub actions: Vec<Action>,
    /// Duration after adaptive scaling
    pub effective_duration: Duration,
    pub(crate) phase: Phase,
    pub(crate) auto_dismiss: Option<TimerHandle>,
    pub(crate) settlement: SettlementHandle,
}

impl NotificationRecord {
    pub(crate) fn new(
        id: NotificationId,
        request: NotificationRequest,
        effective_duration: Duration,
        settlement: SettlementHandle,
    ) -> Self {
        Self {
            id,
            kind: request.kind,
            title: request.title,
            message: request.message,
            auto_close: request.auto_close,
            persistent: request.persistent,
            actions: request.actions,
            effective_duration,
            phase: Phase::Visible,
            auto_dismiss: None,
            settlement,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase == Phase::Visible
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> RecordView {
        RecordView {
            id: self.id,
            kind: self.kind,
            title: self.title.clone(),
            message: self.message.clone(),
            effective_duration_ms: u64::try_from(self.effective_duration.as_millis())
                .unwrap_or(u64::MAX),
            visible: self.is_visible(),
            auto_close: self.auto_close,
            persistent: self.persistent,
            actions: self.actions.iter().map(Action::descriptor).collect(),
        }
    }
}

/// Snapshot of a record for presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub effective_duration_ms: u64,
    pub visible: bool,
    pub auto_close: bool,
    pub persistent: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionDescriptor>,
}

/// Ordered, append-only collection of live records
#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<NotificationRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: NotificationRecord) {
        self.records.push(record);
    }

    pub fn get(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: NotificationId) -> Option<&mut NotificationRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Remove a record that has finished lingering, preserving the order of the rest.
    ///
    /// Visible records are left in place so a stray linger timer cannot skip the hide step.
    pub(crate) fn remove_closing(
        &mut self,
        id: NotificationId,
    ) -> Option<(NotificationRecord, Outcome)> {
        let index = self.records.iter().position(|r| r.id == id)?;
        match self.records[index].phase {
            Phase::Closing(outcome) => Some((self.records.remove(index), outcome)),
            Phase::Visible => None,
        }
    }

    /// Drain every record, leaving the registry empty
    pub(crate) fn drain(&mut self) -> Vec<NotificationRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotificationRecord> {
        self.records.iter()
    }

    pub fn views(&self) -> Vec<RecordView> {
        self.records.iter().map(NotificationRecord::view).collect()
    }
}
