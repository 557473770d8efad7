//! Notification center: the lifecycle controller.
//!
//! Every record moves through `Visible -> Closing -> Settled`:
//!
//! 1. [`NotificationCenter::enqueue`] appends a `Visible` record and, for auto-closing
//!    records, schedules an auto-dismiss timer.
//! 2. [`NotificationCenter::close_with`] (reached from a timer, an explicit close, or an
//!    action) cancels the auto-dismiss timer, flips the record to `Closing` and schedules
//!    the linger delay.
//! 3. When the linger delay fires the record is removed and its settlement handle is
//!    consumed. The record no longer exists, so it cannot settle again.
//!
//! A close for an id that is absent or already closing is a no-op, which makes stale
//! timers and repeated clicks harmless.

use crate::config::{DialogConfig, NoticeboardConfig, QueueConfig};
use crate::deferred::Deferred;
use crate::duration::{compute_duration, KindDurations};
use crate::error::NoticeError;
use crate::events::{EventBus, NotificationEvent};
use crate::registry::{NotificationRecord, Phase, RecordView, Registry, SettlementHandle};
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::types::{ActionKind, Choice, NotificationId, NotificationRequest, Outcome, Resolution};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Default delay between hiding a record and removing it
pub const DEFAULT_LINGER: Duration = Duration::from_millis(300);

/// Timing settings for a center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterSettings {
    pub linger: Duration,
    pub durations: KindDurations,
}

impl Default for CenterSettings {
    fn default() -> Self {
        Self {
            linger: DEFAULT_LINGER,
            durations: KindDurations::default(),
        }
    }
}

impl From<&QueueConfig> for CenterSettings {
    fn from(config: &QueueConfig) -> Self {
        Self {
            linger: Duration::from_millis(config.linger_ms),
            durations: config.durations.to_kind_durations(),
        }
    }
}

struct CenterInner {
    registry: Mutex<Registry>,
    next_id: AtomicU64,
    scheduler: Arc<dyn Scheduler>,
    settings: CenterSettings,
    dialogs: DialogConfig,
    events: EventBus,
}

/// Owned notification queue service.
///
/// Cloning yields another handle to the same queue. Independent centers share nothing.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<CenterInner>,
}

/// Non-owning handle from [`NotificationCenter::downgrade`]
#[derive(Clone)]
pub struct WeakNotificationCenter {
    inner: Weak<CenterInner>,
}

impl WeakNotificationCenter {
    /// `None` once every strong handle is gone
    pub fn upgrade(&self) -> Option<NotificationCenter> {
        self.inner
            .upgrade()
            .map(|inner| NotificationCenter { inner })
    }
}

impl NotificationCenter {
    /// Create a center with default timings
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_settings(scheduler, CenterSettings::default())
    }

    pub fn with_settings(scheduler: Arc<dyn Scheduler>, settings: CenterSettings) -> Self {
        Self::build(scheduler, settings, DialogConfig::default())
    }

    /// Create a center from loaded configuration
    pub fn from_config(
        scheduler: Arc<dyn Scheduler>,
        config: &NoticeboardConfig,
    ) -> Self {
        Self::build(
            scheduler,
            CenterSettings::from(&config.queue),
            config.dialogs.clone(),
        )
    }

    /// Create a center whose timers run on the current tokio runtime
    pub fn on_current_runtime() -> Result<Self, NoticeError> {
        Ok(Self::new(Arc::new(TokioScheduler::current()?)))
    }

    fn build(
        scheduler: Arc<dyn Scheduler>,
        settings: CenterSettings,
        dialogs: DialogConfig,
    ) -> Self {
        Self {
            inner: Arc::new(CenterInner {
                registry: Mutex::new(Registry::new()),
                next_id: AtomicU64::new(1),
                scheduler,
                settings,
                dialogs,
                events: EventBus::new(),
            }),
        }
    }

    pub fn settings(&self) -> CenterSettings {
        self.inner.settings
    }

    pub(crate) fn dialog_config(&self) -> &DialogConfig {
        &self.inner.dialogs
    }

    /// Queue a notification. Never blocks and never refuses a request.
    pub fn enqueue(&self, request: NotificationRequest) -> (NotificationId, Deferred) {
        let (tx, rx) = oneshot::channel();
        let id = NotificationId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let base = request
            .duration
            .unwrap_or_else(|| self.inner.settings.durations.for_kind(request.kind));
        let schedules_auto_dismiss = request.schedules_auto_dismiss();
        let kind = request.kind;

        let (depth, effective) = {
            let mut registry = self.inner.registry.lock();
            // Depth is sampled before insertion and never recomputed
            let depth = registry.len();
            let effective = compute_duration(base, depth);
            let mut record =
                NotificationRecord::new(id, request, effective, SettlementHandle::new(tx));
            // Schedule the timeout close
            if schedules_auto_dismiss {
                let weak = self.downgrade();
                record.auto_dismiss = Some(self.inner.scheduler.schedule(
                    effective,
                    Box::new(move || {
                        if let Some(center) = weak.upgrade() {
                            center.close_with(id, Outcome::Timeout);
                        }
                    }),
                ));
            }
            // Shown goes out under the lock: before any Hidden for this id, in registry order
            self.inner
                .events
                .emit(NotificationEvent::Shown { record: record.view() });
            registry.push(record);
            (depth, effective)
        };

        debug!(
            id = %id,
            kind = %kind,
            depth = depth,
            base_ms = base.as_millis() as u64,
            effective_ms = effective.as_millis() as u64,
            auto_dismiss = schedules_auto_dismiss,
            "Enqueued notification"
        );

        (id, Deferred::new(id, rx))
    }

    /// Generic close without a choice
    pub fn close(&self, id: NotificationId) -> bool {
        self.close_with(id, Outcome::Close)
    }

    pub fn confirm(&self, id: NotificationId) -> bool {
        self.close_with(id, Outcome::Confirm)
    }

    pub fn cancel(&self, id: NotificationId) -> bool {
        self.close_with(id, Outcome::Cancel)
    }

    /// Choose the action at `index` in the record's declared actions
    pub fn select_action(&self, id: NotificationId, index: usize) -> bool {
        self.close_with(id, Outcome::Action(index))
    }

    /// Start closing a record. Returns false when the call had no effect.
    pub fn close_with(&self, id: NotificationId, outcome: Outcome) -> bool {
        {
            let mut registry = self.inner.registry.lock();
            let Some(record) = registry.get_mut(id) else {
                debug!(id = %id, outcome = ?outcome, "Close ignored for unknown notification");
                return false;
            };
            if !record.is_visible() {
                debug!(id = %id, outcome = ?outcome, "Close ignored, notification already closing");
                return false;
            }
            if let Outcome::Action(index) = outcome {
                if index >= record.actions.len() {
                    warn!(
                        id = %id,
                        index = index,
                        actions = record.actions.len(),
                        "Close ignored, action index out of range"
                    );
                    return false;
                }
            }

            // Cancel the pending auto-dismiss and start lingering
            if let Some(timer) = record.auto_dismiss.take() {
                timer.cancel();
            }
            record.phase = Phase::Closing(outcome);

            let weak = self.downgrade();
            // The linger timer is never cancelled, so its handle is not kept
            let _linger = self.inner.scheduler.schedule(
                self.inner.settings.linger,
                Box::new(move || {
                    if let Some(center) = weak.upgrade() {
                        center.finish(id);
                    }
                }),
            );

            // Removal takes this lock too, so Hidden always precedes Removed
            self.inner
                .events
                .emit(NotificationEvent::Hidden { id, outcome });
        }

        debug!(id = %id, outcome = ?outcome, "Notification hidden");
        true
    }

    /// Remove a lingering record and settle it
    fn finish(&self, id: NotificationId) {
        let removed = self.inner.registry.lock().remove_closing(id);
        let Some((record, outcome)) = removed else {
            return;
        };

        // Callbacks run outside the registry lock so they may enqueue or close freely
        let settlement = resolve(&record, outcome);
        let is_rejection = settlement.is_err();
        let delivered = record.settlement.settle(settlement);

        info!(
            id = %id,
            outcome = ?outcome,
            rejected = is_rejection,
            delivered = delivered,
            "Notification settled"
        );
        self.inner.events.emit(NotificationEvent::Removed {
            id,
            outcome,
            delivered,
        });
    }

    /// Handle that does not keep the center alive.
    ///
    /// Action callbacks that reach back into the center should capture this rather than
    /// a clone: a record owning a strong handle would keep its own center from dropping.
    pub fn downgrade(&self) -> WeakNotificationCenter {
        WeakNotificationCenter {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Ordered snapshot of the registry for rendering
    pub fn snapshot(&self) -> Vec<RecordView> {
        self.inner.registry.lock().views()
    }

    pub fn get(&self, id: NotificationId) -> Option<RecordView> {
        self.inner.registry.lock().get(id).map(NotificationRecord::view)
    }

    pub fn len(&self) -> usize {
        self.inner.registry.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.registry.lock().is_empty()
    }

    /// Receive lifecycle events from now on
    pub fn subscribe(&self) -> Receiver<NotificationEvent> {
        self.inner.events.subscribe()
    }
}

impl Drop for CenterInner {
    fn drop(&mut self) {
        let records = self.registry.get_mut().drain();
        if !records.is_empty() {
            debug!(pending = records.len(), "Notification center dropped with pending records");
        }
        for record in records {
            if let Some(timer) = record.auto_dismiss {
                timer.cancel();
            }
            let id = record.id;
            record.settlement.settle(Err(NoticeError::Abandoned { id }));
        }
    }
}

/// Map a closing outcome to the record's settlement, running the chosen callback
fn resolve(record: &NotificationRecord, outcome: Outcome) -> Result<Resolution, NoticeError> {
    let id = record.id;
    let resolution = |choice: Choice, value: Option<String>| Resolution { id, choice, value };

    match outcome {
        Outcome::Timeout | Outcome::Close => {
            if record.actions.is_empty() {
                Ok(resolution(Choice::Dismissed, None))
            } else {
                Err(NoticeError::DismissedWithoutChoice { id })
            }
        }
        Outcome::Confirm | Outcome::Cancel => {
            let (kind, choice) = if outcome == Outcome::Confirm {
                (ActionKind::Confirm, Choice::Confirmed)
            } else {
                (ActionKind::Cancel, Choice::Cancelled)
            };
            let value = record
                .actions
                .iter()
                .find(|action| action.kind == kind)
                .and_then(|action| action.run_callback());
            Ok(resolution(choice, value))
        }
        Outcome::Action(index) => match record.actions.get(index) {
            Some(action) => {
                let value = action.run_callback();
                let choice = match action.kind {
                    ActionKind::Confirm => Choice::Confirmed,
                    ActionKind::Cancel => Choice::Cancelled,
                    ActionKind::Custom => Choice::Action(action.clone()),
                };
                Ok(resolution(choice, value))
            }
            None => Err(NoticeError::DismissedWithoutChoice { id }),
        },
    }
}
