//! Timer scheduling for auto-dismiss and linger delays.
//!
//! The notification center never sleeps itself; it asks a [`Scheduler`] to run a task
//! after a delay and keeps the returned [`TimerHandle`] so it can cancel the task later.
//! [`TokioScheduler`] runs tasks on a tokio runtime. [`ManualScheduler`] keeps a virtual
//! clock that only moves when [`ManualScheduler::advance`] is called, which makes
//! lifecycle tests and simulations deterministic.

use crate::error::NoticeError;
use parking_lot::Mutex;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::trace;

/// Work scheduled to run once after a delay
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;
}

/// Handle to a scheduled task. Cancelling guarantees the task will not run.
#[derive(Debug)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl TimerHandle {
    /// Handle for a custom [`Scheduler`]; the scheduler must skip the task once `cancelled` is set
    pub fn new(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            cancelled,
            abort: None,
        }
    }

    fn with_abort(cancelled: Arc<AtomicBool>, abort: AbortHandle) -> Self {
        Self {
            cancelled,
            abort: Some(abort),
        }
    }

    pub fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(abort) = self.abort {
            abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Scheduler backed by `tokio::time::sleep` on a runtime handle
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on
    pub fn current() -> Result<Self, NoticeError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| NoticeError::NoRuntime)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if !flag.load(Ordering::SeqCst) {
                task();
            }
        });
        TimerHandle::with_abort(cancelled, join.abort_handle())
    }
}

struct ManualEntry {
    due: Duration,
    seq: u64,
    cancelled: Arc<AtomicBool>,
    task: TimerTask,
}

impl PartialEq for ManualEntry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for ManualEntry {}

impl Ord for ManualEntry {
    /// BinaryHeap is a max-heap; the earliest deadline (then earliest scheduled) must be Greater
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.due
            .cmp(&other.due)
            .then(self.seq.cmp(&other.seq))
            .reverse()
    }
}

impl PartialOrd for ManualEntry {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<ManualEntry>,
}

/// Virtual-clock scheduler. Time only moves through [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of scheduled tasks that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.state
            .lock()
            .pending
            .iter()
            .filter(|entry| !entry.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Deadline of the next live task, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state
            .lock()
            .pending
            .iter()
            .filter(|entry| !entry.cancelled.load(Ordering::SeqCst))
            .map(|entry| entry.due)
            .min()
    }

    /// Move the clock forward, running every task that falls due in order.
    ///
    /// Tasks scheduled by a running task also fire if they fall due within the window.
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now.saturating_add(by);
        let mut fired = 0;
        loop {
            // Lock is released before the task runs so it can schedule more work
            let entry = {
                let mut state = self.state.lock();
                match state.pending.peek() {
                    Some(next) if next.due <= target => {
                        let entry = state.pending.pop();
                        if let Some(ref e) = entry {
                            state.now = e.due;
                        }
                        entry
                    }
                    _ => None,
                }
            };
            let Some(entry) = entry else { break };
            if entry.cancelled.load(Ordering::SeqCst) {
                continue;
            }
            trace!(due_ms = entry.due.as_millis() as u64, "Manual timer fired");
            (entry.task)();
            fired += 1;
        }
        self.state.lock().now = target;
        fired
    }

    /// Advance until no live task remains. Persistent records never schedule work,
    /// so this terminates once every timed record has settled.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.next_deadline() {
            let now = self.now();
            fired += self.advance(deadline.saturating_sub(now));
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut state = self.state.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        let due = state.now.saturating_add(delay);
        state.pending.push(ManualEntry {
            due,
            seq,
            cancelled: cancelled.clone(),
            task,
        });
        TimerHandle::new(cancelled)
    }
}
