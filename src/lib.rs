//! Noticeboard: Non-blocking Notification Queue
//!
//! An in-memory queue of toasts and dialogs that replaces modal alert/confirm/prompt
//! interactions. Every request is queued, display time shrinks as the queue grows, and
//! each notification settles exactly one deferred result however it is closed.

pub mod center;
pub mod cli;
pub mod config;
pub mod deferred;
pub mod dialogs;
pub mod duration;
pub mod error;
pub mod events;
pub mod logging;
pub mod registry;
pub mod scheduler;
pub mod types;

pub use center::{CenterSettings, NotificationCenter, WeakNotificationCenter, DEFAULT_LINGER};
pub use deferred::Deferred;
pub use dialogs::Notifier;
pub use duration::{compute_duration, KindDurations};
pub use error::NoticeError;
pub use events::NotificationEvent;
pub use registry::{Phase, RecordView};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use types::{
    Action, ActionDescriptor, ActionKind, ActionVariant, Choice, NotificationId,
    NotificationKind, NotificationRequest, Outcome, Resolution,
};
