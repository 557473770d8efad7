//! Core value types: requests, actions, outcomes and settlement values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Identifier of a notification, unique and strictly increasing within a center
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn new(raw: u64) -> Self {
        NotificationId(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(NotificationKind::Success),
            "error" => Ok(NotificationKind::Error),
            "warning" => Ok(NotificationKind::Warning),
            "info" => Ok(NotificationKind::Info),
            other => Err(format!(
                "Unknown notification kind: {} (expected success, error, warning or info)",
                other
            )),
        }
    }
}

/// What selecting an action means for the settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Confirm,
    Cancel,
    Custom,
}

/// Visual hint for the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

/// Callback run when its action is chosen. A returned value is carried in the settlement.
pub type ActionCallback = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// A user-selectable choice attached to a notification
#[derive(Clone)]
pub struct Action {
    pub label: String,
    pub kind: ActionKind,
    pub variant: ActionVariant,
    pub callback: Option<ActionCallback>,
}

impl Action {
    pub fn new(label: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            variant: ActionVariant::default(),
            callback: None,
        }
    }

    pub fn confirm(label: impl Into<String>) -> Self {
        Self::new(label, ActionKind::Confirm)
    }

    pub fn cancel(label: impl Into<String>) -> Self {
        Self::new(label, ActionKind::Cancel).with_variant(ActionVariant::Secondary)
    }

    pub fn custom(label: impl Into<String>) -> Self {
        Self::new(label, ActionKind::Custom)
    }

    pub fn with_variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Runs once when the record settles with this action. To reach the center from
    /// here, capture a [`crate::center::WeakNotificationCenter`].
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub(crate) fn run_callback(&self) -> Option<String> {
        self.callback.as_ref().and_then(|cb| cb())
    }

    /// Callback-free description suitable for presentation and serialization
    pub fn descriptor(&self) -> ActionDescriptor {
        ActionDescriptor {
            label: self.label.clone(),
            kind: self.kind,
            variant: self.variant,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("variant", &self.variant)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor() == other.descriptor()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub label: String,
    pub kind: ActionKind,
    pub variant: ActionVariant,
}

/// Caller input for [`crate::NotificationCenter::enqueue`]
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    /// Base display duration; `None` uses the kind default
    pub duration: Option<Duration>,
    pub auto_close: bool,
    pub persistent: bool,
    pub actions: Vec<Action>,
}

impl NotificationRequest {
    /// Auto-closing toast with no actions
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            duration: None,
            auto_close: true,
            persistent: false,
            actions: Vec::new(),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    /// Persistent records ignore auto-close and only leave through an explicit close
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self.auto_close = false;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub(crate) fn schedules_auto_dismiss(&self) -> bool {
        self.auto_close && !self.persistent
    }
}

/// How a notification is being closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "index")]
pub enum Outcome {
    /// Auto-dismiss timer expired
    Timeout,
    /// Generic close without choosing an action
    Close,
    Confirm,
    Cancel,
    /// Index into the record's declared actions
    Action(usize),
}

/// Resolved choice carried by a settled notification
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Confirmed,
    Cancelled,
    Action(Action),
    /// An informational record left without a choice (timeout or close)
    Dismissed,
}

/// Successful settlement of a notification
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub id: NotificationId,
    pub choice: Choice,
    /// Value yielded by the chosen action's callback
    pub value: Option<String>,
}
