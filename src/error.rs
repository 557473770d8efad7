//! Error types for the notification queue.

use crate::types::NotificationId;
use thiserror::Error;

/// Errors surfaced by the notification center and its ambient layers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoticeError {
    /// A dialog that declares actions was closed without any of them being chosen.
    #[error("Notification {id} dismissed without choice")]
    DismissedWithoutChoice { id: NotificationId },

    /// The owning center was dropped while the record was still pending.
    #[error("Notification {id} abandoned before it settled")]
    Abandoned { id: NotificationId },

    #[error("No tokio runtime available for the notification scheduler")]
    NoRuntime,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NoticeError {
    /// True when the error is the ordinary "closed without choosing" rejection.
    pub fn is_dismissal(&self) -> bool {
        matches!(self, NoticeError::DismissedWithoutChoice { .. })
    }
}

impl From<config::ConfigError> for NoticeError {
    fn from(err: config::ConfigError) -> Self {
        NoticeError::Config(err.to_string())
    }
}
