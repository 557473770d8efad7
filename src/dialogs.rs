//! Convenience API: toast helpers and non-blocking alert/confirm/prompt dialogs.
//!
//! Dialogs are persistent records with declared actions; they wait for the presentation
//! layer to call `confirm`, `cancel`, `select_action` or `close` on the center.
//! A [`Notifier`] is a cheap handle that can be handed to any code that needs to talk
//! to the user.

use crate::center::NotificationCenter;
use crate::deferred::Deferred;
use crate::error::NoticeError;
use crate::registry::Settlement;
use crate::types::{Action, Choice, NotificationKind, NotificationRequest};
use std::time::Duration;

fn to_unit(settlement: Settlement) -> Result<(), NoticeError> {
    settlement.map(|_| ())
}

fn to_bool(settlement: Settlement) -> Result<bool, NoticeError> {
    settlement.map(|resolution| resolution.choice == Choice::Confirmed)
}

fn to_prompt_value(settlement: Settlement) -> Result<Option<String>, NoticeError> {
    match settlement {
        Ok(resolution) if resolution.choice == Choice::Confirmed => Ok(resolution.value),
        Ok(_) => Ok(None),
        Err(NoticeError::DismissedWithoutChoice { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Caller-facing helpers on top of a [`NotificationCenter`]
#[derive(Clone)]
pub struct Notifier {
    center: NotificationCenter,
}

impl NotificationCenter {
    pub fn notifier(&self) -> Notifier {
        Notifier::new(self.clone())
    }
}

impl Notifier {
    pub fn new(center: NotificationCenter) -> Self {
        Self { center }
    }

    pub fn center(&self) -> &NotificationCenter {
        &self.center
    }

    /// Acknowledge-only dialog. Resolves once confirmed; rejects on a generic close.
    pub fn alert(&self, message: &str, title: Option<&str>) -> Deferred<()> {
        let dialogs = self.center.dialog_config();
        let request = NotificationRequest::info(title.unwrap_or(&dialogs.alert_title))
            .message(message)
            .persistent()
            .action(Action::confirm(&dialogs.ok_label));
        let (_, deferred) = self.center.enqueue(request);
        deferred.map_settlement(to_unit)
    }

    /// Yes/no dialog resolving to the chosen boolean
    pub fn confirm(&self, message: &str, title: Option<&str>) -> Deferred<bool> {
        let dialogs = self.center.dialog_config();
        let request = NotificationRequest::warning(title.unwrap_or(&dialogs.confirm_title))
            .message(message)
            .persistent()
            .action(Action::cancel(&dialogs.cancel_label))
            .action(Action::confirm(&dialogs.ok_label));
        let (_, deferred) = self.center.enqueue(request);
        deferred.map_settlement(to_bool)
    }

    /// Input dialog. Confirm yields `default_value` (an empty default yields `None`);
    /// cancel and generic close yield `None`.
    pub fn prompt(
        &self,
        message: &str,
        default_value: &str,
        title: Option<&str>,
    ) -> Deferred<Option<String>> {
        let dialogs = self.center.dialog_config();
        let value = default_value.to_string();
        let request = NotificationRequest::info(title.unwrap_or(&dialogs.prompt_title))
            .message(message)
            .persistent()
            .action(Action::cancel(&dialogs.cancel_label))
            .action(
                Action::confirm(&dialogs.ok_label)
                    .with_callback(move || (!value.is_empty()).then(|| value.clone())),
            );
        let (_, deferred) = self.center.enqueue(request);
        deferred.map_settlement(to_prompt_value)
    }

    pub fn success(&self, title: &str, message: Option<&str>, duration: Option<Duration>) -> Deferred {
        self.toast(NotificationKind::Success, title, message, duration)
    }

    pub fn error(&self, title: &str, message: Option<&str>, duration: Option<Duration>) -> Deferred {
        self.toast(NotificationKind::Error, title, message, duration)
    }

    pub fn warning(&self, title: &str, message: Option<&str>, duration: Option<Duration>) -> Deferred {
        self.toast(NotificationKind::Warning, title, message, duration)
    }

    pub fn info(&self, title: &str, message: Option<&str>, duration: Option<Duration>) -> Deferred {
        self.toast(NotificationKind::Info, title, message, duration)
    }

    fn toast(
        &self,
        kind: NotificationKind,
        title: &str,
        message: Option<&str>,
        duration: Option<Duration>,
    ) -> Deferred {
        let mut request = NotificationRequest::new(kind, title);
        request.message = message.map(str::to_string);
        request.duration = duration;
        self.center.enqueue(request).1
    }
}
