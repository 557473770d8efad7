//! Integration tests for the convenience API
//!
//! Tests cover:
//! - confirm / prompt / alert settlement per answer
//! - Toast default durations by kind
//! - Dialog titles and labels from configuration

use super::test_utils::{manual_center, ms};
use noticeboard::config::ConfigLoader;
use noticeboard::{
    ActionKind, ManualScheduler, NoticeError, NotificationCenter, NotificationKind,
};
use std::sync::Arc;

#[test]
fn test_confirm_resolves_true_on_confirm() {
    let (center, scheduler) = manual_center();
    let mut answer = center.notifier().confirm("x", None);
    center.confirm(answer.id());
    scheduler.run_until_idle();
    assert_eq!(answer.try_take(), Some(Ok(true)));
}

#[test]
fn test_confirm_resolves_false_on_cancel() {
    let (center, scheduler) = manual_center();
    let mut answer = center.notifier().confirm("x", None);
    center.cancel(answer.id());
    scheduler.run_until_idle();
    assert_eq!(answer.try_take(), Some(Ok(false)));
}

#[test]
fn test_confirm_selected_by_action_index() {
    let (center, scheduler) = manual_center();
    let mut cancelled = center.notifier().confirm("x", None);
    let mut confirmed = center.notifier().confirm("y", None);
    center.select_action(cancelled.id(), 0);
    center.select_action(confirmed.id(), 1);
    scheduler.run_until_idle();
    assert_eq!(cancelled.try_take(), Some(Ok(false)));
    assert_eq!(confirmed.try_take(), Some(Ok(true)));
}

#[test]
fn test_confirm_rejects_on_generic_close() {
    let (center, scheduler) = manual_center();
    let mut answer = center.notifier().confirm("x", None);
    let id = answer.id();
    center.close(id);
    scheduler.run_until_idle();
    let err = answer.try_take().unwrap().unwrap_err();
    assert_eq!(err, NoticeError::DismissedWithoutChoice { id });
    assert!(err.is_dismissal());
}

#[test]
fn test_prompt_answers() {
    let (center, scheduler) = manual_center();
    let notify = center.notifier();
    let mut confirmed = notify.prompt("x", "d", None);
    let mut cancelled = notify.prompt("x", "d", None);
    let mut closed = notify.prompt("x", "d", None);

    center.confirm(confirmed.id());
    center.cancel(cancelled.id());
    center.close(closed.id());
    scheduler.run_until_idle();

    assert_eq!(confirmed.try_take(), Some(Ok(Some("d".to_string()))));
    assert_eq!(cancelled.try_take(), Some(Ok(None)));
    assert_eq!(closed.try_take(), Some(Ok(None)));
}

#[test]
fn test_alert_rejects_on_generic_close() {
    let (center, scheduler) = manual_center();
    let mut ack = center.notifier().alert("Read me", None);
    let view = center.get(ack.id()).unwrap();
    assert_eq!(view.kind, NotificationKind::Info);
    assert_eq!(view.actions.len(), 1);
    assert_eq!(view.actions[0].kind, ActionKind::Confirm);

    center.close(ack.id());
    scheduler.run_until_idle();
    assert!(matches!(
        ack.try_take(),
        Some(Err(NoticeError::DismissedWithoutChoice { .. }))
    ));
}

#[test]
fn test_dialogs_wait_for_user() {
    let (center, scheduler) = manual_center();
    let notify = center.notifier();
    let mut a = notify.alert("a", None);
    let mut b = notify.confirm("b", None);
    let mut c = notify.prompt("c", "v", None);
    scheduler.advance(ms(600_000));
    assert!(a.try_take().is_none());
    assert!(b.try_take().is_none());
    assert!(c.try_take().is_none());
    assert_eq!(center.len(), 3);
}

#[test]
fn test_toast_default_durations() {
    // A fresh center per kind keeps the queue depth at zero
    let cases = [
        (NotificationKind::Success, 3000),
        (NotificationKind::Error, 5000),
        (NotificationKind::Warning, 4000),
        (NotificationKind::Info, 3000),
    ];
    for (kind, expected) in cases {
        let (center, _scheduler) = manual_center();
        let notify = center.notifier();
        let deferred = match kind {
            NotificationKind::Success => notify.success("t", None, None),
            NotificationKind::Error => notify.error("t", None, None),
            NotificationKind::Warning => notify.warning("t", None, None),
            NotificationKind::Info => notify.info("t", None, None),
        };
        let view = center.get(deferred.id()).unwrap();
        assert_eq!(view.kind, kind);
        assert_eq!(view.effective_duration_ms, expected);
        assert!(view.auto_close);
        assert!(!view.persistent);
    }
}

#[test]
fn test_toasts_always_resolve() {
    let (center, scheduler) = manual_center();
    let notify = center.notifier();
    let mut timed_out = notify.success("saved", None, None);
    let mut closed = notify.error("failed", Some("network down"), None);
    center.close(closed.id());
    scheduler.run_until_idle();

    assert!(timed_out.try_take().unwrap().is_ok());
    assert!(closed.try_take().unwrap().is_ok());
}

#[test]
fn test_toast_burst_shrinks_durations() {
    let (center, _scheduler) = manual_center();
    let notify = center.notifier();
    let durations: Vec<u64> = (0..7)
        .map(|i| {
            let deferred = notify.error(&format!("e{}", i), None, None);
            center.get(deferred.id()).unwrap().effective_duration_ms
        })
        .collect();
    assert_eq!(durations, vec![5000, 5000, 3500, 3500, 2500, 2500, 1500]);
}

#[test]
fn test_dialog_text_from_config() {
    let config = ConfigLoader::load_from_str(
        r#"
[dialogs]
confirm_title = "Please confirm"
ok_label = "Yes"
cancel_label = "No"
"#,
    )
    .unwrap();
    let scheduler = ManualScheduler::new();
    let center = NotificationCenter::from_config(Arc::new(scheduler.clone()), &config);

    let answer = center.notifier().confirm("Continue?", None);
    let view = center.get(answer.id()).unwrap();
    assert_eq!(view.title, "Please confirm");
    assert_eq!(view.message.as_deref(), Some("Continue?"));
    let labels: Vec<&str> = view.actions.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["No", "Yes"]);
}
