//! Integration tests for the record lifecycle
//!
//! Tests cover:
//! - Id allocation
//! - Linger window and removal
//! - Idempotent close and exactly-once settlement
//! - Persistent records and auto-dismiss
//! - Event stream ordering

use super::test_utils::{manual_center, ms, ThreadScheduler};
use noticeboard::{
    Action, CenterSettings, Choice, NoticeError, NotificationCenter, NotificationEvent,
    NotificationId, NotificationRequest, Outcome,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_successive_ids_are_unique_and_increasing() {
    let (center, _scheduler) = manual_center();
    let mut previous: Option<NotificationId> = None;
    for i in 0..20 {
        let (id, _deferred) = center.enqueue(NotificationRequest::info(format!("n{}", i)));
        if let Some(prev) = previous {
            assert!(id > prev);
        }
        previous = Some(id);
    }
}

#[test]
fn test_ids_never_reused_after_removal() {
    let (center, scheduler) = manual_center();
    let (first, _) = center.enqueue(NotificationRequest::info("first"));
    scheduler.run_until_idle();
    assert!(center.is_empty());

    let (second, _) = center.enqueue(NotificationRequest::info("second"));
    assert!(second > first);
}

#[test]
fn test_record_lingers_hidden_then_disappears() {
    let (center, scheduler) = manual_center();
    let (id, mut deferred) = center.enqueue(NotificationRequest::info("bye").persistent());

    assert!(center.close(id));
    let view = center.get(id).unwrap();
    assert!(!view.visible);

    scheduler.advance(ms(299));
    assert!(center.get(id).is_some());
    assert!(deferred.try_take().is_none());

    scheduler.advance(ms(1));
    assert!(center.get(id).is_none());
    assert!(!center.close(id));
    assert!(!center.confirm(id));
    assert_eq!(deferred.try_take().unwrap().unwrap().choice, Choice::Dismissed);
}

#[test]
fn test_repeated_close_settles_once() {
    let (center, scheduler) = manual_center();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let (id, mut deferred) = center.enqueue(
        NotificationRequest::warning("Retry?")
            .persistent()
            .action(Action::confirm("Retry").with_callback(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            })),
    );
    let events = center.subscribe();

    assert!(center.confirm(id));
    for _ in 0..5 {
        assert!(!center.confirm(id));
        assert!(!center.close(id));
    }
    scheduler.run_until_idle();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(deferred.try_take().unwrap().unwrap().choice, Choice::Confirmed);
    let removals = events
        .try_iter()
        .filter(|e| matches!(e, NotificationEvent::Removed { .. }))
        .count();
    assert_eq!(removals, 1);
}

#[test]
fn test_close_racing_timeout_keeps_first_outcome() {
    let (center, scheduler) = manual_center();
    let (id, mut deferred) = center.enqueue(
        NotificationRequest::info("update")
            .duration(ms(1000))
            .action(Action::custom("Details")),
    );

    scheduler.advance(ms(999));
    assert!(center.select_action(id, 0));
    // The auto-dismiss deadline passes while the record lingers
    scheduler.advance(ms(1));
    assert!(center.get(id).is_some());
    scheduler.run_until_idle();

    let resolution = deferred.try_take().unwrap().unwrap();
    assert!(matches!(resolution.choice, Choice::Action(ref a) if a.label == "Details"));
}

#[test]
fn test_timed_out_dialog_rejects() {
    let (center, scheduler) = manual_center();
    let (id, mut deferred) = center.enqueue(
        NotificationRequest::warning("Undo delete?")
            .duration(ms(4000))
            .action(Action::custom("Undo")),
    );
    scheduler.run_until_idle();
    assert_eq!(
        deferred.try_take().unwrap().unwrap_err(),
        NoticeError::DismissedWithoutChoice { id }
    );
}

#[test]
fn test_persistent_records_survive_any_wait() {
    let (center, scheduler) = manual_center();
    let (persistent, _p) = center.enqueue(NotificationRequest::error("Fatal").persistent());
    let (toast, _t) = center.enqueue(NotificationRequest::error("Transient"));

    scheduler.advance(std::time::Duration::from_secs(24 * 3600));
    assert!(center.get(persistent).unwrap().visible);
    assert!(center.get(toast).is_none());
}

#[test]
fn test_auto_close_disabled_keeps_record() {
    let (center, scheduler) = manual_center();
    let (id, _deferred) = center.enqueue(NotificationRequest::info("sticky").auto_close(false));
    assert_eq!(scheduler.pending(), 0);
    scheduler.advance(ms(60_000));
    assert!(center.get(id).is_some());
}

#[test]
fn test_snapshot_preserves_insertion_order_through_removals() {
    let (center, scheduler) = manual_center();
    let (a, _) = center.enqueue(NotificationRequest::info("a").persistent());
    let (b, _) = center.enqueue(NotificationRequest::info("b").persistent());
    let (c, _) = center.enqueue(NotificationRequest::info("c").persistent());

    center.close(b);
    scheduler.run_until_idle();
    let (d, _) = center.enqueue(NotificationRequest::info("d").persistent());

    let order: Vec<NotificationId> = center.snapshot().iter().map(|v| v.id).collect();
    assert_eq!(order, vec![a, c, d]);
}

#[test]
fn test_depth_is_not_resampled_for_shown_records() {
    let (center, _scheduler) = manual_center();
    let (first, _) = center.enqueue(NotificationRequest::error("one"));
    for i in 0..6 {
        let _ = center.enqueue(NotificationRequest::error(format!("more {}", i)));
    }
    assert_eq!(center.get(first).unwrap().effective_duration_ms, 5000);
}

#[test]
fn test_event_stream_reports_every_transition() {
    let (center, scheduler) = manual_center();
    let events = center.subscribe();
    let (id, _deferred) = center.enqueue(NotificationRequest::success("done"));
    scheduler.run_until_idle();

    let observed: Vec<NotificationEvent> = events.try_iter().collect();
    assert_eq!(observed.len(), 3);
    assert!(matches!(&observed[0], NotificationEvent::Shown { record } if record.id == id));
    assert_eq!(
        observed[1],
        NotificationEvent::Hidden {
            id,
            outcome: Outcome::Timeout
        }
    );
    assert_eq!(
        observed[2],
        NotificationEvent::Removed {
            id,
            outcome: Outcome::Timeout,
            delivered: true
        }
    );
}

#[test]
fn test_callback_may_reenter_center() {
    let (center, scheduler) = manual_center();
    let handle = center.downgrade();
    let (id, _deferred) = center.enqueue(
        NotificationRequest::info("chain")
            .persistent()
            .action(Action::custom("Next").with_callback(move || {
                if let Some(center) = handle.upgrade() {
                    let _ = center.enqueue(NotificationRequest::success("chained"));
                }
                None
            })),
    );
    center.select_action(id, 0);
    scheduler.advance(ms(300));

    let titles: Vec<String> = center.snapshot().into_iter().map(|v| v.title).collect();
    assert_eq!(titles, vec!["chained".to_string()]);
}

#[test]
fn test_weak_callback_handle_does_not_keep_center_alive() {
    let (center, _scheduler) = manual_center();
    let handle = center.downgrade();
    let (id, mut deferred) = center.enqueue(
        NotificationRequest::info("pending")
            .persistent()
            .action(Action::custom("Again").with_callback(move || {
                let _ = handle.upgrade();
                None
            })),
    );
    let observer = center.downgrade();

    drop(center);
    assert!(observer.upgrade().is_none());
    assert_eq!(
        deferred.try_take(),
        Some(Err(NoticeError::Abandoned { id }))
    );
}

#[test]
fn test_events_stay_ordered_when_timers_fire_on_other_threads() {
    let center = NotificationCenter::with_settings(
        Arc::new(ThreadScheduler),
        CenterSettings {
            linger: ms(0),
            ..CenterSettings::default()
        },
    );
    let events = center.subscribe();

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let center = center.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    let request = NotificationRequest::info(format!("w{} n{}", worker, i))
                        .duration(ms(0));
                    let _ = center.enqueue(request);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    // Three events per record; Removed is emitted after the record leaves the registry
    let observed: Vec<NotificationEvent> = (0..300)
        .map_while(|_| events.recv_timeout(std::time::Duration::from_secs(10)).ok())
        .collect();
    assert_eq!(observed.len(), 300);
    assert!(center.is_empty());

    // Per record: Shown, then Hidden, then Removed
    let mut stage: HashMap<NotificationId, u8> = HashMap::new();
    for event in observed {
        let expected = match event {
            NotificationEvent::Shown { .. } => 0,
            NotificationEvent::Hidden { .. } => 1,
            NotificationEvent::Removed { .. } => 2,
        };
        let seen = stage.entry(event.id()).or_insert(0);
        assert_eq!(*seen, expected, "out of order event {:?}", event);
        *seen += 1;
    }
    assert_eq!(stage.len(), 100);
    assert!(stage.values().all(|seen| *seen == 3));
}

#[test]
fn test_shown_events_follow_registry_order_across_threads() {
    let (center, _scheduler) = manual_center();
    let events = center.subscribe();

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let center = center.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    let request =
                        NotificationRequest::warning(format!("w{} n{}", worker, i)).persistent();
                    let _ = center.enqueue(request);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let shown: Vec<NotificationId> = events
        .try_iter()
        .filter(|event| matches!(event, NotificationEvent::Shown { .. }))
        .map(|event| event.id())
        .collect();
    let registry: Vec<NotificationId> = center.snapshot().iter().map(|view| view.id).collect();
    assert_eq!(shown.len(), 200);
    assert_eq!(shown, registry);
}
