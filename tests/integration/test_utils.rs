//! Shared test utilities for integration tests
//!
//! Builds centers on a manual clock and isolates environment-dependent configuration
//! tests from each other and from the developer's real config.

use noticeboard::scheduler::TimerTask;
use noticeboard::{ManualScheduler, NotificationCenter, Scheduler, TimerHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: [&str; 3] = ["HOME", "XDG_CONFIG_HOME", "NOTICEBOARD_QUEUE__LINGER_MS"];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ISOLATED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`, plus extra variables.
///
/// `f` receives the directory the user config file is read from.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce(&std::path::Path) -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let config_home = test_dir.path().join("config");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&home).unwrap();

    std::env::set_var("HOME", home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", config_home.to_str().unwrap());
    std::env::remove_var("NOTICEBOARD_QUEUE__LINGER_MS");
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let app_config_dir = config_home.join("noticeboard");
    let result = f(&app_config_dir);

    env_state.restore();
    result
}

pub fn manual_center() -> (NotificationCenter, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let center = NotificationCenter::new(Arc::new(scheduler.clone()));
    (center, scheduler)
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Fires every task on its own OS thread, racing whatever scheduled it
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        std::thread::spawn(move || {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            if !flag.load(Ordering::SeqCst) {
                task();
            }
        });
        TimerHandle::new(cancelled)
    }
}

