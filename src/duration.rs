//! Adaptive display durations.
//!
//! The queue never refuses a request; instead, the deeper the queue is when a record
//! arrives, the shorter that record is shown. Each tier scales the base duration and
//! clamps it to a floor so a toast stays readable.

use crate::types::NotificationKind;
use std::time::Duration;

/// (max depth, multiplier in tenths, floor in ms); depths above the last tier use [`DEEP_TIER`]
const TIERS: [(usize, u32, u64); 2] = [(3, 7, 2000), (5, 5, 1500)];
const DEEP_TIER: (u32, u64) = (3, 1000);

/// Map a base duration and the current queue depth to the effective display duration.
pub fn compute_duration(base: Duration, depth: usize) -> Duration {
    if depth <= 1 {
        return base;
    }
    let (tenths, floor_ms) = TIERS
        .iter()
        .find(|(max_depth, _, _)| depth <= *max_depth)
        .map(|(_, tenths, floor)| (*tenths, *floor))
        .unwrap_or(DEEP_TIER);

    // Integer arithmetic keeps 5000ms * 0.7 at exactly 3500ms.
    // Bases too large to multiply are divided first instead.
    let scaled = base
        .checked_mul(tenths)
        .map(|d| d / 10)
        .unwrap_or_else(|| base / 10 * tenths);
    scaled.max(Duration::from_millis(floor_ms))
}

/// Per-kind base durations used when a request does not carry one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDurations {
    pub success: Duration,
    pub error: Duration,
    pub warning: Duration,
    pub info: Duration,
}

impl KindDurations {
    pub fn for_kind(&self, kind: NotificationKind) -> Duration {
        match kind {
            NotificationKind::Success => self.success,
            NotificationKind::Error => self.error,
            NotificationKind::Warning => self.warning,
            NotificationKind::Info => self.info,
        }
    }
}

impl Default for KindDurations {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(3000),
            error: Duration::from_millis(5000),
            warning: Duration::from_millis(4000),
            info: Duration::from_millis(3000),
        }
    }
}
