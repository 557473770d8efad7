//! CLI presentation: render an observed event timeline as text or JSON lines.

use crate::events::NotificationEvent;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// A lifecycle event stamped with the virtual time it was observed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Wall-clock time the simulation recorded the event (RFC 3339, UTC)
    pub ts: String,
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: NotificationEvent,
}

impl TimelineEntry {
    pub fn new(at_ms: u64, event: NotificationEvent) -> Self {
        Self {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            at_ms,
            event,
        }
    }
}

pub fn format_timeline_text(entries: &[TimelineEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let detail = match &entry.event {
                NotificationEvent::Shown { record } => format!(
                    "shown   {} [{}] \"{}\" for {}ms{}",
                    record.id,
                    record.kind,
                    record.title,
                    record.effective_duration_ms,
                    if record.persistent { " (persistent)" } else { "" }
                ),
                NotificationEvent::Hidden { id, outcome } => {
                    format!("hidden  {} ({:?})", id, outcome)
                }
                NotificationEvent::Removed {
                    id,
                    outcome,
                    delivered,
                } => format!(
                    "removed {} ({:?}){}",
                    id,
                    outcome,
                    if *delivered { "" } else { ", result unobserved" }
                ),
            };
            format!("[{:>6}ms] {}", entry.at_ms, detail)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_timeline_json(entries: &[TimelineEntry]) -> Result<String, serde_json::Error> {
    let lines = entries
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
