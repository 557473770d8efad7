//! CLI route: single route table and run context.

use crate::center::NotificationCenter;
use crate::cli::parse::{Answer, Commands};
use crate::cli::presentation::{format_timeline_json, format_timeline_text, TimelineEntry};
use crate::config::{ConfigLoader, NoticeboardConfig};
use crate::error::NoticeError;
use crate::events::NotificationEvent;
use crate::scheduler::ManualScheduler;
use crate::types::{NotificationKind, NotificationRequest};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Everything a simulation observed
#[derive(Debug)]
pub struct SimulationReport {
    pub timeline: Vec<TimelineEntry>,
    /// Result of the confirm dialog, when one was opened
    pub dialog_result: Option<Result<bool, NoticeError>>,
}

/// Runtime context for CLI execution: the loaded configuration.
pub struct RunContext {
    config: NoticeboardConfig,
}

impl RunContext {
    /// Load configuration from the layered sources, plus `config_path` when given.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, NoticeError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: NoticeboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NoticeboardConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, NoticeError> {
        match command {
            Commands::Simulate {
                toasts,
                confirm,
                answer,
                answer_after_ms,
                format,
            } => {
                let requests = parse_toasts(toasts)?;
                let dialog = confirm
                    .as_deref()
                    .map(|message| (message, *answer, Duration::from_millis(*answer_after_ms)));
                let report = self.simulate(requests, dialog);
                render_report(&report, format)
            }
            Commands::Config => self.config.to_toml(),
        }
    }

    /// Enqueue `requests` at time zero, optionally open a confirm dialog answered at a
    /// given virtual time, then run the clock until nothing is left to fire.
    pub fn simulate(
        &self,
        requests: Vec<NotificationRequest>,
        dialog: Option<(&str, Answer, Duration)>,
    ) -> SimulationReport {
        let scheduler = ManualScheduler::new();
        let center = NotificationCenter::from_config(Arc::new(scheduler.clone()), &self.config);
        let events = center.subscribe();
        let mut timeline = Vec::new();

        info!(requests = requests.len(), dialog = dialog.is_some(), "Starting simulation");
        for request in requests {
            // Toast results are not needed; every record settles regardless
            let _ = center.enqueue(request);
        }

        let mut pending_dialog = dialog.map(|(message, answer, at)| {
            let deferred = center.notifier().confirm(message, None);
            (deferred, answer, at)
        });
        drain(&events, scheduler.now(), &mut timeline);

        let mut answer_due = pending_dialog.as_ref().map(|(_, _, at)| *at);
        loop {
            let next = match (scheduler.next_deadline(), answer_due) {
                (Some(deadline), Some(at)) => deadline.min(at),
                (Some(deadline), None) => deadline,
                (None, Some(at)) => at,
                (None, None) => break,
            };
            scheduler.advance(next.saturating_sub(scheduler.now()));

            if answer_due.is_some_and(|at| at <= scheduler.now()) {
                answer_due = None;
                if let Some((deferred, answer, _)) = pending_dialog.as_ref() {
                    let id = deferred.id();
                    let applied = match answer {
                        Answer::Confirm => center.confirm(id),
                        Answer::Cancel => center.cancel(id),
                        Answer::Close => center.close(id),
                    };
                    debug!(id = %id, answer = ?answer, applied = applied, "Simulated answer");
                }
            }
            drain(&events, scheduler.now(), &mut timeline);
        }

        let dialog_result = pending_dialog.map(|(mut deferred, _, _)| {
            deferred
                .try_take()
                .unwrap_or(Err(NoticeError::Abandoned { id: deferred.id() }))
        });

        SimulationReport {
            timeline,
            dialog_result,
        }
    }
}

fn drain(events: &Receiver<NotificationEvent>, now: Duration, timeline: &mut Vec<TimelineEntry>) {
    let at_ms = now.as_millis() as u64;
    timeline.extend(events.try_iter().map(|event| TimelineEntry::new(at_ms, event)));
}

/// Parse `KIND:TITLE` toasts; an empty list yields one toast of each kind
pub fn parse_toasts(toasts: &[String]) -> Result<Vec<NotificationRequest>, NoticeError> {
    if toasts.is_empty() {
        return Ok(vec![
            NotificationRequest::success("Saved"),
            NotificationRequest::error("Upload failed"),
            NotificationRequest::warning("Disk almost full"),
            NotificationRequest::info("New version available"),
        ]);
    }

    toasts
        .iter()
        .map(|toast| {
            let (kind, title) = toast.split_once(':').ok_or_else(|| {
                NoticeError::InvalidInput(format!("Toast must be KIND:TITLE, got '{}'", toast))
            })?;
            let kind: NotificationKind = kind.trim().parse().map_err(NoticeError::InvalidInput)?;
            Ok(NotificationRequest::new(kind, title.trim()))
        })
        .collect()
}

fn render_report(report: &SimulationReport, format: &str) -> Result<String, NoticeError> {
    let mut output = match format {
        "json" => format_timeline_json(&report.timeline)
            .map_err(|e| NoticeError::InvalidInput(format!("Failed to encode timeline: {}", e)))?,
        "text" => format_timeline_text(&report.timeline),
        other => {
            return Err(NoticeError::InvalidInput(format!(
                "Unknown format '{}' (expected text or json)",
                other
            )))
        }
    };

    if let Some(result) = &report.dialog_result {
        let line = match result {
            Ok(choice) => format!("dialog answered: {}", choice),
            Err(e) => format!("dialog rejected: {}", e),
        };
        if format == "json" {
            output.push('\n');
            output.push_str(&serde_json::json!({ "dialog": line }).to_string());
        } else {
            output.push('\n');
            output.push_str(&line);
        }
    }
    Ok(output)
}
