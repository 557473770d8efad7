//! Configuration System
//!
//! Layered configuration for the notification center: built-in defaults, the user config
//! file, an optional explicit file, then `NOTICEBOARD_*` environment variables.

use crate::duration::KindDurations;
use crate::error::NoticeError;
use crate::logging::LoggingConfig;
use config::{File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod merge;
mod sources;

pub use sources::user_file::user_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoticeboardConfig {
    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default)]
    pub dialogs: DialogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Queue timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Delay between hiding a record and removing it (milliseconds)
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,

    /// Base durations used when a request carries none
    #[serde(default)]
    pub durations: DurationConfig,
}

fn default_linger_ms() -> u64 {
    300
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            linger_ms: default_linger_ms(),
            durations: DurationConfig::default(),
        }
    }
}

/// Per-kind default display durations (milliseconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationConfig {
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,
    #[serde(default = "default_error_ms")]
    pub error_ms: u64,
    #[serde(default = "default_warning_ms")]
    pub warning_ms: u64,
    #[serde(default = "default_info_ms")]
    pub info_ms: u64,
}

fn default_success_ms() -> u64 {
    3000
}

fn default_error_ms() -> u64 {
    5000
}

fn default_warning_ms() -> u64 {
    4000
}

fn default_info_ms() -> u64 {
    3000
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            success_ms: default_success_ms(),
            error_ms: default_error_ms(),
            warning_ms: default_warning_ms(),
            info_ms: default_info_ms(),
        }
    }
}

impl DurationConfig {
    pub fn to_kind_durations(&self) -> KindDurations {
        KindDurations {
            success: Duration::from_millis(self.success_ms),
            error: Duration::from_millis(self.error_ms),
            warning: Duration::from_millis(self.warning_ms),
            info: Duration::from_millis(self.info_ms),
        }
    }
}

/// Default titles and button labels for the dialog helpers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogConfig {
    #[serde(default = "default_alert_title")]
    pub alert_title: String,
    #[serde(default = "default_confirm_title")]
    pub confirm_title: String,
    #[serde(default = "default_prompt_title")]
    pub prompt_title: String,
    #[serde(default = "default_ok_label")]
    pub ok_label: String,
    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,
}

fn default_alert_title() -> String {
    "Notice".to_string()
}

fn default_confirm_title() -> String {
    "Confirm".to_string()
}

fn default_prompt_title() -> String {
    "Input".to_string()
}

fn default_ok_label() -> String {
    "OK".to_string()
}

fn default_cancel_label() -> String {
    "Cancel".to_string()
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            alert_title: default_alert_title(),
            confirm_title: default_confirm_title(),
            prompt_title: default_prompt_title(),
            ok_label: default_ok_label(),
            cancel_label: default_cancel_label(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Queue(String),
    Dialogs(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Queue(msg) => write!(f, "Queue: {}", msg),
            ValidationError::Dialogs(msg) => write!(f, "Dialogs: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl NoticeboardConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let durations = &self.queue.durations;
        for (kind, value) in [
            ("success", durations.success_ms),
            ("error", durations.error_ms),
            ("warning", durations.warning_ms),
            ("info", durations.info_ms),
        ] {
            if value == 0 {
                errors.push(ValidationError::Queue(format!(
                    "Default {} duration must be greater than zero",
                    kind
                )));
            }
        }

        for (field, value) in [
            ("ok_label", &self.dialogs.ok_label),
            ("cancel_label", &self.dialogs.cancel_label),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::Dialogs(format!("{} cannot be empty", field)));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render as TOML, e.g. for `noticeboard config`
    pub fn to_toml(&self) -> Result<String, NoticeError> {
        toml::to_string_pretty(self)
            .map_err(|e| NoticeError::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// Loads [`NoticeboardConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, user config file, environment
    pub fn load() -> Result<NoticeboardConfig, NoticeError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::user_file::add_to_builder(builder);
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Defaults, user config file, the given file (required), environment
    pub fn load_from_file(path: &Path) -> Result<NoticeboardConfig, NoticeError> {
        if !path.exists() {
            return Err(NoticeError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::user_file::add_to_builder(builder);
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Defaults overlaid with an inline TOML document; no other sources
    pub fn load_from_str(toml_source: &str) -> Result<NoticeboardConfig, NoticeError> {
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from_str(toml_source, FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<NoticeboardConfig, NoticeError> {
        let config: NoticeboardConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            NoticeError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
