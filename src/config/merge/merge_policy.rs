//! Merge rules: defaults first, every later source overrides earlier ones.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("queue.linger_ms", 300)?
        .set_default("queue.durations.success_ms", 3000)?
        .set_default("queue.durations.error_ms", 5000)?
        .set_default("queue.durations.warning_ms", 4000)?
        .set_default("queue.durations.info_ms", 3000)?
        .set_default("dialogs.alert_title", "Notice")?
        .set_default("dialogs.confirm_title", "Confirm")?
        .set_default("dialogs.prompt_title", "Input")?
        .set_default("dialogs.ok_label", "OK")?
        .set_default("dialogs.cancel_label", "Cancel")
}
