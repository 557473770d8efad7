//! User config file source: the platform config dir, e.g. ~/.config/noticeboard/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the user config file, if a home directory can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "noticeboard").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the user config file to the builder when it exists.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match user_config_path() {
        Some(path) if path.exists() => builder.add_source(File::from(path).required(false)),
        Some(path) => {
            debug!(config_path = %path.display(), "No user configuration file");
            builder
        }
        None => builder,
    }
}
