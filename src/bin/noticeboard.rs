//! Noticeboard CLI Binary
//!
//! Runs notification scenarios on a virtual clock and inspects configuration.

use anyhow::Context;
use clap::Parser;
use noticeboard::cli::{map_error, Cli, RunContext};
use noticeboard::config::ConfigLoader;
use noticeboard::error::NoticeError;
use noticeboard::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Noticeboard CLI starting");

    // Load configuration and execute command
    match run(&cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            // Domain errors get the stable CLI wording
            match e.downcast_ref::<NoticeError>() {
                Some(notice) => eprintln!("{}", map_error(notice)),
                None => eprintln!("{:#}", e),
            }
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = RunContext::new(cli.config.clone()).context("Error loading configuration")?;
    Ok(context.execute(&cli.command)?)
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load().map(|c| c.logging).unwrap_or_default(),
    };

    // CLI flags take precedence over the config file
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}
