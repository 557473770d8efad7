//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::NoticeError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &NoticeError) -> String {
    match e {
        NoticeError::Config(msg) => format!("Configuration problem: {}", msg),
        other => other.to_string(),
    }
}
