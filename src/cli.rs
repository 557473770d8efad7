//! CLI domain: parse, route, output, and presentation only.
//! The route table drives a notification center; presentation formats what it observed.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Answer, Cli, Commands};
pub use presentation::{format_timeline_json, format_timeline_text, TimelineEntry};
pub use route::{RunContext, SimulationReport};
