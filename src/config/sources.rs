//! Configuration sources, in the order they are layered.

pub mod environment;
pub mod user_file;
