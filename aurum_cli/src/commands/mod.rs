//! CLI subcommand implementations.

pub mod history;
pub mod quote;
pub mod watch;
