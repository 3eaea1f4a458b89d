//! CLI subcommand implementations.

pub mod status;
pub mod summary;
