//! Monitor summary CLI library.
//!
//! This crate provides the CLI interface for summarizing a vehicle monitor log.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
