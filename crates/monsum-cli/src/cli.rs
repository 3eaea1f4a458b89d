//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vehicle monitor log summary.
///
/// Reads the CSV log written by a vehicle monitor and reports distance driven
/// and battery charged/discharged per day, week, month and year.
#[derive(Debug, Parser)]
#[command(name = "monsum", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (line numbers, raw lines, period state).
    #[arg(short, long, global = true, visible_alias = "debug")]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the day, week, month and year summary of the monitor log.
    Summary {
        /// Monitor log to read (overrides `input_path` from the config).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the resolved configuration and input file state.
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_input() {
        let cli = Cli::try_parse_from(["monsum", "summary", "--input", "log.csv"]).unwrap();
        match cli.command {
            Some(Commands::Summary { input }) => {
                assert_eq!(input, Some(PathBuf::from("log.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_debug_alias_enables_verbose() {
        let cli = Cli::try_parse_from(["monsum", "--debug", "summary"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["monsum", "status", "-v", "--config", "c.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
