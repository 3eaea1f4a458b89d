use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use monsum_cli::commands::{status, summary};
use monsum_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Diagnostics go to stderr, stdout carries only the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Summary { input }) => {
            let input = input.as_deref().unwrap_or(&config.input_path);
            let stdout = io::stdout();
            summary::run(&mut stdout.lock(), input)?;
        }
        Some(Commands::Status) => {
            let files = Config::files(cli.config.as_deref());
            status::run(&mut io::stdout().lock(), &config, &files)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
