//! Mixdown CLI - spoken-word clip assembler
//!
//! Command-line interface wrapping the mixdown library.

use clap::Parser;
use env_logger::Env;
use log::info;

use mixdown::cli::{commands, Cli, Commands};
use mixdown::Result;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Mixdown v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Mixdown v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Mix {
            narration,
            intro,
            outro,
            bed,
            title,
            output_dir,
            asset_dir,
            config,
        } => commands::mix(
            narration,
            intro,
            outro,
            bed,
            &title,
            &output_dir,
            &asset_dir,
            config.as_deref(),
        ),
        Commands::Clean { staging_dir } => commands::clean(&staging_dir),
    }
}
