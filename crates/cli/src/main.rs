//! Command-line front end for the fortune wheel.
//!
//! Loads a data directory (asset catalog, custom item sets, characters),
//! wires it into the in-memory sandbox host and runs equips against it.

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Equip, Options, Presets, Sort};

use crate::config::CliConfig;

/// Fortune wheel item-set tools
#[derive(Parser)]
#[command(name = "wheel")]
#[command(about = "Inspect and equip fortune wheel item sets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List built-in and custom item sets
    Presets(Presets),

    /// List wheel options with their IDs
    Options(Options),

    /// Print the equip order of an item set
    Sort(Sort),

    /// Equip an item set on a character
    Equip(Equip),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for WHEEL_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::init(&config)?;

    let cli = Cli::parse();

    match cli.command {
        Command::Presets(cmd) => cmd.execute(&config),
        Command::Options(cmd) => cmd.execute(&config),
        Command::Sort(cmd) => cmd.execute(&config),
        Command::Equip(cmd) => cmd.execute(&config),
    }
}
