//! VCR CLI - Offline tooling for InputVCR recordings
//!
//! # Commands
//!
//! - `vcr validate` - Check a recording and summarise it
//! - `vcr inspect` - Print one frame of a recording
//! - `vcr trim` - Cut a recording off after a point in time
//! - `vcr upgrade` - Rewrite a recording in the current schema
//!
//! # Usage
//!
//! ```bash
//! vcr validate session.json
//! vcr inspect session.json --time 1.5
//! vcr trim session.json --from-time 10 -o intro.json
//! vcr upgrade old.json -o new.json --pretty
//! ```
//!
//! Set `RUST_LOG=debug` for more detail.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{inspect, trim, upgrade, validate};

/// VCR CLI - Offline tooling for InputVCR recordings
#[derive(Parser)]
#[command(name = "vcr")]
#[command(about = "Inspect and edit InputVCR recordings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a recording, then print a summary
    Validate(validate::ValidateArgs),

    /// Print the inputs and properties of one frame
    Inspect(inspect::InspectArgs),

    /// Drop every frame after a given time
    Trim(trim::TrimArgs),

    /// Rewrite a recording in the current schema version
    Upgrade(upgrade::UpgradeArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => validate::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Trim(args) => trim::execute(args),
        Commands::Upgrade(args) => upgrade::execute(args),
    }
}
