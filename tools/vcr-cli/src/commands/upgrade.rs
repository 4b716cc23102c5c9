//! Rewrite a recording in the current schema

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use inputvcr_core::config::{self, RecorderConfig};
use inputvcr_core::replay::{CURRENT_SCHEMA_VERSION, Recording, schema_version};

#[derive(Args)]
pub struct UpgradeArgs {
    /// Recording file (JSON)
    pub file: PathBuf,

    /// Output recording file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

pub fn execute(args: UpgradeArgs) -> Result<()> {
    run(args, &config::load())
}

/// Upgrade using an already loaded config
pub fn run(args: UpgradeArgs, config: &RecorderConfig) -> Result<()> {
    println!("Upgrading: {} -> {}", args.file.display(), args.output.display());

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read recording: {}", args.file.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Not a JSON document: {}", args.file.display()))?;
    let from_version = schema_version(&document).context("Failed to read schema version")?;

    let recording = Recording::from_json(&text)
        .with_context(|| format!("Invalid recording: {}", args.file.display()))?;
    super::write_recording(&args.output, &recording, super::resolve_pretty(args.pretty, config))?;

    println!();
    println!("=== Upgrade Complete ===");
    println!("Schema: v{} -> v{}", from_version, CURRENT_SCHEMA_VERSION);
    println!("Frames: {}", recording.frame_count());

    Ok(())
}
