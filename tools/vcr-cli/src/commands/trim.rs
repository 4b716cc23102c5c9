//! Trim a recording after a point in time

use anyhow::{Result, bail};
use clap::Args;
use std::path::PathBuf;

use inputvcr_core::config::{self, RecorderConfig};
use inputvcr_core::replay::Recording;

#[derive(Args)]
pub struct TrimArgs {
    /// Recording file (JSON)
    pub file: PathBuf,

    /// Drop every frame recorded after this time (seconds)
    #[arg(long)]
    pub from_time: f32,

    /// Output recording file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

/// Remove frames later than `time`, returning how many were dropped
pub fn trim_after(recording: &mut Recording, time: f32) -> usize {
    let keep = recording.frames().partition_point(|f| f.time <= time);
    let dropped = recording.frame_count() - keep;
    recording.clear_frames(keep);
    dropped
}

pub fn execute(args: TrimArgs) -> Result<()> {
    run(args, &config::load())
}

/// Trim using an already loaded config
pub fn run(args: TrimArgs, config: &RecorderConfig) -> Result<()> {
    if args.from_time.is_nan() {
        bail!("--from-time must be a number");
    }
    println!(
        "Trimming: {} -> {} (after {}s)",
        args.file.display(),
        args.output.display(),
        args.from_time
    );

    let mut recording = super::read_recording(&args.file)?;
    let dropped = trim_after(&mut recording, args.from_time);
    super::write_recording(&args.output, &recording, super::resolve_pretty(args.pretty, config))?;

    println!();
    println!("=== Trim Complete ===");
    println!("Dropped: {} frames", dropped);
    println!("Kept: {} frames", recording.frame_count());
    println!("Length: {:.3}s", recording.length());

    Ok(())
}
