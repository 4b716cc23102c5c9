//! Inspect a single frame of a recording

use anyhow::{Result, bail};
use clap::Args;
use std::path::PathBuf;

use inputvcr_core::replay::Recording;

#[derive(Args)]
pub struct InspectArgs {
    /// Recording file (JSON)
    pub file: PathBuf,

    /// Frame index to print
    #[arg(long, conflicts_with = "time")]
    pub frame: Option<usize>,

    /// Print the frame active at this time (seconds)
    #[arg(long)]
    pub time: Option<f32>,
}

/// Pick the frame to show; the first frame if neither option is given
pub fn select_frame(
    recording: &Recording,
    frame: Option<usize>,
    time: Option<f32>,
) -> Result<usize> {
    if recording.is_empty() {
        bail!("Recording has no frames");
    }

    match (frame, time) {
        (Some(index), _) if index >= recording.frame_count() => bail!(
            "Frame {} is out of range (recording has {} frames)",
            index,
            recording.frame_count()
        ),
        (Some(index), _) => Ok(index),
        (None, Some(time)) => Ok(recording.frame_for_time(time)?),
        (None, None) => Ok(0),
    }
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let recording = super::read_recording(&args.file)?;
    let index = select_frame(&recording, args.frame, args.time)?;
    let Some(frame) = recording.frame(index) else {
        bail!("Frame {} is out of range", index);
    };

    println!("=== Frame {} of {} ===", index, recording.frame_count());
    println!("Time: {:.3}s", frame.time);

    println!("Inputs ({}):", frame.inputs().len());
    for state in frame.inputs() {
        println!(
            "  {:<24} button={:<5} axis={}",
            state.input_id, state.button_state, state.axis_value
        );
    }

    println!("Properties ({}):", frame.properties().len());
    for property in frame.properties() {
        println!("  {} = {}", property.name, property.value);
    }

    Ok(())
}
