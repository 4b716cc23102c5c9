//! Validate a recording file

use anyhow::Result;
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;

use inputvcr_core::replay::Recording;

#[derive(Args)]
pub struct ValidateArgs {
    /// Recording file (JSON)
    pub file: PathBuf,
}

/// What a recording contains
#[derive(Debug, PartialEq)]
pub struct Summary {
    pub frame_count: usize,
    pub length: f32,
    pub input_ids: BTreeSet<String>,
    pub property_names: BTreeSet<String>,
}

impl Summary {
    pub fn of(recording: &Recording) -> Self {
        let mut input_ids = BTreeSet::new();
        let mut property_names = BTreeSet::new();
        for frame in recording.frames() {
            input_ids.extend(frame.inputs().iter().map(|s| s.input_id.clone()));
            property_names.extend(frame.properties().iter().map(|p| p.name.clone()));
        }

        Self {
            frame_count: recording.frame_count(),
            length: recording.length(),
            input_ids,
            property_names,
        }
    }
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    println!("Validating: {}", args.file.display());

    let recording = super::read_recording(&args.file)?;
    let summary = Summary::of(&recording);

    println!();
    println!("=== Recording OK ===");
    println!("Frames: {}", summary.frame_count);
    println!("Length: {:.3}s", summary.length);
    println!("Inputs ({}):", summary.input_ids.len());
    for id in &summary.input_ids {
        println!("  {}", id);
    }
    println!("Properties ({}):", summary.property_names.len());
    for name in &summary.property_names {
        println!("  {}", name);
    }

    Ok(())
}
