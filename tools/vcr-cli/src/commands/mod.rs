//! Recording commands
//!
//! Each command reads one recording file and either reports on it or writes
//! an edited copy.

pub mod inspect;
pub mod trim;
pub mod upgrade;
pub mod validate;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use inputvcr_core::config::RecorderConfig;
use inputvcr_core::replay::{Recording, TextReader, TextWriter};

/// Read and validate a recording file
pub fn read_recording(path: &Path) -> Result<Recording> {
    tracing::debug!("Reading recording: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open recording: {}", path.display()))?;
    let recording = TextReader::new(BufReader::new(file))
        .read_recording()
        .with_context(|| format!("Failed to read recording: {}", path.display()))?
        .with_context(|| format!("Invalid recording: {}", path.display()))?;

    Ok(recording)
}

/// Write a recording file in the current schema
pub fn write_recording(path: &Path, recording: &Recording, pretty: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    TextWriter::new(BufWriter::new(file))
        .write_recording(recording, pretty)
        .with_context(|| format!("Failed to write recording: {}", path.display()))?;

    tracing::debug!("Wrote {} frames to {}", recording.frame_count(), path.display());
    Ok(())
}

/// Pretty-print when asked on the command line or by the user's config
pub fn resolve_pretty(flag: bool, config: &RecorderConfig) -> bool {
    flag || config.pretty_json
}
