//! Replay runtime
//!
//! The moving parts of a record or playback session:
//! - **Cursor**: time/frame position within a recording
//! - **Latch**: the "this frame" and "last frame" snapshots edge queries read
//! - **Recorder**: the mode state machine and the input query API

mod cursor;
mod latch;
mod recorder;

#[cfg(test)]
mod tests;

pub use cursor::RecordingState;
pub use latch::FrameLatch;
pub use recorder::{Recorder, RecorderMode, TickEvent};
