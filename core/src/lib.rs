//! InputVCR Core - input record and replay
//!
//! Sits between a host's live input and its gameplay code. Every input query
//! goes through a [`Recorder`], which either forwards it to live input,
//! captures it into a [`Recording`], or answers it from a recording being
//! played back.
//!
//! # Architecture
//!
//! - [`LiveInput`] - Capability the host implements over its input devices
//! - [`Recorder`] - Mode state machine, ticked once per host step
//! - [`Recording`] - Append-only timeline of input frames
//! - [`TransformSyncer`] - Records and replays a transform through frame properties

pub mod config;
pub mod input;
pub mod replay;
pub mod sync;
#[cfg(test)]
pub mod test_utils;

pub use config::{ConfigError, RecorderConfig};
pub use input::{LiveInput, NullInput};
pub use replay::{
    Frame, FrameProperty, InputState, PayloadError, Recorder, RecorderMode, Recording,
    RecordingError, TickEvent,
};
pub use sync::{TransformState, TransformSyncer};
