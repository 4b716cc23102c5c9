//! Input record and replay
//!
//! A recording is a timeline of frames, each holding the input states and
//! custom properties sampled on one host tick:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Record Mode                         │
//! │ LiveInput → Recorder::tick → Recording (frames)          │
//! └──────────────────────────────────────────────────────────┘
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Playback Mode                        │
//! │ Recording → Recorder::tick → latch → button()/axis()/... │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Recordings travel as schema-versioned JSON text (see [`format`]).
//!
//! # Usage
//!
//! ```ignore
//! use inputvcr_core::config::RecorderConfig;
//! use inputvcr_core::replay::Recorder;
//!
//! let config = RecorderConfig::with_inputs(["Jump"], ["Horizontal"]);
//! let mut recorder = Recorder::new(live_input, config);
//! recorder.record();
//!
//! // Once per host tick, before gameplay reads input:
//! recorder.tick(delta_time)?;
//! if recorder.button_down("Jump") {
//!     // ...
//! }
//!
//! let text = recorder.recording().map(|r| r.to_json(false)).transpose()?;
//! ```

pub mod format;
pub mod recording;
pub mod runtime;
pub mod types;

pub use format::{
    CURRENT_SCHEMA_VERSION, PayloadError, TextReader, TextWriter, schema_version, upgrade,
};
pub use recording::{Recording, RecordingError};
pub use runtime::{FrameLatch, Recorder, RecorderMode, RecordingState, TickEvent};
pub use types::{
    Frame, FrameProperty, InputState, MOUSE_POSITION_X, MOUSE_POSITION_Y, mouse_button_id,
};
