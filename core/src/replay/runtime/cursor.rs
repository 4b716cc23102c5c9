//! Record/playback cursor
//!
//! Tracks the current time and frame of a session against its recording.

use crate::replay::recording::{Recording, RecordingError};
use crate::replay::types::{FrameProperty, InputState};
use std::sync::Arc;

/// Position of a record or playback session within a [`Recording`]
///
/// The recording is held behind an [`Arc`] so several playback cursors can
/// read the same timeline. Writes go through [`Arc::make_mut`], which hands
/// out the only mutable handle and copies the timeline first if it is still
/// shared.
#[derive(Debug, Clone)]
pub struct RecordingState {
    recording: Arc<Recording>,
    time: f32,
    /// Latest frame with `time <= self.time`; `None` while the recording is empty
    frame_index: Option<usize>,
}

impl RecordingState {
    /// Create a cursor at time 0
    pub fn new(recording: Arc<Recording>) -> Self {
        let frame_index = recording.frame_for_time(0.0).ok();
        Self {
            recording,
            time: 0.0,
            frame_index,
        }
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Another handle to the same timeline
    pub fn shared(&self) -> Arc<Recording> {
        Arc::clone(&self.recording)
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame_index(&self) -> Option<usize> {
        self.frame_index
    }

    /// Jump to `time`, clamped to `[0, length]`
    pub fn skip_to_time(&mut self, time: f32) {
        let time = if time.is_nan() { 0.0 } else { time };
        self.time = time.min(self.recording.length()).max(0.0);
        self.frame_index = self.recording.frame_for_time(self.time).ok();
    }

    /// Move forward by `delta` seconds (playback)
    ///
    /// The cursor lands wherever the new time falls; it does not report the
    /// frames it passed over.
    pub fn advance_by_time(&mut self, delta: f32) {
        self.time += delta;
        self.frame_index = self.recording.frame_for_time(self.time).ok();
    }

    /// Move forward by `delta` seconds and append a frame there (recording)
    ///
    /// On error the cursor and recording are left unchanged.
    pub fn append_new_recording_frame(&mut self, delta: f32) -> Result<usize, RecordingError> {
        let time = self.time + delta;
        let index = Arc::make_mut(&mut self.recording).add_frame(time)?;
        self.time = time;
        self.frame_index = Some(index);
        Ok(index)
    }

    pub fn add_input_to_current_frame(&mut self, state: InputState) -> Result<(), RecordingError> {
        let index = self.frame_index.ok_or(RecordingError::EmptyRecording)?;
        Arc::make_mut(&mut self.recording).add_input(index, state)
    }

    pub fn add_property_to_current_frame(
        &mut self,
        property: FrameProperty,
    ) -> Result<(), RecordingError> {
        let index = self.frame_index.ok_or(RecordingError::EmptyRecording)?;
        Arc::make_mut(&mut self.recording).add_property(index, property)
    }

    /// Drop every frame later than the current time
    ///
    /// Re-recording from here overwrites the rest of the tape.
    pub fn truncate_after_current_time(&mut self) {
        let keep = self
            .recording
            .frames()
            .partition_point(|f| f.time <= self.time);
        if keep < self.recording.frame_count() {
            Arc::make_mut(&mut self.recording).clear_frames(keep);
        }
        self.frame_index = self.recording.frame_for_time(self.time).ok();
    }
}
