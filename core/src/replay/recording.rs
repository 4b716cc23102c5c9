//! Recording timeline
//!
//! An append-only, truncatable sequence of [`Frame`]s with strictly
//! increasing timestamps. Think of it as the cassette in the VCR.

use super::format::PayloadError;
use super::types::{Frame, FrameProperty, InputState};

/// Structural errors raised by timeline operations
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    /// Frame appended at or before the current end of the recording
    #[error("frame at {time}s does not advance past the recording end at {end}s")]
    OrderingViolation { time: f32, end: f32 },

    /// Frame index outside the recorded range
    #[error("frame index {index} outside recorded range (recording has {frame_count} frames)")]
    OutOfRange { index: usize, frame_count: usize },

    /// Time or frame lookup on a recording with no frames
    #[error("recording has no frames")]
    EmptyRecording,

    /// Axis sample that cannot be stored in the text format
    #[error("input `{input_id}` in frame {frame} has a non-finite axis value")]
    NonFiniteAxis { frame: usize, input_id: String },

    /// Serialized recording could not be loaded
    #[error("malformed recording payload: {0}")]
    MalformedPayload(#[from] PayloadError),
}

/// Time-stamped input recording
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    frames: Vec<Frame>,
}

impl Recording {
    /// Create an empty recording
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Build from frames already checked against the timeline invariants
    pub(crate) fn from_validated_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Number of recorded frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Time of the last frame, or 0 when empty
    pub fn length(&self) -> f32 {
        self.frames.last().map_or(0.0, |f| f.time)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames in time order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Get a frame by index
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Append an empty frame at `at_time`, returning its index
    ///
    /// Fails with [`RecordingError::OrderingViolation`] unless `at_time` is
    /// strictly after the last frame. The recording is left unchanged on error.
    pub fn add_frame(&mut self, at_time: f32) -> Result<usize, RecordingError> {
        let end = self.length();
        if !at_time.is_finite() || (!self.frames.is_empty() && at_time <= end) {
            return Err(RecordingError::OrderingViolation { time: at_time, end });
        }

        self.frames.push(Frame::new(at_time));
        Ok(self.frames.len() - 1)
    }

    /// Store an input state in the given frame, overwriting any state with the same id
    ///
    /// Non-finite axis values are rejected; the frame is left unchanged.
    pub fn add_input(&mut self, frame: usize, state: InputState) -> Result<(), RecordingError> {
        let target = self.frame_mut(frame)?;
        if !state.axis_value.is_finite() {
            return Err(RecordingError::NonFiniteAxis {
                frame,
                input_id: state.input_id,
            });
        }
        target.upsert_input(state);
        Ok(())
    }

    /// Store a custom property in the given frame, overwriting any value with the same name
    pub fn add_property(
        &mut self,
        frame: usize,
        property: FrameProperty,
    ) -> Result<(), RecordingError> {
        self.frame_mut(frame)?.upsert_property(property);
        Ok(())
    }

    /// Index of the last frame whose time is `<= time`
    ///
    /// Times before the first frame map to frame 0; times past the end freeze
    /// on the final frame.
    pub fn frame_for_time(&self, time: f32) -> Result<usize, RecordingError> {
        if self.frames.is_empty() {
            return Err(RecordingError::EmptyRecording);
        }

        let after = self.frames.partition_point(|f| f.time <= time);
        Ok(after.saturating_sub(1))
    }

    /// Remove every frame from `start` onward
    pub fn clear_frames(&mut self, start: usize) {
        self.frames.truncate(start);
    }

    /// Recorded state of `input_id` at `frame`, or `None` if it was not captured
    pub fn input(&self, frame: usize, input_id: &str) -> Result<Option<&InputState>, RecordingError> {
        let found = self.frame_ref(frame)?.input(input_id);
        if found.is_none() {
            tracing::warn!("Input {} not found in frame {}", input_id, frame);
        }
        Ok(found)
    }

    /// Recorded value of property `name` at `frame`, or `None` if not saved
    pub fn property(&self, frame: usize, name: &str) -> Result<Option<&str>, RecordingError> {
        let found = self.frame_ref(frame)?.property(name);
        if found.is_none() {
            tracing::warn!("Property {} not found in frame {}", name, frame);
        }
        Ok(found)
    }

    /// Append all of a frame's inputs to `out` (the buffer is not cleared)
    pub fn inputs_into(&self, frame: usize, out: &mut Vec<InputState>) -> Result<(), RecordingError> {
        out.extend_from_slice(self.frame_ref(frame)?.inputs());
        Ok(())
    }

    /// Append all of a frame's properties to `out` (the buffer is not cleared)
    pub fn properties_into(
        &self,
        frame: usize,
        out: &mut Vec<FrameProperty>,
    ) -> Result<(), RecordingError> {
        out.extend_from_slice(self.frame_ref(frame)?.properties());
        Ok(())
    }

    fn frame_ref(&self, index: usize) -> Result<&Frame, RecordingError> {
        let frame_count = self.frames.len();
        self.frames
            .get(index)
            .ok_or(RecordingError::OutOfRange { index, frame_count })
    }

    fn frame_mut(&mut self, index: usize) -> Result<&mut Frame, RecordingError> {
        let frame_count = self.frames.len();
        self.frames
            .get_mut(index)
            .ok_or(RecordingError::OutOfRange { index, frame_count })
    }
}
