//! Input recorder
//!
//! The VCR itself: switches between passing live input through, recording it,
//! and playing a recording back, and answers input queries the same way in
//! every mode.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;

use super::cursor::RecordingState;
use super::latch::FrameLatch;
use crate::config::RecorderConfig;
use crate::input::LiveInput;
use crate::replay::recording::{Recording, RecordingError};
use crate::replay::types::{
    FrameProperty, InputState, MOUSE_POSITION_X, MOUSE_POSITION_Y, RECORDED_MOUSE_BUTTONS,
    mouse_button_id,
};

/// What the recorder is doing with input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderMode {
    /// Live input is forwarded, nothing is recorded
    #[default]
    Passthrough,
    /// Live input is forwarded and written to the recording every tick
    Record,
    /// Queries are answered from the recording
    Playback,
}

/// Result of a single [`Recorder::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Passthrough mode, nothing to do
    Idle,
    /// Paused; no time passed for the session
    Paused,
    /// A new frame was appended and filled
    Recorded { frame: usize },
    /// Playback reached new recorded frames and latched them
    Advanced { frame: usize },
    /// Playback time moved but no new frame was reached
    Held,
    /// Playback ran past the end; the recorder is back in Passthrough
    FinishedPlayback,
}

type FinishedListener = Box<dyn FnMut()>;

/// Records and replays input from a [`LiveInput`] source
pub struct Recorder<I: LiveInput> {
    input: I,
    config: RecorderConfig,
    mode: RecorderMode,
    paused: bool,
    state: Option<RecordingState>,
    latch: FrameLatch,
    pending_properties: VecDeque<FrameProperty>,
    sample_buffer: Vec<InputState>,
    finished_listeners: Vec<FinishedListener>,
}

impl<I: LiveInput> Recorder<I> {
    /// Create a recorder in Passthrough mode
    pub fn new(input: I, config: RecorderConfig) -> Self {
        warn_config(&config);
        Self {
            input,
            config,
            mode: RecorderMode::Passthrough,
            paused: false,
            state: None,
            latch: FrameLatch::new(),
            pending_properties: VecDeque::new(),
            sample_buffer: Vec::new(),
            finished_listeners: Vec::new(),
        }
    }

    pub fn mode(&self) -> RecorderMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Change which inputs are captured from the next recorded frame on
    pub fn set_config(&mut self, config: RecorderConfig) {
        warn_config(&config);
        self.config = config;
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Read-only view of the recording in the VCR
    pub fn recording(&self) -> Option<&Recording> {
        self.state.as_ref().map(RecordingState::recording)
    }

    /// Independent copy of the recording in the VCR
    pub fn snapshot(&self) -> Option<Recording> {
        self.recording().cloned()
    }

    /// Shared handle to the recording in the VCR
    ///
    /// If the recorder keeps recording, it writes to its own copy; the
    /// returned handle never changes.
    pub fn shared_recording(&self) -> Option<Arc<Recording>> {
        self.state.as_ref().map(RecordingState::shared)
    }

    /// Current record/playback time, 0 with no recording loaded
    pub fn playback_time(&self) -> f32 {
        self.state.as_ref().map_or(0.0, RecordingState::time)
    }

    /// Frame the cursor is on
    pub fn current_frame(&self) -> Option<usize> {
        self.state.as_ref().and_then(RecordingState::frame_index)
    }

    /// Register a callback fired when playback runs off the end
    pub fn on_finished_playback(&mut self, listener: impl FnMut() + 'static) {
        self.finished_listeners.push(Box::new(listener));
    }

    // ------------------------------------------------------------------
    // Transport controls
    // ------------------------------------------------------------------

    /// Start recording, continuing the loaded recording from the cursor
    ///
    /// Everything after the cursor is wiped. With nothing loaded a new
    /// recording is started.
    pub fn record(&mut self) {
        self.start_recording(false);
    }

    /// Start recording into a fresh, empty recording
    pub fn record_new(&mut self) {
        self.start_recording(true);
    }

    fn start_recording(&mut self, force_new: bool) {
        match self.state.as_mut() {
            Some(state) if !force_new => state.truncate_after_current_time(),
            _ => {
                self.state = Some(RecordingState::new(Arc::new(Recording::new())));
                self.pending_properties.clear();
            }
        }

        tracing::debug!("Recorder {:?} -> Record (new: {})", self.mode, force_new);
        self.mode = RecorderMode::Record;
        self.paused = false;
        self.latch.clear();
    }

    /// Start or resume playback of the loaded recording
    ///
    /// Resuming from pause keeps the latched input. Does nothing if no
    /// recording is loaded.
    pub fn play(&mut self) {
        if self.state.is_none() {
            tracing::warn!("play() called with no recording loaded");
            return;
        }

        if self.mode != RecorderMode::Playback {
            tracing::debug!("Recorder {:?} -> Playback", self.mode);
            self.latch.clear();
            self.mode = RecorderMode::Playback;
        }
        self.paused = false;
    }

    /// Replace the loaded recording and play it from `from_time`
    pub fn play_recording(&mut self, recording: impl Into<Arc<Recording>>, from_time: f32) {
        let mut state = RecordingState::new(recording.into());
        state.skip_to_time(from_time);
        self.state = Some(state);
        self.latch.clear();

        tracing::debug!("Recorder {:?} -> Playback (from {}s)", self.mode, from_time);
        self.mode = RecorderMode::Playback;
        self.paused = false;
    }

    /// Put a recording in the VCR at time 0 without playing it
    ///
    /// Any active session is stopped first.
    pub fn load_recording(&mut self, recording: impl Into<Arc<Recording>>) {
        self.revert_to_passthrough();
        self.state = Some(RecordingState::new(recording.into()));
    }

    /// Parse a text recording and load it
    ///
    /// On failure the recorder drops to Passthrough but keeps the recording
    /// it already had.
    pub fn load_text(&mut self, text: &str) -> Result<(), RecordingError> {
        match Recording::from_json(text) {
            Ok(recording) => {
                self.load_recording(recording);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load recording: {}", e);
                self.revert_to_passthrough();
                Err(e)
            }
        }
    }

    /// Pause the current recording or playback
    pub fn pause(&mut self) {
        if self.mode != RecorderMode::Passthrough {
            self.paused = true;
        }
    }

    /// Resume after [`pause`](Self::pause)
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Stop recording or playback; live input is passed through again
    pub fn revert_to_passthrough(&mut self) {
        if self.mode != RecorderMode::Passthrough {
            tracing::debug!("Recorder {:?} -> Passthrough", self.mode);
        }
        self.mode = RecorderMode::Passthrough;
        self.paused = false;
        self.latch.clear();
    }

    /// Alias for [`revert_to_passthrough`](Self::revert_to_passthrough)
    pub fn stop(&mut self) {
        self.revert_to_passthrough();
    }

    /// Move the cursor back to time 0
    ///
    /// An active recording is stopped first.
    pub fn rewind_to_start(&mut self) {
        if self.mode == RecorderMode::Record {
            self.revert_to_passthrough();
        }
        self.set_playback_time(0.0);
    }

    /// Seek the cursor, clamped to the recording
    ///
    /// While recording, everything after the new position is wiped. During
    /// playback the latch is rebuilt from the start on the next tick.
    pub fn set_playback_time(&mut self, time: f32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.skip_to_time(time);
        if self.mode == RecorderMode::Record {
            state.truncate_after_current_time();
        }
        self.latch.clear();
    }

    /// Queue a custom property for the next recorded frame
    ///
    /// Ignored unless recording. The same name/value pair is only queued once.
    pub fn save_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if self.mode != RecorderMode::Record {
            return;
        }
        let property = FrameProperty::new(name, value);
        if !self.pending_properties.contains(&property) {
            self.pending_properties.push_back(property);
        }
    }

    // ------------------------------------------------------------------
    // Per-tick update
    // ------------------------------------------------------------------

    /// Advance the session by `delta_time` seconds
    ///
    /// Call once per host tick, before anything queries input for that tick.
    /// Any error stops the session and leaves the recorder in Passthrough.
    pub fn tick(&mut self, delta_time: f32) -> Result<TickEvent, RecordingError> {
        if self.mode == RecorderMode::Passthrough {
            return Ok(TickEvent::Idle);
        }
        if self.paused {
            return Ok(TickEvent::Paused);
        }

        let result = match self.mode {
            RecorderMode::Record => self.record_current_frame(delta_time),
            RecorderMode::Playback => self.advance_playback(delta_time),
            RecorderMode::Passthrough => Ok(TickEvent::Idle),
        };

        if let Err(e) = &result {
            tracing::error!("Recorder tick failed, reverting to passthrough: {}", e);
            self.revert_to_passthrough();
        }
        result
    }

    /// Append a frame and fill it from live input and queued properties
    ///
    /// [`tick`](Self::tick) calls this in Record mode; calling it directly
    /// skips the mode and pause checks and the fallback to Passthrough.
    pub fn record_current_frame(&mut self, delta_time: f32) -> Result<TickEvent, RecordingError> {
        let state = self
            .state
            .get_or_insert_with(|| RecordingState::new(Arc::new(Recording::new())));
        let frame = state.append_new_recording_frame(delta_time)?;

        self.sample_buffer.clear();
        sample_live_input(&self.input, &self.config, &mut self.sample_buffer);
        for sample in self.sample_buffer.drain(..) {
            state.add_input_to_current_frame(sample)?;
        }

        while let Some(property) = self.pending_properties.pop_front() {
            state.add_property_to_current_frame(property)?;
        }

        Ok(TickEvent::Recorded { frame })
    }

    /// Move the playback cursor and latch any frames it reached
    ///
    /// Like [`record_current_frame`](Self::record_current_frame), this is the
    /// unchecked half of [`tick`](Self::tick).
    pub fn advance_playback(&mut self, delta_time: f32) -> Result<TickEvent, RecordingError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(TickEvent::Idle);
        };

        state.advance_by_time(delta_time);
        if state.time() > state.recording().length() {
            tracing::info!("Playback finished at {}s", state.recording().length());
            for listener in &mut self.finished_listeners {
                listener();
            }
            self.revert_to_passthrough();
            return Ok(TickEvent::FinishedPlayback);
        }

        let Some(frame) = state.frame_index() else {
            return Ok(TickEvent::Held);
        };
        if self.latch.through() == Some(frame) {
            return Ok(TickEvent::Held);
        }

        self.latch.sweep(state.recording(), frame)?;
        Ok(TickEvent::Advanced { frame })
    }

    // ------------------------------------------------------------------
    // Input queries
    // ------------------------------------------------------------------

    fn is_playing_back(&self) -> bool {
        self.mode == RecorderMode::Playback
    }

    pub fn button(&self, name: &str) -> bool {
        if self.is_playing_back() {
            return self.latch.held(name);
        }
        self.input.button(name)
    }

    pub fn button_down(&self, name: &str) -> bool {
        if self.is_playing_back() {
            return self.latch.pressed(name);
        }
        self.input.button_down(name)
    }

    pub fn button_up(&self, name: &str) -> bool {
        if self.is_playing_back() {
            return self.latch.released(name);
        }
        self.input.button_up(name)
    }

    pub fn key(&self, name: &str) -> bool {
        if self.is_playing_back() {
            return self.latch.held(name);
        }
        self.input.key(name)
    }

    pub fn key_down(&self, name: &str) -> bool {
        if self.is_playing_back() {
            return self.latch.pressed(name);
        }
        self.input.key_down(name)
    }

    pub fn key_up(&self, name: &str) -> bool {
        if self.is_playing_back() {
            return self.latch.released(name);
        }
        self.input.key_up(name)
    }

    /// Axis value; 0 during playback if the axis was never recorded
    pub fn axis(&self, name: &str) -> f32 {
        if self.is_playing_back() {
            return self.latch.axis(name);
        }
        self.input.axis(name)
    }

    pub fn mouse_button(&self, button: u8) -> bool {
        if self.is_playing_back() {
            return self.latch.held(&mouse_button_id(button));
        }
        self.input.mouse_button(button)
    }

    pub fn mouse_button_down(&self, button: u8) -> bool {
        if self.is_playing_back() {
            return self.latch.pressed(&mouse_button_id(button));
        }
        self.input.mouse_button_down(button)
    }

    pub fn mouse_button_up(&self, button: u8) -> bool {
        if self.is_playing_back() {
            return self.latch.released(&mouse_button_id(button));
        }
        self.input.mouse_button_up(button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        if self.is_playing_back() {
            return Vec2::new(
                self.latch.axis(MOUSE_POSITION_X),
                self.latch.axis(MOUSE_POSITION_Y),
            );
        }
        self.input.mouse_position()
    }

    /// Latched custom property for the current playback frame
    pub fn try_property(&self, name: &str) -> Option<&str> {
        self.latch.property(name)
    }

    /// Latched custom property, or `""` when absent
    pub fn property(&self, name: &str) -> &str {
        self.try_property(name).unwrap_or_default()
    }
}

fn warn_config(config: &RecorderConfig) {
    for warning in config.validate() {
        tracing::warn!("Recorder config: {}", warning);
    }
}

/// Sample every configured input source into `out`
fn sample_live_input<I: LiveInput>(input: &I, config: &RecorderConfig, out: &mut Vec<InputState>) {
    if config.record_mouse {
        for button in 0..RECORDED_MOUSE_BUTTONS {
            out.push(InputState::button(
                mouse_button_id(button),
                input.mouse_button(button),
            ));
        }
        let position = input.mouse_position();
        out.push(InputState::axis(MOUSE_POSITION_X, position.x));
        out.push(InputState::axis(MOUSE_POSITION_Y, position.y));
    }

    for name in &config.recorded_buttons {
        out.push(InputState::button(name.as_str(), input.button(name)));
    }
    for name in &config.recorded_axes {
        out.push(InputState::axis(name.as_str(), input.axis(name)));
    }
    for name in &config.recorded_keys {
        out.push(InputState::button(name.as_str(), input.key(name)));
    }
}
