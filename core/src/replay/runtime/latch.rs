//! Latched playback snapshots
//!
//! Playback answers queries from a snapshot built by overlaying every
//! recorded frame the cursor has reached. Edge queries (down/up) report the
//! button transitions seen while overlaying the frames of the latest sweep.

use crate::replay::recording::{Recording, RecordingError};
use crate::replay::types::{FrameProperty, InputState};
use hashbrown::{HashMap, HashSet};

/// Latched input state for one playback session
#[derive(Debug, Default)]
pub struct FrameLatch {
    inputs: HashMap<String, InputState>,
    properties: HashMap<String, String>,
    /// Buttons that went up-to-down during the latest sweep
    rose: HashSet<String>,
    /// Buttons that went down-to-up during the latest sweep
    fell: HashSet<String>,
    /// Highest recorded frame folded into `inputs`
    through: Option<usize>,
    input_scratch: Vec<InputState>,
    property_scratch: Vec<FrameProperty>,
}

impl FrameLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything latched so far
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.properties.clear();
        self.rose.clear();
        self.fell.clear();
        self.through = None;
    }

    /// Last frame folded into the snapshot
    pub fn through(&self) -> Option<usize> {
        self.through
    }

    /// Latch every frame after the previous sweep up to and including `target`
    ///
    /// Frames are overlaid in order keyed by input id, so held state, axes
    /// and properties end up last-write-wins. Every button transition along
    /// the way is kept as an edge: a press and release inside one sweep
    /// reports both edges and leaves the button up. If `target` is behind the
    /// previous sweep only `target` itself is overlaid.
    pub fn sweep(&mut self, recording: &Recording, target: usize) -> Result<(), RecordingError> {
        self.rose.clear();
        self.fell.clear();

        let start = match self.through {
            Some(through) if through < target => through + 1,
            Some(_) => target,
            None => 0,
        };

        for index in start..=target {
            self.input_scratch.clear();
            recording.inputs_into(index, &mut self.input_scratch)?;
            for state in self.input_scratch.drain(..) {
                let was_held = self.inputs.get(&state.input_id).is_some_and(|s| s.button_state);
                if state.button_state && !was_held {
                    self.rose.insert(state.input_id.clone());
                } else if !state.button_state && was_held {
                    self.fell.insert(state.input_id.clone());
                }
                self.inputs.insert(state.input_id.clone(), state);
            }

            self.property_scratch.clear();
            recording.properties_into(index, &mut self.property_scratch)?;
            for property in self.property_scratch.drain(..) {
                self.properties.insert(property.name, property.value);
            }
        }

        self.through = Some(target);
        Ok(())
    }

    /// Whether the button is held in the snapshot
    pub fn held(&self, input_id: &str) -> bool {
        self.inputs.get(input_id).is_some_and(|s| s.button_state)
    }

    /// Button went down during the latest sweep
    pub fn pressed(&self, input_id: &str) -> bool {
        self.rose.contains(input_id)
    }

    /// Button went up during the latest sweep
    pub fn released(&self, input_id: &str) -> bool {
        self.fell.contains(input_id)
    }

    /// Latched axis value, 0 if never recorded
    pub fn axis(&self, input_id: &str) -> f32 {
        self.inputs.get(input_id).map_or(0.0, |s| s.axis_value)
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}
