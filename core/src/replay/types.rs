//! Core value types for recordings
//!
//! A [`Frame`] is one time-stamped sample: the state of every tracked input
//! plus any custom properties saved during that tick.

use serde::{Deserialize, Serialize};

/// Synthetic input id for the recorded mouse X position
pub const MOUSE_POSITION_X: &str = "MOUSE_POSITION_X";
/// Synthetic input id for the recorded mouse Y position
pub const MOUSE_POSITION_Y: &str = "MOUSE_POSITION_Y";
/// Prefix of the synthetic mouse button ids (`MOUSE_BUTTON_0` ..)
pub const MOUSE_BUTTON_PREFIX: &str = "MOUSE_BUTTON_";

/// Number of mouse buttons captured when mouse recording is enabled
pub const RECORDED_MOUSE_BUTTONS: u8 = 3;

/// Input id used to store the given mouse button
pub fn mouse_button_id(button: u8) -> String {
    format!("{MOUSE_BUTTON_PREFIX}{button}")
}

/// Whether `id` is one of the ids produced by mouse capture
pub fn is_reserved_input_id(id: &str) -> bool {
    if id == MOUSE_POSITION_X || id == MOUSE_POSITION_Y {
        return true;
    }
    id.strip_prefix(MOUSE_BUTTON_PREFIX)
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| n < RECORDED_MOUSE_BUTTONS)
}

/// Sampled state of a single input source during one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputState {
    pub input_id: String,
    #[serde(default)]
    pub button_state: bool,
    /// Processed axis value (not raw device counts)
    #[serde(default)]
    pub axis_value: f32,
}

impl InputState {
    /// A button-valued sample (axis value is 0)
    pub fn button(input_id: impl Into<String>, pressed: bool) -> Self {
        Self {
            input_id: input_id.into(),
            button_state: pressed,
            axis_value: 0.0,
        }
    }

    /// An axis-valued sample (button state is released)
    pub fn axis(input_id: impl Into<String>, value: f32) -> Self {
        Self {
            input_id: input_id.into(),
            button_state: false,
            axis_value: value,
        }
    }
}

/// Arbitrary named value stored alongside a frame's inputs
///
/// Used for syncing non-input events: spawned enemies, opened doors,
/// serialized transforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameProperty {
    pub name: String,
    pub value: String,
}

impl FrameProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One recorded frame
///
/// Inputs are unique by `input_id` and properties unique by `name`; both keep
/// first-insertion order so serialized output is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub time: f32,
    #[serde(rename = "inputManagerStates", default)]
    inputs: Vec<InputState>,
    #[serde(rename = "syncedProperties", default)]
    properties: Vec<FrameProperty>,
}

impl Frame {
    /// Create an empty frame at the given time
    pub fn new(time: f32) -> Self {
        Self {
            time,
            inputs: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// All input states in this frame
    pub fn inputs(&self) -> &[InputState] {
        &self.inputs
    }

    /// All custom properties in this frame
    pub fn properties(&self) -> &[FrameProperty] {
        &self.properties
    }

    /// Look up an input by id
    pub fn input(&self, input_id: &str) -> Option<&InputState> {
        self.inputs.iter().find(|s| s.input_id == input_id)
    }

    /// Look up a property value by name
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Insert or overwrite the state for `state.input_id`
    pub fn upsert_input(&mut self, state: InputState) {
        match self.inputs.iter_mut().find(|s| s.input_id == state.input_id) {
            Some(existing) => *existing = state,
            None => self.inputs.push(state),
        }
    }

    /// Insert or overwrite the property named `property.name`
    pub fn upsert_property(&mut self, property: FrameProperty) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    /// First input id that appears more than once, if any
    pub(crate) fn duplicate_input(&self) -> Option<&str> {
        self.inputs.iter().enumerate().find_map(|(i, s)| {
            self.inputs[..i]
                .iter()
                .any(|prev| prev.input_id == s.input_id)
                .then_some(s.input_id.as_str())
        })
    }

    /// First property name that appears more than once, if any
    pub(crate) fn duplicate_property(&self) -> Option<&str> {
        self.properties.iter().enumerate().find_map(|(i, p)| {
            self.properties[..i]
                .iter()
                .any(|prev| prev.name == p.name)
                .then_some(p.name.as_str())
        })
    }
}
