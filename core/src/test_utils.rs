//! Shared test utilities

use glam::Vec2;
use hashbrown::{HashMap, HashSet};

use crate::input::LiveInput;

/// Live input whose state a test sets before each tick
///
/// Held state and edges are independent: setting a button held does not make
/// it report `button_down`.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pub buttons: HashSet<String>,
    pub buttons_down: HashSet<String>,
    pub buttons_up: HashSet<String>,
    pub keys: HashSet<String>,
    pub keys_down: HashSet<String>,
    pub keys_up: HashSet<String>,
    pub axes: HashMap<String, f32>,
    pub mouse_buttons: [bool; 3],
    pub mouse_buttons_down: [bool; 3],
    pub mouse_buttons_up: [bool; 3],
    pub mouse_position: Vec2,
}

fn set_member(set: &mut HashSet<String>, name: &str, member: bool) {
    if member {
        set.insert(name.to_string());
    } else {
        set.remove(name);
    }
}

fn mouse_flag(flags: &[bool; 3], button: u8) -> bool {
    flags.get(usize::from(button)).copied().unwrap_or(false)
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, name: &str, held: bool) {
        set_member(&mut self.buttons, name, held);
    }

    /// Set the edges reported for a button this tick
    pub fn set_button_edges(&mut self, name: &str, down: bool, up: bool) {
        set_member(&mut self.buttons_down, name, down);
        set_member(&mut self.buttons_up, name, up);
    }

    pub fn set_key(&mut self, name: &str, held: bool) {
        set_member(&mut self.keys, name, held);
    }

    /// Set the edges reported for a key this tick
    pub fn set_key_edges(&mut self, name: &str, down: bool, up: bool) {
        set_member(&mut self.keys_down, name, down);
        set_member(&mut self.keys_up, name, up);
    }

    pub fn set_axis(&mut self, name: &str, value: f32) {
        self.axes.insert(name.to_string(), value);
    }
}

impl LiveInput for ScriptedInput {
    fn button(&self, name: &str) -> bool {
        self.buttons.contains(name)
    }

    fn button_down(&self, name: &str) -> bool {
        self.buttons_down.contains(name)
    }

    fn button_up(&self, name: &str) -> bool {
        self.buttons_up.contains(name)
    }

    fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    fn key(&self, name: &str) -> bool {
        self.keys.contains(name)
    }

    fn key_down(&self, name: &str) -> bool {
        self.keys_down.contains(name)
    }

    fn key_up(&self, name: &str) -> bool {
        self.keys_up.contains(name)
    }

    fn mouse_button(&self, button: u8) -> bool {
        mouse_flag(&self.mouse_buttons, button)
    }

    fn mouse_button_down(&self, button: u8) -> bool {
        mouse_flag(&self.mouse_buttons_down, button)
    }

    fn mouse_button_up(&self, button: u8) -> bool {
        mouse_flag(&self.mouse_buttons_up, button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }
}
