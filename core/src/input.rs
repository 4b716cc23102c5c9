//! Live input capability
//!
//! The recorder never talks to a device directly. Hosts implement
//! [`LiveInput`] over whatever input backend they use and hand it to the
//! [`Recorder`](crate::replay::Recorder).

use glam::Vec2;

/// Current state of the live input devices
///
/// Button and key names are whatever the host's input layer uses; the
/// recorder stores them verbatim as input ids. The edge queries default to
/// `false` for backends that only expose held state.
pub trait LiveInput {
    /// Whether the named virtual button is held
    fn button(&self, name: &str) -> bool;

    /// Whether the named virtual button went down this tick
    fn button_down(&self, _name: &str) -> bool {
        false
    }

    /// Whether the named virtual button was released this tick
    fn button_up(&self, _name: &str) -> bool {
        false
    }

    /// Value of the named axis
    fn axis(&self, name: &str) -> f32;

    /// Whether the named keyboard key is held
    fn key(&self, name: &str) -> bool;

    fn key_down(&self, _name: &str) -> bool {
        false
    }

    fn key_up(&self, _name: &str) -> bool {
        false
    }

    /// Whether mouse button `button` (0 = primary) is held
    fn mouse_button(&self, button: u8) -> bool;

    fn mouse_button_down(&self, _button: u8) -> bool {
        false
    }

    fn mouse_button_up(&self, _button: u8) -> bool {
        false
    }

    /// Mouse position in host screen coordinates
    fn mouse_position(&self) -> Vec2;
}

/// Input source that reports nothing pressed and every axis at rest
///
/// Useful for playback-only recorders with no live device attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInput;

impl LiveInput for NullInput {
    fn button(&self, _name: &str) -> bool {
        false
    }

    fn axis(&self, _name: &str) -> f32 {
        0.0
    }

    fn key(&self, _name: &str) -> bool {
        false
    }

    fn mouse_button(&self, _button: u8) -> bool {
        false
    }

    fn mouse_position(&self) -> Vec2 {
        Vec2::ZERO
    }
}
