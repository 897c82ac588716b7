//! Control input fusion
//!
//! Three mutually exclusive sources (device tilt, touch joystick, keyboard)
//! feed one smoothed gravity vector. Event handlers write per-source state;
//! `InputNormalizer::update` is the single per-frame commit point.

pub mod keyboard;
pub mod normalizer;
pub mod tilt;
pub mod touch;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use keyboard::{KeyState, direction_for_key};
pub use normalizer::InputNormalizer;
pub use tilt::{OrientationSample, ScreenOrientation, TiltState};
pub use touch::{Joystick, TouchState};

/// Input channel currently authoritative for the raw vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMethod {
    Tilt,
    Touch,
    Keyboard,
}

impl InputMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMethod::Tilt => "tilt",
            InputMethod::Touch => "touch",
            InputMethod::Keyboard => "keyboard",
        }
    }
}

/// Directional key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Raw platform event, as forwarded by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Direction),
    KeyUp(Direction),
    /// Touch began at a client position (pixels)
    TouchStart(Vec2),
    /// Touch moved to a client position (pixels)
    TouchMove(Vec2),
    TouchEnd,
    Orientation(OrientationSample),
}
