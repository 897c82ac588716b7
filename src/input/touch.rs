//! Touch joystick state

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Joystick visual: base anchored at the touch start, knob at the clamped drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joystick {
    pub base: Vec2,
    pub knob: Vec2,
}

/// Clamp a drag to `radius` (direction kept) and rescale to the raw range
pub fn drag_to_raw(drag: Vec2, radius: f32, sensitivity: f32) -> Vec2 {
    drag.clamp_length_max(radius) / radius * sensitivity
}

/// Active drag state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchState {
    active: bool,
    start: Vec2,
    current: Vec2,
}

impl TouchState {
    pub fn begin(&mut self, at: Vec2) {
        self.active = true;
        self.start = at;
        self.current = at;
    }

    /// Record a move; returns the drag vector from the start point
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        self.current = at;
        Some(self.current - self.start)
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Visual for the current drag, None while no touch is down
    pub fn joystick(&self, radius: f32) -> Option<Joystick> {
        self.active.then(|| Joystick {
            base: self.start,
            knob: self.start + (self.current - self.start).clamp_length_max(radius),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
