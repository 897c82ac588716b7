//! Device tilt processing
//!
//! Pipeline per sample: remap device axes to screen axes, subtract the
//! calibration offset, apply the deadband, clamp to the max angle, then
//! rescale into the sensitivity-scaled raw vector.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::ControlSettings;

/// Screen orientation at the time of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// One device-orientation reading (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationSample {
    /// Front-to-back tilt
    pub beta: Option<f32>,
    /// Left-to-right tilt
    pub gamma: Option<f32>,
    pub orientation: ScreenOrientation,
}

impl OrientationSample {
    pub fn new(beta: f32, gamma: f32, orientation: ScreenOrientation) -> Self {
        Self {
            beta: Some(beta),
            gamma: Some(gamma),
            orientation,
        }
    }
}

/// Map device angles onto screen x/y
///
/// The device frame rotates with the screen, so landscape swaps the axes
/// and inverts one of them.
pub fn remap(beta: f32, gamma: f32, orientation: ScreenOrientation) -> Vec2 {
    match orientation {
        ScreenOrientation::Portrait => Vec2::new(gamma, beta),
        ScreenOrientation::Landscape => Vec2::new(beta, -gamma),
    }
}

#[inline]
fn deadband(angle: f32, dead_zone: f32) -> f32 {
    if angle.abs() < dead_zone { 0.0 } else { angle }
}

/// Tilt source state: last reading and calibration offset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TiltState {
    /// Last remapped reading, before calibration
    last_reading: Option<Vec2>,
    offset: Vec2,
}

impl TiltState {
    /// Process a sample into a raw vector. None when an angle is missing.
    pub fn process(&mut self, sample: &OrientationSample, settings: &ControlSettings) -> Option<Vec2> {
        let (beta, gamma) = (sample.beta?, sample.gamma?);
        let reading = remap(beta, gamma, sample.orientation);
        self.last_reading = Some(reading);

        let max = settings.max_tilt_angle;
        let angles = reading - self.offset;
        let shaped = Vec2::new(
            deadband(angles.x, settings.tilt_dead_zone).clamp(-max, max),
            deadband(angles.y, settings.tilt_dead_zone).clamp(-max, max),
        );
        Some(shaped / max * settings.tilt_sensitivity)
    }

    /// Treat the current reading as level. False if nothing was read yet.
    pub fn calibrate(&mut self) -> bool {
        match self.last_reading {
            Some(reading) => {
                self.offset = reading;
                true
            }
            None => false,
        }
    }

    pub fn has_reading(&self) -> bool {
        self.last_reading.is_some()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
