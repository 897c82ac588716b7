//! Game settings and tuning
//!
//! Persisted in LocalStorage on the web. Values here are the constants the
//! maze and control cores read at runtime.

use serde::{Deserialize, Serialize};

/// Control sensitivity presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SensitivityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl SensitivityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitivityPreset::Low => "Low",
            SensitivityPreset::Medium => "Medium",
            SensitivityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(SensitivityPreset::Low),
            "medium" | "med" => Some(SensitivityPreset::Medium),
            "high" => Some(SensitivityPreset::High),
            _ => None,
        }
    }

    /// Multiplier applied to every input sensitivity
    pub fn multiplier(&self) -> f32 {
        match self {
            SensitivityPreset::Low => 0.6,
            SensitivityPreset::Medium => 1.0,
            SensitivityPreset::High => 1.4,
        }
    }
}

/// Maze layout tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    /// Height of the scored exit strip below the maze (pixels)
    pub exit_zone_height: f32,
    /// Ball radius, used for spawn spacing (pixels)
    pub ball_radius: f32,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            exit_zone_height: 60.0,
            ball_radius: 8.0,
        }
    }
}

/// Input tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Tilt angles under this (degrees) read as zero
    pub tilt_dead_zone: f32,
    /// Tilt angle (degrees) that maps to full deflection
    pub max_tilt_angle: f32,
    pub tilt_sensitivity: f32,
    pub touch_sensitivity: f32,
    pub keyboard_sensitivity: f32,
    /// Per-frame smoothing factor in (0, 1]; smaller is slower
    pub smoothing: f32,
    /// Gravity axes closer than this to their target or zero snap to it
    pub gravity_epsilon: f32,
    /// Joystick drag radius (pixels) that maps to full deflection
    pub joystick_radius: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            tilt_dead_zone: 2.0,
            max_tilt_angle: 30.0,
            tilt_sensitivity: 1.0,
            touch_sensitivity: 1.0,
            keyboard_sensitivity: 1.0,
            smoothing: 0.15,
            gravity_epsilon: 0.001,
            joystick_radius: 50.0,
        }
    }
}

impl ControlSettings {
    /// Clamp values into usable ranges. NaN and non-positive divisors fall
    /// back to defaults so the tilt clamp and joystick scale stay finite.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.smoothing > 0.0) {
            self.smoothing = defaults.smoothing;
        }
        self.smoothing = self.smoothing.min(1.0);
        if !(self.max_tilt_angle > 0.0) {
            self.max_tilt_angle = defaults.max_tilt_angle;
        }
        if !(self.joystick_radius > 0.0) {
            self.joystick_radius = defaults.joystick_radius;
        }
        if !(self.tilt_dead_zone >= 0.0) {
            self.tilt_dead_zone = 0.0;
        }
        if !(self.gravity_epsilon >= 0.0) {
            self.gravity_epsilon = 0.0;
        }
        for sensitivity in [
            &mut self.tilt_sensitivity,
            &mut self.touch_sensitivity,
            &mut self.keyboard_sensitivity,
        ] {
            if !sensitivity.is_finite() {
                *sensitivity = 1.0;
            }
        }
        self
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Sensitivity preset
    pub sensitivity: SensitivityPreset,
    pub maze: MazeSettings,
    pub controls: ControlSettings,
}

impl Settings {
    /// Create settings from a sensitivity preset
    pub fn from_preset(preset: SensitivityPreset) -> Self {
        let mut settings = Self::default();
        settings.sensitivity = preset;
        settings
    }

    /// Controls with the sensitivity preset applied
    pub fn effective_controls(&self) -> ControlSettings {
        let m = self.sensitivity.multiplier();
        let mut controls = self.controls.clone();
        controls.tilt_sensitivity *= m;
        controls.touch_sensitivity *= m;
        controls.keyboard_sensitivity *= m;
        controls
    }

    /// Clamp values into usable ranges
    pub fn sanitized(mut self) -> Self {
        self.controls = self.controls.sanitized();

        let maze_defaults = MazeSettings::default();
        if !(self.maze.ball_radius > 0.0) {
            self.maze.ball_radius = maze_defaults.ball_radius;
        }
        if !(self.maze.exit_zone_height >= 0.0) {
            self.maze.exit_zone_height = maze_defaults.exit_zone_height;
        }
        self
    }

    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tilt_maze_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(SensitivityPreset::from_str("HIGH"), Some(SensitivityPreset::High));
        assert_eq!(SensitivityPreset::from_str("med"), Some(SensitivityPreset::Medium));
        assert_eq!(SensitivityPreset::from_str("extreme"), None);
        assert_eq!(SensitivityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_effective_controls_scale_sensitivity() {
        let settings = Settings::from_preset(SensitivityPreset::High);
        let c = settings.effective_controls();
        assert!((c.tilt_sensitivity - 1.4).abs() < 1e-6);
        assert!((c.touch_sensitivity - 1.4).abs() < 1e-6);
        assert_eq!(c.smoothing, settings.controls.smoothing);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{"controls":{"smoothing":0.5}}"#).unwrap();
        assert_eq!(s.controls.smoothing, 0.5);
        assert_eq!(s.controls.joystick_radius, 50.0);
        assert_eq!(s.maze, MazeSettings::default());
    }

    #[test]
    fn test_sanitize_clamps_smoothing() {
        let s = Settings::from_json(r#"{"controls":{"smoothing":3.0}}"#).unwrap();
        assert_eq!(s.controls.smoothing, 1.0);
        let s = Settings::from_json(r#"{"controls":{"smoothing":0.0}}"#).unwrap();
        assert_eq!(s.controls.smoothing, 0.15);
    }

    #[test]
    fn test_control_sanitize_replaces_bad_divisors() {
        let c = ControlSettings {
            max_tilt_angle: -5.0,
            joystick_radius: 0.0,
            smoothing: f32::NAN,
            tilt_dead_zone: f32::NAN,
            touch_sensitivity: f32::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(c.max_tilt_angle, 30.0);
        assert_eq!(c.joystick_radius, 50.0);
        assert_eq!(c.smoothing, 0.15);
        assert_eq!(c.tilt_dead_zone, 0.0);
        assert_eq!(c.touch_sensitivity, 1.0);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings::from_preset(SensitivityPreset::Low);
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
