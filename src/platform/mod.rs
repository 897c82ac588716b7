//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall-clock seeding)
//! - Input capability detection (orientation sensor, touch)
//! - Input events and the gesture-gated sensor permission (web)

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Orientation sensor availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrientationSupport {
    /// No sensor API, or an insecure context
    #[default]
    Unavailable,
    /// Events can be listened to right away
    Available,
    /// Listening needs an explicit grant from a user-gesture handler
    RequiresPermission,
}

/// What input hardware the platform offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformCapabilities {
    pub orientation: OrientationSupport,
    pub touch: bool,
}

impl PlatformCapabilities {
    /// Keyboard only (desktop native)
    pub fn keyboard_only() -> Self {
        Self::default()
    }

    /// Probe the running platform
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        web::detect_capabilities()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::keyboard_only()
    }
}

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
