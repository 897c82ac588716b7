//! Input normalizer
//!
//! Arbitrates which source drives the raw vector and commits the smoothed
//! gravity vector once per frame. Priority policy:
//! - Keyboard wins whenever a directional key is held
//! - Tilt takes over on a valid orientation sample and is never pre-empted
//!   by touch; it only steps down on permission denial or failed calibration
//! - Touch takes over on touch start unless tilt is active
//!
//! Event handlers only write per-source state and, for the active source,
//! the raw vector. `update` is the single point where gravity changes.

use glam::Vec2;

use super::keyboard::KeyState;
use super::tilt::{OrientationSample, TiltState};
use super::touch::{Joystick, TouchState, drag_to_raw};
use super::{Direction, InputEvent, InputMethod};
use crate::approach;
use crate::platform::{OrientationSupport, PlatformCapabilities};
use crate::settings::ControlSettings;

/// Unified control input state machine
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    settings: ControlSettings,
    capabilities: PlatformCapabilities,
    active: InputMethod,
    /// Orientation listener attached (sensor usable)
    tilt_enabled: bool,
    /// Waiting on a gesture-gated permission request
    needs_permission: bool,
    /// Torn down; late permission results are dropped until the next init
    detached: bool,
    keys: KeyState,
    touch: TouchState,
    tilt: TiltState,
    raw: Vec2,
    gravity: Vec2,
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new(ControlSettings::default())
    }
}

impl InputNormalizer {
    /// Settings are sanitized before use
    pub fn new(settings: ControlSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            capabilities: PlatformCapabilities::keyboard_only(),
            active: InputMethod::Keyboard,
            tilt_enabled: false,
            needs_permission: false,
            detached: false,
            keys: KeyState::default(),
            touch: TouchState::default(),
            tilt: TiltState::default(),
            raw: Vec2::ZERO,
            gravity: Vec2::ZERO,
        }
    }

    /// Configure for the platform's capabilities; returns the initial source.
    ///
    /// Sensors that need a grant stay detached until `on_permission_result`.
    pub fn init(&mut self, capabilities: PlatformCapabilities) -> InputMethod {
        self.capabilities = capabilities;
        self.active = self.fallback_method();
        self.detached = false;

        match capabilities.orientation {
            OrientationSupport::Available => {
                self.tilt_enabled = true;
                self.needs_permission = false;
            }
            OrientationSupport::RequiresPermission => {
                self.tilt_enabled = false;
                self.needs_permission = true;
                log::info!("Tilt needs permission; waiting for a user gesture");
            }
            OrientationSupport::Unavailable => {
                self.tilt_enabled = false;
                self.needs_permission = false;
                log::warn!("Orientation sensor unavailable");
            }
        }

        log::info!("Input initialized: {}", self.active.as_str());
        self.active
    }

    /// Apply the outcome of a gesture-gated permission request.
    ///
    /// Ignored after `teardown`; returns whether tilt was enabled.
    pub fn on_permission_result(&mut self, granted: bool) -> bool {
        if self.detached {
            log::debug!("Permission result after teardown ignored");
            return false;
        }
        self.needs_permission = false;
        if granted {
            self.tilt_enabled = true;
            self.switch_to(InputMethod::Tilt);
            log::info!("Tilt permission granted");
        } else {
            log::warn!("Tilt permission denied, falling back");
            self.disable_tilt();
        }
        granted
    }

    /// Touch if the platform has it, else keyboard
    fn fallback_method(&self) -> InputMethod {
        if self.capabilities.touch {
            InputMethod::Touch
        } else {
            InputMethod::Keyboard
        }
    }

    fn switch_to(&mut self, method: InputMethod) {
        if self.active != method {
            log::debug!("Input source: {} -> {}", self.active.as_str(), method.as_str());
            self.active = method;
        }
    }

    fn disable_tilt(&mut self) {
        self.tilt_enabled = false;
        if self.active == InputMethod::Tilt {
            self.switch_to(self.fallback_method());
            self.raw = Vec2::ZERO;
        }
    }

    /// Dispatch a platform event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(dir) => self.key_down(dir),
            InputEvent::KeyUp(dir) => self.key_up(dir),
            InputEvent::TouchStart(at) => self.touch_start(at),
            InputEvent::TouchMove(at) => self.touch_move(at),
            InputEvent::TouchEnd => self.touch_end(),
            InputEvent::Orientation(sample) => self.orientation(&sample),
        }
    }

    pub fn key_down(&mut self, dir: Direction) {
        self.keys.set(dir, true);
    }

    pub fn key_up(&mut self, dir: Direction) {
        self.keys.set(dir, false);
    }

    pub fn touch_start(&mut self, at: Vec2) {
        self.touch.begin(at);
        if self.active != InputMethod::Tilt {
            self.switch_to(InputMethod::Touch);
            self.raw = Vec2::ZERO;
        }
    }

    pub fn touch_move(&mut self, at: Vec2) {
        let Some(drag) = self.touch.move_to(at) else {
            return;
        };
        if self.active == InputMethod::Touch {
            self.raw = drag_to_raw(
                drag,
                self.settings.joystick_radius,
                self.settings.touch_sensitivity,
            );
        }
    }

    pub fn touch_end(&mut self) {
        self.touch.end();
        if self.active == InputMethod::Touch {
            self.raw = Vec2::ZERO;
        }
    }

    /// Orientation sensor sample. Invalid samples leave everything untouched.
    pub fn orientation(&mut self, sample: &OrientationSample) {
        if !self.tilt_enabled {
            return;
        }
        let Some(raw) = self.tilt.process(sample, &self.settings) else {
            return;
        };
        // Held keys keep priority; tilt reclaims once they are released
        if self.keys.any() {
            return;
        }
        self.switch_to(InputMethod::Tilt);
        self.raw = raw;
    }

    /// Treat the current tilt reading as level.
    ///
    /// Fails if no reading has arrived; an active tilt then hands over to the
    /// fallback until the next valid sample.
    pub fn calibrate(&mut self) -> bool {
        if self.tilt.calibrate() {
            if self.active == InputMethod::Tilt {
                self.raw = Vec2::ZERO;
            }
            log::info!("Tilt calibrated at {:?}", self.tilt.offset());
            true
        } else {
            log::warn!("Calibration failed: no tilt reading");
            // Listener stays attached so a later sample can still take over
            if self.active == InputMethod::Tilt {
                self.switch_to(self.fallback_method());
                self.raw = Vec2::ZERO;
            }
            false
        }
    }

    /// Advance one frame: resolve the source, then smooth gravity toward raw
    pub fn update(&mut self) {
        if self.keys.any() {
            self.switch_to(InputMethod::Keyboard);
            self.raw = self.keys.vector() * self.settings.keyboard_sensitivity;
        } else if self.active == InputMethod::Keyboard {
            self.raw = Vec2::ZERO;
        }

        let factor = self.settings.smoothing;
        let eps = self.settings.gravity_epsilon;
        let smooth = |g: f32, r: f32| {
            let g = approach(g, r, factor, eps);
            if g.abs() < eps { 0.0 } else { g }
        };
        self.gravity = Vec2::new(
            smooth(self.gravity.x, self.raw.x),
            smooth(self.gravity.y, self.raw.y),
        );
    }

    /// Clear all per-source state and zero the vectors
    pub fn reset(&mut self) {
        self.keys.clear();
        self.touch.reset();
        self.tilt.reset();
        self.raw = Vec2::ZERO;
        self.gravity = Vec2::ZERO;
    }

    /// Detach: stop accepting sensor samples and clear state
    pub fn teardown(&mut self) {
        self.reset();
        self.tilt_enabled = false;
        self.needs_permission = false;
        self.detached = true;
        self.active = self.fallback_method();
        log::info!("Input detached");
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    pub fn active_method(&self) -> InputMethod {
        self.active
    }

    pub fn is_tilt_available(&self) -> bool {
        self.tilt_enabled
    }

    pub fn needs_permission(&self) -> bool {
        self.needs_permission
    }

    /// Joystick visual for the renderer, while a touch is down
    pub fn joystick(&self) -> Option<Joystick> {
        self.touch.joystick(self.settings.joystick_radius)
    }

    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ControlSettings) {
        self.settings = settings.sanitized();
    }
}
