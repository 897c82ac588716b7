//! Browser platform
//!
//! Probes sensor/touch support, forwards DOM input events into the
//! `InputNormalizer`, performs the gesture-gated orientation permission
//! request and exposes `WebMaze` to the JavaScript host loop.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{DeviceOrientationEvent, Event, EventTarget, KeyboardEvent, TouchEvent};

use super::{OrientationSupport, PlatformCapabilities};
use crate::input::{
    InputEvent, InputNormalizer, OrientationSample, ScreenOrientation, direction_for_key,
};
use crate::settings::Settings;
use crate::sim::MazeGenerator;

// Sensor probing and the permission call. `requestPermission` only works
// when called synchronously from a user-gesture handler.
#[wasm_bindgen(inline_js = "
    export function orientation_support() {
        if (typeof window === 'undefined'
            || typeof DeviceOrientationEvent === 'undefined'
            || !window.isSecureContext) {
            return 0;
        }
        if (typeof DeviceOrientationEvent.requestPermission === 'function') {
            return 2;
        }
        return 1;
    }

    export function has_touch() {
        return ('ontouchstart' in window) || (navigator.maxTouchPoints || 0) > 0;
    }

    export function request_orientation_permission() {
        if (typeof DeviceOrientationEvent === 'undefined') {
            return Promise.resolve(false);
        }
        if (typeof DeviceOrientationEvent.requestPermission !== 'function') {
            return Promise.resolve(true);
        }
        return DeviceOrientationEvent.requestPermission()
            .then(state => state === 'granted')
            .catch(() => false);
    }
")]
extern "C" {
    fn orientation_support() -> u32;
    fn has_touch() -> bool;
    fn request_orientation_permission() -> js_sys::Promise;
}

/// Probe the browser for orientation and touch support
pub fn detect_capabilities() -> PlatformCapabilities {
    let orientation = match orientation_support() {
        2 => OrientationSupport::RequiresPermission,
        1 => OrientationSupport::Available,
        _ => OrientationSupport::Unavailable,
    };
    PlatformCapabilities {
        orientation,
        touch: has_touch(),
    }
}

fn screen_orientation() -> ScreenOrientation {
    let Some(window) = web_sys::window() else {
        return ScreenOrientation::Portrait;
    };
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    if w > h {
        ScreenOrientation::Landscape
    } else {
        ScreenOrientation::Portrait
    }
}

/// Per-session game core shared with DOM callbacks
struct Session {
    maze: MazeGenerator,
    input: InputNormalizer,
}

type Listener = Closure<dyn FnMut(Event)>;

/// Attached DOM listeners, kept so teardown can remove them
#[derive(Default)]
struct Listeners {
    attached: Vec<(EventTarget, &'static str, Listener)>,
}

impl Listeners {
    fn add(&mut self, target: &EventTarget, kind: &'static str, listener: Listener) {
        match target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref()) {
            Ok(()) => self.attached.push((target.clone(), kind, listener)),
            Err(_) => log::warn!("Failed to attach {} listener", kind),
        }
    }

    fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    fn detach(&mut self) {
        for (target, kind, listener) in self.attached.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}

/// Wrap a DOM-event translator into a listener feeding the session
fn forward<F>(session: &Rc<RefCell<Session>>, translate: F) -> Listener
where
    F: Fn(&Event) -> Option<InputEvent> + 'static,
{
    let session = session.clone();
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(input_event) = translate(&event) {
            session.borrow_mut().input.handle(input_event);
        }
    })
}

fn first_touch(event: &Event) -> Option<Vec2> {
    let event = event.dyn_ref::<TouchEvent>()?;
    event.prevent_default();
    let touch = event.touches().get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}

fn key_event(event: &Event, down: bool) -> Option<InputEvent> {
    let event = event.dyn_ref::<KeyboardEvent>()?;
    let dir = direction_for_key(&event.key())?;
    event.prevent_default();
    Some(if down {
        InputEvent::KeyDown(dir)
    } else {
        InputEvent::KeyUp(dir)
    })
}

fn orientation_event(event: &Event) -> Option<InputEvent> {
    let event = event.dyn_ref::<DeviceOrientationEvent>()?;
    Some(InputEvent::Orientation(OrientationSample {
        beta: event.beta().map(|v| v as f32),
        gamma: event.gamma().map(|v| v as f32),
        orientation: screen_orientation(),
    }))
}

fn attach_orientation(session: &Rc<RefCell<Session>>, listeners: &mut Listeners) {
    if !listeners.is_empty() {
        return;
    }
    if let Some(window) = web_sys::window() {
        listeners.add(&window, "deviceorientation", forward(session, orientation_event));
        log::info!("Orientation listener attached");
    }
}

/// Show/hide the `#joystick` and `#joystick-knob` elements if the page has them
fn sync_joystick(input: &InputNormalizer) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (base, knob) = (
        document.get_element_by_id("joystick"),
        document.get_element_by_id("joystick-knob"),
    );
    let place = |el: &Option<web_sys::Element>, at: Option<Vec2>| {
        if let Some(el) = el {
            let style = match at {
                Some(p) => format!("display:block;left:{}px;top:{}px", p.x, p.y),
                None => "display:none".to_string(),
            };
            let _ = el.set_attribute("style", &style);
        }
    };
    let stick = input.joystick();
    place(&base, stick.map(|s| s.base));
    place(&knob, stick.map(|s| s.knob));
}

/// Set up logging for the browser
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Tilt Maze starting...");
}

/// Handle the JavaScript host holds for one game session
#[wasm_bindgen]
pub struct WebMaze {
    session: Rc<RefCell<Session>>,
    listeners: Listeners,
    orientation: Rc<RefCell<Listeners>>,
}

impl Default for WebMaze {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebMaze {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebMaze {
        let settings = Settings::load();
        let session = Session {
            maze: MazeGenerator::new(settings.maze.clone()),
            input: InputNormalizer::new(settings.effective_controls()),
        };
        WebMaze {
            session: Rc::new(RefCell::new(session)),
            listeners: Listeners::default(),
            orientation: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    /// Detect capabilities and attach listeners; returns the initial source
    pub fn init(&mut self) -> String {
        let caps = detect_capabilities();
        let method = self.session.borrow_mut().input.init(caps);

        if let Some(window) = web_sys::window() {
            let session = &self.session;
            self.listeners
                .add(&window, "keydown", forward(session, |e| key_event(e, true)));
            self.listeners
                .add(&window, "keyup", forward(session, |e| key_event(e, false)));
            if caps.touch {
                self.listeners.add(
                    &window,
                    "touchstart",
                    forward(session, |e| first_touch(e).map(InputEvent::TouchStart)),
                );
                self.listeners.add(
                    &window,
                    "touchmove",
                    forward(session, |e| first_touch(e).map(InputEvent::TouchMove)),
                );
                for kind in ["touchend", "touchcancel"] {
                    self.listeners
                        .add(&window, kind, forward(session, |_| Some(InputEvent::TouchEnd)));
                }
            }
        }

        if caps.orientation == OrientationSupport::Available {
            attach_orientation(&self.session, &mut self.orientation.borrow_mut());
        }

        method.as_str().to_string()
    }

    /// Ask for sensor access. Must be called from a user-gesture handler.
    /// Resolves to whether tilt was granted.
    pub fn request_permission(&self) -> js_sys::Promise {
        // Issued before any await so it stays inside the gesture
        let request = request_orientation_permission();
        let session = self.session.clone();
        let orientation = self.orientation.clone();

        future_to_promise(async move {
            let granted = JsFuture::from(request)
                .await
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            // The session may have been torn down while the prompt was open
            if session.borrow().input.is_detached() {
                log::debug!("Dropping permission result for a torn-down session");
                return Ok(JsValue::FALSE);
            }
            if granted {
                attach_orientation(&session, &mut orientation.borrow_mut());
            }
            let enabled = session.borrow_mut().input.on_permission_result(granted);
            Ok(JsValue::from_bool(enabled))
        })
    }

    pub fn needs_permission(&self) -> bool {
        self.session.borrow().input.needs_permission()
    }

    /// Generate the maze for a level (wall-clock seed)
    pub fn init_level(&self, level: u32, canvas_width: f32, canvas_height: f32) {
        self.session
            .borrow_mut()
            .maze
            .init(level, canvas_width, canvas_height);
    }

    /// Generate the maze for a level from a fixed seed
    pub fn init_level_with_seed(&self, level: u32, canvas_width: f32, canvas_height: f32, seed: u32) {
        self.session
            .borrow_mut()
            .maze
            .init_with_seed(level, canvas_width, canvas_height, seed);
    }

    /// Per-frame input commit; call before reading gravity
    pub fn update(&self) {
        let mut session = self.session.borrow_mut();
        session.input.update();
        sync_joystick(&session.input);
    }

    pub fn gravity_x(&self) -> f32 {
        self.session.borrow().input.gravity().x
    }

    pub fn gravity_y(&self) -> f32 {
        self.session.borrow().input.gravity().y
    }

    pub fn active_method(&self) -> String {
        self.session.borrow().input.active_method().as_str().to_string()
    }

    pub fn calibrate(&self) -> bool {
        self.session.borrow_mut().input.calibrate()
    }

    pub fn reset(&self) {
        self.session.borrow_mut().input.reset();
    }

    /// Wall rects, exit zones, entry and size as JSON
    pub fn layout_json(&self) -> String {
        serde_json::to_string(self.session.borrow().maze.layout()).unwrap_or_default()
    }

    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        self.session.borrow().maze.is_wall(x, y)
    }

    /// Score of the exit zone under `x`, undefined if none
    pub fn exit_score_for_x(&self, x: f32) -> Option<u32> {
        self.session.borrow().maze.exit_zone_for_x(x).map(|z| z.score)
    }

    /// Spawn points flattened as [x0, y0, x1, y1, ...]
    pub fn spawn_positions(&self, count: usize) -> Vec<f32> {
        self.session
            .borrow()
            .maze
            .spawn_positions(count)
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// Replace settings from JSON and persist them. False if the JSON is invalid.
    pub fn apply_settings_json(&self, json: &str) -> bool {
        match Settings::from_json(json) {
            Ok(settings) => {
                let mut session = self.session.borrow_mut();
                session.input.set_settings(settings.effective_controls());
                session.maze.set_settings(settings.maze.clone());
                settings.save();
                true
            }
            Err(e) => {
                log::warn!("Rejected settings: {}", e);
                false
            }
        }
    }

    /// Remove every DOM listener and detach input
    pub fn teardown(&mut self) {
        self.listeners.detach();
        self.orientation.borrow_mut().detach();
        self.session.borrow_mut().input.teardown();
    }
}
