//! Property tests for input normalization

use glam::Vec2;
use proptest::prelude::*;
use tilt_maze::input::{Direction, OrientationSample, ScreenOrientation};
use tilt_maze::platform::{OrientationSupport, PlatformCapabilities};
use tilt_maze::settings::ControlSettings;
use tilt_maze::{InputEvent, InputMethod, InputNormalizer};

fn touch_only(settings: ControlSettings) -> InputNormalizer {
    let mut input = InputNormalizer::new(settings);
    input.init(PlatformCapabilities {
        orientation: OrientationSupport::Unavailable,
        touch: true,
    });
    input
}

#[test]
fn gravity_converges_monotonically_without_overshoot() {
    let mut input = InputNormalizer::default();
    input.handle(InputEvent::KeyDown(Direction::Right));

    let mut prev = 0.0;
    let mut stable_at = None;
    for frame in 0..500 {
        input.update();
        let x = input.gravity().x;
        assert!(x >= prev, "frame {}: {} < {}", frame, x, prev);
        assert!(x <= 1.0, "frame {}: overshoot {}", frame, x);
        if x == 1.0 && stable_at.is_none() {
            stable_at = Some(frame);
        }
        prev = x;
    }
    assert!(stable_at.is_some());

    for _ in 0..10 {
        input.update();
        assert_eq!(input.gravity().x, 1.0);
    }
}

#[test]
fn keyboard_preempts_active_tilt() {
    let mut input = InputNormalizer::default();
    input.init(PlatformCapabilities {
        orientation: OrientationSupport::Available,
        touch: true,
    });
    input.handle(InputEvent::Orientation(OrientationSample::new(
        10.0,
        20.0,
        ScreenOrientation::Portrait,
    )));
    assert_eq!(input.active_method(), InputMethod::Tilt);
    assert_ne!(input.raw(), Vec2::ZERO);

    input.handle(InputEvent::KeyDown(Direction::Down));
    input.update();
    assert_eq!(input.active_method(), InputMethod::Keyboard);
}

#[test]
fn opposing_keys_cancel() {
    let mut input = InputNormalizer::default();
    input.handle(InputEvent::KeyDown(Direction::Left));
    input.handle(InputEvent::KeyDown(Direction::Right));
    input.update();
    assert_eq!(input.raw().x, 0.0);
}

proptest! {
    #[test]
    fn touch_drag_beyond_radius_is_clamped(
        angle in 0.0f32..std::f32::consts::TAU,
        distance in 50.5f32..2000.0,
        sensitivity in 0.1f32..3.0,
    ) {
        let settings = ControlSettings {
            joystick_radius: 50.0,
            touch_sensitivity: sensitivity,
            ..Default::default()
        };
        let mut input = touch_only(settings);
        let start = Vec2::new(400.0, 400.0);
        let drag = Vec2::from_angle(angle) * distance;

        input.handle(InputEvent::TouchStart(start));
        input.handle(InputEvent::TouchMove(start + drag));

        let raw = input.raw();
        prop_assert!((raw.length() - sensitivity).abs() < 1e-3 * sensitivity.max(1.0));
        prop_assert!(raw.normalize().dot(drag.normalize()) > 0.9999);
    }

    #[test]
    fn gravity_stays_within_raw_range(
        presses in proptest::collection::vec((0u8..4, any::<bool>()), 1..60),
    ) {
        let mut input = InputNormalizer::default();
        for (dir, down) in presses {
            let dir = match dir {
                0 => Direction::Left,
                1 => Direction::Right,
                2 => Direction::Up,
                _ => Direction::Down,
            };
            input.handle(if down { InputEvent::KeyDown(dir) } else { InputEvent::KeyUp(dir) });
            input.update();
            let g = input.gravity();
            prop_assert!(g.x.abs() <= 1.0 && g.y.abs() <= 1.0);
        }
    }

    #[test]
    fn tilt_output_bounded_by_sensitivity(
        beta in -180.0f32..180.0,
        gamma in -90.0f32..90.0,
        landscape in any::<bool>(),
    ) {
        let mut input = InputNormalizer::default();
        input.init(PlatformCapabilities {
            orientation: OrientationSupport::Available,
            touch: false,
        });
        let orientation = if landscape {
            ScreenOrientation::Landscape
        } else {
            ScreenOrientation::Portrait
        };
        input.handle(InputEvent::Orientation(OrientationSample::new(beta, gamma, orientation)));
        let raw = input.raw();
        prop_assert!(raw.x.abs() <= 1.0 && raw.y.abs() <= 1.0);
    }
}
