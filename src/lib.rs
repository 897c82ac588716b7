//! Tilt Maze - A tilt-controlled ball maze
//!
//! Core modules:
//! - `sim`: Deterministic maze generation (seeded RNG, carving, layout queries)
//! - `input`: Tilt/touch/keyboard fusion into one smoothed gravity vector
//! - `platform`: Browser/native capability detection and event wiring
//! - `settings`: Data-driven tuning for maze and controls

pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;

pub use input::{InputEvent, InputMethod, InputNormalizer};
pub use settings::{SensitivityPreset, Settings};
pub use sim::{ExitZone, MazeGenerator, MazeLayout, SeededRandom};

/// Game configuration constants
pub mod consts {
    /// Base maze width in cells (before level growth)
    pub const BASE_COLS: u32 = 11;
    /// Base maze height in cells (before level growth)
    pub const BASE_ROWS: u32 = 13;

    /// Smallest playable cell size (pixels)
    pub const MIN_CELL_SIZE: f32 = 20.0;
    /// Canvas margin reserved around the maze (pixels, both axes)
    pub const CANVAS_MARGIN: f32 = 40.0;

    /// Exit targets as fractions of the maze width, left to right
    pub const EXIT_FRACTIONS: [f32; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];
    /// Exit zone scores, left to right. Not sorted on purpose.
    pub const EXIT_SCORES: [u32; 5] = [500, 100, 1000, 0, 250];
    /// Exit zone labels, left to right
    pub const EXIT_LABELS: [&str; 5] = ["500", "100", "1000", "0", "250"];
    /// Exit zone colors (0xRRGGBB), left to right
    pub const EXIT_COLORS: [u32; 5] = [0x4CAF50, 0x2196F3, 0xFFD700, 0xF44336, 0x9C27B0];

    /// Horizontal spawn spacing as a multiple of ball radius
    pub const SPAWN_SPACING: f32 = 2.5;
    /// Horizontal spread shrink applied so the spawn fan stays near the entry
    pub const SPAWN_SHRINK: f32 = 0.3;
    /// Vertical stagger per ball as a fraction of ball radius
    pub const SPAWN_STAGGER: f32 = 0.5;
}

/// Move `current` toward `target` by `factor` of the remaining distance.
///
/// Never overshoots the target and lands on it exactly once the remaining
/// distance drops under `epsilon`.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32, epsilon: f32) -> f32 {
    let delta = target - current;
    if delta.abs() < epsilon {
        return target;
    }
    let next = current + delta * factor;
    // Rounding can push past the target when factor is close to 1
    if (target - next).signum() != delta.signum() {
        target
    } else {
        next
    }
}
