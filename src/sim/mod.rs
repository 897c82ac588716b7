//! Deterministic maze module
//!
//! All level generation lives here. This module must stay deterministic:
//! - Seeded RNG only (wall-clock seeding happens at the edge)
//! - Stable iteration order (row-major)
//! - No rendering or platform dependencies

pub mod carve;
pub mod grid;
pub mod maze;
pub mod rng;

pub use carve::{Carved, carve};
pub use grid::{Cell, Grid, oddify};
pub use maze::{
    ExitZone, MazeDimensions, MazeGenerator, MazeLayout, WallRect, fit_cell_size, level_dims,
};
pub use rng::SeededRandom;
