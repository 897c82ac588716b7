//! Maze generator and layout queries
//!
//! `MazeGenerator::init` builds a fresh grid for a level and derives the
//! pixel-space layout consumed by physics and rendering. The layout is
//! rebuilt wholesale on every init and never patched in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::carve::carve;
use super::grid::{Cell, Grid, oddify};
use super::rng::SeededRandom;
use crate::consts::*;
use crate::settings::MazeSettings;

/// Axis-aligned wall rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WallRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// A scored region along the bottom edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitZone {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score: u32,
    pub label: String,
    /// Display color (0xRRGGBB)
    pub color: u32,
    /// Grid column whose exit opening feeds this zone
    pub column: u32,
}

impl ExitZone {
    /// Whether `x` falls inside this zone's horizontal span
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// Overall maze size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazeDimensions {
    pub width: f32,
    pub height: f32,
    pub cell_size: f32,
    pub cols: u32,
    pub rows: u32,
}

/// Read-only pixel view over a generated grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub wall_rects: Vec<WallRect>,
    pub exit_zones: Vec<ExitZone>,
    pub entry_point: Vec2,
    pub width: f32,
    pub height: f32,
    pub cell_size: f32,
}

/// Grid size for a level: grows every two levels in width, three in height
pub fn level_dims(level: u32) -> (u32, u32) {
    let cols = oddify(BASE_COLS + 2 * (level / 2));
    let rows = oddify(BASE_ROWS + 2 * (level / 3));
    (cols, rows)
}

/// Cell size that fits the canvas above the exit strip, never below the floor
pub fn fit_cell_size(
    cols: u32,
    rows: u32,
    canvas_width: f32,
    canvas_height: f32,
    exit_zone_height: f32,
) -> f32 {
    let by_width = (canvas_width - CANVAS_MARGIN) / cols as f32;
    let by_height = (canvas_height - exit_zone_height - CANVAS_MARGIN) / rows as f32;
    by_width.min(by_height).floor().max(MIN_CELL_SIZE)
}

/// Maze generator owning the current level's grid and layout
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    settings: MazeSettings,
    level: u32,
    seed: u32,
    grid: Grid,
    entry_col: u32,
    exit_cols: Vec<u32>,
    layout: MazeLayout,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new(MazeSettings::default())
    }
}

impl MazeGenerator {
    /// Create an empty generator; call `init` before querying
    pub fn new(settings: MazeSettings) -> Self {
        Self {
            settings,
            level: 0,
            seed: 0,
            grid: Grid::new(0, 0),
            entry_col: 0,
            exit_cols: Vec::new(),
            layout: MazeLayout {
                wall_rects: Vec::new(),
                exit_zones: Vec::new(),
                entry_point: Vec2::ZERO,
                width: 0.0,
                height: 0.0,
                cell_size: 0.0,
            },
        }
    }

    pub fn settings(&self) -> &MazeSettings {
        &self.settings
    }

    /// Replace maze settings. Takes effect on the next init.
    pub fn set_settings(&mut self, settings: MazeSettings) {
        self.settings = settings;
    }

    /// Build the maze for `level`, seeded from the wall clock
    pub fn init(&mut self, level: u32, canvas_width: f32, canvas_height: f32) {
        let rng = SeededRandom::from_time();
        self.init_with_rng(level, canvas_width, canvas_height, rng);
    }

    /// Build the maze for `level` from a fixed seed (reproducible)
    pub fn init_with_seed(&mut self, level: u32, canvas_width: f32, canvas_height: f32, seed: u32) {
        self.init_with_rng(level, canvas_width, canvas_height, SeededRandom::new(seed));
    }

    fn init_with_rng(
        &mut self,
        level: u32,
        canvas_width: f32,
        canvas_height: f32,
        mut rng: SeededRandom,
    ) {
        let (cols, rows) = level_dims(level);
        let cell_size = fit_cell_size(
            cols,
            rows,
            canvas_width,
            canvas_height,
            self.settings.exit_zone_height,
        );
        let seed = rng.seed();

        let carved = carve(cols, rows, &mut rng);
        let layout = build_layout(
            &carved.grid,
            &carved.exit_cols,
            cell_size,
            self.settings.exit_zone_height,
        );

        // Swap in only once everything is built
        self.level = level;
        self.seed = seed;
        self.grid = carved.grid;
        self.entry_col = carved.entry_col;
        self.exit_cols = carved.exit_cols;
        self.layout = layout;

        log::info!(
            "Level {}: {}x{} cells, cell={}px, maze={}x{}px, seed={}",
            level,
            cols,
            rows,
            cell_size,
            self.layout.width,
            self.layout.height,
            seed
        );
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Seed the current maze was generated from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    pub fn wall_rects(&self) -> &[WallRect] {
        &self.layout.wall_rects
    }

    pub fn exit_zones(&self) -> &[ExitZone] {
        &self.layout.exit_zones
    }

    pub fn exit_columns(&self) -> &[u32] {
        &self.exit_cols
    }

    pub fn entry_point(&self) -> Vec2 {
        self.layout.entry_point
    }

    pub fn cell_size(&self) -> f32 {
        self.layout.cell_size
    }

    pub fn dimensions(&self) -> MazeDimensions {
        MazeDimensions {
            width: self.layout.width,
            height: self.layout.height,
            cell_size: self.layout.cell_size,
            cols: self.grid.cols(),
            rows: self.grid.rows(),
        }
    }

    /// Grid cell containing a pixel position, None outside the maze
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        let size = self.layout.cell_size;
        if size <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / size).floor() as i32;
        let row = (y / size).floor() as i32;
        self.grid
            .in_bounds(col, row)
            .then_some((col as u32, row as u32))
    }

    /// True if the point is inside a wall cell or outside the grid
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        match self.cell_at(x, y) {
            Some((col, row)) => self.grid.get(col as i32, row as i32) == Some(Cell::Wall),
            None => true,
        }
    }

    /// First exit zone whose span contains `x`
    pub fn exit_zone_for_x(&self, x: f32) -> Option<&ExitZone> {
        self.layout.exit_zones.iter().find(|z| z.contains_x(x))
    }

    /// Spawn points for `count` balls fanned out around the entry
    pub fn spawn_positions(&self, count: usize) -> Vec<Vec2> {
        let radius = self.settings.ball_radius;
        let spacing = radius * SPAWN_SPACING * SPAWN_SHRINK;
        let center = (count as f32 - 1.0) / 2.0;
        let entry = self.layout.entry_point;

        (0..count)
            .map(|i| {
                let dx = (i as f32 - center) * spacing;
                let dy = i as f32 * radius * SPAWN_STAGGER;
                Vec2::new(entry.x + dx, entry.y + dy)
            })
            .collect()
    }

    /// Indices of exits a flood fill from the entry cannot reach
    pub fn unreachable_exits(&self) -> Vec<usize> {
        if self.grid.cols() == 0 {
            return Vec::new();
        }
        let seen = self.grid.reachable_from(self.entry_col, 0);
        let last = self.grid.rows() - 1;
        self.exit_cols
            .iter()
            .enumerate()
            .filter(|&(_, &col)| !seen[(last * self.grid.cols() + col) as usize])
            .map(|(i, _)| i)
            .collect()
    }
}

/// Derive wall rectangles, exit zones and the entry point from a grid
fn build_layout(grid: &Grid, exit_cols: &[u32], cell_size: f32, zone_height: f32) -> MazeLayout {
    let width = grid.cols() as f32 * cell_size;
    let height = grid.rows() as f32 * cell_size;

    let wall_rects = grid
        .iter()
        .filter(|&(_, _, cell)| cell == Cell::Wall)
        .map(|(col, row, _)| WallRect {
            x: col as f32 * cell_size,
            y: row as f32 * cell_size,
            width: cell_size,
            height: cell_size,
        })
        .collect();

    let zone_count = EXIT_SCORES.len();
    let zone_width = width / zone_count as f32;
    let exit_zones = (0..zone_count)
        .map(|i| {
            let x = i as f32 * zone_width;
            // Last zone ends exactly at the maze edge
            let right = if i + 1 == zone_count {
                width
            } else {
                (i + 1) as f32 * zone_width
            };
            let column = exit_cols.get(i).copied().unwrap_or_else(|| {
                (grid.cols() as f32 * EXIT_FRACTIONS[i]).floor() as u32
            });
            ExitZone {
                x,
                y: height,
                width: right - x,
                height: zone_height,
                score: EXIT_SCORES[i],
                label: EXIT_LABELS[i].to_string(),
                color: EXIT_COLORS[i],
                column,
            }
        })
        .collect();

    MazeLayout {
        wall_rects,
        exit_zones,
        entry_point: Vec2::new(width / 2.0, cell_size * 1.5),
        width,
        height,
        cell_size,
    }
}
