//! Maze carving
//!
//! Randomized depth-first backtracking over the odd-coordinate lattice,
//! followed by the entry punch and exit placement. The backtracker keeps an
//! explicit stack of frames so large mazes never hit call-depth limits.

use super::grid::{Cell, Grid};
use super::rng::SeededRandom;
use crate::consts::EXIT_FRACTIONS;

/// Cardinal steps, in the order they are shuffled from
const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Output of a full carve
#[derive(Debug, Clone)]
pub struct Carved {
    pub grid: Grid,
    /// Column of the Entry cell in row 0
    pub entry_col: u32,
    /// Exit columns in the last row, left to right by target fraction
    pub exit_cols: Vec<u32>,
}

/// One backtracker frame: a cell and the directions it has yet to try
struct Frame {
    col: i32,
    row: i32,
    dirs: Vec<(i32, i32)>,
    next: usize,
}

impl Frame {
    fn enter(grid: &mut Grid, rng: &mut SeededRandom, col: i32, row: i32) -> Self {
        grid.set(col, row, Cell::Path);
        Self {
            col,
            row,
            dirs: rng.shuffle(&DIRECTIONS),
            next: 0,
        }
    }
}

/// Start column for the backtracker: near center, forced odd
pub fn start_col(cols: u32) -> i32 {
    let mut col = (cols / 2) as i32;
    if col % 2 == 0 {
        col += 1;
    }
    col
}

/// Carve a perfect maze into an all-wall grid, starting at row 1
pub fn carve_passages(grid: &mut Grid, rng: &mut SeededRandom) {
    let start = Frame::enter(grid, rng, start_col(grid.cols()), 1);
    let mut stack = vec![start];

    while let Some(top) = stack.last_mut() {
        if top.next >= top.dirs.len() {
            stack.pop();
            continue;
        }

        let (dc, dr) = top.dirs[top.next];
        top.next += 1;
        let (col, row) = (top.col, top.row);
        let (nc, nr) = (col + dc * 2, row + dr * 2);

        if grid.is_interior(nc, nr) && grid.get(nc, nr) == Some(Cell::Wall) {
            grid.set(col + dc, row + dr, Cell::Path);
            let frame = Frame::enter(grid, rng, nc, nr);
            stack.push(frame);
        }
    }
}

/// Punch the entry at top center and open the cell below it
pub fn open_entry(grid: &mut Grid) -> u32 {
    let col = grid.cols() / 2;
    grid.set(col as i32, 0, Cell::Entry);
    grid.set(col as i32, 1, Cell::Path);
    col
}

/// Nearest Path column to `target` in `row`; ties go to the leftmost
fn nearest_path_col(grid: &Grid, row: u32, target: i32) -> Option<u32> {
    let mut best: Option<(u32, i32)> = None;
    for col in 0..grid.cols() {
        if grid.get(col as i32, row as i32) != Some(Cell::Path) {
            continue;
        }
        let dist = (col as i32 - target).abs();
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((col, dist));
        }
    }
    best.map(|(col, _)| col)
}

/// Mark one Exit in the last row per target fraction, returning the columns
pub fn place_exits(grid: &mut Grid) -> Vec<u32> {
    let cols = grid.cols();
    let above = grid.rows() - 2;
    let last = grid.rows() - 1;

    let mut exit_cols = Vec::with_capacity(EXIT_FRACTIONS.len());
    for fraction in EXIT_FRACTIONS {
        let target = (cols as f32 * fraction).floor() as i32;
        if let Some(col) = nearest_path_col(grid, above, target) {
            grid.set(col as i32, last as i32, Cell::Exit);
            exit_cols.push(col);
        }
    }
    exit_cols
}

/// Carve upward from each exit until the carved network is reached
pub fn connect_exits(grid: &mut Grid, exit_cols: &[u32]) {
    let above = grid.rows() as i32 - 2;
    for &col in exit_cols {
        let col = col as i32;
        if grid.get(col, above) != Some(Cell::Wall) {
            continue;
        }
        let mut row = above;
        while row >= 0 {
            match grid.get(col, row) {
                Some(Cell::Wall) => grid.set(col, row, Cell::Path),
                _ => break,
            }
            row -= 1;
        }
    }
}

/// Run every carve step on a fresh cols × rows grid
pub fn carve(cols: u32, rows: u32, rng: &mut SeededRandom) -> Carved {
    let mut grid = Grid::new(cols, rows);
    carve_passages(&mut grid, rng);
    let entry_col = open_entry(&mut grid);
    let exit_cols = place_exits(&mut grid);
    connect_exits(&mut grid, &exit_cols);

    Carved {
        grid,
        entry_col,
        exit_cols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_col_is_odd() {
        assert_eq!(start_col(11), 5);
        assert_eq!(start_col(13), 7);
        assert_eq!(start_col(15), 7);
    }

    #[test]
    fn test_carve_visits_every_odd_cell() {
        let mut grid = Grid::new(11, 13);
        carve_passages(&mut grid, &mut SeededRandom::new(1));
        for row in (1..12).step_by(2) {
            for col in (1..10).step_by(2) {
                assert_eq!(grid.get(col, row), Some(Cell::Path), "({}, {})", col, row);
            }
        }
    }

    #[test]
    fn test_carve_keeps_border_and_even_lattice_walls() {
        let mut grid = Grid::new(11, 13);
        carve_passages(&mut grid, &mut SeededRandom::new(5));
        for (col, row, cell) in grid.iter() {
            let border = col == 0 || row == 0 || col == 10 || row == 12;
            if border || (col % 2 == 0 && row % 2 == 0) {
                assert_eq!(cell, Cell::Wall, "({}, {})", col, row);
            }
        }
    }

    #[test]
    fn test_perfect_maze_edge_count() {
        // A spanning tree over n lattice cells opens exactly n - 1 walls
        let mut grid = Grid::new(11, 13);
        carve_passages(&mut grid, &mut SeededRandom::new(77));
        let open = grid.iter().filter(|(_, _, c)| *c == Cell::Path).count();
        let lattice = 5 * 6;
        assert_eq!(open, lattice + lattice - 1);
    }

    #[test]
    fn test_entry_opening() {
        let carved = carve(11, 13, &mut SeededRandom::new(3));
        assert_eq!(carved.entry_col, 5);
        assert_eq!(carved.grid.get(5, 0), Some(Cell::Entry));
        assert_eq!(carved.grid.get(5, 1), Some(Cell::Path));
    }

    #[test]
    fn test_exits_on_last_row_above_path() {
        let carved = carve(13, 15, &mut SeededRandom::new(11));
        assert_eq!(carved.exit_cols.len(), 5);
        for &col in &carved.exit_cols {
            assert_eq!(carved.grid.get(col as i32, 14), Some(Cell::Exit));
            assert!(carved.grid.get(col as i32, 13).is_some_and(Cell::is_open));
        }
    }

    #[test]
    fn test_nearest_path_prefers_leftmost_tie() {
        let mut grid = Grid::new(7, 3);
        grid.set(2, 1, Cell::Path);
        grid.set(4, 1, Cell::Path);
        assert_eq!(nearest_path_col(&grid, 1, 3), Some(2));
    }

    #[test]
    fn test_connect_exits_carves_up_to_network() {
        let mut grid = Grid::new(5, 7);
        grid.set(1, 1, Cell::Path);
        grid.set(1, 6, Cell::Exit);
        connect_exits(&mut grid, &[1]);
        for row in 2..=5 {
            assert_eq!(grid.get(1, row), Some(Cell::Path));
        }
        assert_eq!(grid.get(1, 0), Some(Cell::Wall));
    }
}
