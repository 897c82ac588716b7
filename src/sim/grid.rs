//! Maze cell grid
//!
//! Row-major storage of cell tags. Dimensions are odd so that carve targets
//! sit on the odd lattice and walls between them fall on the even one.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Cell tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Path,
    Entry,
    Exit,
}

impl Cell {
    /// True for every cell a ball can occupy
    #[inline]
    pub fn is_open(self) -> bool {
        self != Cell::Wall
    }

    fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Path => '.',
            Cell::Entry => 'E',
            Cell::Exit => 'X',
        }
    }
}

/// Bump an even dimension to the next odd value
#[inline]
pub fn oddify(n: u32) -> u32 {
    if n % 2 == 0 { n + 1 } else { n }
}

/// A cols × rows grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with walls
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Wall; (cols * rows) as usize],
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> usize {
        (row * self.cols + col) as usize
    }

    /// Whether (col, row) lies inside the grid
    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as u32) < self.cols && (row as u32) < self.rows
    }

    /// Whether (col, row) lies inside the grid without touching its border
    #[inline]
    pub fn is_interior(&self, col: i32, row: i32) -> bool {
        col > 0 && row > 0 && (col as u32) < self.cols - 1 && (row as u32) < self.rows - 1
    }

    /// Cell at (col, row), None when out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if self.in_bounds(col, row) {
            Some(self.cells[self.index(col as u32, row as u32)])
        } else {
            None
        }
    }

    /// Set the cell at (col, row). Out-of-bounds writes are ignored.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if self.in_bounds(col, row) {
            let i = self.index(col as u32, row as u32);
            self.cells[i] = cell;
        }
    }

    /// Iterate over (col, row, cell) in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as u32 % self.cols, i as u32 / self.cols, c))
    }

    /// Rows as slices, top to bottom. Empty for a 0-column grid.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1) as usize)
    }

    /// Flood fill over open cells (4-neighbour) starting at (col, row).
    ///
    /// Returns a row-major visited mask. A wall start yields an empty fill.
    pub fn reachable_from(&self, col: u32, row: u32) -> Vec<bool> {
        let mut visited = vec![false; self.cells.len()];
        if !self.get(col as i32, row as i32).is_some_and(Cell::is_open) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited[self.index(col, row)] = true;
        queue.push_back((col as i32, row as i32));

        while let Some((c, r)) = queue.pop_front() {
            for (dc, dr) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                let (nc, nr) = (c + dc, r + dr);
                if self.get(nc, nr).is_some_and(Cell::is_open) {
                    let i = self.index(nc as u32, nr as u32);
                    if !visited[i] {
                        visited[i] = true;
                        queue.push_back((nc, nr));
                    }
                }
            }
        }

        visited
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
