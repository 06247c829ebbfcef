//! Board bookkeeping: locked cells, the derived grid, collision and row clears
//!
//! `LockedPositions` is the only source of truth for settled cells. The grid is
//! rebuilt from it every tick and only ever carries the falling piece as a
//! transient overlay.

use std::collections::BTreeMap;

use crate::piece::Piece;
use crate::shapes::{Rgb, EMPTY};

pub const ROWS: usize = 20;
pub const COLS: usize = 10;

/// Dense 20×10 snapshot, indexed `grid[row][col]`
pub type Grid = [[Rgb; COLS]; ROWS];

/// Permanently settled cells keyed by `(column, row)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedPositions {
    cells: BTreeMap<(i32, i32), Rgb>,
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..COLS as i32).contains(&x) && (0..ROWS as i32).contains(&y)
}

impl LockedPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.cells.get(&(x, y)).copied()
    }

    pub fn insert(&mut self, x: i32, y: i32, color: Rgb) {
        self.cells.insert((x, y), color);
    }

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), Rgb)> + '_ {
        self.cells.iter().map(|(&key, &color)| (key, color))
    }

    /// Copy every cell of `piece`, including those above the board
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.occupied_cells() {
            self.cells.insert((x, y), color);
        }
    }

    /// Fresh grid with every in-bounds locked cell painted
    pub fn to_grid(&self) -> Grid {
        let mut grid = [[EMPTY; COLS]; ROWS];
        for (&(x, y), &color) in &self.cells {
            if in_bounds(x, y) {
                grid[y as usize][x as usize] = color;
            }
        }
        grid
    }

    /// True once any locked cell sits in the top visible row or above it
    pub fn reaches_top(&self) -> bool {
        self.cells.keys().any(|&(_, y)| y < 1)
    }

    /// Remove every full row of `grid` and collapse the cells above
    ///
    /// Rows are scanned bottom to top. Cells above the topmost cleared row move
    /// down by the total number of cleared rows in one batch; cells between
    /// two non-adjacent cleared rows stay where they are. Returns the number of
    /// cleared rows.
    pub fn clear_rows(&mut self, grid: &Grid) -> usize {
        let mut cleared = 0;
        let mut topmost = 0;

        for (row, cells) in grid.iter().enumerate().rev() {
            if !cells.contains(&EMPTY) {
                cleared += 1;
                topmost = row as i32;
                for col in 0..COLS as i32 {
                    self.cells.remove(&(col, topmost));
                }
            }
        }

        if cleared > 0 {
            let mut keys: Vec<(i32, i32)> = self.cells.keys().copied().filter(|&(_, y)| y < topmost).collect();
            // Lowest rows first so a moved cell never lands on one still waiting to move
            keys.sort_by(|a, b| b.1.cmp(&a.1));
            for (x, y) in keys {
                if let Some(color) = self.cells.remove(&(x, y)) {
                    self.cells.insert((x, y + cleared as i32), color);
                }
            }
        }

        cleared
    }
}

/// Paint the in-bounds cells of `piece` onto `grid`
pub fn overlay(grid: &mut Grid, piece: &Piece) {
    let color = piece.color();
    for (x, y) in piece.occupied_cells() {
        if in_bounds(x, y) {
            grid[y as usize][x as usize] = color;
        }
    }
}

/// Whether `piece` may occupy its cells on `grid`
///
/// Cells above the board (row < 0) are always accepted. Every other cell must
/// be inside the board and empty.
pub fn is_valid(piece: &Piece, grid: &Grid) -> bool {
    piece
        .occupied_cells()
        .into_iter()
        .all(|(x, y)| y < 0 || (in_bounds(x, y) && grid[y as usize][x as usize] == EMPTY))
}
