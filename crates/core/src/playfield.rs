//! Playfield module - the grid of locked cells
//!
//! The playfield is a 10x20 grid where each cell is empty or holds the color of
//! a locked block. Storage is a flat row-major array, so the field never
//! allocates and its dimensions can never change.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (top to bottom). Callers keep every access inside those bounds; the collision
//! check is the only place that reasons about out-of-field coordinates.

use crate::types::{Cell, Color, FIELD_HEIGHT, FIELD_WIDTH};

/// Total number of cells on the field
const FIELD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Playfield {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; FIELD_SIZE],
}

impl Playfield {
    /// Create a new empty playfield
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: usize, y: usize) -> usize {
        debug_assert!(x < FIELD_WIDTH, "x out of range: {x}");
        debug_assert!(y < FIELD_HEIGHT, "y out of range: {y}");
        y * FIELD_WIDTH + x
    }

    pub fn width(&self) -> usize {
        FIELD_WIDTH
    }

    pub fn height(&self) -> usize {
        FIELD_HEIGHT
    }

    /// Cell at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[Self::index(x, y)]
    }

    /// Write a locked block at (x, y)
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        self.cells[Self::index(x, y)] = Some(color);
    }

    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_none()
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(FIELD_WIDTH)
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Raw row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the field into a 2D grid (used by snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; FIELD_WIDTH]; FIELD_HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}
