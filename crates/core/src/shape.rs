//! Shape module - bounding matrices and quarter-turn rotation
//!
//! A piece's cells are an N×N occupancy matrix (N is 3, or 4 for the I piece).
//! Rotation is a pure permutation of that matrix: it never looks at the
//! playfield and never changes N. Whether a rotated shape actually fits is the
//! collision module's call.

use crate::types::{RotationDirection, MAX_SHAPE_SIZE};

/// N×N occupancy matrix stored in a fixed 4×4 block.
///
/// Entries outside `size` are always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 entries; only the top-left `size`×`size`
    /// block is read.
    pub const fn from_bits(size: usize, rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        assert!(size > 0 && size <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row = 0;
        while row < size {
            let mut col = 0;
            while col < size {
                cells[row][col] = rows[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self { size, cells }
    }

    /// Parse rows of `#` (occupied) and `.` (empty). The row count is N.
    ///
    /// ```
    /// use blockfall_core::ShapeMatrix;
    ///
    /// let t = ShapeMatrix::from_ascii(&[".#.", "###", "..."]);
    /// assert_eq!(t.size(), 3);
    /// assert!(t.is_occupied(0, 1));
    /// assert!(!t.is_occupied(0, 0));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let size = rows.len().clamp(1, MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, line) in rows.iter().take(size).enumerate() {
            for (c, ch) in line.chars().take(size).enumerate() {
                cells[r][c] = ch == '#';
            }
        }
        Self { size, cells }
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row][col]
    }

    /// Occupied (row, col) pairs in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        (0..n)
            .flat_map(move |row| (0..n).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.cells[row][col])
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Rotate by a quarter turn, returning a new matrix
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        rotate(self, direction)
    }

    /// Render as `#`/`.` rows (diagnostics and test messages)
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| if self.cells[row][col] { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

/// Quarter-turn rotation of an N×N matrix.
///
/// Clockwise moves `matrix[row][col]` to `rotated[col][N-1-row]`;
/// counter-clockwise moves it to `rotated[N-1-col][row]`.
pub fn rotate(shape: &ShapeMatrix, direction: RotationDirection) -> ShapeMatrix {
    let n = shape.size;
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for row in 0..n {
        for col in 0..n {
            let (r, c) = match direction {
                RotationDirection::Clockwise => (col, n - 1 - row),
                RotationDirection::CounterClockwise => (n - 1 - col, row),
            };
            cells[r][c] = shape.cells[row][col];
        }
    }
    ShapeMatrix { size: n, cells }
}
