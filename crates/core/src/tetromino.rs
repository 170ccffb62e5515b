//! Tetromino module - piece templates, the active piece, and the factory
//!
//! Each of the seven kinds has a fixed bounding matrix, color and spawn anchor.
//! The I piece spawns one row above the field at (3, -1) in a 4×4 matrix; the
//! other six spawn at (4, 0) in a 3×3 matrix.

use arrayvec::ArrayVec;

use crate::rng::PieceSource;
use crate::shape::ShapeMatrix;
use crate::types::{Color, PieceKind, RotationDirection, MAX_SHAPE_SIZE};

/// Upper bound on occupied cells of any bounding matrix
pub const MAX_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Absolute (x, y) cells of a piece
pub type PieceCells = ArrayVec<(i16, i16), MAX_CELLS>;

const I_SHAPE: ShapeMatrix =
    ShapeMatrix::from_bits(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: ShapeMatrix =
    ShapeMatrix::from_bits(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const L_SHAPE: ShapeMatrix =
    ShapeMatrix::from_bits(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const T_SHAPE: ShapeMatrix =
    ShapeMatrix::from_bits(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SHAPE: ShapeMatrix =
    ShapeMatrix::from_bits(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]);
const Z_SHAPE: ShapeMatrix =
    ShapeMatrix::from_bits(3, [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: ShapeMatrix =
    ShapeMatrix::from_bits(3, [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

/// Canonical spawn matrix for a piece kind
pub fn template_shape(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::O => O_SHAPE,
    }
}

/// Spawn anchor (x, y) of the matrix's top-left corner
pub fn spawn_anchor(kind: PieceKind) -> (i8, i8) {
    match kind {
        PieceKind::I => (3, -1),
        _ => (4, 0),
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece of `kind` at its spawn anchor.
    ///
    /// The shape is copied out of the template table, so rotating one piece
    /// can never affect another.
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = spawn_anchor(kind);
        Self {
            kind,
            shape: template_shape(kind),
            color: kind.color(),
            x,
            y,
        }
    }

    /// Same piece moved to an explicit anchor
    pub fn at(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Absolute cells of the piece at its current anchor
    pub fn cells(&self) -> PieceCells {
        self.cells_offset(0, 0)
    }

    /// Absolute cells the piece would cover after moving by (dx, dy)
    pub fn cells_offset(&self, dx: i8, dy: i8) -> PieceCells {
        let base_x = self.x as i16 + dx as i16;
        let base_y = self.y as i16 + dy as i16;
        self.shape
            .occupied()
            .map(|(row, col)| (base_x + col as i16, base_y + row as i16))
            .collect()
    }

    /// Same piece with its shape rotated in place; validity is not checked
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            shape: self.shape.rotated(direction),
            ..*self
        }
    }
}

/// Produces fresh pieces from an injectable source of kinds.
#[derive(Debug, Clone)]
pub struct TetrominoFactory<S> {
    source: S,
}

impl<S: PieceSource> TetrominoFactory<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Next piece at its spawn anchor
    pub fn create(&mut self) -> Tetromino {
        Tetromino::spawn(self.source.next_kind())
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
