use crate::shape::ShapeMatrix;
use crate::tetromino::Tetromino;
use crate::types::{Cell, Color, GamePhase, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute cells that fall inside the visible field
    pub fn visible_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (ax, ay) = (self.x as i16, self.y as i16);
        self.shape.occupied().filter_map(move |(row, col)| {
            let x = ax + col as i16;
            let y = ay + row as i16;
            let inside =
                x >= 0 && y >= 0 && (x as usize) < FIELD_WIDTH && (y as usize) < FIELD_HEIGHT;
            inside.then_some((x as usize, y as usize))
        })
    }
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub field: [[Cell; FIELD_WIDTH]; FIELD_HEIGHT],
    pub active: ActiveSnapshot,
    pub phase: GamePhase,
    pub running: bool,
    pub game_over: bool,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.field[y][x]
    }

    pub fn playable(&self) -> bool {
        self.running && !self.game_over
    }

    /// Number of locked cells
    pub fn occupied_count(&self) -> usize {
        self.field
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}
