//! Collision module - placement legality against walls, floor and locked cells
//!
//! A placement is legal when every occupied cell of the piece, after applying
//! the offset, is inside the side walls, above the floor, and either above the
//! visible field or on an empty playfield cell. Cells above row 0 are only
//! subject to the wall check.

use crate::playfield::Playfield;
use crate::tetromino::Tetromino;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH};

/// Whether `piece` moved by (dx, dy) fits on `field`
pub fn is_valid_position(field: &Playfield, piece: &Tetromino, dx: i8, dy: i8) -> bool {
    piece
        .cells_offset(dx, dy)
        .iter()
        .all(|&(x, y)| cell_is_free(field, x, y))
}

fn cell_is_free(field: &Playfield, x: i16, y: i16) -> bool {
    if x < 0 || x >= FIELD_WIDTH as i16 {
        return false;
    }
    if y >= FIELD_HEIGHT as i16 {
        return false;
    }
    if y < 0 {
        return true;
    }
    field.is_empty(x as usize, y as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_spawn_positions_are_valid_on_empty_field() {
        let field = Playfield::new();
        for kind in PieceKind::ALL {
            assert!(is_valid_position(&field, &Tetromino::spawn(kind), 0, 0));
        }
    }

    #[test]
    fn test_side_walls() {
        let field = Playfield::new();
        // O occupies columns 1..=2 of its matrix.
        let o = Tetromino::spawn(PieceKind::O).at(-1, 5);
        assert!(is_valid_position(&field, &o, 0, 0));
        assert!(!is_valid_position(&field, &o, -1, 0));

        let o = Tetromino::spawn(PieceKind::O).at(7, 5);
        assert!(is_valid_position(&field, &o, 0, 0));
        assert!(!is_valid_position(&field, &o, 1, 0));
    }

    #[test]
    fn test_wall_check_applies_above_field() {
        let field = Playfield::new();
        let o = Tetromino::spawn(PieceKind::O).at(-2, -5);
        assert!(!is_valid_position(&field, &o, 0, 0));
    }

    #[test]
    fn test_floor() {
        let field = Playfield::new();
        let o = Tetromino::spawn(PieceKind::O).at(4, 18);
        assert!(is_valid_position(&field, &o, 0, 0));
        assert!(!is_valid_position(&field, &o, 0, 1));
    }

    #[test]
    fn test_locked_cell_blocks() {
        let mut field = Playfield::new();
        field.set(5, 2, Color::Red);
        let o = Tetromino::spawn(PieceKind::O);
        assert!(is_valid_position(&field, &o, 0, 0));
        assert!(!is_valid_position(&field, &o, 0, 1));
        assert!(is_valid_position(&field, &o, 2, 1));
    }

    #[test]
    fn test_cells_above_field_ignore_occupancy() {
        let mut field = Playfield::new();
        for x in 0..FIELD_WIDTH {
            field.set(x, 0, Color::Blue);
        }
        // Entire O piece sits in rows -3 and -2.
        let o = Tetromino::spawn(PieceKind::O).at(4, -3);
        assert!(is_valid_position(&field, &o, 0, 0));
        assert!(is_valid_position(&field, &o, 0, 1));
        // One more row brings the lower half onto row 0.
        assert!(!is_valid_position(&field, &o, 0, 2));
    }
}
