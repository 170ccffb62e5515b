//! Session module - the gameplay state machine
//!
//! A [`GameSession`] owns the playfield, the active piece, the piece factory and
//! the gravity scheduler. Whoever drives the loop owns the session and calls
//! into it one command or one batch of elapsed time at a time.
//!
//! Phases:
//!
//! - **Idle**: no gravity trigger armed; piece commands are ignored
//! - **Falling**: gravity and piece commands move the active piece
//! - **GameOver**: everything except `reset` is ignored
//!
//! A piece that cannot move down is locked: its cells inside the field are
//! written to the playfield and, unless any of its cells sits on the top-out
//! line, a new piece is spawned. Spawned pieces are not checked against the
//! field; only a lock decides game over. Completed rows are never cleared.

use crate::collision::is_valid_position;
use crate::gravity::GravityScheduler;
use crate::playfield::Playfield;
use crate::rng::{PieceSource, RandomSource};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::tetromino::{Tetromino, TetrominoFactory};
use crate::types::{
    GameCommand, GameEvent, GamePhase, MoveDirection, RotationDirection, GRAVITY_INTERVAL_MS,
};

/// A lock with any cell on or above this row ends the game
pub const TOP_OUT_ROW: i16 = 0;

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession<S = RandomSource> {
    field: Playfield,
    active: Tetromino,
    factory: TetrominoFactory<S>,
    gravity: GravityScheduler,
    game_over: bool,
    /// Events since the last drain
    events: Vec<GameEvent>,
    pieces_locked: u32,
    /// Gravity steps applied since the last reset
    ticks: u32,
}

impl GameSession<RandomSource> {
    /// Session with a reproducible piece sequence and the default interval
    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomSource::seeded(seed))
    }
}

impl<S: PieceSource> GameSession<S> {
    /// Idle session with a fresh piece and the default gravity interval
    pub fn new(source: S) -> Self {
        Self::with_interval(source, GRAVITY_INTERVAL_MS)
    }

    pub fn with_interval(source: S, interval_ms: u32) -> Self {
        Self::from_playfield(Playfield::new(), source, interval_ms)
    }

    /// Idle session over an existing playfield
    pub fn from_playfield(field: Playfield, source: S, interval_ms: u32) -> Self {
        let mut factory = TetrominoFactory::new(source);
        let active = factory.create();
        Self {
            field,
            active,
            factory,
            gravity: GravityScheduler::new(interval_ms),
            game_over: false,
            events: Vec::new(),
            pieces_locked: 0,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.gravity.is_armed() {
            GamePhase::Falling
        } else {
            GamePhase::Idle
        }
    }

    /// Whether the gravity trigger is armed
    pub fn running(&self) -> bool {
        self.gravity.is_armed()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn playfield(&self) -> &Playfield {
        &self.field
    }

    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    pub fn gravity(&self) -> &GravityScheduler {
        &self.gravity
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn source(&self) -> &S {
        self.factory.source()
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_grid(&mut out.field);
        out.active = ActiveSnapshot::from(self.active);
        out.phase = self.phase();
        out.running = self.running();
        out.game_over = self.game_over;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot {
            field: Default::default(),
            active: ActiveSnapshot::from(self.active),
            phase: GamePhase::Idle,
            running: false,
            game_over: false,
            pieces_locked: 0,
        };
        self.snapshot_into(&mut out);
        out
    }

    /// Arm gravity. No-op while running or after game over.
    pub fn start(&mut self) -> bool {
        if self.game_over || self.gravity.is_armed() {
            return false;
        }
        self.gravity.arm();
        self.events.push(GameEvent::Started);
        true
    }

    /// Cancel gravity. No-op when nothing is armed.
    pub fn pause(&mut self) -> bool {
        if self.gravity.cancel().is_none() {
            return false;
        }
        self.events.push(GameEvent::Paused);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop the loop, empty the field and create a fresh piece.
    ///
    /// Always leaves the session Idle.
    pub fn reset(&mut self) {
        self.pause();
        self.field.reset();
        self.active = self.factory.create();
        self.game_over = false;
        self.pieces_locked = 0;
        self.ticks = 0;
        self.events.push(GameEvent::Reset);
    }

    /// One gravity step. Returns false when not Falling.
    pub fn tick(&mut self) -> bool {
        if self.phase() != GamePhase::Falling {
            return false;
        }
        self.ticks = self.ticks.wrapping_add(1);
        self.step_down();
        true
    }

    /// Feed elapsed time to the gravity trigger and apply every due step.
    ///
    /// Steps stop early if one of them ends the game. Returns steps applied.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let due = self.gravity.advance(elapsed_ms);
        let mut applied = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Whether the active piece fits after moving by (dx, dy)
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        is_valid_position(&self.field, &self.active, dx, dy)
    }

    /// Row the active piece would come to rest on
    pub fn landing_y(&self) -> i8 {
        let mut piece = self.active;
        while is_valid_position(&self.field, &piece, 0, 1) {
            piece.y += 1;
        }
        piece.y
    }

    /// Move left, right, or soft drop. Returns whether state changed.
    pub fn handle_move(&mut self, direction: MoveDirection) -> bool {
        if self.phase() != GamePhase::Falling {
            return false;
        }
        match direction {
            MoveDirection::Down => {
                self.step_down();
                true
            }
            MoveDirection::Left | MoveDirection::Right => {
                let (dx, dy) = direction.offset();
                if !self.can_move(dx, dy) {
                    return false;
                }
                self.active.x += dx;
                self.active.y += dy;
                true
            }
        }
    }

    /// Rotate in place if the rotated shape fits; no kicks are tried
    pub fn handle_rotate(&mut self, direction: RotationDirection) -> bool {
        if self.phase() != GamePhase::Falling {
            return false;
        }
        let rotated = self.active.rotated(direction);
        if !is_valid_position(&self.field, &rotated, 0, 0) {
            return false;
        }
        self.active = rotated;
        true
    }

    /// Drop to the resting row and lock in the same call
    pub fn handle_hard_drop(&mut self) -> bool {
        if self.phase() != GamePhase::Falling {
            return false;
        }
        self.active.y = self.landing_y();
        self.lock();
        true
    }

    /// Dispatch one input command. Returns whether state changed.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Reset => {
                self.reset();
                true
            }
            GameCommand::MoveLeft => self.handle_move(MoveDirection::Left),
            GameCommand::MoveRight => self.handle_move(MoveDirection::Right),
            GameCommand::MoveDown => self.handle_move(MoveDirection::Down),
            GameCommand::HardDrop => self.handle_hard_drop(),
            GameCommand::RotateCw => self.handle_rotate(RotationDirection::Clockwise),
            GameCommand::RotateCcw => self.handle_rotate(RotationDirection::CounterClockwise),
        }
    }

    fn step_down(&mut self) {
        if self.can_move(0, 1) {
            self.active.y += 1;
        } else {
            self.lock();
        }
    }

    fn lock(&mut self) {
        let piece = self.active;
        let mut cells_written = 0u8;
        let mut topped_out = false;

        for (x, y) in piece.cells() {
            // Rows above the field are never written.
            if y >= 0 {
                self.field.set(x as usize, y as usize, piece.color);
                cells_written += 1;
            }
            if y <= TOP_OUT_ROW {
                topped_out = true;
            }
        }

        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.events.push(GameEvent::Locked {
            kind: piece.kind,
            cells_written,
        });

        if topped_out {
            self.gravity.cancel();
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
            return;
        }

        self.active = self.factory.create();
        self.events.push(GameEvent::Spawned {
            kind: self.active.kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::{Color, PieceKind};

    fn session_of(kinds: &[PieceKind]) -> GameSession<SequenceSource> {
        GameSession::new(SequenceSource::new(kinds.iter().copied()))
    }

    #[test]
    fn test_new_session_is_idle_with_piece() {
        let state = session_of(&[PieceKind::T]);

        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(!state.running());
        assert!(!state.game_over());
        assert_eq!(state.active().kind, PieceKind::T);
        assert_eq!((state.active().x, state.active().y), (4, 0));
        assert_eq!(state.playfield().occupied_count(), 0);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut state = session_of(&[PieceKind::T]);

        assert!(state.start());
        let handle = state.gravity().handle();
        assert!(!state.start());
        assert_eq!(state.gravity().handle(), handle);

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_pause_cancels_trigger() {
        let mut state = session_of(&[PieceKind::T]);
        state.start();
        assert!(state.pause());
        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(state.gravity().handle().is_none());
        assert!(!state.pause());
    }

    #[test]
    fn test_tick_moves_down() {
        let mut state = session_of(&[PieceKind::T]);
        state.start();

        assert!(state.tick());
        assert_eq!(state.active().y, 1);
        assert_eq!(state.ticks(), 1);
    }

    #[test]
    fn test_tick_ignored_when_idle() {
        let mut state = session_of(&[PieceKind::T]);
        assert!(!state.tick());
        assert_eq!(state.active().y, 0);
        assert_eq!(state.ticks(), 0);
    }

    #[test]
    fn test_advance_applies_due_steps() {
        let mut state = session_of(&[PieceKind::T]);
        state.start();

        assert_eq!(state.advance(499), 0);
        assert_eq!(state.active().y, 0);
        assert_eq!(state.advance(1001), 3);
        assert_eq!(state.active().y, 3);
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut state = session_of(&[PieceKind::T]);
        state.start();

        let mut moved = 0;
        for _ in 0..10 {
            if state.handle_move(MoveDirection::Left) {
                moved += 1;
            }
        }
        // T spawns with its leftmost cell at column 4.
        assert_eq!(moved, 4);
        assert_eq!(state.active().x, 0);
    }

    #[test]
    fn test_soft_drop_locks_when_blocked() {
        let mut state = session_of(&[PieceKind::O, PieceKind::T]);
        state.start();
        state.active.y = 18;

        assert!(state.handle_move(MoveDirection::Down));
        assert_eq!(state.pieces_locked(), 1);
        assert_eq!(state.active().kind, PieceKind::T);
        assert_eq!(state.playfield().get(5, 19), Some(Color::Yellow));
    }

    #[test]
    fn test_rotation_rejected_against_wall() {
        let mut state = session_of(&[PieceKind::I]);
        state.start();
        // Lower the horizontal I so the rotated column is inside the field.
        state.active.y = 5;
        // Vertical I (column 2 of the matrix) pushed against the right wall.
        assert!(state.handle_rotate(RotationDirection::Clockwise));
        while state.handle_move(MoveDirection::Right) {}
        assert_eq!(state.active().x, 7);

        let before = *state.active();
        // Turning back to horizontal would need columns 7..=10.
        assert!(!state.handle_rotate(RotationDirection::Clockwise));
        assert_eq!(*state.active(), before);
    }

    #[test]
    fn test_lock_spawns_next_piece() {
        let mut state = session_of(&[PieceKind::O, PieceKind::J]);
        state.start();
        assert!(state.handle_hard_drop());

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::Started,
                GameEvent::Locked {
                    kind: PieceKind::O,
                    cells_written: 4
                },
                GameEvent::Spawned { kind: PieceKind::J },
            ]
        );
        assert_eq!(state.phase(), GamePhase::Falling);
    }

    #[test]
    fn test_lock_above_field_skips_rows_and_ends_game() {
        let mut field = Playfield::new();
        for y in 0..20 {
            field.set(5, y, Color::Red);
        }
        // O held entirely above the field, over a filled column.
        let mut state = GameSession::from_playfield(
            field,
            SequenceSource::new([PieceKind::O]),
            GRAVITY_INTERVAL_MS,
        );
        state.start();
        state.active.y = -2;

        assert!(state.tick());
        assert!(state.game_over());
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(!state.running());

        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Locked {
            kind: PieceKind::O,
            cells_written: 0
        }));
        assert_eq!(events.last(), Some(&GameEvent::GameOver));
    }

    #[test]
    fn test_start_after_game_over_is_noop() {
        let mut state = session_of(&[PieceKind::O]);
        state.start();
        state.game_over = true;
        state.gravity.cancel();

        assert!(!state.start());
        assert!(!state.toggle_pause());
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_reset_emits_pause_then_reset() {
        let mut state = session_of(&[PieceKind::O]);
        state.start();
        state.drain_events().for_each(drop);

        state.reset();
        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Paused, GameEvent::Reset]);
        assert_eq!(state.ticks(), 0);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = session_of(&[PieceKind::O]);
        state.start();
        state.handle_hard_drop();

        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Falling);
        assert!(snap.running);
        assert!(snap.playable());
        assert_eq!(snap.pieces_locked, 1);
        assert_eq!(snap.occupied_count(), 4);
        assert_eq!(snap.cell(6, 18), Some(Color::Yellow));
        assert_eq!(snap.active.kind, PieceKind::O);
    }
}
