//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and nothing else.
//! It has **no dependencies** on terminal I/O, timers or global state:
//!
//! - **Deterministic**: a seeded [`RandomSource`] replays the same piece sequence
//! - **Clock-free**: gravity is advanced with elapsed milliseconds supplied by the caller
//! - **Infallible**: illegal moves and commands outside the Falling phase are silently ignored
//!
//! # Module Structure
//!
//! - [`playfield`]: 10x20 grid of locked cells
//! - [`shape`]: N×N bounding matrices and pure quarter-turn rotation
//! - [`tetromino`]: piece templates, the active piece, and the factory
//! - [`rng`]: injectable piece sources (seeded random, fixed sequence)
//! - [`collision`]: placement legality against walls, floor and locked cells
//! - [`gravity`]: the cancelable repeating gravity trigger
//! - [`session`]: the state machine tying everything together
//! - [`snapshot`]: read-only copies of session state for renderers
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random from the seven kinds
//! - Rotation has no wall kicks: a rotation that does not fit is discarded
//! - A piece that cannot fall further locks immediately (no lock delay)
//! - Locking with any cell on row 0 or above ends the game
//! - Completed rows stay on the field
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, SequenceSource};
//! use blockfall_types::{GameCommand, GamePhase, PieceKind};
//!
//! let mut game = GameSession::new(SequenceSource::new([PieceKind::O]));
//! game.start();
//!
//! game.apply_command(GameCommand::MoveRight);
//! game.apply_command(GameCommand::HardDrop);
//!
//! assert_eq!(game.phase(), GamePhase::Falling);
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.playfield().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::advance`](session::GameSession::advance) with the time
//! elapsed since the previous call; every due gravity step (500ms by default)
//! is applied before it returns.

pub mod collision;
pub mod gravity;
pub mod playfield;
pub mod rng;
pub mod session;
pub mod shape;
pub mod snapshot;
pub mod tetromino;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::is_valid_position;
pub use gravity::{GravityScheduler, TimerHandle};
pub use playfield::Playfield;
pub use rng::{PieceSource, RandomSource, SequenceSource};
pub use session::{GameSession, TOP_OUT_ROW};
pub use shape::{rotate, ShapeMatrix};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tetromino::{spawn_anchor, template_shape, Tetromino, TetrominoFactory};
