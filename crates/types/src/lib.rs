//! Shared types module - plain data structures and constants
//!
//! Everything in this crate is pure data with no external dependencies, so it
//! can be used from the core state machine, the terminal view and the input
//! mapping alike.
//!
//! # Playfield Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - Pieces may hang above row 0 (negative y) right after spawning
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_INTERVAL_MS` | 500 | Default time between gravity ticks |
//! | `FRAME_MS` | 16 | Render/poll frame budget (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameCommand, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let kind = PieceKind::from_str("o").unwrap();
//! assert_eq!(kind, PieceKind::O);
//! assert_eq!(kind.color(), Color::Yellow);
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//! assert_eq!(GameCommand::from_str("hold"), None);
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Playfield width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Playfield height in cells (20 rows)
pub const FIELD_HEIGHT: usize = 20;

/// Default interval between gravity ticks
pub const GRAVITY_INTERVAL_MS: u32 = 500;

/// Render and input poll budget per frame (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Largest bounding matrix used by any piece (the I piece is 4x4)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Color tag of a locked cell or a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Purple,
    Green,
    Red,
    Yellow,
}

impl Color {
    /// Lowercase color name
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
        }
    }
}

/// A playfield cell: `None` is empty, `Some(color)` is a locked block.
pub type Cell = Option<Color>;

/// The seven canonical tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    T,
    S,
    Z,
    O,
}

impl PieceKind {
    /// All kinds, in the order the piece table lists them.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::O,
    ];

    /// Parse piece kind from its name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Single-letter name tag
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::O => "O",
        }
    }

    /// Color every piece of this kind is drawn and locked with
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::O => Color::Yellow,
        }
    }
}

/// Direction of a quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The direction that undoes this one
    pub fn opposite(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Direction of a one-cell move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    /// Soft drop: behaves exactly like one gravity tick
    Down,
}

impl MoveDirection {
    /// Offset applied to the piece anchor
    pub fn offset(&self) -> (i8, i8) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, 1),
        }
    }
}

/// Discrete commands the input collaborator forwards into a session.
///
/// Anything the input layer cannot map to one of these is dropped before it
/// reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Start when idle, pause when running
    TogglePause,
    /// Stop the loop and return to a fresh, empty playfield
    Reset,
    MoveLeft,
    MoveRight,
    MoveDown,
    HardDrop,
    RotateCw,
    RotateCcw,
}

impl GameCommand {
    /// Parse command from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "togglepause" => Some(GameCommand::TogglePause),
            "reset" => Some(GameCommand::Reset),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "movedown" => Some(GameCommand::MoveDown),
            "harddrop" => Some(GameCommand::HardDrop),
            "rotatecw" => Some(GameCommand::RotateCw),
            "rotateccw" => Some(GameCommand::RotateCcw),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::TogglePause => "togglePause",
            GameCommand::Reset => "reset",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::MoveDown => "moveDown",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::RotateCw => "rotateCw",
            GameCommand::RotateCcw => "rotateCcw",
        }
    }
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// No gravity trigger armed; commands are ignored
    Idle,
    /// A piece is live; gravity and input apply
    Falling,
    /// Terminal until an explicit reset
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Falling => "falling",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Core-side event recorded by a session.
///
/// Drained by the binary for its event log and by the view to react to the
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Gravity trigger armed
    Started,
    /// Gravity trigger canceled without ending the game
    Paused,
    /// Playfield emptied and a fresh piece created
    Reset,
    /// A piece was committed to the playfield
    Locked {
        kind: PieceKind,
        /// Cells actually written (rows above the field are skipped)
        cells_written: u8,
    },
    /// A new active piece was created after a lock
    Spawned { kind: PieceKind },
    /// The locking piece reached the top-out line
    GameOver,
}

impl GameEvent {
    /// camelCase event name
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Started => "started",
            GameEvent::Paused => "paused",
            GameEvent::Reset => "reset",
            GameEvent::Locked { .. } => "locked",
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::GameOver => "gameOver",
        }
    }
}
