//! Terminal presentation for blockfall.
//!
//! `view` turns a core snapshot into a [`Frame`] without touching the
//! terminal; `renderer` flushes frames to stdout through crossterm, writing
//! only what changed.

pub mod frame;
pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use frame::{Frame, Glyph, Rgb, Style};
pub use renderer::{changed_spans, encode_frame, TerminalRenderer};
pub use view::{color_rgb, GameView, Layout, Viewport};
