//! Terminal input module.
//!
//! Maps `crossterm` key events to [`crate::types::GameCommand`]s. The mapping is
//! stateless; it carries no gameplay logic and never touches a session.

pub mod map;

pub use blockfall_types as types;

pub use map::{key_label, map_key_event, should_quit};
