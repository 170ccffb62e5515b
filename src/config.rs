//! Runtime configuration read from `BLOCKFALL_*` environment variables.

use crate::types::{FRAME_MS, GRAVITY_INTERVAL_MS};

pub const ENV_GRAVITY_MS: &str = "BLOCKFALL_GRAVITY_MS";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_FRAME_MS: &str = "BLOCKFALL_FRAME_MS";
pub const ENV_EVENT_LOG: &str = "BLOCKFALL_EVENT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Milliseconds between gravity steps (never 0)
    pub gravity_ms: u32,
    /// Fixed piece seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Upper bound on one input poll / render pass
    pub frame_ms: u32,
    /// JSON-lines event log path
    pub event_log: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_INTERVAL_MS,
            seed: None,
            frame_ms: FRAME_MS,
            event_log: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value lookup. Malformed numbers fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let gravity_ms = lookup(ENV_GRAVITY_MS)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(GRAVITY_INTERVAL_MS)
            .max(1);

        let seed = lookup(ENV_SEED).and_then(|s| s.trim().parse::<u64>().ok());

        let frame_ms = lookup(ENV_FRAME_MS)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(FRAME_MS)
            .max(1);

        let event_log = lookup(ENV_EVENT_LOG)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            gravity_ms,
            seed,
            frame_ms,
            event_log,
        }
    }
}
