//! Terminal blockfall runner (default binary).
//!
//! Reads `BLOCKFALL_*` configuration, then loops: render, poll input until the
//! next frame or gravity step is due, apply commands, feed elapsed time to the
//! session and log whatever events it produced.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::config::GameConfig;
use tui_blockfall::core::{GameSession, RandomSource};
use tui_blockfall::event_log::{record_or_disable, EventLog};
use tui_blockfall::input::{key_label, map_key_event, should_quit};
use tui_blockfall::term::{GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::GameCommand;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    eprintln!(
        "[blockfall] gravity {}ms, frame {}ms, seed {}",
        config.gravity_ms,
        config.frame_ms,
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string())
    );

    let mut log = match config.event_log.as_deref() {
        Some(path) => match EventLog::open(path) {
            Ok(log) => {
                eprintln!("[blockfall] event log: {}", path);
                Some(log)
            }
            Err(e) => {
                eprintln!("[blockfall] {:#}; continuing without it", e);
                None
            }
        },
        None => None,
    };

    let source = match config.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    };
    let mut session = GameSession::with_interval(source, config.gravity_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut log_error = None;
    let result = run(&mut term, &mut session, &mut log, &mut log_error, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(e) = log_error {
        eprintln!("[blockfall] {:#}", e);
    }

    if let Some(log) = log.as_mut() {
        if let Err(e) = log.flush() {
            eprintln!("[blockfall] event log flush failed: {:#}", e);
        }
    }
    eprintln!(
        "[blockfall] exit: {}, {} pieces locked",
        session.phase().as_str(),
        session.pieces_locked()
    );
    result
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut GameSession,
    log: &mut Option<EventLog>,
    log_error: &mut Option<anyhow::Error>,
    config: &GameConfig,
) -> Result<()> {
    let view = GameView::default();
    let frame_budget = Duration::from_millis(config.frame_ms as u64);
    let mut snapshot = session.snapshot();
    let mut last_key = String::from("none");
    let mut last_advance = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snapshot);
        let frame = view.render(&snapshot, &last_key, Viewport::new(w, h));
        term.present(&frame)?;

        // Wake up for the next gravity step even if no key arrives.
        let timeout = session
            .gravity()
            .remaining_ms()
            .map(|ms| frame_budget.min(Duration::from_millis(ms as u64)))
            .unwrap_or(frame_budget);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    last_key = key_label(key);
                    if let Some(command) = map_key_event(key) {
                        session.apply_command(command);
                        if command == GameCommand::Reset {
                            last_key = "reset".to_string();
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Only whole milliseconds are consumed; the remainder carries over.
        let elapsed_ms = last_advance.elapsed().as_millis();
        if elapsed_ms > 0 {
            last_advance += Duration::from_millis(elapsed_ms as u64);
            session.advance(elapsed_ms.min(u32::MAX as u128) as u32);
        }

        // Stderr is hidden behind the alternate screen; keep the error for exit.
        if let Some(e) = record_or_disable(log, session.drain_events()) {
            *log_error = Some(e);
        }
    }
}
