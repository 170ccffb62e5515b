//! Append-only JSON-lines log of session events.
//!
//! One [`LogRecord`] per line:
//!
//! ```text
//! {"seq":3,"elapsedMs":1500,"event":"locked","kind":"O","cellsWritten":4}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::GameEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub seq: u64,
    pub elapsed_ms: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells_written: Option<u8>,
}

impl LogRecord {
    pub fn new(seq: u64, elapsed_ms: u64, event: &GameEvent) -> Self {
        let (kind, cells_written) = match *event {
            GameEvent::Locked {
                kind,
                cells_written,
            } => (Some(kind.name()), Some(cells_written)),
            GameEvent::Spawned { kind } => (Some(kind.name()), None),
            _ => (None, None),
        };
        Self {
            seq,
            elapsed_ms,
            event: event.name(),
            kind,
            cells_written,
        }
    }
}

pub struct EventLog<W: Write = BufWriter<File>> {
    out: W,
    seq: u64,
    started: Instant,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("event log: open {} failed", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            started: Instant::now(),
            buf: Vec::with_capacity(256),
        }
    }

    /// Records written so far
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    /// Stamp `event` with the time since the log was created
    pub fn record(&mut self, event: &GameEvent) -> Result<()> {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.record_at(elapsed_ms, event)
    }

    pub fn record_at(&mut self, elapsed_ms: u64, event: &GameEvent) -> Result<()> {
        let record = LogRecord::new(self.seq, elapsed_ms, event);
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.seq += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Record `events` into an optional log.
///
/// The first failed write drops the log and returns the error, so the caller
/// reports it once and keeps running without a log.
pub fn record_or_disable<W: Write>(
    log: &mut Option<EventLog<W>>,
    events: impl IntoIterator<Item = GameEvent>,
) -> Option<anyhow::Error> {
    let active = log.as_mut()?;
    for event in events {
        if let Err(e) = active.record(&event) {
            *log = None;
            return Some(e.context("event log: write failed; logging disabled"));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn lines(log: EventLog<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = log.into_inner();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_records_are_numbered_lines() {
        let mut log = EventLog::new(Vec::new());
        log.record_at(0, &GameEvent::Started).unwrap();
        log.record_at(500, &GameEvent::Paused).unwrap();
        assert_eq!(log.len(), 2);

        let lines = lines(log);
        assert_eq!(lines[0]["seq"], 0);
        assert_eq!(lines[0]["event"], "started");
        assert_eq!(lines[1]["seq"], 1);
        assert_eq!(lines[1]["elapsedMs"], 500);
        assert!(lines[1].get("kind").is_none());
    }

    #[test]
    fn test_piece_fields() {
        let mut log = EventLog::new(Vec::new());
        log.record_at(
            10,
            &GameEvent::Locked {
                kind: PieceKind::O,
                cells_written: 4,
            },
        )
        .unwrap();
        log.record_at(10, &GameEvent::Spawned { kind: PieceKind::T })
            .unwrap();

        let lines = lines(log);
        assert_eq!(lines[0]["event"], "locked");
        assert_eq!(lines[0]["kind"], "O");
        assert_eq!(lines[0]["cellsWritten"], 4);
        assert_eq!(lines[1]["event"], "spawned");
        assert_eq!(lines[1]["kind"], "T");
        assert!(lines[1].get("cellsWritten").is_none());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_disables_log() {
        let mut log = Some(EventLog::new(BrokenPipe));
        let err = record_or_disable(&mut log, [GameEvent::Started, GameEvent::Paused]);

        assert!(err.is_some());
        assert!(log.is_none());
        // Later batches are dropped quietly.
        assert!(record_or_disable(&mut log, [GameEvent::Reset]).is_none());
    }

    #[test]
    fn test_record_or_disable_keeps_working_log() {
        let mut log = Some(EventLog::new(Vec::new()));
        assert!(record_or_disable(&mut log, [GameEvent::Started, GameEvent::GameOver]).is_none());
        assert_eq!(log.map(|l| l.len()), Some(2));

        let mut none: Option<EventLog<Vec<u8>>> = None;
        assert!(record_or_disable(&mut none, [GameEvent::Started]).is_none());
    }

    #[test]
    fn test_open_appends_to_file() {
        let path = std::env::temp_dir().join(format!(
            "blockfall-event-log-{}.jsonl",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        for event in [GameEvent::Started, GameEvent::GameOver] {
            let mut log = EventLog::open(&path).unwrap();
            log.record(&event).unwrap();
            log.flush().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let events: Vec<&str> = text.lines().collect();
        assert_eq!(events.len(), 2);
        assert!(events[0].contains("\"started\""));
        assert!(events[1].contains("\"gameOver\""));
    }
}
