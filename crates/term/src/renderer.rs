//! TerminalRenderer: flushes frames to a real terminal.
//!
//! Only glyphs that changed since the previous frame are written. The first
//! frame, and any frame after a size change or [`TerminalRenderer::invalidate`],
//! is written in full.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::frame::{Frame, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    previous: Option<Frame>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            previous: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo everything `enter` did
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to redraw everything (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_frame(self.previous.as_ref(), frame, &mut self.buf)?;
        self.flush()?;

        match &mut self.previous {
            Some(previous) => previous.clone_from(frame),
            None => self.previous = Some(frame.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the commands that turn `previous` into `next` on screen.
///
/// Without a comparable previous frame the screen is cleared and every row is
/// written.
pub fn encode_frame(previous: Option<&Frame>, next: &Frame, out: &mut Vec<u8>) -> Result<()> {
    let previous = previous
        .filter(|p| p.width() == next.width() && p.height() == next.height());
    if previous.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<Style> = None;
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, len) in changed_spans(previous.map(|p| p.row(y)), row) {
            out.queue(cursor::MoveTo(start, y))?;
            for glyph in &row[start as usize..(start + len) as usize] {
                if current != Some(glyph.style) {
                    queue_style(out, glyph.style)?;
                    current = Some(glyph.style);
                }
                out.queue(Print(glyph.ch))?;
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Runs of differing glyphs in one row as (start, len); every glyph is dirty
/// when there is no previous row.
pub fn changed_spans(previous: Option<&[Glyph]>, next: &[Glyph]) -> Vec<(u16, u16)> {
    let Some(previous) = previous else {
        return if next.is_empty() {
            Vec::new()
        } else {
            vec![(0, next.len() as u16)]
        };
    };

    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (x, (old, new)) in previous.iter().zip(next).enumerate() {
        match (old != new, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                spans.push((s as u16, (x - s) as u16));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s as u16, (next.len() - s) as u16));
    }
    spans
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_term_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_term_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn to_term_color(rgb: Rgb) -> style::Color {
    style::Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char) -> Glyph {
        Glyph {
            ch,
            style: Style::default(),
        }
    }

    #[test]
    fn test_spans_without_previous_cover_row() {
        let row = [glyph('a'), glyph('b'), glyph('c')];
        assert_eq!(changed_spans(None, &row), vec![(0, 3)]);
        assert!(changed_spans(None, &[]).is_empty());
    }

    #[test]
    fn test_spans_coalesce_adjacent_changes() {
        let old = [glyph(' '); 6];
        let new = [
            glyph(' '),
            glyph('x'),
            glyph('x'),
            glyph(' '),
            glyph(' '),
            glyph('y'),
        ];
        assert_eq!(changed_spans(Some(&old), &new), vec![(1, 2), (5, 1)]);
    }

    #[test]
    fn test_identical_frames_emit_no_glyphs() {
        let mut frame = Frame::new(4, 2);
        frame.text(0, 0, "abcd", Style::default());

        let mut out = Vec::new();
        encode_frame(Some(&frame), &frame, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains("abcd"));
    }

    #[test]
    fn test_full_redraw_on_size_change() {
        let old = Frame::new(2, 2);
        let mut new = Frame::new(3, 1);
        new.text(0, 0, "xyz", Style::default());

        let mut out = Vec::new();
        encode_frame(Some(&old), &new, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("xyz"));
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(
            to_term_color(Rgb::new(1, 2, 3)),
            style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
