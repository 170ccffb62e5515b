//! GameView: maps a core `GameSnapshot` into a terminal frame.
//!
//! This module is pure (no I/O). It only reads the snapshot it is given.

use crate::core::GameSnapshot;
use crate::frame::{Frame, Rgb, Style, BLACK, TEXT};
use crate::types::{Color, GamePhase, FIELD_HEIGHT, FIELD_WIDTH};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the field lands inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Row of the debug line
    pub debug_y: u16,
    /// Top-left corner of the border
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl Layout {
    /// Terminal column/row of the top-left glyph of field cell (x, y)
    pub fn cell_origin(&self, x: u16, y: u16, cell_w: u16) -> (u16, u16) {
        (self.frame_x + 1 + x * cell_w, self.frame_y + 1 + y)
    }
}

/// Renders the playfield, the active piece, a debug line and a side panel.
pub struct GameView {
    /// Terminal columns per field cell
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = FIELD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = FIELD_HEIGHT as u16 + 2;
        // One extra row on top for the debug line.
        let debug_y = viewport.height.saturating_sub(frame_h + 1) / 2;
        Layout {
            debug_y,
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: debug_y + 1,
            frame_w,
            frame_h,
        }
    }

    /// Render one frame. `last_key` is the label shown on the debug line.
    pub fn render(&self, snap: &GameSnapshot, last_key: &str, viewport: Viewport) -> Frame {
        let mut frame = Frame::new(viewport.width, viewport.height);
        self.render_into(snap, last_key, &mut frame);
        frame
    }

    pub fn render_into(&self, snap: &GameSnapshot, last_key: &str, frame: &mut Frame) {
        frame.clear();
        let layout = self.layout(Viewport::new(frame.width(), frame.height()));

        let debug = format!(
            "({}, {}), {}, {}",
            snap.active.x, snap.active.y, snap.running, last_key
        );
        let debug_style = Style::new(Rgb::new(90, 140, 255), BLACK);
        frame.text(layout.frame_x, layout.debug_y, &debug, debug_style);

        self.draw_border(frame, &layout);

        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(frame, &layout, x, y, color),
                    None => self.draw_empty(frame, &layout, x, y),
                }
            }
        }

        for (x, y) in snap.active.visible_cells() {
            self.draw_block(frame, &layout, x, y, snap.active.color);
        }

        self.draw_panel(frame, &layout, snap);

        match snap.phase {
            GamePhase::GameOver => {
                self.draw_banner(frame, &layout, "GAME OVER", Rgb::new(255, 60, 60))
            }
            GamePhase::Idle => self.draw_banner(frame, &layout, "ENTER TO START", TEXT),
            GamePhase::Falling => {}
        }
    }

    fn draw_border(&self, frame: &mut Frame, layout: &Layout) {
        let style = Style::new(Rgb::new(200, 200, 200), BLACK);
        let (x0, y0) = (layout.frame_x, layout.frame_y);
        let x1 = x0 + layout.frame_w - 1;
        let y1 = y0 + layout.frame_h - 1;

        for x in x0 + 1..x1 {
            frame.put(x, y0, '─', style);
            frame.put(x, y1, '─', style);
        }
        for y in y0 + 1..y1 {
            frame.put(x0, y, '│', style);
            frame.put(x1, y, '│', style);
        }
        frame.put(x0, y0, '┌', style);
        frame.put(x1, y0, '┐', style);
        frame.put(x0, y1, '└', style);
        frame.put(x1, y1, '┘', style);
    }

    fn draw_block(&self, frame: &mut Frame, layout: &Layout, x: usize, y: usize, color: Color) {
        let (px, py) = layout.cell_origin(x as u16, y as u16, self.cell_w);
        let style = Style::new(color_rgb(color), FIELD_BG).bold();
        frame.fill(px, py, self.cell_w, 1, '█', style);
    }

    fn draw_empty(&self, frame: &mut Frame, layout: &Layout, x: usize, y: usize) {
        let (px, py) = layout.cell_origin(x as u16, y as u16, self.cell_w);
        frame.fill(px, py, self.cell_w, 1, ' ', Style::new(TEXT, FIELD_BG));
        frame.put(px, py, '·', Style::new(Rgb::new(90, 90, 100), FIELD_BG));
    }

    fn draw_panel(&self, frame: &mut Frame, layout: &Layout, snap: &GameSnapshot) {
        let x = layout.frame_x + layout.frame_w + 2;
        if x >= frame.width() {
            return;
        }
        let label = Style::default().bold();
        let value = Style::default();
        let mut y = layout.frame_y;

        frame.text(x, y, "STATE", label);
        frame.text(x, y + 1, snap.phase.as_str(), value);
        y += 3;

        frame.text(x, y, "PIECES", label);
        frame.text(x, y + 1, &snap.pieces_locked.to_string(), value);
        y += 3;

        frame.text(x, y, "NOW", label);
        let piece_style = Style::new(color_rgb(snap.active.color), BLACK);
        frame.text(x, y + 1, snap.active.kind.name(), piece_style);
        y += 3;

        let help = [
            "Enter  start/pause",
            "<- ->  move",
            "Down   soft drop",
            "Space  hard drop",
            "M / N  rotate",
            "R      reset",
            "Q      quit",
        ];
        for line in help {
            frame.text(x, y, line, value);
            y += 1;
        }
    }

    fn draw_banner(&self, frame: &mut Frame, layout: &Layout, text: &str, fg: Rgb) {
        let len = text.chars().count() as u16;
        let x = layout.frame_x + layout.frame_w.saturating_sub(len) / 2;
        let y = layout.frame_y + layout.frame_h / 2;
        frame.text(x, y, text, Style::new(fg, BLACK).bold());
    }
}

/// Terminal color for a block color tag
pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Yellow => Rgb::new(240, 220, 80),
    }
}
