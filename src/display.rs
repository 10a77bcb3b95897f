//! Rendering layer — all terminal I/O lives here.
//!
//! The core draws into a [`TerminalCanvas`] through the `Canvas` trait, which
//! scales logical pixels down to character cells and keeps one glyph per
//! cell.  [`present`] then flushes the buffer to the terminal.  No game logic
//! is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use galaxy_king::entities::Screen;
use galaxy_king::host::Canvas;
use galaxy_king::sprites::{self, palette, SpriteRegion};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLANE: Color = Color::White;
const C_REGULAR: Color = Color::Green;
const C_RED: Color = Color::Red;
const C_BOMBARDIER: Color = Color::Yellow;
const C_SUPER_BOMBARDIER: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_SPARK: Color = Color::Yellow;

/// Terminal colour for a 16-colour palette index.
fn palette_color(index: u8) -> Color {
    match index % palette::COUNT {
        0 => Color::Black,
        1 => Color::DarkBlue,
        2 => Color::DarkMagenta,
        3 => Color::DarkGreen,
        4 => Color::DarkRed,
        5 => Color::Blue,
        6 => Color::Cyan,
        7 => Color::White,
        8 => Color::Red,
        9 => Color::DarkYellow,
        10 => Color::Yellow,
        11 => Color::Green,
        12 => Color::DarkCyan,
        13 => Color::Grey,
        14 => Color::Magenta,
        _ => Color::DarkGrey,
    }
}

/// Glyphs and colour standing in for a sprite sheet region.
fn sprite_glyph(region: SpriteRegion) -> (&'static str, Color) {
    match region {
        sprites::PLANE => ("/▲\\", C_PLANE),
        sprites::PLANE_BANK_LEFT => ("/▲", C_PLANE),
        sprites::PLANE_UNDERSIDE => ("▼", C_PLANE),
        sprites::PLANE_BANK_RIGHT => ("▲\\", C_PLANE),
        sprites::REGULAR_ENEMY => ("«▼»", C_REGULAR),
        sprites::RED_ENEMY => ("(◎)", C_RED),
        sprites::BOMBARDIER => ("╚▼╝", C_BOMBARDIER),
        sprites::SUPER_BOMBARDIER => ("◄█►", C_SUPER_BOMBARDIER),
        sprites::PLAYER_BULLET => ("║", C_BULLET_PLAYER),
        sprites::ENEMY_BULLET => ("•", C_BULLET_ENEMY),
        sprites::BLAST_SPARK => ("*", C_SPARK),
        _ => ("?", Color::DarkGrey),
    }
}

// ── Cell buffer ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    color: Color,
}

pub struct TerminalCanvas {
    screen: Screen,
    cols: u16,
    rows: u16,
    cells: Vec<Option<Cell>>,
}

impl TerminalCanvas {
    pub fn new(screen: Screen, cols: u16, rows: u16) -> Self {
        Self {
            screen,
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Match the terminal size.  Clears the buffer when it changes.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != (self.cols, self.rows) {
            *self = Self::new(self.screen, cols, rows);
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Logical pixel → cell, or `None` when off the grid.
    fn cell_at(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / self.screen.width * self.cols as f32).floor();
        let row = (y / self.screen.height * self.rows as f32).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn put(&mut self, x: f32, y: f32, glyphs: &str, color: Color) {
        let Some((col, row)) = self.cell_at(x, y) else {
            return;
        };
        let start = row as usize * self.cols as usize;
        for (i, ch) in glyphs.chars().enumerate() {
            let col = col as usize + i;
            if col >= self.cols as usize {
                break;
            }
            self.cells[start + col] = Some(Cell { ch, color });
        }
    }
}

impl Canvas for TerminalCanvas {
    fn blit(&mut self, x: f32, y: f32, region: SpriteRegion) {
        let (glyphs, color) = sprite_glyph(region);
        self.put(x, y, glyphs, color);
    }

    fn circle(&mut self, x: f32, y: f32, radius: f32, _fill: u8, border: u8) {
        let glyph = if radius < 7.0 { "o" } else { "O" };
        self.put(x, y, glyph, palette_color(border));
    }

    fn text(&mut self, x: f32, y: f32, text: &str, color: u8) {
        self.put(x, y, text, palette_color(color));
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn present<W: Write>(out: &mut W, canvas: &TerminalCanvas) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cols = canvas.cols as usize;
    for (i, cell) in canvas.cells.iter().enumerate() {
        let Some(cell) = cell else {
            continue;
        };
        out.queue(cursor::MoveTo((i % cols) as u16, (i / cols) as u16))?;
        out.queue(style::SetForegroundColor(cell.color))?;
        out.queue(Print(cell.ch))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
