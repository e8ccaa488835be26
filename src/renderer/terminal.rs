//! Character-grid surface for terminals
//!
//! Arena coordinates are scaled onto the terminal's cell grid. Lines are
//! stepped cell by cell, circles are sampled around their circumference.

use std::f32::consts::PI;
use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Print},
    terminal,
};
use glam::Vec2;

use super::{Color, Surface};

const LINE_GLYPH: char = '#';
const CIRCLE_GLYPH: char = 'o';
const DOT_GLYPH: char = '.';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

/// Off-screen cell buffer flushed to a terminal once per frame
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    arena: Vec2,
    cells: Vec<Option<Cell>>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, arena: Vec2) -> Self {
        Self {
            cols,
            rows,
            arena,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; cols as usize * rows as usize];
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Glyph at a cell, if anything was drawn there this frame
    pub fn glyph(&self, col: u16, row: u16) -> Option<char> {
        self.index(col as i32, row as i32)
            .and_then(|i| self.cells[i])
            .map(|c| c.glyph)
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / self.arena.x.max(1.0),
            self.rows as f32 / self.arena.y.max(1.0),
        )
    }

    fn to_cell(&self, p: Vec2) -> (i32, i32) {
        let c = p * self.scale();
        (c.x.floor() as i32, c.y.floor() as i32)
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    fn plot(&mut self, col: i32, row: i32, glyph: char, color: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Some(Cell { glyph, color });
        }
    }

    fn plot_line(&mut self, from: (i32, i32), to: (i32, i32), glyph: char, color: Color) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, glyph, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Queue the buffer to `out` and flush
    pub fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        let mut current: Option<Color> = None;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let Some(cell) = self.cells[row as usize * self.cols as usize + col as usize]
                else {
                    continue;
                };
                if current != Some(cell.color) {
                    out.queue(style::SetForegroundColor(style::Color::Rgb {
                        r: cell.color.r,
                        g: cell.color.g,
                        b: cell.color.b,
                    }))?;
                    current = Some(cell.color);
                }
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(cell.glyph))?;
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self, _color: Color) {
        self.cells.fill(None);
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: Color) {
        let from = self.to_cell(a);
        let to = self.to_cell(b);
        self.plot_line(from, to, LINE_GLYPH, color);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let cell_radius = radius * self.scale().max_element();
        if cell_radius < 1.0 {
            let (col, row) = self.to_cell(center);
            self.plot(col, row, DOT_GLYPH, color);
            return;
        }

        let segments = ((cell_radius * 8.0) as u32).clamp(8, 128);
        for i in 0..segments {
            let theta = (i as f32 / segments as f32) * 2.0 * PI;
            let p = center + Vec2::new(theta.cos(), theta.sin()) * radius;
            let (col, row) = self.to_cell(p);
            self.plot(col, row, CIRCLE_GLYPH, color);
        }
    }

    fn text(&mut self, at: Vec2, text: &str, color: Color) {
        let (col, row) = self.to_cell(at);
        for (i, glyph) in text.chars().enumerate() {
            self.plot(col + i as i32, row, glyph, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_line_scaled_to_cells() {
        let mut surface = TerminalSurface::new(80, 40, Vec2::new(800.0, 800.0));
        surface.line(Vec2::new(0.0, 0.0), Vec2::new(799.0, 0.0), colors::SHIP);
        assert_eq!(surface.glyph(0, 0), Some(LINE_GLYPH));
        assert_eq!(surface.glyph(79, 0), Some(LINE_GLYPH));
        assert_eq!(surface.glyph(40, 1), None);
    }

    #[test]
    fn test_small_circle_is_a_dot() {
        let mut surface = TerminalSurface::new(80, 40, Vec2::new(800.0, 800.0));
        surface.circle(Vec2::new(405.0, 405.0), 1.0, colors::PROJECTILE);
        assert_eq!(surface.glyph(40, 20), Some(DOT_GLYPH));
    }

    #[test]
    fn test_offscreen_points_are_clipped() {
        let mut surface = TerminalSurface::new(10, 10, Vec2::new(100.0, 100.0));
        surface.line(Vec2::new(-50.0, 5.0), Vec2::new(150.0, 5.0), colors::SHIP);
        assert_eq!(surface.glyph(0, 0), Some(LINE_GLYPH));
        assert_eq!(surface.glyph(9, 0), Some(LINE_GLYPH));
    }

    #[test]
    fn test_clear_empties_buffer() {
        let mut surface = TerminalSurface::new(10, 10, Vec2::new(100.0, 100.0));
        surface.text(Vec2::ZERO, "hi", colors::HUD);
        assert_eq!(surface.glyph(1, 0), Some('i'));
        surface.clear(colors::BACKGROUND);
        assert_eq!(surface.glyph(1, 0), None);
    }

    #[test]
    fn test_present_writes_escape_sequences() {
        let mut surface = TerminalSurface::new(4, 2, Vec2::new(4.0, 2.0));
        surface.text(Vec2::ZERO, "ab", colors::HUD);
        let mut out = Vec::new();
        surface.present(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('a'));
        assert!(text.contains('b'));
    }
}
