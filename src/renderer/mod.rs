//! Drawing surface abstraction
//!
//! The simulation never owns a device. It emits outline primitives through
//! [`Surface`]; the front end decides how to rasterize them.

pub mod terminal;

pub use terminal::TerminalSurface;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgba(0, 0, 0, 0);
    pub const SHIP: Color = Color::rgba(255, 255, 255, 255);
    pub const PROJECTILE: Color = Color::rgba(255, 255, 255, 255);
    pub const ASTEROID: Color = Color::rgba(255, 255, 255, 255);
    pub const HUD: Color = Color::rgba(255, 220, 80, 255);
}

/// Something the world can draw onto
pub trait Surface {
    fn clear(&mut self, color: Color);

    fn line(&mut self, a: Vec2, b: Vec2, color: Color);

    /// Triangle outline
    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.line(a, b, color);
        self.line(b, c, color);
        self.line(c, a, color);
    }

    /// Circle outline
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn text(&mut self, at: Vec2, text: &str, color: Color);
}

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line { a: Vec2, b: Vec2, color: Color },
    Triangle { a: Vec2, b: Vec2, c: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { at: Vec2, text: String, color: Color },
}

/// Surface that records every primitive instead of rasterizing it
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Triangle { a, b, c, .. } => Some([*a, *b, *c]),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { a, b, color });
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.commands.push(DrawCommand::Triangle { a, b, c, color });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, at: Vec2, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color,
        });
    }
}
