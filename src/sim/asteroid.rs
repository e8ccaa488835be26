//! Passive drifting asteroid

use glam::Vec2;

use super::entity::{Arena, Body, EntityKind};
use super::event::Event;
use crate::model::Model;
use crate::renderer::{Surface, colors};

/// An asteroid entity drawn from a polygon model
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    model: Model,
}

impl Asteroid {
    pub fn new(model: Model, body: Body) -> Self {
        if !model.is_loaded() {
            log::warn!("Asteroid created with an empty model");
        }
        Self { body, model }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::Asteroid
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Whether any of `points` lies inside the outline. Hits are not resolved
    /// yet, so this always answers no.
    pub fn collide(&self, points: &[Vec2]) -> bool {
        let _ = points;
        false
    }

    pub fn handle(&mut self, _event: Event, _dt: f32) {}

    /// Drift along the facing direction unless the world is frozen
    pub fn update(&mut self, dt: f32, arena: &Arena) {
        if arena.frozen {
            return;
        }

        let body = &mut self.body;
        body.position.x += body.velocity.x * body.angle.sin() * dt;
        body.position.y += body.velocity.y * body.angle.cos() * dt;

        let Vec2 { x, y } = body.position;
        let s = body.size;
        let bounds = arena.bounds;

        if x + s.x <= 0.0 {
            body.position.x = bounds.x + s.x;
        }
        if x - s.x >= bounds.x {
            body.position.x = -s.x;
        }

        if y + s.y <= 0.0 {
            body.position.y = bounds.y + s.y;
        }
        if y - s.y >= bounds.y {
            body.position.y = -s.y;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let offset = self.body.position;
        for (a, b) in self.model.edges() {
            surface.line(a + offset, b + offset, colors::ASTEROID);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;

    fn arena(frozen: bool) -> Arena {
        Arena {
            bounds: Vec2::new(800.0, 800.0),
            frozen,
        }
    }

    fn asteroid(position: Vec2, angle: f32) -> Asteroid {
        Asteroid::new(
            square(),
            Body::new(Vec2::splat(40.0), position, Vec2::new(80.0, 70.0), angle),
        )
    }

    fn square() -> Model {
        Model::from_vertices(vec![
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
        ])
    }

    #[test]
    fn test_drifts_with_positive_cos() {
        let mut a = asteroid(Vec2::splat(200.0), 0.0);
        a.update(1.0, &arena(false));
        // Unlike projectiles, +cos moves down the screen
        assert_eq!(a.body.position, Vec2::new(200.0, 240.0));
    }

    #[test]
    fn test_frozen_world_suspends_motion() {
        let mut a = asteroid(Vec2::splat(200.0), 23.0);
        a.update(1.0, &arena(true));
        assert_eq!(a.body.position, Vec2::splat(200.0));
    }

    #[test]
    fn test_wraps_with_size_margin() {
        let mut a = asteroid(Vec2::new(400.0, 865.0), 0.0);
        a.update(0.25, &arena(false));
        assert_eq!(a.body.position.y, -70.0);

        a.body.position = Vec2::new(-79.0, 400.0);
        a.body.angle = -std::f32::consts::FRAC_PI_2;
        a.update(0.25, &arena(false));
        assert_eq!(a.body.position.x, 880.0);
    }

    #[test]
    fn test_collide_is_a_stub() {
        let a = Asteroid::new(
            square(),
            Body::new(Vec2::ZERO, Vec2::splat(200.0), Vec2::splat(10.0), 0.0),
        );
        assert!(!a.collide(&[Vec2::splat(200.0)]));
    }

    #[test]
    fn test_draw_closed_outline_at_position() {
        let a = Asteroid::new(
            square(),
            Body::new(Vec2::ZERO, Vec2::splat(200.0), Vec2::splat(10.0), 0.0),
        );
        let mut list = DrawList::new();
        a.draw(&mut list);
        assert_eq!(list.line_count(), 4);
        assert_eq!(
            list.commands[3],
            crate::renderer::DrawCommand::Line {
                a: Vec2::new(190.0, 210.0),
                b: Vec2::new(190.0, 190.0),
                color: colors::ASTEROID,
            }
        );
    }
}
