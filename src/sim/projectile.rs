//! Short-lived bullets fired by the player

use std::time::Instant;

use glam::Vec2;

use super::entity::{Arena, Body, EntityKind};
use super::event::Event;
use crate::clock::Timer;
use crate::consts::DEFAULT_PROJECTILE_DURATION;
use crate::renderer::{Surface, colors};

/// Outcome of a projectile update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStatus {
    Alive,
    /// Lifetime used up; the owner should drop its oldest projectile
    Expired,
}

/// A projectile entity. Its lifetime timer starts at construction.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    duration: Timer,
}

impl Projectile {
    pub fn new(body: Body, now: Instant) -> Self {
        Self::with_duration(body, DEFAULT_PROJECTILE_DURATION, now)
    }

    pub fn with_duration(body: Body, duration: f32, now: Instant) -> Self {
        let mut duration = Timer::new(duration);
        duration.start_at(now);
        Self { body, duration }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    /// Collision hook; hits are not resolved
    pub fn handle(&mut self, _event: Event, _dt: f32) {}

    /// Advance along the facing direction ("up" is forward), wrap, and tick the lifetime
    pub fn update(&mut self, dt: f32, arena: &Arena, now: Instant) -> ProjectileStatus {
        let body = &mut self.body;
        body.position.x += body.velocity.x * body.angle.sin() * dt;
        body.position.y += body.velocity.y * -body.angle.cos() * dt;
        wrap(body, arena.bounds);

        self.duration.tick_at(now);
        if self.duration.time_left() == 0.0 {
            ProjectileStatus::Expired
        } else {
            ProjectileStatus::Alive
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.circle(self.body.position, self.body.size.x, colors::PROJECTILE);
    }

    pub fn time_left(&self) -> f32 {
        self.duration.time_left()
    }
}

/// Projectiles test both axes against `size.y`, and re-enter on the left at
/// `xbound - size.y` rather than past the edge.
fn wrap(body: &mut Body, bounds: Vec2) {
    let Vec2 { x, y } = body.position;
    let m = body.size.y;

    if x + m <= 0.0 {
        body.position.x = bounds.x - m;
    }
    if x - m >= bounds.x {
        body.position.x = -m;
    }

    if y + m <= 0.0 {
        body.position.y = bounds.y + m;
    }
    if y - m >= bounds.y {
        body.position.y = -m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn arena() -> Arena {
        Arena {
            bounds: Vec2::new(800.0, 800.0),
            frozen: false,
        }
    }

    fn bullet(position: Vec2, angle: f32) -> Body {
        Body::new(Vec2::splat(1000.0), position, Vec2::ONE, angle)
    }

    #[test]
    fn test_moves_up_at_zero_angle() {
        let t0 = Instant::now();
        let mut p = Projectile::new(bullet(Vec2::new(400.0, 400.0), 0.0), t0);
        p.update(0.1, &arena(), t0);
        assert!((p.body.position.x - 400.0).abs() < 1e-3);
        assert!((p.body.position.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_moves_right_at_quarter_turn() {
        let t0 = Instant::now();
        let angle = std::f32::consts::FRAC_PI_2;
        let mut p = Projectile::new(bullet(Vec2::new(400.0, 400.0), angle), t0);
        p.update(0.1, &arena(), t0);
        assert!((p.body.position.x - 500.0).abs() < 1e-2);
        assert!((p.body.position.y - 400.0).abs() < 1e-2);
    }

    #[test]
    fn test_wraps_top_to_bottom() {
        let t0 = Instant::now();
        let mut p = Projectile::new(bullet(Vec2::new(400.0, 5.0), 0.0), t0);
        p.update(0.01, &arena(), t0);
        assert_eq!(p.body.position.y, 801.0);
    }

    #[test]
    fn test_wraps_left_edge_inside_right_bound() {
        let t0 = Instant::now();
        let angle = -std::f32::consts::FRAC_PI_2;
        let mut p = Projectile::new(bullet(Vec2::new(5.0, 400.0), angle), t0);
        p.update(0.01, &arena(), t0);
        assert_eq!(p.body.position.x, 799.0);
    }

    #[test]
    fn test_expires_after_duration() {
        let t0 = Instant::now();
        let mut p = Projectile::with_duration(bullet(Vec2::new(400.0, 400.0), 0.0), 1.0, t0);
        let status = p.update(0.0, &arena(), t0 + Duration::from_millis(500));
        assert_eq!(status, ProjectileStatus::Alive);
        let status = p.update(0.0, &arena(), t0 + Duration::from_millis(1200));
        assert_eq!(status, ProjectileStatus::Expired);
        assert_eq!(p.time_left(), 0.0);
    }
}
