//! The player's ship
//!
//! Owns its projectiles (oldest first), a shot cooldown, and a stack of
//! behaviors. The stack is never empty; `Default` is pushed at construction.

use std::collections::VecDeque;
use std::time::Instant;

use glam::Vec2;

use super::entity::{Arena, Body, EntityKind};
use super::event::Event;
use super::player_state::{PlayerState, PlayerStateKind};
use super::projectile::{Projectile, ProjectileStatus};
use crate::clock::Timer;
use crate::consts::*;
use crate::renderer::{Surface, colors};
use crate::rotate;

/// A player entity
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub acceleration: f32,
    pub max_velocity: f32,
    /// Degrees per rotate event
    pub rotation_speed: f32,
    /// Step used when a rigid state is pushed
    pub debug_jump: f32,
    /// Lifetime given to new projectiles
    pub projectile_duration: f32,
    projectiles: VecDeque<Projectile>,
    delay: Timer,
    states: Vec<PlayerState>,
    /// Nose, left, right
    vertices: [Vec2; 3],
}

impl Player {
    pub fn new(body: Body, max_velocity: f32, acceleration: f32, rotation_speed: f32) -> Self {
        let mut player = Self {
            body,
            acceleration,
            max_velocity,
            rotation_speed,
            debug_jump: PLAYER_DEBUG_JUMP,
            projectile_duration: DEFAULT_PROJECTILE_DURATION,
            projectiles: VecDeque::new(),
            delay: Timer::new(DEFAULT_PROJECTILE_DELAY),
            states: vec![PlayerState::Default],
            vertices: [Vec2::ZERO; 3],
        };
        player.vertices = player.hull_template();
        player
    }

    /// Override the minimum time between shots
    pub fn with_shot_delay(mut self, seconds: f32) -> Self {
        self.delay.set_timer(seconds);
        self
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    // === State stack ===

    /// Make a new behavior active. `Stationary` is reserved and ignored.
    pub fn push_state(&mut self, kind: PlayerStateKind) {
        let state = match kind {
            PlayerStateKind::Default => PlayerState::Default,
            PlayerStateKind::Rigid => PlayerState::Rigid {
                jump: self.debug_jump,
            },
            PlayerStateKind::Stationary => {
                log::debug!("Stationary player state is reserved, ignoring push");
                return;
            }
        };
        log::debug!("Player state pushed: {:?} (depth {})", kind, self.states.len() + 1);
        self.states.push(state);
    }

    /// Drop the active behavior and reactivate the previous one.
    /// The last behavior is never dropped; returns whether a pop happened.
    pub fn pop_state(&mut self) -> bool {
        if self.states.len() <= 1 {
            log::warn!("Refusing to pop the player's last state");
            return false;
        }
        self.states.pop();
        true
    }

    /// Active behavior
    pub fn state(&self) -> PlayerState {
        self.states.last().copied().unwrap_or(PlayerState::Default)
    }

    pub fn state_depth(&self) -> usize {
        self.states.len()
    }

    // === Shooting ===

    /// Fire from the nose unless the cooldown is still running
    pub fn shoot(&mut self, now: Instant) {
        if self.delay.time_left() == 0.0 || !self.delay.is_ticking() {
            let body = Body::new(
                Vec2::splat(PROJECTILE_SPEED),
                self.nose(),
                Vec2::splat(PROJECTILE_SIZE),
                self.body.angle,
            );
            self.projectiles
                .push_back(Projectile::with_duration(body, self.projectile_duration, now));
            log::debug!("Shot fired ({} in flight)", self.projectiles.len());

            self.delay.reset();
            self.delay.start_at(now);
        }
    }

    /// Remove the oldest projectile
    pub fn pop_projectile(&mut self) {
        self.projectiles.pop_front();
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn cooldown(&self) -> &Timer {
        &self.delay
    }

    // === Geometry ===

    pub fn vertices(&self) -> &[Vec2; 3] {
        &self.vertices
    }

    /// Forward-facing vertex, where projectiles spawn
    pub fn nose(&self) -> Vec2 {
        self.vertices[0]
    }

    fn hull_template(&self) -> [Vec2; 3] {
        let Vec2 { x, y } = self.body.position;
        let s = self.body.size;
        [
            Vec2::new(x, y - s.y),
            Vec2::new(x - s.x, y + s.y),
            Vec2::new(x + s.x, y + s.y),
        ]
    }

    /// Recompute the hull from the upright template rotated about the position
    pub(crate) fn rebuild_hull(&mut self) {
        let pivot = self.body.position;
        let angle = self.body.angle;
        self.vertices = self.hull_template().map(|v| rotate(pivot, v, angle));
    }

    /// Wrap with a `2 * size` exit margin, re-entering `size` past the opposite edge
    pub(crate) fn wrap(&mut self, bounds: Vec2) {
        let Vec2 { x, y } = self.body.position;
        let s = self.body.size;

        if x + 2.0 * s.x <= 0.0 {
            self.body.position.x = bounds.x + s.x;
        }
        if x - 2.0 * s.x >= bounds.x {
            self.body.position.x = -s.x;
        }

        if y + 2.0 * s.y <= 0.0 {
            self.body.position.y = bounds.y + s.y;
        }
        if y - 2.0 * s.y >= bounds.y {
            self.body.position.y = -s.y;
        }
    }

    /// Advance every projectile; each expiry drops the oldest one
    pub(crate) fn update_projectiles(&mut self, dt: f32, arena: &Arena, now: Instant) {
        let expired = self
            .projectiles
            .iter_mut()
            .map(|p| p.update(dt, arena, now))
            .filter(|s| *s == ProjectileStatus::Expired)
            .count();
        for _ in 0..expired {
            self.pop_projectile();
        }
        if expired > 0 {
            log::debug!("{} projectile(s) expired", expired);
        }
    }

    // === Entity behavior ===

    pub fn handle(&mut self, event: Event, dt: f32, now: Instant) {
        self.state().handle(self, event, dt, now);
    }

    pub fn update(&mut self, dt: f32, arena: &Arena, now: Instant) {
        self.state().update(self, dt, arena, now);
        self.delay.tick_at(now);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let [a, b, c] = self.vertices;
        surface.triangle(a, b, c, colors::SHIP);
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }
    }
}
