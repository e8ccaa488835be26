//! Kinematic bodies and the closed set of world entities

use std::time::Instant;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::event::Event;
use super::player::Player;
use crate::renderer::Surface;

/// Position, velocity, half-extents and facing shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub velocity: Vec2,
    pub position: Vec2,
    /// Half-extents
    pub size: Vec2,
    /// Facing angle in radians (not normalized)
    pub angle: f32,
}

impl Body {
    pub fn new(velocity: Vec2, position: Vec2, size: Vec2, angle: f32) -> Self {
        Self {
            velocity,
            position,
            size,
            angle,
        }
    }
}

/// Entity kinds, used as the second key of the world's state table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Asteroid,
}

/// Per-frame view of the world handed down to entity updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub bounds: Vec2,
    /// Suspends asteroid motion only
    pub frozen: bool,
}

/// Everything the world owns directly. Projectiles live inside their player.
#[derive(Debug, Clone)]
pub enum Entity {
    Player(Player),
    Asteroid(Asteroid),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Asteroid(_) => EntityKind::Asteroid,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::Asteroid(a) => &a.body,
        }
    }

    pub fn handle(&mut self, event: Event, dt: f32, now: Instant) {
        match self {
            Entity::Player(p) => p.handle(event, dt, now),
            Entity::Asteroid(a) => a.handle(event, dt),
        }
    }

    pub fn update(&mut self, dt: f32, arena: &Arena, now: Instant) {
        match self {
            Entity::Player(p) => p.update(dt, arena, now),
            Entity::Asteroid(a) => a.update(dt, arena),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Entity::Player(p) => p.draw(surface),
            Entity::Asteroid(a) => a.draw(surface),
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match self {
            Entity::Asteroid(a) => Some(a),
            _ => None,
        }
    }
}

impl From<Player> for Entity {
    fn from(player: Player) -> Self {
        Entity::Player(player)
    }
}

impl From<Asteroid> for Entity {
    fn from(asteroid: Asteroid) -> Self {
        Entity::Asteroid(asteroid)
    }
}
