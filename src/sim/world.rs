//! World: owns every entity and fans events, updates and draws out to them

use std::collections::HashMap;
use std::time::Instant;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Arena, Entity, EntityKind};
use super::event::{Event, GameMode};
use super::player::Player;
use super::player_state::PlayerStateKind;
use crate::renderer::Surface;

/// How a mode switch installs the new player behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StateSwitch {
    /// Push on top of the current behavior; the stack grows with every switch
    #[default]
    Push,
    /// Pop the current behavior first (the base state is kept)
    Replace,
}

/// The simulated arena
#[derive(Debug, Clone)]
pub struct World {
    entities: Vec<Entity>,
    state_map: HashMap<(GameMode, EntityKind), PlayerStateKind>,
    bounds: Vec2,
    frozen: bool,
    switch: StateSwitch,
}

impl World {
    /// Create an empty world
    pub fn new(bounds: Vec2) -> Self {
        let state_map = HashMap::from([
            ((GameMode::Running, EntityKind::Player), PlayerStateKind::Default),
            ((GameMode::Debug, EntityKind::Player), PlayerStateKind::Rigid),
        ]);

        Self {
            entities: Vec::new(),
            state_map,
            bounds,
            frozen: false,
            switch: StateSwitch::default(),
        }
    }

    pub fn with_state_switch(mut self, switch: StateSwitch) -> Self {
        self.switch = switch;
        self
    }

    pub fn add(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    /// Broadcast an event to every entity
    pub fn handle(&mut self, event: Event, dt: f32) {
        self.handle_at(event, dt, Instant::now());
    }

    pub fn handle_at(&mut self, event: Event, dt: f32, now: Instant) {
        for entity in &mut self.entities {
            entity.handle(event, dt, now);
        }
    }

    /// Advance every entity by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.update_at(dt, Instant::now());
    }

    pub fn update_at(&mut self, dt: f32, now: Instant) {
        let arena = self.arena();
        for entity in &mut self.entities {
            entity.update(dt, &arena, now);
        }
        if self.check_collisions() {
            self.handle_at(Event::Collision, dt, now);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for entity in &self.entities {
            entity.draw(surface);
        }
    }

    /// Install the behavior the state table assigns to each entity for `mode`
    pub fn change_state(&mut self, mode: GameMode) {
        for entity in &mut self.entities {
            let Some(&kind) = self.state_map.get(&(mode, entity.kind())) else {
                continue;
            };
            if let Some(player) = entity.as_player_mut() {
                if self.switch == StateSwitch::Replace && player.state_depth() > 1 {
                    player.pop_state();
                }
                player.push_state(kind);
            }
        }
    }

    /// Toggle the frozen flag (asteroids stop drifting; the player is unaffected)
    pub fn freeze(&mut self) {
        self.frozen = !self.frozen;
        log::info!("World {}", if self.frozen { "frozen" } else { "unfrozen" });
    }

    /// Ask each asteroid whether any projectile is inside it
    fn check_collisions(&self) -> bool {
        let shots: Vec<Vec2> = self
            .players()
            .flat_map(|p| p.projectiles().map(|s| s.body.position))
            .collect();
        if shots.is_empty() {
            return false;
        }

        let hits = self
            .entities
            .iter()
            .filter_map(Entity::as_asteroid)
            .filter(|a| a.collide(&shots))
            .count();
        if hits > 0 {
            log::debug!("{} asteroid collision(s)", hits);
        }
        hits > 0
    }

    pub fn arena(&self) -> Arena {
        Arena {
            bounds: self.bounds,
            frozen: self.frozen,
        }
    }

    pub fn frozen(&self) -> bool {
        self.frozen
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn state_for(&self, mode: GameMode, kind: EntityKind) -> Option<PlayerStateKind> {
        self.state_map.get(&(mode, kind)).copied()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.entities.iter().filter_map(Entity::as_player)
    }

    /// First player, if any
    pub fn player(&self) -> Option<&Player> {
        self.players().next()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.entities.iter_mut().find_map(Entity::as_player_mut)
    }
}
