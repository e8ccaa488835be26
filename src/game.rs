//! Game mode stack and key mapping
//!
//! Raw keys go through the active [`GameState`] to become semantic events.
//! Game-level events (mode switches, toggles, quit) are handled here; the rest
//! are broadcast through the world.

use std::time::Instant;

use glam::Vec2;

use crate::model::Model;
use crate::renderer::{Surface, colors};
use crate::settings::{LaunchOptions, Settings};
use crate::sim::{Asteroid, Body, Event, GameMode, Player, World};

/// Raw key identifiers delivered by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Space,
    Backspace,
    Escape,
    Enter,
    Tab,
}

/// Input delivered by the front end each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    /// Window closed / interrupt
    Quit,
}

/// Active input/render mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Debug {
        /// Asteroid motion suspended
        freeze: bool,
        /// WASD jump the ship instead of steering it
        rigid: bool,
    },
}

impl GameState {
    pub fn mode(&self) -> GameMode {
        match self {
            GameState::Running => GameMode::Running,
            GameState::Debug { .. } => GameMode::Debug,
        }
    }

    /// Map a raw key to a semantic event in this mode
    pub fn handle_key(&self, key: KeyCode) -> Option<Event> {
        let event = match (self, key) {
            (_, KeyCode::Escape) => Event::Quit,
            (_, KeyCode::Space) => Event::PlayerShoot,
            (_, KeyCode::Char('l')) => Event::GameEventListen,

            (GameState::Running, KeyCode::Char('`')) => Event::ChangeStateDebug,

            (GameState::Debug { .. }, KeyCode::Backspace) => Event::PopState,
            (GameState::Debug { .. }, KeyCode::Char('f')) => Event::ToggleFreeze,
            (GameState::Debug { .. }, KeyCode::Char('r')) => Event::ToggleRigid,

            (GameState::Debug { rigid: true, .. }, KeyCode::Char(c)) => match c {
                'w' => Event::PlayerMoveForward,
                's' => Event::PlayerMoveBackward,
                'd' => Event::PlayerMoveRight,
                'a' => Event::PlayerMoveLeft,
                'e' => Event::PlayerRotateRight,
                'q' => Event::PlayerRotateLeft,
                _ => return None,
            },

            (_, KeyCode::Char('w')) => Event::PlayerAccelerate,
            (_, KeyCode::Char('d')) => Event::PlayerRotateRight,
            (_, KeyCode::Char('a')) => Event::PlayerRotateLeft,
            _ => return None,
        };
        Some(event)
    }
}

/// Top-level game: the world plus the mode stack
#[derive(Debug, Clone)]
pub struct Game {
    world: World,
    states: Vec<GameState>,
    running: bool,
    listening: bool,
}

impl Game {
    /// Build the default arena: one ship in the middle, one asteroid
    pub fn new(settings: &Settings, options: &LaunchOptions) -> Self {
        let mut world = World::new(settings.arena).with_state_switch(settings.state_switch);

        let ps = &settings.player;
        let mut player = Player::new(
            Body::new(Vec2::ZERO, ps.start, ps.size, 0.0),
            ps.max_velocity,
            ps.acceleration,
            ps.rotation_speed,
        )
        .with_shot_delay(ps.shot_delay);
        player.debug_jump = ps.debug_jump;
        player.projectile_duration = ps.projectile_duration;
        world.add(player);

        let asteroid_settings = &settings.asteroid;
        let model_path = options.model.as_ref().or(asteroid_settings.model.as_ref());
        let model = model_path
            .and_then(|path| match Model::load(path) {
                Ok(model) if model.is_loaded() => Some(model),
                Ok(_) => {
                    log::warn!(
                        "Model {} has no vertices, using a procedural outline",
                        path.display()
                    );
                    None
                }
                Err(e) => {
                    log::warn!("{}; using a procedural outline", e);
                    None
                }
            })
            .unwrap_or_else(|| {
                Model::procedural(
                    asteroid_settings.seed,
                    asteroid_settings.size,
                    asteroid_settings.outline_points,
                )
            });
        world.add(Asteroid::new(
            model,
            Body::new(
                asteroid_settings.velocity,
                asteroid_settings.start,
                asteroid_settings.size,
                asteroid_settings.angle,
            ),
        ));

        let mut game = Self::with_world(world);
        if options.debug {
            game.push_state(GameState::Debug {
                freeze: false,
                rigid: options.rigid,
            });
            if options.freeze {
                game.toggle_freeze();
            }
        }
        game
    }

    /// Wrap an already populated world, starting in Running mode
    pub fn with_world(world: World) -> Self {
        Self {
            world,
            states: vec![GameState::Running],
            running: true,
            listening: false,
        }
    }

    // === Mode stack ===

    /// Active mode
    pub fn state(&self) -> GameState {
        self.states.last().copied().unwrap_or(GameState::Running)
    }

    /// Make `state` active and reconfigure the world's entities for it
    pub fn push_state(&mut self, state: GameState) {
        self.states.push(state);
        log::info!("Game state: {:?}", state);
        self.world.change_state(state.mode());
    }

    /// Return to the previous mode. The base mode is never popped.
    pub fn pop_state(&mut self) -> bool {
        if self.states.len() <= 1 {
            log::warn!("Refusing to pop the last game state");
            return false;
        }
        if let Some(GameState::Debug { freeze: true, .. }) = self.states.pop() {
            if self.world.frozen() {
                self.world.freeze();
            }
        }
        let state = self.state();
        log::info!("Game state: {:?}", state);
        self.world.change_state(state.mode());
        true
    }

    fn toggle_freeze(&mut self) {
        if let Some(GameState::Debug { freeze, .. }) = self.states.last_mut() {
            *freeze = !*freeze;
            self.world.freeze();
        }
    }

    fn toggle_rigid(&mut self) {
        if let Some(GameState::Debug { rigid, .. }) = self.states.last_mut() {
            *rigid = !*rigid;
            log::info!("Rigid keys {}", if *rigid { "on" } else { "off" });
        }
    }

    // === Frame ===

    /// Process one input from the front end
    pub fn handle(&mut self, input: InputEvent, dt: f32) {
        self.handle_at(input, dt, Instant::now());
    }

    pub fn handle_at(&mut self, input: InputEvent, dt: f32, now: Instant) {
        match input {
            InputEvent::Quit => self.dispatch_at(Event::Quit, dt, now),
            InputEvent::KeyDown(key) => {
                if let Some(event) = self.state().handle_key(key) {
                    self.dispatch_at(event, dt, now);
                }
            }
        }
    }

    /// Act on a semantic event
    pub fn dispatch(&mut self, event: Event, dt: f32) {
        self.dispatch_at(event, dt, Instant::now());
    }

    pub fn dispatch_at(&mut self, event: Event, dt: f32, now: Instant) {
        if self.listening {
            log::info!("Event: {:?}", event);
        }

        match event {
            Event::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
            Event::ChangeStateDebug => {
                if self.state() == GameState::Running {
                    self.push_state(GameState::Debug {
                        freeze: false,
                        rigid: false,
                    });
                }
            }
            Event::PopState => {
                if self.state().mode() == GameMode::Debug {
                    self.pop_state();
                }
            }
            Event::ToggleFreeze => self.toggle_freeze(),
            Event::ToggleRigid => self.toggle_rigid(),
            Event::GameEventListen => {
                self.listening = !self.listening;
                log::info!("Event echo {}", if self.listening { "on" } else { "off" });
            }
            _ => self.world.handle_at(event, dt, now),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.update_at(dt, Instant::now());
    }

    pub fn update_at(&mut self, dt: f32, now: Instant) {
        self.world.update_at(dt, now);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(colors::BACKGROUND);
        self.world.draw(surface);

        if let GameState::Debug { freeze, rigid } = self.state() {
            let (shots, depth) = self
                .world
                .player()
                .map(|p| (p.projectile_count(), p.state_depth()))
                .unwrap_or_default();
            let status = format!(
                "DEBUG freeze:{} rigid:{} shots:{} states:{}",
                freeze, rigid, shots, depth
            );
            surface.text(Vec2::ZERO, &status, colors::HUD);
        }
    }

    // === Accessors ===

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn state_depth(&self) -> usize {
        self.states.len()
    }
}
