//! Semantic input events and game modes

use serde::{Deserialize, Serialize};

/// Events produced by the key mapping and broadcast through the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Thrust along the facing direction
    PlayerAccelerate,
    PlayerRotateRight,
    PlayerRotateLeft,
    /// Rigid debug movement: direct position jumps
    PlayerMoveForward,
    PlayerMoveBackward,
    PlayerMoveRight,
    PlayerMoveLeft,
    PlayerShoot,
    /// Raised by the world when an asteroid reports a projectile hit
    Collision,
    /// Game-level events, consumed before reaching the world
    Quit,
    ChangeStateDebug,
    PopState,
    ToggleFreeze,
    ToggleRigid,
    GameEventListen,
}

impl Event {
    /// True for events the game itself acts on instead of the entities
    pub fn is_game_event(&self) -> bool {
        matches!(
            self,
            Event::Quit
                | Event::ChangeStateDebug
                | Event::PopState
                | Event::ToggleFreeze
                | Event::ToggleRigid
                | Event::GameEventListen
        )
    }
}

/// Top-level mode; selects entity behavior through the world's state table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Running,
    Debug,
}
