//! Entity simulation module
//!
//! All gameplay logic lives here:
//! - Wall-clock `dt` scales every integration step
//! - Entities are a closed enum, dispatched by `match`
//! - Stable iteration order (insertion order)
//! - No device or platform dependencies; drawing goes through `Surface`

pub mod asteroid;
pub mod entity;
pub mod event;
pub mod player;
pub mod player_state;
pub mod projectile;
pub mod world;

pub use asteroid::Asteroid;
pub use entity::{Arena, Body, Entity, EntityKind};
pub use event::{Event, GameMode};
pub use player::Player;
pub use player_state::{PlayerState, PlayerStateKind};
pub use projectile::{Projectile, ProjectileStatus};
pub use world::{StateSwitch, World};
