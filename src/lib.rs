//! Astro Drift - A wrap-around asteroid arena
//!
//! Core modules:
//! - `clock`: Wall-clock frame timing and countdown timers
//! - `sim`: Entity simulation (ship states, projectiles, asteroid, world dispatch)
//! - `game`: Game mode stack and key mapping
//! - `model`: Polygon outlines for asteroids
//! - `renderer`: Drawing surface abstraction and the terminal surface
//! - `settings`: Data-driven tuning and launch options

pub mod clock;
pub mod game;
pub mod model;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::{Clock, Timer};
pub use game::Game;
pub use settings::{LaunchOptions, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Projectile lifetime in seconds
    pub const DEFAULT_PROJECTILE_DURATION: f32 = 2.0;
    /// Minimum time between shots in seconds
    pub const DEFAULT_PROJECTILE_DELAY: f32 = 0.5;
    /// Projectile speed (per axis, pixels/s)
    pub const PROJECTILE_SPEED: f32 = 1000.0;
    /// Projectile half-extent
    pub const PROJECTILE_SIZE: f32 = 1.0;

    /// Velocity clamp scale; an axis snaps to max once (|v| + dv) * this >= max
    pub const VELOCITY_CLAMP_SCALE: f32 = 1000.0;

    /// Position step for rigid debug movement (pixels/s)
    pub const PLAYER_DEBUG_JUMP: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (400.0, 400.0);
    pub const PLAYER_SIZE: (f32, f32) = (13.0, 15.0);
    pub const PLAYER_MAX_VELOCITY: f32 = 50.0;
    pub const PLAYER_ACCELERATION: f32 = 1.0;
    /// Degrees per rotate event
    pub const PLAYER_ROTATION_SPEED: f32 = 10.0;

    /// Asteroid defaults
    pub const ASTEROID_START: (f32, f32) = (200.0, 200.0);
    pub const ASTEROID_VELOCITY: (f32, f32) = (40.0, 40.0);
    pub const ASTEROID_SIZE: (f32, f32) = (80.0, 70.0);
    pub const ASTEROID_ANGLE: f32 = 23.0;

    /// Target frame rate of the terminal front end
    pub const TARGET_FPS: u32 = 60;
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(degree: f32) -> f32 {
    degree / 180.0 * std::f32::consts::PI
}

/// Convert radians to degrees
#[inline]
pub fn to_degrees(radian: f32) -> f32 {
    radian * 180.0 / std::f32::consts::PI
}

/// Rotate `point` about `pivot` by `angle` radians.
///
/// Positive angles turn counter-clockwise in math convention, which reads as
/// clockwise on screen because Y grows downward.
#[inline]
pub fn rotate(pivot: Vec2, point: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(point - pivot) + pivot
}
