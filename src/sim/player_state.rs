//! Swappable ship behaviors
//!
//! A player keeps a stack of these; only the top one is live. `Default` is
//! normal play with integrated thrust. `Rigid` is a debug mode that moves the
//! ship by direct position jumps and leaves velocity alone; thrust becomes a
//! forward jump.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::entity::Arena;
use super::event::Event;
use super::player::Player;
use crate::consts::VELOCITY_CLAMP_SCALE;
use crate::to_radians;

/// Which behavior to construct, as stored in the world's state table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStateKind {
    Default,
    Rigid,
    /// Reserved; pushing it does nothing
    Stationary,
}

/// A live ship behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerState {
    Default,
    Rigid {
        /// Position step per second of frame time
        jump: f32,
    },
}

impl PlayerState {
    pub fn kind(&self) -> PlayerStateKind {
        match self {
            PlayerState::Default => PlayerStateKind::Default,
            PlayerState::Rigid { .. } => PlayerStateKind::Rigid,
        }
    }

    /// Route movement to `motion`, fire on Shoot, then pass the event to every projectile
    pub fn handle(self, player: &mut Player, event: Event, dt: f32, now: Instant) {
        match (self, event) {
            (_, Event::PlayerShoot) => player.shoot(now),
            (
                PlayerState::Default,
                Event::PlayerAccelerate | Event::PlayerRotateRight | Event::PlayerRotateLeft,
            ) => self.motion(player, event, dt),
            (
                PlayerState::Rigid { .. },
                Event::PlayerAccelerate
                | Event::PlayerMoveForward
                | Event::PlayerMoveBackward
                | Event::PlayerMoveRight
                | Event::PlayerMoveLeft
                | Event::PlayerRotateRight
                | Event::PlayerRotateLeft,
            ) => self.motion(player, event, dt),
            _ => {}
        }

        for projectile in player.projectiles_mut() {
            projectile.handle(event, dt);
        }
    }

    fn motion(self, player: &mut Player, event: Event, dt: f32) {
        match event {
            Event::PlayerRotateRight => {
                player.body.angle += to_radians(player.rotation_speed);
            }
            Event::PlayerRotateLeft => {
                player.body.angle -= to_radians(player.rotation_speed);
            }
            Event::PlayerAccelerate if self == PlayerState::Default => {
                accelerate(player, dt);
            }
            _ => {
                if let PlayerState::Rigid { jump } = self {
                    let step = jump * dt;
                    let pos = &mut player.body.position;
                    match event {
                        // Thrust jumps forward so the thrust key stays live
                        Event::PlayerAccelerate | Event::PlayerMoveForward => pos.y -= step,
                        Event::PlayerMoveBackward => pos.y += step,
                        Event::PlayerMoveRight => pos.x += step,
                        Event::PlayerMoveLeft => pos.x -= step,
                        _ => {}
                    }
                }
            }
        }
    }

    /// Move (Default only), wrap, rebuild the hull, advance projectiles
    pub fn update(self, player: &mut Player, dt: f32, arena: &Arena, now: Instant) {
        if let PlayerState::Default = self {
            let v = player.body.velocity;
            player.body.position.x += v.x * dt;
            player.body.position.y -= v.y * dt;
        }

        player.wrap(arena.bounds);
        player.rebuild_hull();
        player.update_projectiles(dt, arena, now);
    }
}

/// Thrust along the facing direction. Each axis snaps straight to
/// `max_velocity` once `(|v| + dv) * VELOCITY_CLAMP_SCALE` reaches it.
fn accelerate(player: &mut Player, dt: f32) {
    let angle = player.body.angle;
    let mv = player.max_velocity;
    let ay = player.acceleration * angle.cos() * dt;
    let ax = player.acceleration * angle.sin() * dt;
    let v = &mut player.body.velocity;

    if (v.y.abs() + ay) * VELOCITY_CLAMP_SCALE >= mv {
        v.y = mv;
    } else {
        v.y += ay;
    }

    if (v.x.abs() + ax) * VELOCITY_CLAMP_SCALE >= mv {
        v.x = mv;
    } else {
        v.x += ax;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Body;
    use glam::Vec2;

    fn player() -> Player {
        Player::new(
            Body::new(Vec2::ZERO, Vec2::new(400.0, 400.0), Vec2::new(13.0, 15.0), 0.0),
            50.0,
            1.0,
            10.0,
        )
    }

    #[test]
    fn test_velocity_clamp_saturates() {
        let mut p = player();
        let now = Instant::now();
        for _ in 0..10 {
            PlayerState::Default.handle(&mut p, Event::PlayerAccelerate, 1.0, now);
            assert!(p.body.velocity.y <= 50.0);
            assert!(p.body.velocity.x <= 50.0);
        }
        assert_eq!(p.body.velocity.y, 50.0);
        // Facing straight up: no sideways thrust
        assert_eq!(p.body.velocity.x, 0.0);
    }

    #[test]
    fn test_small_thrust_accumulates_below_clamp() {
        let mut p = player();
        p.max_velocity = 50.0;
        let now = Instant::now();
        PlayerState::Default.handle(&mut p, Event::PlayerAccelerate, 0.01, now);
        assert!((p.body.velocity.y - 0.01).abs() < 1e-6);
        PlayerState::Default.handle(&mut p, Event::PlayerAccelerate, 0.01, now);
        assert!((p.body.velocity.y - 0.02).abs() < 1e-6);
        // (0.02 + 0.04) * 1000 >= 50 snaps to max
        PlayerState::Default.handle(&mut p, Event::PlayerAccelerate, 0.04, now);
        assert_eq!(p.body.velocity.y, 50.0);
    }

    #[test]
    fn test_rotation_is_unbounded() {
        let mut p = player();
        let now = Instant::now();
        for _ in 0..72 {
            PlayerState::Default.handle(&mut p, Event::PlayerRotateRight, 0.016, now);
        }
        assert!((p.body.angle - 4.0 * std::f32::consts::PI).abs() < 1e-3);
        PlayerState::Default.handle(&mut p, Event::PlayerRotateLeft, 0.016, now);
        assert!((p.body.angle - (4.0 * std::f32::consts::PI - to_radians(10.0))).abs() < 1e-3);
    }

    #[test]
    fn test_rigid_jumps_position_directly() {
        let mut p = player();
        let now = Instant::now();
        let rigid = PlayerState::Rigid { jump: 300.0 };
        rigid.handle(&mut p, Event::PlayerMoveForward, 0.5, now);
        assert_eq!(p.body.position, Vec2::new(400.0, 250.0));
        rigid.handle(&mut p, Event::PlayerMoveRight, 0.5, now);
        assert_eq!(p.body.position, Vec2::new(550.0, 250.0));
        rigid.handle(&mut p, Event::PlayerMoveBackward, 1.0, now);
        rigid.handle(&mut p, Event::PlayerMoveLeft, 1.0, now);
        assert_eq!(p.body.position, Vec2::new(250.0, 550.0));
        assert_eq!(p.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_rigid_turns_thrust_into_forward_jump() {
        let mut p = player();
        let now = Instant::now();
        PlayerState::Rigid { jump: 300.0 }.handle(&mut p, Event::PlayerAccelerate, 0.5, now);
        assert_eq!(p.body.position, Vec2::new(400.0, 250.0));
        assert_eq!(p.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_default_ignores_jumps() {
        let mut p = player();
        PlayerState::Default.handle(&mut p, Event::PlayerMoveForward, 1.0, Instant::now());
        assert_eq!(p.body.position, Vec2::new(400.0, 400.0));
        assert_eq!(p.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_rigid_update_keeps_position() {
        let mut p = player();
        p.body.velocity = Vec2::new(10.0, 10.0);
        let arena = Arena {
            bounds: Vec2::new(800.0, 800.0),
            frozen: false,
        };
        PlayerState::Rigid { jump: 300.0 }.update(&mut p, 1.0, &arena, Instant::now());
        assert_eq!(p.body.position, Vec2::new(400.0, 400.0));

        PlayerState::Default.update(&mut p, 1.0, &arena, Instant::now());
        // Screen Y is inverted
        assert_eq!(p.body.position, Vec2::new(410.0, 390.0));
    }
}
