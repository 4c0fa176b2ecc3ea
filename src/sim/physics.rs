//! Physics integration and player movement
//!
//! Simple Euler integration, one step per tick. Velocities are in
//! pixels/tick, so a fast object may tunnel through a thin platform.

use super::collision::check_platform_collision;
use super::entity::{Barrel, Direction, Grounded, Platform, Player};
use crate::config::GameConfig;
use crate::consts::*;

/// Vertical climb direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbDirection {
    Up,
    Down,
}

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
    Stop,
}

/// Vertical motion state, derived from the player flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    Jumping,
    Falling,
    Climbing,
}

/// Physics engine bound to one configuration
#[derive(Debug, Clone)]
pub struct Physics {
    pub config: GameConfig,
}

impl Default for Physics {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Physics {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Add gravity to vertical velocity (active objects only)
    pub fn apply_gravity<T: Grounded + ?Sized>(&self, obj: &mut T) {
        let body = obj.object_mut();
        if body.active {
            body.velocity.y += self.config.gravity;
        }
    }

    /// Integrate position by velocity (active objects only)
    pub fn update_position<T: Grounded + ?Sized>(&self, obj: &mut T) {
        let body = obj.object_mut();
        if body.active {
            body.position += body.velocity;
        }
    }

    /// Snap the player onto a platform and end any jump
    pub fn land_on_platform(&self, player: &mut Player, platform: &Platform) {
        player.body.position.y = platform.y - player.body.height;
        player.body.velocity.y = 0.0;
        player.is_jumping = false;
    }

    /// Attach to a ladder and move vertically at climb speed
    ///
    /// Horizontal velocity is forced to zero: no diagonal climbing.
    pub fn climb_ladder(&self, player: &mut Player, direction: ClimbDirection) {
        player.is_climbing = true;
        player.is_jumping = false;
        player.body.velocity.y = match direction {
            ClimbDirection::Up => -CLIMB_SPEED,
            ClimbDirection::Down => CLIMB_SPEED,
        };
        player.body.velocity.x = 0.0;
    }

    /// Hold position on a ladder
    pub fn hang_on_ladder(&self, player: &mut Player) {
        player.body.velocity = glam::Vec2::ZERO;
    }

    /// Start a jump; only a grounded player can jump
    pub fn jump(&self, player: &mut Player) -> bool {
        if motion_state(player) != MotionState::Grounded {
            return false;
        }
        player.body.velocity.y = self.config.jump_force;
        player.is_jumping = true;
        true
    }

    /// Apply a horizontal intent (ignored while climbing)
    pub fn move_player(&self, player: &mut Player, intent: Horizontal) {
        if player.is_climbing {
            player.body.velocity.x = 0.0;
            return;
        }
        let speed = self.horizontal_speed(player);
        match intent {
            Horizontal::Left => {
                player.body.velocity.x = -speed;
                player.direction = Direction::Left;
            }
            Horizontal::Right => {
                player.body.velocity.x = speed;
                player.direction = Direction::Right;
            }
            Horizontal::Stop => player.body.velocity.x = 0.0,
        }
    }

    /// Walking speed, including any active boost
    pub fn horizontal_speed(&self, player: &Player) -> f32 {
        if player.has_speed_boost() {
            self.config.player_speed * SPEED_BOOST_MULTIPLIER
        } else {
            self.config.player_speed
        }
    }

    /// Re-apply the current walking speed to ongoing horizontal motion
    ///
    /// Keeps coasting movement in step with a boost starting or running out.
    pub fn refresh_speed(&self, player: &mut Player) {
        let vx = player.body.velocity.x;
        if player.is_climbing || vx == 0.0 {
            return;
        }
        player.body.velocity.x = vx.signum() * self.horizontal_speed(player);
    }

    /// Advance a barrel: fall, roll, bounce on platforms, expire off-screen
    pub fn update_barrel(&self, barrel: &mut Barrel, platforms: &[Platform]) {
        if !barrel.body.active {
            return;
        }
        self.apply_gravity(barrel);
        self.update_position(barrel);
        barrel.rotation += barrel.speed * BARREL_ROTATION_FACTOR;

        if let Some(platform) = check_platform_collision(barrel, platforms) {
            barrel.body.position.y = platform.y - barrel.body.height;
            barrel.body.velocity.y = BARREL_BOUNCE;
        }

        if barrel.body.position.y > self.config.canvas_height + OFFSCREEN_MARGIN {
            barrel.body.active = false;
        }
    }

    /// Keep the player inside the playfield
    ///
    /// Horizontal position is clamped to `[0, canvas_width - width]`. Falling
    /// past the bottom edge puts the player back on it with no vertical speed.
    pub fn constrain_to_bounds(&self, player: &mut Player) {
        let body = &mut player.body;
        let max_x = (self.config.canvas_width - body.width).max(0.0);
        body.position.x = body.position.x.clamp(0.0, max_x);
        if body.position.y > self.config.canvas_height {
            body.position.y = self.config.canvas_height - body.height;
            body.velocity.y = 0.0;
        }
    }
}

/// Classify the player's vertical motion
pub fn motion_state(player: &Player) -> MotionState {
    if player.is_climbing {
        MotionState::Climbing
    } else if player.is_jumping {
        MotionState::Jumping
    } else if player.body.velocity.y == 0.0 {
        MotionState::Grounded
    } else {
        MotionState::Falling
    }
}
