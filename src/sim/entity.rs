//! Entity data model
//!
//! Plain data for everything that lives in the playfield. Behavior lives in
//! `physics`, `collision` and `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Horizontal extents overlap (ignoring y)
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }
}

/// Anything with a collision rectangle
pub trait Collidable {
    fn bounds(&self) -> Rect;
}

/// Base shape shared by the moving entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Unique within the owning collection for the lifetime of an attempt
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    /// Inactive objects are skipped by physics and collision and get cleaned up
    pub active: bool,
}

impl GameObject {
    pub fn new(id: u32, position: Vec2, width: f32, height: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            width,
            height,
            active: true,
        }
    }

    /// y coordinate of the bottom edge
    #[inline]
    pub fn feet(&self) -> f32 {
        self.position.y + self.height
    }
}

impl Collidable for GameObject {
    fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }
}

/// Moving entity that falls under gravity and lands on platforms
///
/// Implemented by every entity that embeds a [`GameObject`], so physics can
/// treat players and barrels the same way.
pub trait Grounded: Collidable {
    fn object(&self) -> &GameObject;
    fn object_mut(&mut self) -> &mut GameObject;
}

/// Facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    #[default]
    Right,
}

/// Kind of action that advances a combo streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComboAction {
    PowerUp,
    Dodge,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: GameObject,
    pub lives: u32,
    pub score: u64,
    pub is_jumping: bool,
    /// While climbing, gravity is suppressed
    pub is_climbing: bool,
    pub direction: Direction,
    pub invincible: bool,
    /// Milliseconds of invincibility left (> 0 exactly when `invincible`)
    pub invincible_timer: f32,
    pub combo: u32,
    /// Milliseconds before the combo resets (> 0 exactly when `combo > 0`)
    pub combo_timer: f32,
    pub last_combo_action: Option<ComboAction>,
    /// Milliseconds of speed boost left
    #[serde(default)]
    pub speed_boost_timer: f32,
}

impl Player {
    /// Fresh player at the spawn point
    pub fn new() -> Self {
        Self {
            body: GameObject::new(0, SPAWN_POSITION, PLAYER_WIDTH, PLAYER_HEIGHT),
            lives: STARTING_LIVES,
            score: 0,
            is_jumping: false,
            is_climbing: false,
            direction: Direction::Right,
            invincible: false,
            invincible_timer: 0.0,
            combo: 0,
            combo_timer: 0.0,
            last_combo_action: None,
            speed_boost_timer: 0.0,
        }
    }

    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost_timer > 0.0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Collidable for Player {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

impl Grounded for Player {
    fn object(&self) -> &GameObject {
        &self.body
    }
    fn object_mut(&mut self) -> &mut GameObject {
        &mut self.body
    }
}

/// A rolling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrel {
    pub body: GameObject,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    /// Horizontal speed magnitude, fixed at spawn
    pub speed: f32,
    /// Already counted as dodged
    #[serde(default)]
    pub dodged: bool,
}

impl Barrel {
    /// Barrel rolling left (`sign < 0`) or right at `speed`
    pub fn new(id: u32, position: Vec2, speed: f32, sign: f32) -> Self {
        let mut body = GameObject::new(id, position, BARREL_SIZE, BARREL_SIZE);
        body.velocity = Vec2::new(sign.signum() * speed, 0.0);
        Self {
            body,
            rotation: 0.0,
            speed,
            dodged: false,
        }
    }
}

impl Collidable for Barrel {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

impl Grounded for Barrel {
    fn object(&self) -> &GameObject {
        &self.body
    }
    fn object_mut(&mut self) -> &mut GameObject {
        &mut self.body
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    Invincibility,
    ExtraLife,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Invincibility,
        PowerUpKind::ExtraLife,
        PowerUpKind::SpeedBoost,
    ];

    /// Effect length in ms (0 = instantaneous)
    pub fn duration_ms(&self) -> f32 {
        match self {
            PowerUpKind::Invincibility => 5000.0,
            PowerUpKind::ExtraLife => 0.0,
            PowerUpKind::SpeedBoost => 5000.0,
        }
    }

    /// Score for collecting, before combo multiplier
    pub fn base_points(&self) -> u64 {
        match self {
            PowerUpKind::Invincibility => 100,
            PowerUpKind::ExtraLife => 200,
            PowerUpKind::SpeedBoost => 100,
        }
    }

    /// Particle color (RGB)
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Invincibility => 0xFFD700,
            PowerUpKind::ExtraLife => 0xFF6B9D,
            PowerUpKind::SpeedBoost => 0x4ECDC4,
        }
    }
}

/// A collectible pickup resting on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: GameObject,
    pub kind: PowerUpKind,
    pub duration: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, position: Vec2) -> Self {
        Self {
            body: GameObject::new(id, position, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            duration: kind.duration_ms(),
        }
    }
}

impl Collidable for PowerUp {
    fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

impl Grounded for PowerUp {
    fn object(&self) -> &GameObject {
        &self.body
    }
    fn object_mut(&mut self) -> &mut GameObject {
        &mut self.body
    }
}

/// Static surface players and barrels stand on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub const fn new(id: u32, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }
}

impl Collidable for Platform {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Static climbable zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Ladder {
    pub const fn new(id: u32, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }
}

impl Collidable for Ladder {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A transient visual effect particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub size: f32,
    /// RGB color
    pub color: u32,
    /// Remaining life in seconds, removed at <= 0
    pub life: f32,
    pub max_life: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(9.9, 9.9, 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_player_starts_at_spawn() {
        let player = Player::new();
        assert_eq!(player.body.position, SPAWN_POSITION);
        assert_eq!(player.lives, STARTING_LIVES);
        assert!(player.body.active);
        assert!(!player.invincible);
        assert_eq!(player.body.feet(), 590.0);
    }

    #[test]
    fn test_barrel_velocity_sign() {
        let left = Barrel::new(1, Vec2::ZERO, 4.0, -1.0);
        assert_eq!(left.body.velocity.x, -4.0);
        let right = Barrel::new(2, Vec2::ZERO, 3.5, 0.3);
        assert_eq!(right.body.velocity.x, 3.5);
    }

    #[test]
    fn test_power_up_duration_from_kind() {
        let pu = PowerUp::new(1, PowerUpKind::ExtraLife, Vec2::ZERO);
        assert_eq!(pu.duration, 0.0);
        let pu = PowerUp::new(2, PowerUpKind::Invincibility, Vec2::ZERO);
        assert!(pu.duration > 0.0);
    }
}
