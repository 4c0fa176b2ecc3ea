//! Horizon Climb - a ladder-climbing, barrel-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `config`: Tunable physics parameters
//! - `persistence`: Key-value storage for settings and high scores
//! - `settings`, `highscores`, `leaderboard`, `challenges`: models consumed by the outer layers

pub mod challenges;
pub mod config;
pub mod highscores;
pub mod leaderboard;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use config::GameConfig;
pub use highscores::HighScores;
pub use settings::Settings;

/// Fixed engine constants
///
/// Everything tunable lives in [`GameConfig`]; these values are part of the
/// game design and are not scaled by settings.
pub mod consts {
    use glam::Vec2;

    /// Player spawn point (top-left corner)
    pub const SPAWN_POSITION: Vec2 = Vec2::new(50.0, 550.0);
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Barrels are square
    pub const BARREL_SIZE: f32 = 25.0;
    pub const BARREL_SPAWN_Y: f32 = 50.0;
    /// Barrels appear at x in [BARREL_SPAWN_X_MIN, BARREL_SPAWN_X_MIN + BARREL_SPAWN_X_SPAN)
    pub const BARREL_SPAWN_X_MIN: f32 = 37.0;
    pub const BARREL_SPAWN_X_SPAN: f32 = 300.0;
    /// Barrel horizontal speed range [min, max)
    pub const BARREL_MIN_SPEED: f32 = 3.0;
    pub const BARREL_MAX_SPEED: f32 = 5.0;
    /// Upward velocity a barrel gets when it lands on a platform
    pub const BARREL_BOUNCE: f32 = -5.0;
    /// Rotation advance per tick, multiplied by barrel speed (radians)
    pub const BARREL_ROTATION_FACTOR: f32 = 0.1;
    /// Barrels are deactivated once they fall this far past the bottom edge
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    pub const POWER_UP_SIZE: f32 = 20.0;
    /// Power-ups may spawn during the first POWER_UP_WINDOW_MS of every POWER_UP_PERIOD_MS
    pub const POWER_UP_PERIOD_MS: f64 = 3000.0;
    pub const POWER_UP_WINDOW_MS: f64 = 100.0;
    pub const POWER_UP_SPAWN_CHANCE: f32 = 0.05;
    pub const MAX_LIVE_POWER_UPS: usize = 2;
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;

    /// Feet may sit up to this far below a platform top and still land
    pub const LANDING_TOLERANCE: f32 = 20.0;
    pub const CLIMB_SPEED: f32 = 3.0;
    /// Distance from player position to goal that completes the level
    pub const GOAL_RADIUS: f32 = 50.0;
    pub const GOAL_BONUS: u64 = 1000;

    /// Grace period after losing a life (ms)
    pub const HIT_INVINCIBILITY_MS: f32 = 2000.0;
    /// Time allowed between combo actions (ms)
    pub const COMBO_TIMEOUT_MS: f32 = 3000.0;

    /// A barrel passing this close below an airborne player's feet is a dodge
    pub const DODGE_WINDOW: f32 = 50.0;
    pub const DODGE_POINTS: u64 = 50;

    /// Downward acceleration applied to particles every tick
    pub const PARTICLE_GRAVITY: f32 = 0.2;
}
