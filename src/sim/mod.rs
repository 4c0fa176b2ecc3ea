//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit elapsed time only (no wall-clock reads)
//! - Injected random source only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod combo;
pub mod entity;
pub mod level;
pub mod particles;
pub mod physics;
pub mod random;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{
    check_barrel_collision, check_collision, check_goal_reached, check_ladder_collision,
    check_platform_collision, check_power_up_collision,
};
pub use combo::{calculate_combo_bonus, get_combo_multiplier, get_combo_text};
pub use entity::{
    Barrel, Collidable, Direction, GameObject, Grounded, Ladder, Particle, Platform, Player,
    PowerUp, PowerUpKind, Rect,
};
pub use level::{Level, LevelCatalog};
pub use physics::{ClimbDirection, Horizontal, Physics};
pub use random::{RandomSource, SequenceRandom};
pub use session::Session;
pub use state::{GameEvent, GamePhase, GameStateData, SessionStats, create_initial_state};
pub use tick::{TickInput, tick};
