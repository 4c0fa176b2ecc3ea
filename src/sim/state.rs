//! Game state and lifecycle
//!
//! `GameStateData` is the single mutable snapshot of a level attempt. It is
//! created fresh for each attempt and mutated in place by `tick`.

use serde::{Deserialize, Serialize};

use super::combo::add_combo;
use super::entity::{Barrel, ComboAction, Particle, Player, PowerUp, PowerUpKind};
use super::level::{Level, LevelCatalog};
use crate::consts::*;
use crate::settings::Settings;

/// Lifecycle phase
///
/// Pausing is not a phase: the host simply stops delivering ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Main menu
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, all lives lost
    GameOver,
    /// Goal reached (also the terminal "all levels cleared" state)
    LevelComplete,
    /// Viewing high scores from the menu
    HighScores,
    /// Viewing settings from the menu
    Settings,
}

impl GamePhase {
    /// Transition table; anything not listed is rejected
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (Self::Menu, Self::Playing | Self::HighScores | Self::Settings)
                | (Self::HighScores | Self::Settings, Self::Menu)
                | (Self::Playing, Self::GameOver | Self::LevelComplete | Self::Menu)
                | (Self::GameOver, Self::Playing | Self::Menu)
                | (Self::LevelComplete, Self::Playing | Self::LevelComplete | Self::Menu)
        )
    }
}

/// Outward notifications produced by a tick or a lifecycle call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Lives reached zero
    GameOver { score: u64 },
    /// Goal reached; `level` is 1-based
    LevelComplete { score: u64, level: u32 },
    /// `next_level` called on the last level
    AllLevelsCleared { score: u64 },
    /// Barrel hit, `lives` remaining
    PlayerHit { lives: u32 },
    PowerUpCollected { kind: PowerUpKind, points: u64 },
    BarrelDodged { combo: u32, points: u64 },
}

/// Counters for the current level attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub power_ups_collected: u32,
    pub barrels_spawned: u32,
    pub dodges: u32,
    pub lives_lost: u32,
}

/// Complete snapshot of a level attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateData {
    pub phase: GamePhase,
    /// Index into the level catalog
    pub current_level: usize,
    pub player: Player,
    /// Ordered by spawn
    pub barrels: Vec<Barrel>,
    pub power_ups: Vec<PowerUp>,
    /// Resolved copy of the current level
    pub level: Level,
    /// Simulation time of the last barrel spawn (ms)
    pub last_barrel_spawn: f64,
    /// Simulation time since the attempt began (ms)
    pub elapsed_ms: f64,
    pub settings: Settings,
    pub stats: SessionStats,
    /// Set once every level has been cleared
    #[serde(default)]
    pub all_levels_cleared: bool,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Next entity ID
    next_id: u32,
}

/// Fresh snapshot for a level attempt, starting in the menu phase
///
/// An unknown level index falls back to level 0.
pub fn create_initial_state(
    catalog: &LevelCatalog,
    level_index: usize,
    settings: Settings,
) -> GameStateData {
    let (index, level) = catalog.resolve(level_index);
    GameStateData {
        phase: GamePhase::Menu,
        current_level: index,
        player: Player::new(),
        barrels: Vec::new(),
        power_ups: Vec::new(),
        level: level.clone(),
        last_barrel_spawn: 0.0,
        elapsed_ms: 0.0,
        settings,
        stats: SessionStats::default(),
        all_levels_cleared: false,
        particles: Vec::new(),
        // 0 is reserved for the player
        next_id: 1,
    }
}

impl GameStateData {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reserve `count` consecutive IDs, returning the first
    pub fn reserve_ids(&mut self, count: usize) -> u32 {
        let first = self.next_id;
        self.next_id += count as u32;
        first
    }

    /// Move to `next` if the transition table allows it
    pub fn transition(&mut self, next: GamePhase) -> bool {
        if self.phase.can_transition_to(next) {
            log::debug!("Phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
            true
        } else {
            log::warn!("Rejected phase transition {:?} -> {:?}", self.phase, next);
            false
        }
    }

    /// 1-based level number for display
    pub fn level_number(&self) -> u32 {
        self.current_level as u32 + 1
    }

    /// Drop inactive hazards and pickups
    pub fn remove_inactive(&mut self) {
        self.barrels.retain(|b| b.body.active);
        self.power_ups.retain(|p| p.body.active);
    }

    /// Advance to the next level, keeping score and lives
    ///
    /// Only valid from `LevelComplete`. Returns false (and marks all levels
    /// cleared) when there is no next level.
    pub fn next_level(&mut self, catalog: &LevelCatalog) -> bool {
        if self.phase != GamePhase::LevelComplete {
            log::warn!("Next level ignored in {:?}", self.phase);
            return false;
        }
        if !catalog.has_next(self.current_level) {
            self.all_levels_cleared = true;
            return false;
        }
        let (index, level) = catalog.resolve(self.current_level + 1);
        self.current_level = index;
        self.level = level.clone();
        self.barrels.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.last_barrel_spawn = 0.0;
        self.elapsed_ms = 0.0;
        self.stats = SessionStats::default();
        reset_player_position(&mut self.player);
        self.transition(GamePhase::Playing)
    }
}

/// Put the player back at spawn with no motion or shield
pub fn reset_player_position(player: &mut Player) {
    respawn(player);
    player.invincible = false;
    player.invincible_timer = 0.0;
}

/// Put the player back at spawn, keeping timers
fn respawn(player: &mut Player) {
    player.body.position = SPAWN_POSITION;
    player.body.velocity = glam::Vec2::ZERO;
    player.is_jumping = false;
    player.is_climbing = false;
}

/// Run the invincibility and speed-boost timers down by `dt_ms`
pub fn update_invincibility(player: &mut Player, dt_ms: f32) {
    if player.invincible {
        player.invincible_timer -= dt_ms;
        if player.invincible_timer <= 0.0 {
            player.invincible = false;
            player.invincible_timer = 0.0;
        }
    }
    if player.speed_boost_timer > 0.0 {
        player.speed_boost_timer = (player.speed_boost_timer - dt_ms).max(0.0);
    }
}

/// Apply a barrel hit; returns true if the player is out of lives
///
/// An invincible player is unaffected. Otherwise a life is lost, the
/// respawn grace period starts and, with lives left, the player respawns.
pub fn handle_player_hit(player: &mut Player) -> bool {
    if player.invincible {
        return false;
    }
    player.lives = player.lives.saturating_sub(1);
    player.invincible = true;
    player.invincible_timer = HIT_INVINCIBILITY_MS;
    if player.lives == 0 {
        return true;
    }
    respawn(player);
    false
}

/// Apply a power-up to the player and consume it; returns points awarded
///
/// Collecting counts as a `powerup` combo action; the points awarded are the
/// kind's fixed base points.
pub fn collect_power_up(player: &mut Player, power_up: &mut PowerUp) -> u64 {
    if !power_up.body.active {
        return 0;
    }
    match power_up.kind {
        PowerUpKind::Invincibility => {
            player.invincible = true;
            player.invincible_timer = player.invincible_timer.max(power_up.duration);
        }
        PowerUpKind::ExtraLife => player.lives += 1,
        PowerUpKind::SpeedBoost => {
            player.speed_boost_timer = player.speed_boost_timer.max(power_up.duration);
        }
    }
    power_up.body.active = false;

    add_combo(player, ComboAction::PowerUp);
    let points = power_up.kind.base_points();
    player.score += points;
    points
}
