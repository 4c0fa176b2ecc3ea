//! Per-tick simulation step
//!
//! Core game loop that advances one level attempt. Step order matters:
//! later steps read what earlier steps wrote.
//!
//!   1. Input intents
//!   2. Gravity and position integration
//!   3. Bounds clamp
//!   4. Platform landing
//!   5. Ladder check (drops a climb that left the ladder)
//!   6. Barrel spawn, then power-up spawn
//!   7. Barrel updates
//!   8. Barrel vs player (hit), then dodges
//!   9. Power-up vs player (collection)
//!  10. Inactive cleanup
//!  11. Invincibility and combo timers
//!  12. Particle decay
//!  13. Goal check

use super::autopilot;
use super::collision::{
    check_barrel_collision, check_barrel_dodge, check_goal_reached, check_ladder_collision,
    check_platform_collision, check_power_up_collision,
};
use super::combo::{add_combo, calculate_combo_bonus, update_combo_timer};
use super::entity::{Collidable, ComboAction};
use super::particles::{MAX_PARTICLES, create_explosion, update_particles};
use super::physics::{ClimbDirection, Horizontal, Physics};
use super::random::RandomSource;
use super::spawn::{spawn_barrel, spawn_power_up};
use super::state::{
    GameEvent, GamePhase, GameStateData, collect_power_up, handle_player_hit, update_invincibility,
};
use crate::consts::*;

/// Particles emitted when the player is hit
const HIT_PARTICLES: usize = 12;
const HIT_COLOR: u32 = 0xFF4444;
/// Particles emitted on pickup
const PICKUP_PARTICLES: usize = 8;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal intent; `None` keeps the current direction of motion
    pub horizontal: Option<Horizontal>,
    /// Jump pressed this tick
    pub jump: bool,
    /// Climb held this tick
    pub climb: Option<ClimbDirection>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the snapshot by one tick of `dt_ms` milliseconds
///
/// Does nothing outside the playing phase. Returns the events raised.
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut GameStateData,
    physics: &Physics,
    rng: &mut R,
    input: &TickInput,
    dt_ms: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    state.elapsed_ms += dt_ms as f64;
    let now = state.elapsed_ms;

    let input = if input.idle_mode {
        autopilot::plan(state)
    } else {
        input.clone()
    };
    apply_input(state, physics, &input);

    // Integrate
    if !state.player.is_climbing {
        physics.apply_gravity(&mut state.player);
    }
    physics.update_position(&mut state.player);
    physics.constrain_to_bounds(&mut state.player);

    // Platforms
    if let Some(platform) = check_platform_collision(&state.player, &state.level.platforms).copied() {
        let descending_ladder = state.player.is_climbing && state.player.body.velocity.y > 0.0;
        physics.land_on_platform(&mut state.player, &platform);
        if descending_ladder {
            state.player.is_climbing = false;
        }
    }

    // Ladders
    if state.player.is_climbing && check_ladder_collision(&state.player, &state.level.ladders).is_none() {
        state.player.is_climbing = false;
    }

    spawn_barrel(state, now, rng);
    spawn_power_up(state, now, rng);

    for barrel in state.barrels.iter_mut() {
        physics.update_barrel(barrel, &state.level.platforms);
    }

    // Hazards
    if let Some(index) = check_barrel_collision(&state.player, &state.barrels) {
        let center = state.player.bounds().center();
        emit_explosion(state, center.x, center.y, HIT_COLOR, HIT_PARTICLES, rng);

        let out_of_lives = handle_player_hit(&mut state.player);
        state.barrels[index].body.active = false;
        state.stats.lives_lost += 1;

        if out_of_lives {
            let score = state.player.score;
            state.transition(GamePhase::GameOver);
            log::info!("Game over on level {} with score {}", state.level_number(), score);
            events.push(GameEvent::GameOver { score });
            return events;
        }
        events.push(GameEvent::PlayerHit {
            lives: state.player.lives,
        });
    }

    for barrel in state.barrels.iter_mut() {
        if check_barrel_dodge(&state.player, barrel) {
            barrel.dodged = true;
            add_combo(&mut state.player, ComboAction::Dodge);
            let combo = state.player.combo;
            let points = calculate_combo_bonus(DODGE_POINTS, combo);
            state.player.score += points;
            state.stats.dodges += 1;
            events.push(GameEvent::BarrelDodged { combo, points });
        }
    }

    // Pickups
    if let Some(index) = check_power_up_collision(&state.player, &state.power_ups) {
        let kind = state.power_ups[index].kind;
        let center = state.power_ups[index].bounds().center();
        let points = collect_power_up(&mut state.player, &mut state.power_ups[index]);
        state.stats.power_ups_collected += 1;
        log::debug!("Collected {:?} for {} points", kind, points);
        emit_explosion(state, center.x, center.y, kind.color(), PICKUP_PARTICLES, rng);
        events.push(GameEvent::PowerUpCollected { kind, points });
    }

    state.remove_inactive();

    update_invincibility(&mut state.player, dt_ms);
    update_combo_timer(&mut state.player, dt_ms);
    state.particles = update_particles(std::mem::take(&mut state.particles), dt_ms);

    if check_goal_reached(&state.player, state.level.goal_position) {
        state.player.score += GOAL_BONUS;
        let score = state.player.score;
        let level = state.level_number();
        state.transition(GamePhase::LevelComplete);
        log::info!("Level {} complete with score {}", level, score);
        events.push(GameEvent::LevelComplete { score, level });
    }

    events
}

/// Apply movement intents to the player
fn apply_input(state: &mut GameStateData, physics: &Physics, input: &TickInput) {
    match input.horizontal {
        Some(horizontal) => physics.move_player(&mut state.player, horizontal),
        None => physics.refresh_speed(&mut state.player),
    }
    if input.jump {
        physics.jump(&mut state.player);
    }

    let on_ladder = check_ladder_collision(&state.player, &state.level.ladders).is_some();
    match input.climb {
        Some(direction) if on_ladder => physics.climb_ladder(&mut state.player, direction),
        _ if state.player.is_climbing => physics.hang_on_ladder(&mut state.player),
        _ => {}
    }
}

/// Emit a particle burst, dropping the oldest particles over the cap
fn emit_explosion<R: RandomSource + ?Sized>(
    state: &mut GameStateData,
    x: f32,
    y: f32,
    color: u32,
    count: usize,
    rng: &mut R,
) {
    let first_id = state.reserve_ids(count);
    state
        .particles
        .extend(create_explosion(x, y, color, count, first_id, rng));
    if state.particles.len() > MAX_PARTICLES {
        let excess = state.particles.len() - MAX_PARTICLES;
        state.particles.drain(..excess);
    }
}
