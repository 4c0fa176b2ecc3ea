//! Hazard and pickup spawning policy
//!
//! Barrel cadence is exact (time-gated); placement is random within bounds.
//! Power-ups spawn probabilistically inside a recurring window.

use glam::Vec2;

use super::entity::{Barrel, PowerUp, PowerUpKind};
use super::random::RandomSource;
use super::state::GameStateData;
use crate::consts::*;

/// Spawn a barrel if `barrel_spawn_rate` ms have passed since the last one
///
/// `now_ms` is simulation time since the level attempt started.
pub fn spawn_barrel<R: RandomSource + ?Sized>(
    state: &mut GameStateData,
    now_ms: f64,
    rng: &mut R,
) -> bool {
    if now_ms - state.last_barrel_spawn < state.level.barrel_spawn_rate {
        return false;
    }

    let x = BARREL_SPAWN_X_MIN + rng.next_f32() * BARREL_SPAWN_X_SPAN;
    let sign = rng.sign();
    let speed = rng.range(BARREL_MIN_SPEED, BARREL_MAX_SPEED);
    let id = state.next_entity_id();
    state
        .barrels
        .push(Barrel::new(id, Vec2::new(x, BARREL_SPAWN_Y), speed, sign));
    state.last_barrel_spawn = now_ms;
    state.stats.barrels_spawned += 1;
    log::debug!("Barrel {} spawned at x={:.1} speed={:.2}", id, x, speed * sign);
    true
}

/// Whether `now_ms` falls inside the recurring power-up window
pub fn in_power_up_window(now_ms: f64) -> bool {
    now_ms.rem_euclid(POWER_UP_PERIOD_MS) < POWER_UP_WINDOW_MS
}

/// Maybe spawn a power-up on a random platform
///
/// Fires with `POWER_UP_SPAWN_CHANCE` per tick inside the window, and only
/// while fewer than `MAX_LIVE_POWER_UPS` are active.
pub fn spawn_power_up<R: RandomSource + ?Sized>(
    state: &mut GameStateData,
    now_ms: f64,
    rng: &mut R,
) -> bool {
    if !in_power_up_window(now_ms) {
        return false;
    }
    let live = state.power_ups.iter().filter(|p| p.body.active).count();
    if live >= MAX_LIVE_POWER_UPS || state.level.platforms.is_empty() {
        return false;
    }
    if !rng.chance(POWER_UP_SPAWN_CHANCE) {
        return false;
    }

    let platform = state.level.platforms[rng.index(state.level.platforms.len())];
    let slack = (platform.width - POWER_UP_SIZE).max(0.0);
    let x = platform.x + rng.next_f32() * slack;
    let y = platform.y - POWER_UP_SIZE;
    let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];

    let id = state.next_entity_id();
    state.power_ups.push(PowerUp::new(id, kind, Vec2::new(x, y)));
    log::debug!("Power-up {:?} spawned on platform {}", kind, platform.id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::level::LevelCatalog;
    use crate::sim::random::SequenceRandom;
    use crate::sim::state::create_initial_state;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state_with_rate(rate: f64) -> GameStateData {
        let mut state = create_initial_state(&LevelCatalog::standard(), 0, Settings::default());
        state.level.barrel_spawn_rate = rate;
        state
    }

    #[test]
    fn test_barrel_cadence_is_exact() {
        let mut state = state_with_rate(2000.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawned_at = Vec::new();
        for step in 0..=5 {
            let now = step as f64 * 500.0;
            if spawn_barrel(&mut state, now, &mut rng) {
                spawned_at.push(now);
            }
        }
        assert_eq!(spawned_at, vec![2000.0]);
        assert_eq!(state.barrels.len(), 1);
        assert_eq!(state.last_barrel_spawn, 2000.0);
    }

    #[test]
    fn test_barrel_count_matches_elapsed() {
        let mut state = state_with_rate(1000.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut now = 0.0;
        while now <= 10_000.0 {
            spawn_barrel(&mut state, now, &mut rng);
            now += 250.0;
        }
        // Last tick is t=10000
        assert_eq!(state.stats.barrels_spawned, 10);
    }

    #[test]
    fn test_barrel_placement_bounded() {
        let mut rng = Pcg32::seed_from_u64(99);
        for i in 1..=200 {
            let mut state = state_with_rate(100.0);
            assert!(spawn_barrel(&mut state, 100.0 * i as f64, &mut rng));
            let barrel = &state.barrels[0];
            let x = barrel.body.position.x;
            assert!((BARREL_SPAWN_X_MIN..BARREL_SPAWN_X_MIN + BARREL_SPAWN_X_SPAN).contains(&x));
            assert_eq!(barrel.body.position.y, BARREL_SPAWN_Y);
            assert!((BARREL_MIN_SPEED..BARREL_MAX_SPEED).contains(&barrel.speed));
            assert_eq!(barrel.body.velocity.x.abs(), barrel.speed);
        }
    }

    #[test]
    fn test_power_up_window() {
        assert!(in_power_up_window(0.0));
        assert!(in_power_up_window(99.9));
        assert!(!in_power_up_window(100.0));
        assert!(!in_power_up_window(2999.0));
        assert!(in_power_up_window(3050.0));
    }

    #[test]
    fn test_power_up_spawn_rules() {
        let mut state = state_with_rate(2000.0);
        // First draw passes the 5% roll
        let mut lucky = SequenceRandom::new(vec![0.01, 0.0, 0.5, 0.0]);
        assert!(!spawn_power_up(&mut state, 500.0, &mut lucky), "outside window");

        let mut unlucky = SequenceRandom::constant(0.5);
        assert!(!spawn_power_up(&mut state, 50.0, &mut unlucky), "failed roll");

        assert!(spawn_power_up(&mut state, 50.0, &mut lucky));
        let pu = &state.power_ups[0];
        // Platform 0 is the ground floor (x 0..375, y 600)
        assert_eq!(pu.body.position.y, 600.0 - POWER_UP_SIZE);
        assert_eq!(pu.body.position.x, 0.5 * (375.0 - POWER_UP_SIZE));
        assert_eq!(pu.kind, PowerUpKind::Invincibility);

        assert!(spawn_power_up(&mut state, 3020.0, &mut lucky));
        assert_eq!(state.power_ups.len(), 2);
        // Cap reached
        assert!(!spawn_power_up(&mut state, 6020.0, &mut lucky));

        // Inactive pickups do not count toward the cap
        state.power_ups[0].body.active = false;
        assert!(spawn_power_up(&mut state, 6020.0, &mut lucky));
    }

    #[test]
    fn test_power_up_stays_on_platform() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = state_with_rate(2000.0);
        let mut spawned = 0;
        for tick in 0..20_000 {
            let now = tick as f64 * 16.0;
            if spawn_power_up(&mut state, now, &mut rng) {
                spawned += 1;
                let pu = state.power_ups.last().unwrap().clone();
                let on_platform = state.level.platforms.iter().any(|p| {
                    pu.body.position.x >= p.x
                        && pu.body.position.x + pu.body.width <= p.x + p.width
                        && pu.body.feet() == p.y
                });
                assert!(on_platform);
                state.power_ups.clear();
            }
        }
        assert!(spawned > 0);
    }
}
