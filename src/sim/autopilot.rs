//! Idle/demo mode controller
//!
//! Picks inputs from the current snapshot: climb the nearest ladder rising
//! from the current floor, walk to the goal once no ladder goes higher, and
//! jump barrels rolling in on the same floor.

use super::entity::{Collidable, Ladder, Platform};
use super::physics::{ClimbDirection, Horizontal};
use super::state::GameStateData;
use super::tick::TickInput;

/// How close the player's centre must be to a ladder's centre to climb
const ALIGN_TOLERANCE: f32 = 3.0;
/// Feet-to-ladder-bottom distance that counts as "on the same floor"
const LADDER_REACH: f32 = 6.0;
/// Vertical slack when matching a barrel to the player's floor
const FLOOR_SLACK: f32 = 12.0;
/// Horizontal distance at which an approaching barrel triggers a jump
const JUMP_TRIGGER: f32 = 60.0;

/// Decide the next input for the player
pub fn plan(state: &GameStateData) -> TickInput {
    let player = &state.player;
    let mut input = TickInput::default();

    if player.is_climbing {
        input.climb = Some(ClimbDirection::Up);
        return input;
    }
    // Airborne: keep momentum
    if player.is_jumping || player.body.velocity.y != 0.0 {
        return input;
    }

    let feet = player.body.feet();
    let center_x = player.bounds().center().x;

    if barrel_incoming(state, feet, center_x) {
        input.jump = true;
        return input;
    }

    let floor = support(&state.level.platforms, player.body.position.x, player.body.width, feet);
    let target_x = match ladder_up(&state.level.ladders, floor, feet, center_x) {
        Some(ladder) => {
            let ladder_x = ladder.bounds().center().x;
            if (ladder_x - center_x).abs() <= ALIGN_TOLERANCE {
                input.horizontal = Some(Horizontal::Stop);
                input.climb = Some(ClimbDirection::Up);
                return input;
            }
            ladder_x
        }
        None => state.level.goal_position.x,
    };

    input.horizontal = Some(if (target_x - center_x).abs() <= ALIGN_TOLERANCE {
        Horizontal::Stop
    } else if target_x > center_x {
        Horizontal::Right
    } else {
        Horizontal::Left
    });
    input
}

/// Platform the player is standing on
fn support(platforms: &[Platform], x: f32, width: f32, feet: f32) -> Option<&Platform> {
    platforms
        .iter()
        .find(|p| (feet - p.y).abs() < 1.0 && x + width > p.x && x < p.x + p.width)
}

/// Nearest ladder whose bottom sits on this floor and is walkable from it
fn ladder_up<'a>(
    ladders: &'a [Ladder],
    floor: Option<&Platform>,
    feet: f32,
    center_x: f32,
) -> Option<&'a Ladder> {
    ladders
        .iter()
        .filter(|ladder| (ladder.y + ladder.height - feet).abs() <= LADDER_REACH)
        .filter(|ladder| {
            let x = ladder.bounds().center().x;
            // Reachable while still overlapping the floor by half a body
            floor.is_none_or(|p| x >= p.x - 15.0 && x <= p.x + p.width + 15.0)
        })
        .min_by(|a, b| {
            let da = (a.bounds().center().x - center_x).abs();
            let db = (b.bounds().center().x - center_x).abs();
            da.total_cmp(&db)
        })
}

/// An active barrel on this floor rolling toward the player and close
fn barrel_incoming(state: &GameStateData, feet: f32, center_x: f32) -> bool {
    state.barrels.iter().any(|barrel| {
        if !barrel.body.active || (barrel.body.feet() - feet).abs() > FLOOR_SLACK {
            return false;
        }
        let dx = barrel.bounds().center().x - center_x;
        dx.abs() < JUMP_TRIGGER && dx * barrel.body.velocity.x < 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::entity::Barrel;
    use crate::sim::level::LevelCatalog;
    use crate::sim::state::{GamePhase, create_initial_state};
    use glam::Vec2;

    /// Player standing at `x` on the ground floor of level 1
    fn grounded_at(x: f32) -> GameStateData {
        let mut state = create_initial_state(&LevelCatalog::standard(), 0, Settings::default());
        state.phase = GamePhase::Playing;
        state.player.body.position = Vec2::new(x, 560.0);
        state
    }

    #[test]
    fn test_walks_toward_first_ladder() {
        // Ladder 1 centre is x=195
        let state = grounded_at(50.0);
        assert_eq!(plan(&state).horizontal, Some(Horizontal::Right));
        let state = grounded_at(300.0);
        assert_eq!(plan(&state).horizontal, Some(Horizontal::Left));
    }

    #[test]
    fn test_climbs_when_aligned() {
        let state = grounded_at(180.0);
        let input = plan(&state);
        assert_eq!(input.climb, Some(ClimbDirection::Up));
        assert_eq!(input.horizontal, Some(Horizontal::Stop));
        assert!(!input.jump);
    }

    #[test]
    fn test_keeps_climbing() {
        let mut state = grounded_at(180.0);
        state.player.is_climbing = true;
        assert_eq!(plan(&state).climb, Some(ClimbDirection::Up));
    }

    #[test]
    fn test_airborne_coasts() {
        let mut state = grounded_at(100.0);
        state.player.body.velocity.y = 2.0;
        assert_eq!(plan(&state), TickInput::default());
    }

    #[test]
    fn test_jumps_incoming_barrel() {
        let mut state = grounded_at(100.0);
        // Rolling left toward the player on the ground floor
        state
            .barrels
            .push(Barrel::new(1, Vec2::new(150.0, 575.0), 4.0, -1.0));
        assert!(plan(&state).jump);

        // Rolling away does not trigger
        state.barrels[0].body.velocity.x = 4.0;
        assert!(!plan(&state).jump);
    }

    #[test]
    fn test_ignores_barrel_on_other_floor() {
        let mut state = grounded_at(100.0);
        state
            .barrels
            .push(Barrel::new(1, Vec2::new(150.0, 475.0), 4.0, -1.0));
        assert!(!plan(&state).jump);
    }

    #[test]
    fn test_top_floor_heads_for_goal() {
        let mut state = grounded_at(0.0);
        // Goal ledge of level 1 (x 125..250, y 100), goal x=187
        state.player.body.position = Vec2::new(130.0, 60.0);
        assert_eq!(plan(&state).horizontal, Some(Horizontal::Right));
        state.player.body.position = Vec2::new(172.0, 60.0);
        assert_eq!(plan(&state).horizontal, Some(Horizontal::Stop));
    }
}
