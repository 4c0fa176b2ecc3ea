//! Collision queries for axis-aligned rectangles
//!
//! All checks are pure: they inspect entities and return what was hit.
//! Inactive entities never collide.

use glam::Vec2;

use super::entity::{Barrel, Collidable, Grounded, Ladder, Platform, Player, PowerUp};
use crate::consts::*;

/// Rectangle overlap test (symmetric)
#[inline]
pub fn check_collision<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    a.bounds().overlaps(&b.bounds())
}

/// First platform the object is landing on, in list order
///
/// Landing requires the object to be falling (or resting) with its feet in
/// `[platform.y, platform.y + LANDING_TOLERANCE]` and horizontal overlap.
pub fn check_platform_collision<'a, T>(obj: &T, platforms: &'a [Platform]) -> Option<&'a Platform>
where
    T: Grounded + ?Sized,
{
    let body = obj.object();
    if body.velocity.y < 0.0 {
        return None;
    }
    let feet = body.feet();
    platforms.iter().find(|platform| {
        body.position.x + body.width > platform.x
            && body.position.x < platform.x + platform.width
            && feet >= platform.y
            && feet <= platform.y + LANDING_TOLERANCE
    })
}

/// First ladder the player overlaps
pub fn check_ladder_collision<'a>(player: &Player, ladders: &'a [Ladder]) -> Option<&'a Ladder> {
    ladders.iter().find(|ladder| check_collision(player, *ladder))
}

/// Index of the first active barrel touching the player
///
/// An invincible player is never hit.
pub fn check_barrel_collision(player: &Player, barrels: &[Barrel]) -> Option<usize> {
    if player.invincible {
        return None;
    }
    barrels
        .iter()
        .position(|barrel| barrel.body.active && check_collision(player, barrel))
}

/// Index of the first active power-up touching the player
pub fn check_power_up_collision(player: &Player, power_ups: &[PowerUp]) -> Option<usize> {
    power_ups
        .iter()
        .position(|power_up| power_up.body.active && check_collision(player, power_up))
}

/// Whether an airborne player is clearing this barrel right now
///
/// The barrel must be active, not yet counted, horizontally under the player,
/// and its top within `DODGE_WINDOW` below the player's feet.
pub fn check_barrel_dodge(player: &Player, barrel: &Barrel) -> bool {
    if !player.is_jumping || !barrel.body.active || barrel.dodged {
        return false;
    }
    let feet = player.body.feet();
    let gap = barrel.body.position.y - feet;
    player.bounds().overlaps_horizontally(&barrel.bounds()) && (0.0..DODGE_WINDOW).contains(&gap)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Player position is strictly within `GOAL_RADIUS` of the goal
pub fn check_goal_reached(player: &Player, goal: Vec2) -> bool {
    distance(player.body.position, goal) < GOAL_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{GameObject, PowerUpKind, Rect};
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new();
        player.body.position = Vec2::new(x, y);
        player
    }

    #[test]
    fn test_platform_collision_requires_falling() {
        let platforms = [Platform::new(1, 0.0, 600.0, 375.0, 20.0)];
        let mut player = player_at(50.0, 565.0); // feet at 605
        player.body.velocity.y = 1.0;
        assert_eq!(check_platform_collision(&player, &platforms).map(|p| p.id), Some(1));

        player.body.velocity.y = -1.0;
        assert!(check_platform_collision(&player, &platforms).is_none());
    }

    #[test]
    fn test_platform_collision_tolerance() {
        let platforms = [Platform::new(1, 0.0, 600.0, 375.0, 20.0)];
        // Feet at exactly platform.y + 20
        let player = player_at(50.0, 580.0);
        assert!(check_platform_collision(&player, &platforms).is_some());
        // Just past tolerance
        let player = player_at(50.0, 580.5);
        assert!(check_platform_collision(&player, &platforms).is_none());
        // Above the platform
        let player = player_at(50.0, 559.0);
        assert!(check_platform_collision(&player, &platforms).is_none());
    }

    #[test]
    fn test_platform_collision_first_match_wins() {
        let platforms = [
            Platform::new(1, 0.0, 600.0, 100.0, 15.0),
            Platform::new(2, 0.0, 605.0, 100.0, 15.0),
        ];
        let player = player_at(10.0, 566.0);
        assert_eq!(check_platform_collision(&player, &platforms).map(|p| p.id), Some(1));
    }

    #[test]
    fn test_platform_collision_horizontal_miss() {
        let platforms = [Platform::new(1, 100.0, 600.0, 50.0, 15.0)];
        // Right edge touching platform left edge is not overlap
        let player = player_at(70.0, 565.0);
        assert!(check_platform_collision(&player, &platforms).is_none());
    }

    #[test]
    fn test_barrel_collision_ignored_when_invincible() {
        let mut player = player_at(100.0, 100.0);
        let barrels = vec![Barrel::new(1, Vec2::new(105.0, 105.0), 3.0, 1.0)];
        assert_eq!(check_barrel_collision(&player, &barrels), Some(0));

        player.invincible = true;
        player.invincible_timer = 2000.0;
        assert_eq!(check_barrel_collision(&player, &barrels), None);
    }

    #[test]
    fn test_inactive_entities_never_collide() {
        let player = player_at(100.0, 100.0);
        let mut barrel = Barrel::new(1, Vec2::new(105.0, 105.0), 3.0, 1.0);
        barrel.body.active = false;
        assert_eq!(check_barrel_collision(&player, &[barrel]), None);

        let mut power_up = PowerUp::new(2, PowerUpKind::ExtraLife, Vec2::new(100.0, 100.0));
        power_up.body.active = false;
        assert_eq!(check_power_up_collision(&player, &[power_up]), None);
    }

    #[test]
    fn test_ladder_collision() {
        let ladders = [Ladder::new(1, 180.0, 500.0, 30.0, 100.0)];
        let player = player_at(170.0, 560.0);
        assert!(check_ladder_collision(&player, &ladders).is_some());
        let player = player_at(100.0, 560.0);
        assert!(check_ladder_collision(&player, &ladders).is_none());
    }

    #[test]
    fn test_goal_reached_radius() {
        let goal = Vec2::new(187.0, 80.0);
        let player = player_at(187.0 - 49.0, 80.0);
        assert!(check_goal_reached(&player, goal));
        let player = player_at(187.0, 80.0 + 51.0);
        assert!(!check_goal_reached(&player, goal));
        let player = player_at(187.0 + 50.0, 80.0);
        assert!(!check_goal_reached(&player, goal));
    }

    #[test]
    fn test_dodge_detection() {
        let mut player = player_at(100.0, 500.0); // feet at 540
        let barrel = Barrel::new(1, Vec2::new(105.0, 560.0), 3.0, 1.0);
        assert!(!check_barrel_dodge(&player, &barrel));

        player.is_jumping = true;
        assert!(check_barrel_dodge(&player, &barrel));

        let mut counted = barrel.clone();
        counted.dodged = true;
        assert!(!check_barrel_dodge(&player, &counted));

        let far = Barrel::new(2, Vec2::new(105.0, 600.0), 3.0, 1.0);
        assert!(!check_barrel_dodge(&player, &far));
    }

    fn object(x: f32, y: f32, w: f32, h: f32) -> GameObject {
        GameObject::new(0, Vec2::new(x, y), w, h)
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = object(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            let b_obj = object(bx, by, bw, bh);
            prop_assert_eq!(check_collision(&a, &b_obj), check_collision(&b_obj, &a));
            prop_assert_eq!(check_collision(&a, &b_obj), a.bounds().overlaps(&b));
        }
    }
}
