//! Transient particle effects
//!
//! Integration only; nothing here draws.

use std::f32::consts::TAU;

use super::entity::Particle;
use super::random::RandomSource;
use crate::consts::PARTICLE_GRAVITY;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// Burst of `count` particles spread evenly around a circle
///
/// Ids are assigned from `first_id` upward.
pub fn create_explosion<R: RandomSource + ?Sized>(
    x: f32,
    y: f32,
    color: u32,
    count: usize,
    first_id: u32,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            let speed = rng.range(2.0, 5.0);
            let size = rng.range(4.0, 8.0);
            Particle {
                id: first_id + i as u32,
                x,
                y,
                velocity_x: angle.cos() * speed,
                velocity_y: angle.sin() * speed,
                size,
                color,
                life: 1.0,
                max_life: 1.0,
            }
        })
        .collect()
}

/// Advance particles by one tick and drop the dead ones
pub fn update_particles(particles: Vec<Particle>, dt_ms: f32) -> Vec<Particle> {
    particles
        .into_iter()
        .map(|mut p| {
            p.x += p.velocity_x;
            p.y += p.velocity_y;
            p.velocity_y += PARTICLE_GRAVITY;
            p.life -= dt_ms / 1000.0;
            p
        })
        .filter(|p| p.life > 0.0)
        .collect()
}
