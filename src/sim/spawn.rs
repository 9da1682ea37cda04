//! Obstacle and particle factories

use glam::Vec2;
use rand::Rng;

use super::difficulty::DifficultyProfile;
use super::state::{Obstacle, Particle};
use crate::consts::*;

/// Build an obstacle at the right edge with a random gap for `profile`
///
/// The gap start is drawn from `[GAP_TOP_MARGIN, H - gap - GAP_BOTTOM_MARGIN]`.
pub fn spawn_obstacle<R: Rng>(id: u32, profile: &DifficultyProfile, rng: &mut R) -> Obstacle {
    let max_start = PLAYFIELD_HEIGHT - profile.gap_size - GAP_BOTTOM_MARGIN;
    debug_assert!(max_start >= GAP_TOP_MARGIN, "gap does not fit the playfield");
    let span = (max_start - GAP_TOP_MARGIN).max(0.0);

    let gap_start = GAP_TOP_MARGIN + rng.random::<f32>() * span;

    Obstacle {
        id,
        x: PLAYFIELD_WIDTH,
        top_height: gap_start,
        bottom_height: PLAYFIELD_HEIGHT - gap_start - profile.gap_size,
        passed: false,
    }
}

/// Build a particle at `pos` with a random drift
pub fn spawn_particle<R: Rng>(pos: Vec2, color: &str, rng: &mut R) -> Particle {
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_SPREAD,
        (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_SPREAD,
    );
    Particle {
        pos,
        vel,
        life: 1.0,
        color: color.to_string(),
    }
}
