//! Collision detection between the player and the playfield
//!
//! The player never moves horizontally, so every check reduces to an
//! interval overlap against the fixed column `[PLAYER_X, PLAYER_X + size)`.

use super::state::Obstacle;
use crate::consts::{OBSTACLE_WIDTH, PLAYER_X, PLAYFIELD_HEIGHT};

/// Player left the vertical play area
#[inline]
pub fn out_of_bounds(player_y: f32, player_size: f32) -> bool {
    player_y < 0.0 || player_y + player_size > PLAYFIELD_HEIGHT
}

/// Obstacle shares the player's column
#[inline]
pub fn overlaps_column(obstacle: &Obstacle, player_size: f32) -> bool {
    PLAYER_X + player_size > obstacle.x && PLAYER_X < obstacle.x + OBSTACLE_WIDTH
}

/// Player box intersects the top or bottom barrier (ignores the column)
#[inline]
pub fn hits_barrier(obstacle: &Obstacle, player_y: f32, player_size: f32) -> bool {
    player_y < obstacle.top_height
        || player_y + player_size > PLAYFIELD_HEIGHT - obstacle.bottom_height
}

/// True if the player struck a boundary or any obstacle
pub fn has_collided(player_y: f32, player_size: f32, obstacles: &[Obstacle]) -> bool {
    if out_of_bounds(player_y, player_size) {
        return true;
    }
    obstacles
        .iter()
        .any(|o| overlaps_column(o, player_size) && hits_barrier(o, player_y, player_size))
}
