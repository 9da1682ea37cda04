//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time is passed in, never read
//! - Randomness comes from an injected RNG
//! - Obstacles iterate in spawn order

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::has_collided;
pub use difficulty::{Difficulty, DifficultyProfile, profile_for, tier_for_elapsed};
pub use spawn::{spawn_obstacle, spawn_particle};
pub use state::{GameEvent, GameSession, Obstacle, Particle};
pub use tick::{advance_frame, emit_particles, frame_scale, update_particles};
