//! Neon Flappy - A flappy-style arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacles, collisions, difficulty, game state)
//! - `session`: Session lifecycle controller driving the simulation
//! - `platform`: Frame scheduling and clock abstraction
//! - `persistence`: High score storage
//! - `characters`: Playable character catalog
//! - `renderer`: Canvas 2D drawing (wasm only)

pub mod characters;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use characters::{CHARACTERS, Character, CharacterId};
pub use session::SessionController;
pub use settings::{FrameTiming, QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player glyph is a square locked to a fixed column
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Upward velocity set by a jump (pixels/tick, negative = up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Gravity used when a profile does not override it (pixels/tick²)
    pub const DEFAULT_GRAVITY: f32 = 0.6;

    /// Obstacle barrier width
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Minimum distance between the gap and the top edge
    pub const GAP_TOP_MARGIN: f32 = 50.0;
    /// Minimum distance between the gap and the bottom edge
    pub const GAP_BOTTOM_MARGIN: f32 = 100.0;

    /// Particles emitted per jump
    pub const JUMP_BURST: usize = 5;
    /// Particle velocity range is [-PARTICLE_SPREAD, PARTICLE_SPREAD] per axis
    pub const PARTICLE_SPREAD: f32 = 2.0;
    /// Life lost per reference tick (particles last 30 ticks)
    pub const PARTICLE_DECAY: f32 = 1.0 / 30.0;

    /// Reference refresh rate the per-tick constants are tuned against
    pub const REFERENCE_FPS: f64 = 60.0;
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / REFERENCE_FPS;
    /// Largest frame scale applied after a stall (e.g. tab switch)
    pub const MAX_FRAME_SCALE: f32 = 3.0;

    /// Difficulty tier thresholds (ms of play time)
    pub const MEDIUM_AFTER_MS: f64 = 60_000.0;
    pub const HARD_AFTER_MS: f64 = 120_000.0;
}

/// Vertical start position (top of the player glyph)
#[inline]
pub fn player_start_y() -> f32 {
    consts::PLAYFIELD_HEIGHT / 2.0
}
