//! Difficulty tiers and their tuning profiles
//!
//! Tiers escalate with play time only; nothing in a run can lower them.

use serde::{Deserialize, Serialize};

use crate::consts::{HARD_AFTER_MS, MEDIUM_AFTER_MS};

/// Difficulty tier, ordered from easiest to hardest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Tuning constants for one tier (per-tick values at the reference rate)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Horizontal obstacle speed (pixels/tick)
    pub obstacle_speed: f32,
    /// Nominal horizontal distance between obstacles (pixels)
    pub obstacle_spacing: f32,
    /// Vertical gap between top and bottom barrier (pixels)
    pub gap_size: f32,
    /// Ticks between spawns
    pub spawn_rate: f32,
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
}

impl DifficultyProfile {
    /// Spawn cadence converted to wall-clock milliseconds
    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawn_rate as f64 * 1000.0 / crate::consts::REFERENCE_FPS
    }
}

const EASY: DifficultyProfile = DifficultyProfile {
    obstacle_speed: 2.0,
    obstacle_spacing: 300.0,
    gap_size: 200.0,
    spawn_rate: 150.0,
    gravity: crate::consts::DEFAULT_GRAVITY,
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    obstacle_speed: 3.0,
    obstacle_spacing: 280.0,
    gap_size: 180.0,
    spawn_rate: 130.0,
    gravity: crate::consts::DEFAULT_GRAVITY,
};

const HARD: DifficultyProfile = DifficultyProfile {
    obstacle_speed: 4.0,
    obstacle_spacing: 250.0,
    gap_size: 160.0,
    spawn_rate: 110.0,
    gravity: 0.65,
};

/// Tuning profile for a tier
pub fn profile_for(tier: Difficulty) -> &'static DifficultyProfile {
    match tier {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

/// Tier reached after `elapsed_ms` of play
pub fn tier_for_elapsed(elapsed_ms: f64) -> Difficulty {
    if elapsed_ms < MEDIUM_AFTER_MS {
        Difficulty::Easy
    } else if elapsed_ms < HARD_AFTER_MS {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn profile(self) -> &'static DifficultyProfile {
        profile_for(self)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// HUD colour (green / yellow / red)
    pub fn color(self) -> &'static str {
        match self {
            Difficulty::Easy => "#22c55e",
            Difficulty::Medium => "#eab308",
            Difficulty::Hard => "#ef4444",
        }
    }
}
