//! Game state and core simulation types
//!
//! `GameSession` is the single authoritative state; renderers only read it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::characters::CharacterId;

/// An obstacle pair (top and bottom barrier around a gap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Height of the top barrier measured from the top edge
    pub top_height: f32,
    /// Height of the bottom barrier measured from the bottom edge
    pub bottom_height: f32,
    /// Set once the trailing edge passes the player
    pub passed: bool,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub color: String,
}

/// Side effects produced by a frame, consumed by the shell
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Tier escalated; shown as a toast
    DifficultyChanged { from: Difficulty, to: Difficulty },
    /// Run ended on a collision
    GameOver {
        score: u32,
        high_score: u32,
        /// High score was raised and must be persisted
        new_record: bool,
    },
}

/// Complete game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub playing: bool,
    pub game_over: bool,
    pub character_select_active: bool,
    pub player_y: f32,
    pub player_velocity: f32,
    /// Obstacles in spawn (left-to-right) order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub score: u32,
    pub high_score: u32,
    pub selected_character: CharacterId,
    pub difficulty: Difficulty,
    /// Wall-clock ms at run start
    pub game_start_timestamp: f64,
    /// Wall-clock ms of the last obstacle spawn
    pub last_spawn_timestamp: f64,
    /// Wall-clock ms of the last simulated tick
    pub last_tick_timestamp: f64,
    /// Next entity ID
    next_id: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameSession {
    /// Fresh session on the character select screen
    pub fn new(high_score: u32) -> Self {
        Self {
            playing: false,
            game_over: false,
            character_select_active: true,
            player_y: crate::player_start_y(),
            player_velocity: 0.0,
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score,
            selected_character: CharacterId::default(),
            difficulty: Difficulty::Easy,
            game_start_timestamp: 0.0,
            last_spawn_timestamp: 0.0,
            last_tick_timestamp: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear everything tied to a single run
    pub fn clear_run(&mut self) {
        self.player_y = crate::player_start_y();
        self.player_velocity = 0.0;
        self.obstacles.clear();
        self.particles.clear();
        self.score = 0;
        self.difficulty = Difficulty::Easy;
        self.game_start_timestamp = 0.0;
        self.last_spawn_timestamp = 0.0;
        self.last_tick_timestamp = 0.0;
        self.next_id = 1;
    }

    /// True while frames should advance the simulation
    pub fn is_running(&self) -> bool {
        self.playing && !self.game_over
    }

    /// Elapsed play time at `now`
    pub fn elapsed_ms(&self, now: f64) -> f64 {
        (now - self.game_start_timestamp).max(0.0)
    }
}
