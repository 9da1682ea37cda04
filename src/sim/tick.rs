//! Per-frame simulation step
//!
//! Core game loop that advances the session by one display frame.

use glam::Vec2;
use rand::Rng;

use super::collision::has_collided;
use super::difficulty::tier_for_elapsed;
use super::spawn::{spawn_obstacle, spawn_particle};
use super::state::{GameEvent, GameSession, Obstacle, Particle};
use crate::consts::*;
use crate::settings::{FrameTiming, Settings};

/// Multiplier applied to per-tick constants for the frame ending at `now`
pub fn frame_scale(session: &GameSession, now: f64, timing: FrameTiming) -> f32 {
    match timing {
        FrameTiming::Fixed => 1.0,
        FrameTiming::Scaled => {
            let dt = (now - session.last_tick_timestamp) / REFERENCE_FRAME_MS;
            (dt as f32).clamp(0.0, MAX_FRAME_SCALE)
        }
    }
}

/// Advance the session by one frame ending at wall-clock `now` (ms)
///
/// Returns the side effects the shell has to act on. Frames delivered after
/// the run ended (or before it started) leave the session untouched.
pub fn advance_frame<R: Rng>(
    session: &mut GameSession,
    now: f64,
    settings: &Settings,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !session.is_running() {
        return events;
    }

    let k = frame_scale(session, now, settings.frame_timing);
    session.last_tick_timestamp = now;

    // Tier only ever escalates within a run
    let tier = tier_for_elapsed(session.elapsed_ms(now)).max(session.difficulty);
    let profile = tier.profile();

    // Semi-implicit Euler: velocity first, then position
    let velocity = session.player_velocity + profile.gravity * k;
    let player_y = session.player_y + velocity * k;

    let mut obstacles: Vec<Obstacle> = session
        .obstacles
        .iter()
        .map(|o| Obstacle {
            x: o.x - profile.obstacle_speed * k,
            ..o.clone()
        })
        .filter(|o| o.x > -OBSTACLE_WIDTH)
        .collect();

    let mut last_spawn = session.last_spawn_timestamp;
    if now - last_spawn >= profile.spawn_interval_ms() {
        let id = session.next_entity_id();
        obstacles.push(spawn_obstacle(id, profile, rng));
        last_spawn = now;
    }

    let mut score = session.score;
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && obstacle.x + OBSTACLE_WIDTH < PLAYER_X {
            obstacle.passed = true;
            score += 1;
        }
    }

    if has_collided(player_y, PLAYER_SIZE, &obstacles) {
        let new_record = session.score > session.high_score;
        session.game_over = true;
        session.playing = false;
        session.high_score = session.high_score.max(session.score);
        log::info!(
            "Game over: score {} (best {})",
            session.score,
            session.high_score
        );
        events.push(GameEvent::GameOver {
            score: session.score,
            high_score: session.high_score,
            new_record,
        });
    } else {
        session.player_y = player_y;
        session.player_velocity = velocity;
        session.obstacles = obstacles;
        session.score = score;
        session.last_spawn_timestamp = last_spawn;
        if tier != session.difficulty {
            log::info!(
                "Difficulty increased: {} -> {}",
                session.difficulty.display_name(),
                tier.display_name()
            );
            events.push(GameEvent::DifficultyChanged {
                from: session.difficulty,
                to: tier,
            });
            session.difficulty = tier;
        }
    }

    update_particles(&mut session.particles, k);

    if session.is_running() && settings.effective_ambient_trail() {
        let trail = Vec2::new(PLAYER_X, session.player_y + PLAYER_SIZE / 2.0);
        emit_particles(session, trail, 1, settings.max_particles(), rng);
    }

    events
}

/// Drift particles and fade them out, dropping dead ones
pub fn update_particles(particles: &mut Vec<Particle>, k: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * k;
        particle.life -= PARTICLE_DECAY * k;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Emit up to `count` particles in the selected character's trail colour,
/// never exceeding `cap` live particles
pub fn emit_particles<R: Rng>(
    session: &mut GameSession,
    pos: Vec2,
    count: usize,
    cap: usize,
    rng: &mut R,
) {
    let room = cap.saturating_sub(session.particles.len());
    let color = session.selected_character.profile().trail_color;
    for _ in 0..count.min(room) {
        session.particles.push(spawn_particle(pos, color, rng));
    }
}
