// Integration tests (native) for the `neon-flappy` crate.
// These drive the public controller API with a manual scheduler and an
// in-memory store, or step a session directly for long scripted runs.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use neon_flappy::consts::*;
use neon_flappy::persistence::MemoryStore;
use neon_flappy::platform::ManualScheduler;
use neon_flappy::sim::{Difficulty, GameEvent, GameSession, Obstacle, advance_frame};
use neon_flappy::{CharacterId, FrameTiming, SessionController, Settings};

type Controller = SessionController<MemoryStore, ManualScheduler>;

fn fixed_settings() -> Settings {
    Settings {
        ambient_trail: false,
        frame_timing: FrameTiming::Fixed,
        ..Settings::default()
    }
}

fn controller() -> Controller {
    SessionController::new(MemoryStore::new(), ManualScheduler::new(), fixed_settings(), 2024)
}

fn pump(ctrl: &mut Controller, now: f64) -> Option<Vec<GameEvent>> {
    ctrl.scheduler_mut().fire()?;
    Some(ctrl.on_frame(now))
}

// Free fall from the centre: y_n = 300 + 0.3 * n * (n + 1).
// The floor is hit once y_n + 40 > 600, i.e. n * (n + 1) > 866.7 -> n = 29.
#[test]
fn free_fall_hits_floor_at_predicted_tick() {
    let mut ctrl = controller();
    ctrl.start(0.0);

    let mut last_y = ctrl.session().player_y;
    let mut game_over_tick = None;
    for tick in 1..=60 {
        let events = pump(&mut ctrl, tick as f64 * 16.0).expect("frame scheduled while playing");
        if let Some(GameEvent::GameOver { score, .. }) = events.first() {
            assert_eq!(*score, 0);
            game_over_tick = Some(tick);
            break;
        }
        let y = ctrl.session().player_y;
        assert!(y > last_y, "player must keep falling (tick {tick})");
        last_y = y;
    }

    assert_eq!(game_over_tick, Some(29));
    assert!(ctrl.session().game_over);
    assert!(!ctrl.scheduler().is_pending());
    // Last committed position is the one from tick 28
    assert!((ctrl.session().player_y - 543.6).abs() < 1e-2);
}

#[test]
fn jump_applies_impulse_on_next_physics_step() {
    let mut ctrl = controller();
    ctrl.start(0.0);
    for tick in 1..=10 {
        pump(&mut ctrl, tick as f64 * 16.0);
    }
    let y_before = ctrl.session().player_y;

    ctrl.jump();
    assert_eq!(ctrl.session().player_velocity, JUMP_IMPULSE);

    pump(&mut ctrl, 11.0 * 16.0);
    let expected_v = JUMP_IMPULSE + DEFAULT_GRAVITY;
    assert!((ctrl.session().player_velocity - expected_v).abs() < 1e-5);
    assert!((ctrl.session().player_y - (y_before + expected_v)).abs() < 1e-3);
}

#[test]
fn reset_twice_matches_reset_once() {
    let mut ctrl = controller();
    ctrl.select_character(CharacterId::Butterfly);
    ctrl.start(0.0);
    for tick in 1..=5 {
        pump(&mut ctrl, tick as f64 * 16.0);
    }
    ctrl.jump();

    ctrl.reset();
    let once = ctrl.session().clone();
    ctrl.reset();
    assert_eq!(ctrl.session(), &once);
    assert!(once.character_select_active);
    assert_eq!(once.selected_character, CharacterId::Butterfly);
    assert!(pump(&mut ctrl, 200.0).is_none());
}

// Jumping whenever the player sinks below HOVER_Y keeps it inside
// roughly [207, 372] at every tier, well clear of both edges.
const HOVER_Y: f32 = 320.0;

fn running_session() -> GameSession {
    let mut session = GameSession::new(0);
    session.playing = true;
    session.character_select_active = false;
    session
}

fn hover(session: &mut GameSession) {
    if session.player_y > HOVER_Y {
        session.player_velocity = JUMP_IMPULSE;
    }
}

#[test]
fn difficulty_escalates_over_a_long_run() {
    let settings = fixed_settings();
    let mut rng = Pcg32::seed_from_u64(2024);
    let mut session = running_session();

    let mut tiers = vec![session.difficulty];
    let mut notifications = Vec::new();
    for tick in 1..=(125 * 60) {
        let now = tick as f64 * REFERENCE_FRAME_MS;
        // No obstacles: only the clock drives this run
        session.last_spawn_timestamp = now;
        hover(&mut session);
        for event in advance_frame(&mut session, now, &settings, &mut rng) {
            match event {
                GameEvent::DifficultyChanged { from, to } => notifications.push((from, to)),
                GameEvent::GameOver { .. } => panic!("hovering player died at {now} ms"),
            }
        }
        tiers.push(session.difficulty);
    }

    assert!(session.playing);
    assert!(tiers.windows(2).all(|w| w[0] <= w[1]), "tier regressed");
    assert_eq!(
        notifications,
        vec![
            (Difficulty::Easy, Difficulty::Medium),
            (Difficulty::Medium, Difficulty::Hard)
        ]
    );
    assert_eq!(session.difficulty, Difficulty::Hard);
}

#[test]
fn each_cleared_obstacle_scores_once() {
    let settings = fixed_settings();
    let mut rng = Pcg32::seed_from_u64(2024);
    let mut session = running_session();

    let mut seen_passed = HashSet::new();
    let mut injected = 0;
    for tick in 0..3_000 {
        let now = (tick + 1) as f64 * REFERENCE_FRAME_MS;
        session.last_spawn_timestamp = now;
        if tick % 150 == 0 {
            // Gap spans [150, 450], covering the whole hover band
            let id = session.next_entity_id();
            session.obstacles.push(Obstacle {
                id,
                x: PLAYFIELD_WIDTH,
                top_height: 150.0,
                bottom_height: 150.0,
                passed: false,
            });
            injected += 1;
        }
        hover(&mut session);

        let before = session.score;
        let events = advance_frame(&mut session, now, &settings, &mut rng);
        assert!(events.is_empty(), "unexpected {events:?} at tick {tick}");

        let newly_passed = session
            .obstacles
            .iter()
            .filter(|o| o.passed && seen_passed.insert(o.id))
            .count() as u32;
        assert_eq!(session.score - before, newly_passed);
    }

    // 2 px per tick from x = 800 clears the player after 391 ticks, so the
    // obstacles injected up to tick 2550 are behind it
    assert!(session.playing);
    assert_eq!(session.score, 18);
    assert_eq!(session.score as usize, seen_passed.len());
    assert!(session.score < injected);
    assert_eq!(session.difficulty, Difficulty::Easy);
}
