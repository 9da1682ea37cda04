//! Session lifecycle controller
//!
//! Owns the `GameSession` and everything that mutates it: user commands,
//! the scheduled frame callback, the RNG and the high score store.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::characters::CharacterId;
use crate::consts::*;
use crate::persistence::{self, HighScoreStore};
use crate::platform::{FrameHandle, FrameScheduler};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, advance_frame, emit_particles};

pub struct SessionController<S: HighScoreStore, F: FrameScheduler> {
    session: GameSession,
    settings: Settings,
    store: S,
    scheduler: F,
    rng: Pcg32,
    /// Frame callback currently scheduled with the host
    pending_frame: Option<FrameHandle>,
}

impl<S: HighScoreStore, F: FrameScheduler> SessionController<S, F> {
    /// Create a controller on the character select screen, reading the
    /// stored high score once
    pub fn new(store: S, scheduler: F, settings: Settings, seed: u64) -> Self {
        let high_score = persistence::load_or_default(&store);
        Self {
            session: GameSession::new(high_score),
            settings,
            store,
            scheduler,
            rng: Pcg32::seed_from_u64(seed),
            pending_frame: None,
        }
    }

    /// Read-only view for rendering
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn is_frame_pending(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Begin a new run at `now` and schedule the first frame
    pub fn start(&mut self, now: f64) {
        self.cancel_pending();

        let session = &mut self.session;
        session.clear_run();
        session.game_start_timestamp = now;
        session.last_spawn_timestamp = now;
        session.last_tick_timestamp = now;
        session.playing = true;
        session.game_over = false;
        session.character_select_active = false;

        log::info!(
            "Run started with {}",
            session.selected_character.profile().name
        );
        self.schedule();
    }

    /// Upward impulse plus a particle burst
    pub fn jump(&mut self) {
        if !self.session.is_running() {
            log::debug!("Jump ignored: no run in progress");
            return;
        }
        self.session.player_velocity = JUMP_IMPULSE;
        let pos = Vec2::new(PLAYER_X, self.session.player_y);
        emit_particles(
            &mut self.session,
            pos,
            JUMP_BURST,
            self.settings.max_particles(),
            &mut self.rng,
        );
    }

    /// Stop frame delivery; the high score was already settled by the frame
    /// that ended the run
    pub fn end(&mut self) {
        self.cancel_pending();
    }

    /// Back to character select, keeping high score and character
    pub fn reset(&mut self) {
        self.end();
        let session = &mut self.session;
        session.clear_run();
        session.playing = false;
        session.game_over = false;
        session.character_select_active = true;
    }

    pub fn select_character(&mut self, id: CharacterId) {
        if !self.session.character_select_active {
            log::debug!("Character change ignored outside character select");
            return;
        }
        self.session.selected_character = id;
        log::info!("Selected character: {}", id.profile().name);
    }

    /// Scheduled frame callback
    pub fn on_frame(&mut self, now: f64) -> Vec<GameEvent> {
        // The host consumed the handle by firing it
        self.pending_frame = None;

        let events = advance_frame(&mut self.session, now, &self.settings, &mut self.rng);
        for event in &events {
            if let GameEvent::GameOver {
                high_score,
                new_record: true,
                ..
            } = *event
            {
                self.persist_high_score(high_score);
            }
        }

        if self.session.is_running() {
            self.schedule();
        } else {
            self.end();
        }
        events
    }

    fn persist_high_score(&mut self, score: u32) {
        if let Err(e) = self.store.save(score) {
            log::warn!("Could not persist high score {}: {}", score, e);
        }
    }

    fn schedule(&mut self) {
        self.pending_frame = self.scheduler.request();
        if self.pending_frame.is_none() {
            log::warn!("Host refused to schedule a frame");
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::ManualScheduler;
    use crate::settings::FrameTiming;
    use crate::sim::Difficulty;

    type Controller = SessionController<MemoryStore, ManualScheduler>;

    fn quiet() -> Settings {
        Settings {
            ambient_trail: false,
            frame_timing: FrameTiming::Fixed,
            ..Settings::default()
        }
    }

    fn controller(store: MemoryStore) -> Controller {
        SessionController::new(store, ManualScheduler::new(), quiet(), 7)
    }

    /// Deliver the pending frame, if any
    fn pump(ctrl: &mut Controller, now: f64) -> Vec<GameEvent> {
        if ctrl.scheduler_mut().fire().is_some() {
            ctrl.on_frame(now)
        } else {
            Vec::new()
        }
    }

    /// Finish the current run with `score` by driving the player into the floor
    fn finish_run(ctrl: &mut Controller, score: u32, start: f64) -> Vec<GameEvent> {
        ctrl.start(start);
        ctrl.session.score = score;
        ctrl.session.player_y = PLAYFIELD_HEIGHT - PLAYER_SIZE;
        pump(ctrl, start + 16.0)
    }

    #[test]
    fn test_new_reads_stored_high_score() {
        let ctrl = controller(MemoryStore::with_raw("12"));
        assert_eq!(ctrl.session().high_score, 12);
        assert!(ctrl.session().character_select_active);
        assert!(!ctrl.is_frame_pending());
    }

    #[test]
    fn test_new_tolerates_corrupt_store() {
        let ctrl = controller(MemoryStore::with_raw("twelve"));
        assert_eq!(ctrl.session().high_score, 0);
    }

    #[test]
    fn test_start_initializes_run() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.start(1_000.0);
        let s = ctrl.session();
        assert!(s.playing && !s.game_over && !s.character_select_active);
        assert_eq!(s.player_y, crate::player_start_y());
        assert_eq!(s.player_velocity, 0.0);
        assert_eq!(s.score, 0);
        assert_eq!(s.difficulty, Difficulty::Easy);
        assert_eq!(s.game_start_timestamp, 1_000.0);
        assert!(ctrl.is_frame_pending());
        assert!(ctrl.scheduler().is_pending());
    }

    #[test]
    fn test_restart_cancels_previous_frame() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.start(0.0);
        ctrl.start(10.0);
        assert_eq!(ctrl.scheduler().cancelled, 1);
        assert_eq!(ctrl.scheduler().requested, 2);
    }

    #[test]
    fn test_jump_sets_impulse_and_burst() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.start(0.0);
        ctrl.jump();
        assert_eq!(ctrl.session().player_velocity, JUMP_IMPULSE);
        assert_eq!(ctrl.session().particles.len(), JUMP_BURST);
        let color = ctrl.session().selected_character.profile().trail_color;
        assert!(ctrl.session().particles.iter().all(|p| p.color == color));
    }

    #[test]
    fn test_jump_ignored_outside_run() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.jump();
        assert_eq!(ctrl.session().player_velocity, 0.0);
        assert!(ctrl.session().particles.is_empty());

        finish_run(&mut ctrl, 0, 0.0);
        assert!(ctrl.session().game_over);
        ctrl.jump();
        assert_eq!(ctrl.session().player_velocity, 0.0);
    }

    #[test]
    fn test_jump_burst_respects_particle_switch() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.set_settings(Settings {
            particles: false,
            ..quiet()
        });
        ctrl.start(0.0);
        ctrl.jump();
        assert_eq!(ctrl.session().player_velocity, JUMP_IMPULSE);
        assert!(ctrl.session().particles.is_empty());
    }

    #[test]
    fn test_game_over_stops_scheduling() {
        let mut ctrl = controller(MemoryStore::new());
        let events = finish_run(&mut ctrl, 0, 0.0);
        assert!(matches!(events[..], [GameEvent::GameOver { .. }]));
        assert!(!ctrl.is_frame_pending());
        assert!(!ctrl.scheduler().is_pending());

        // A stale callback delivered anyway changes nothing
        let before = ctrl.session().clone();
        assert!(ctrl.on_frame(32.0).is_empty());
        assert_eq!(ctrl.session(), &before);
        assert!(!ctrl.is_frame_pending());
    }

    #[test]
    fn test_high_score_round_trip() {
        let mut ctrl = controller(MemoryStore::new());
        assert_eq!(ctrl.store().raw(), None);

        finish_run(&mut ctrl, 5, 0.0);
        ctrl.end();
        assert_eq!(ctrl.session().high_score, 5);
        assert_eq!(ctrl.store().raw(), Some("5"));

        finish_run(&mut ctrl, 3, 1_000.0);
        assert_eq!(ctrl.session().high_score, 5);
        assert_eq!(ctrl.store().raw(), Some("5"));

        finish_run(&mut ctrl, 8, 2_000.0);
        assert_eq!(ctrl.session().high_score, 8);
        assert_eq!(ctrl.store().raw(), Some("8"));

        // A fresh controller over the same store sees the record
        let store = ctrl.store().clone();
        assert_eq!(controller(store).session().high_score, 8);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::new()
        };
        let mut ctrl = controller(store);
        let events = finish_run(&mut ctrl, 4, 0.0);
        assert!(matches!(
            events[..],
            [GameEvent::GameOver {
                high_score: 4,
                new_record: true,
                ..
            }]
        ));
        assert_eq!(ctrl.session().high_score, 4);
        assert_eq!(ctrl.store().raw(), None);

        // Next run still works
        ctrl.start(100.0);
        assert!(ctrl.session().playing);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.start(0.0);
        ctrl.end();
        ctrl.end();
        assert_eq!(ctrl.scheduler().cancelled, 1);
        assert!(!ctrl.is_frame_pending());
    }

    #[test]
    fn test_reset_returns_to_select_and_keeps_profile() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.select_character(CharacterId::Rocket);
        finish_run(&mut ctrl, 6, 0.0);

        ctrl.reset();
        let s = ctrl.session();
        assert!(s.character_select_active && !s.playing && !s.game_over);
        assert_eq!(s.score, 0);
        assert!(s.obstacles.is_empty() && s.particles.is_empty());
        assert_eq!(s.game_start_timestamp, 0.0);
        assert_eq!(s.high_score, 6);
        assert_eq!(s.selected_character, CharacterId::Rocket);

        let once = s.clone();
        ctrl.reset();
        assert_eq!(ctrl.session(), &once);
    }

    #[test]
    fn test_reset_mid_run_cancels_frame() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.start(0.0);
        pump(&mut ctrl, 16.0);
        assert!(ctrl.is_frame_pending());
        ctrl.reset();
        assert!(!ctrl.scheduler().is_pending());
        assert!(ctrl.on_frame(32.0).is_empty());
    }

    #[test]
    fn test_select_character_only_on_select_screen() {
        let mut ctrl = controller(MemoryStore::new());
        ctrl.select_character(CharacterId::Butterfly);
        assert_eq!(ctrl.session().selected_character, CharacterId::Butterfly);

        ctrl.start(0.0);
        ctrl.select_character(CharacterId::Bird);
        assert_eq!(ctrl.session().selected_character, CharacterId::Butterfly);
    }

    #[test]
    fn test_select_character_changes_nothing_else() {
        let mut ctrl = controller(MemoryStore::with_raw("3"));
        let mut expected = ctrl.session().clone();
        ctrl.select_character(CharacterId::Rocket);
        expected.selected_character = CharacterId::Rocket;
        assert_eq!(ctrl.session(), &expected);
    }
}
