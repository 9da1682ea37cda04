//! Neon Flappy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_flappy::characters::CharacterId;
    use neon_flappy::persistence::LocalStorageStore;
    use neon_flappy::platform::{FrameCallback, RafScheduler, now_ms};
    use neon_flappy::renderer::CanvasRenderer;
    use neon_flappy::sim::GameEvent;
    use neon_flappy::{SessionController, Settings};

    type Controller = SessionController<LocalStorageStore, RafScheduler>;

    const TOAST_MS: i32 = 2_000;
    const QUALITY_TOAST_COLOR: &str = "#60a5fa";

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        renderer: CanvasRenderer,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(controller: Controller, renderer: CanvasRenderer) -> Self {
            Self {
                controller,
                renderer,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn start(&mut self) {
            self.controller.start(now_ms());
            self.renderer.render(self.controller.session());
            self.sync_screens();
        }

        fn back_to_menu(&mut self) {
            self.controller.reset();
            self.sync_screens();
        }

        fn select(&mut self, id: CharacterId) {
            self.controller.select_character(id);
            self.sync_screens();
        }

        /// Store changed preferences and hand them to the controller
        fn apply_settings(&mut self, settings: Settings) {
            if let Err(e) = settings.save() {
                log::warn!("Settings not saved: {}", e);
            }
            self.controller.set_settings(settings);
            self.update_hud();
        }

        fn cycle_quality(&mut self) {
            let mut settings = self.controller.settings().clone();
            settings.apply_preset(settings.quality.next());
            show_toast(&format!("Quality: {}", settings.quality.label()), QUALITY_TOAST_COLOR);
            self.apply_settings(settings);
        }

        fn toggle_fps(&mut self) {
            let mut settings = self.controller.settings().clone();
            settings.show_fps = !settings.show_fps;
            self.apply_settings(settings);
        }

        /// One animation frame: simulate, draw, react to events
        fn frame(&mut self, time: f64) {
            let events = self.controller.on_frame(time);
            self.track_fps(time);
            self.renderer.render(self.controller.session());
            for event in events {
                match event {
                    GameEvent::DifficultyChanged { to, .. } => {
                        show_toast(&format!("Difficulty: {}", to.display_name()), to.color());
                    }
                    GameEvent::GameOver { .. } => self.sync_screens(),
                }
            }
            self.update_hud();
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.controller.session();

            if let Some(el) = document.query_selector("#hud-difficulty .hud-value").ok().flatten() {
                el.set_text_content(Some(session.difficulty.display_name()));
                let _ = el.set_attribute("style", &format!("color: {}", session.difficulty.color()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&session.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.controller.settings().show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }
        }

        /// Show exactly one of character select / play field / game over
        fn sync_screens(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.controller.session();

            set_visible(&document, "character-select", session.character_select_active);
            set_visible(&document, "play-area", !session.character_select_active);
            set_visible(&document, "game-over", session.game_over);

            for (i, id) in CharacterId::ALL.iter().enumerate() {
                if let Some(el) = document.get_element_by_id(&format!("character-{}", i)) {
                    let class = if *id == session.selected_character {
                        "character-btn selected"
                    } else {
                        "character-btn"
                    };
                    let _ = el.set_attribute("class", class);
                }
            }

            if session.game_over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&session.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-best") {
                    el.set_text_content(Some(&session.high_score.to_string()));
                }
                let record = session.score > 0 && session.score == session.high_score;
                set_visible(&document, "new-record", record);
            }
            self.update_hud();
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if visible {
                el.class_list().remove_1("hidden")
            } else {
                el.class_list().add_1("hidden")
            };
        }
    }

    /// Transient notification; hides itself without touching the game loop
    fn show_toast(message: &str, color: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(toast) = window.document().and_then(|d| d.get_element_by_id("toast")) else {
            return;
        };
        toast.set_text_content(Some(message));
        let _ = toast.set_attribute("style", &format!("border-color: {}", color));
        let _ = toast.class_list().add_1("show");

        let closure = Closure::once(move || {
            let _ = toast.class_list().remove_1("show");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TOAST_MS,
        );
        closure.forget();
    }

    /// Fill the character buttons from the catalog
    fn populate_character_select(document: &web_sys::Document) {
        for (i, id) in CharacterId::ALL.iter().enumerate() {
            let c = id.profile();
            if let Some(el) = document.get_element_by_id(&format!("character-{}", i)) {
                el.set_inner_html(&format!(
                    "<span class=\"icon\">{}</span><span class=\"name\">{}</span><span class=\"desc\">{}</span>",
                    c.icon, c.name, c.description
                ));
                let _ = el.set_attribute(
                    "style",
                    &format!("background: linear-gradient(135deg, {}, {})", c.color.0, c.color.1),
                );
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Flappy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let renderer = CanvasRenderer::new(&canvas).expect("no 2d context");

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler::new(window.clone(), callback.clone());
        let seed = js_sys::Date::now() as u64;
        let controller = SessionController::new(LocalStorageStore::new(), scheduler, Settings::load(), seed);
        let game = Rc::new(RefCell::new(Game::new(controller, renderer)));

        log::info!("Game initialized with seed: {}", seed);

        // The frame closure lives for the whole page
        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                game.borrow_mut().frame(time);
            }));
        }

        populate_character_select(&document);
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());

        game.borrow().sync_screens();
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        log::info!("Neon Flappy ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().controller.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().controller.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let (selecting, over) = {
                    let s = g.controller.session();
                    (s.character_select_active, s.game_over)
                };

                if selecting {
                    match event.key().as_str() {
                        "1" | "2" | "3" => {
                            let index = event.key().parse::<usize>().unwrap_or(1) - 1;
                            if let Some(id) = CharacterId::from_index(index) {
                                g.select(id);
                            }
                        }
                        "Enter" => g.start(),
                        "q" | "Q" => g.cycle_quality(),
                        "f" | "F" => g.toggle_fps(),
                        _ => {}
                    }
                } else if over {
                    match event.key().as_str() {
                        "Enter" | "r" | "R" => g.start(),
                        "Escape" | "m" | "M" => g.back_to_menu(),
                        _ => {}
                    }
                } else {
                    match event.code().as_str() {
                        "Space" | "ArrowUp" => {
                            event.prevent_default();
                            g.controller.jump();
                        }
                        _ => {}
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for (i, id) in CharacterId::ALL.iter().copied().enumerate() {
            if let Some(btn) = document.get_element_by_id(&format!("character-{}", i)) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().select(id);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        let actions: [(&str, fn(&mut Game)); 3] = [
            ("start-btn", Game::start),
            ("retry-btn", Game::start),
            ("menu-btn", Game::back_to_menu),
        ];
        for (element_id, action) in actions {
            if let Some(btn) = document.get_element_by_id(element_id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    action(&mut game.borrow_mut());
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run with a simple autopilot: `neon-flappy [seed] [quality] [character]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_flappy::consts::*;
    use neon_flappy::persistence::MemoryStore;
    use neon_flappy::platform::ManualScheduler;
    use neon_flappy::sim::GameEvent;
    use neon_flappy::{CharacterId, QualityPreset, SessionController, Settings};

    env_logger::init();
    log::info!("Neon Flappy (native) starting...");
    log::info!("Native mode runs a headless simulation - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let quality = args
        .next()
        .and_then(|s| QualityPreset::from_str(&s))
        .unwrap_or_default();
    let character = args
        .next()
        .and_then(|s| CharacterId::from_str(&s))
        .unwrap_or_default();

    let mut ctrl = SessionController::new(
        MemoryStore::new(),
        ManualScheduler::new(),
        Settings::from_preset(quality),
        seed,
    );
    ctrl.select_character(character);
    ctrl.start(0.0);

    // Three minutes of 60 Hz frames at most
    let max_ticks = 180 * 60;
    let mut now = 0.0;
    for _ in 0..max_ticks {
        if ctrl.scheduler_mut().fire().is_none() {
            break;
        }
        now += REFERENCE_FRAME_MS;

        // Aim for the middle of the next gap
        let session = ctrl.session();
        let target = session
            .obstacles
            .iter()
            .find(|o| o.x + OBSTACLE_WIDTH >= PLAYER_X)
            .map(|o| (o.top_height + PLAYFIELD_HEIGHT - o.bottom_height) / 2.0)
            .unwrap_or(PLAYFIELD_HEIGHT / 2.0);
        if session.player_y + PLAYER_SIZE / 2.0 > target && session.player_velocity > 0.0 {
            ctrl.jump();
        }

        for event in ctrl.on_frame(now) {
            if let GameEvent::GameOver { score, high_score, .. } = event {
                println!("Game over after {:.1}s: score {} (best {})", now / 1000.0, score, high_score);
            }
        }
    }

    let session = ctrl.session();
    if session.playing {
        println!(
            "Survived {:.1}s: score {}, difficulty {}",
            now / 1000.0,
            session.score,
            session.difficulty.display_name()
        );
    }
}
