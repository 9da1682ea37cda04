//! Canvas 2D rendering
//!
//! Draws a read-only view of the session each frame. No simulation logic
//! lives here.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{GameSession, Obstacle, Particle};

const STAR_COUNT: u32 = 50;
const OBSTACLE_COLOR: &str = "#ef4444";
const OBSTACLE_DARK: &str = "#dc2626";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size the canvas to the playfield and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    pub fn render(&self, session: &GameSession) {
        self.draw_background();
        for obstacle in &session.obstacles {
            self.draw_obstacle(obstacle);
        }
        for particle in &session.particles {
            self.draw_particle(particle);
        }
        self.draw_player(session);
        self.draw_score(session.score);
    }

    fn draw_background(&self) {
        let (w, h) = (PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, w, h);

        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        gradient.add_color_stop(0.0, "#1e1b4b").ok();
        gradient.add_color_stop(0.5, "#312e81").ok();
        gradient.add_color_stop(1.0, "#1e1b4b").ok();
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Fixed star pattern
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
        for i in 0..STAR_COUNT {
            let x = (i as f64 * 137.5) % w;
            let y = (i as f64 * 73.3) % h;
            ctx.begin_path();
            ctx.arc(x, y, 1.0, 0.0, TAU).ok();
            ctx.fill();
        }
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) {
        let ctx = &self.ctx;
        let x = obstacle.x as f64;
        let w = OBSTACLE_WIDTH as f64;
        let bottom_y = (PLAYFIELD_HEIGHT - obstacle.bottom_height) as f64;

        let gradient = ctx.create_linear_gradient(x, 0.0, x + w, 0.0);
        gradient.add_color_stop(0.0, OBSTACLE_COLOR).ok();
        gradient.add_color_stop(1.0, OBSTACLE_DARK).ok();
        ctx.set_fill_style_canvas_gradient(&gradient);

        ctx.set_shadow_color(OBSTACLE_COLOR);
        ctx.set_shadow_blur(20.0);
        ctx.fill_rect(x, 0.0, w, obstacle.top_height as f64);
        ctx.fill_rect(x, bottom_y, w, obstacle.bottom_height as f64);
        ctx.set_shadow_blur(0.0);
    }

    fn draw_particle(&self, particle: &Particle) {
        let ctx = &self.ctx;
        // Fades on top of the colour's own alpha
        ctx.set_global_alpha(particle.life.clamp(0.0, 1.0) as f64);
        ctx.set_fill_style_str(&particle.color);
        ctx.begin_path();
        ctx.arc(particle.pos.x as f64, particle.pos.y as f64, 3.0, 0.0, TAU)
            .ok();
        ctx.fill();
        ctx.set_global_alpha(1.0);
    }

    fn draw_player(&self, session: &GameSession) {
        let ctx = &self.ctx;
        let character = session.selected_character.profile();
        let half = PLAYER_SIZE as f64 / 2.0;

        ctx.set_font("40px Arial");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_shadow_color(character.trail_color);
        ctx.set_shadow_blur(15.0);
        ctx.fill_text(
            character.icon,
            PLAYER_X as f64 + half,
            session.player_y as f64 + half,
        )
        .ok();
        ctx.set_shadow_blur(0.0);
    }

    fn draw_score(&self, score: u32) {
        let ctx = &self.ctx;
        ctx.set_font("bold 36px Arial");
        ctx.set_fill_style_str("#ffffff");
        ctx.set_text_align("center");
        ctx.set_shadow_color("#000000");
        ctx.set_shadow_blur(5.0);
        ctx.fill_text(&score.to_string(), PLAYFIELD_WIDTH as f64 / 2.0, 60.0)
            .ok();
        ctx.set_shadow_blur(0.0);
    }
}
