//! Software rendering module
//!
//! Draws one complete frame per tick onto a caller-owned frame buffer (the
//! camera image or a background). Sprites, fallback shapes, particles, the
//! blade trail and darkening overlays are rasterized here; text is returned
//! as [`HudText`] requests for the display surface to draw on top.

pub mod compositor;
pub mod raster;
pub mod shapes;
pub mod sprites;

pub use compositor::{blit, rotate};
pub use raster::{FrameBuffer, Raster, Rgb, Rgba, Sprite};
pub use sprites::{NoSprites, SpriteBank, SpriteProvider};

use crate::consts::FALLBACK_RADIUS;
use crate::settings::Settings;
use crate::sim::{Entity, EntityKind, GamePhase, GameState};

// Palette
const TEXT: Rgb = Rgb::new(240, 240, 240);
const HIGHLIGHT: Rgb = Rgb::new(255, 255, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);
const RED: Rgb = Rgb::new(255, 0, 0);
const DIM: Rgb = Rgb::new(200, 200, 200);
const WARNING: Rgb = Rgb::new(255, 50, 50);
const QUIT: Rgb = Rgb::new(255, 100, 0);
const START_BOX: Rgb = Rgb::new(0, 100, 0);
const LIFE: Rgb = Rgb::new(220, 50, 50);
const BOMB_BODY: Rgb = Rgb::new(30, 30, 30);

/// Overlay strengths (share of black)
const MENU_DARKEN: f32 = 0.85;
const PAUSE_DARKEN: f32 = 0.7;
const BOMB_FLASH_WEIGHT: f32 = 0.3;

/// Tutorial icon edge and fallback disc radius
const TUTORIAL_ICON: usize = 50;
const TUTORIAL_DISC: i64 = 20;

/// Horizontal anchor of a text request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge
    Left,
    /// `x` is the centre
    Center,
}

/// A line of text for the display surface; `y` is the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub text: String,
    pub x: i32,
    pub y: i32,
    /// Font scale relative to a ~22 px base glyph height
    pub scale: f32,
    pub color: Rgb,
    pub align: Align,
    /// Draw a black copy offset 5 px down-right first
    pub shadow: bool,
}

impl HudText {
    fn new(text: impl Into<String>, x: i32, y: i32, scale: f32, color: Rgb) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            scale,
            color,
            align: Align::Left,
            shadow: false,
        }
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    fn with_shadow(mut self) -> Self {
        self.shadow = true;
        self
    }
}

/// Draw the scene for the current phase onto `target` and return the text
/// to show over it.
pub fn render_frame(
    state: &GameState,
    target: &mut FrameBuffer,
    sprites: &dyn SpriteProvider,
    settings: &Settings,
) -> Vec<HudText> {
    let mut text = Vec::new();

    if settings.blade_trail {
        draw_trail(state, target);
    }

    match state.phase {
        GamePhase::Menu => draw_tutorial(state, target, sprites, &mut text),
        GamePhase::Countdown => {
            shapes::tint(target, Rgb::BLACK, PAUSE_DARKEN);
            let (cx, cy) = center(state);
            let seconds = state.countdown_seconds();
            if seconds > 0 {
                text.push(HudText::new(seconds.to_string(), cx - 50, cy + 80, 5.0, GREEN));
                text.push(HudText::new("GET READY!", cx - 150, cy - 50, 2.0, HIGHLIGHT));
            }
        }
        GamePhase::Playing => {
            draw_scene(state, target, sprites, settings);
            draw_hud(state, target, &mut text);
        }
        GamePhase::Paused => {
            draw_scene(state, target, sprites, settings);
            shapes::tint(target, Rgb::BLACK, PAUSE_DARKEN);
            let (cx, cy) = center(state);
            text.push(HudText::new("PAUSED", cx - 120, cy - 30, 2.5, HIGHLIGHT));
            text.push(HudText::new("Press 'P' to Resume", cx - 120, cy + 50, 1.0, GREEN));
        }
        GamePhase::GameOver => {
            shapes::tint(target, Rgb::BLACK, MENU_DARKEN);
            let (cx, cy) = center(state);
            text.push(HudText::new("GAME OVER", cx - 250, cy - 80, 3.0, RED));
            text.push(HudText::new(
                format!("Final Score: {}", state.score),
                cx - 150,
                cy + 20,
                1.5,
                Rgb::WHITE,
            ));
            text.push(HudText::new("[R] Restart", cx - 120, cy + 120, 1.0, GREEN));
            text.push(HudText::new("[Q] Quit", cx - 120, cy + 170, 1.0, QUIT));
        }
    }

    text
}

fn center(state: &GameState) -> (i32, i32) {
    (state.width as i32 / 2, state.height as i32 / 2)
}

/// White polyline through the recent pointer samples; newer segments are
/// thinner
fn draw_trail(state: &GameState, target: &mut FrameBuffer) {
    let points: Vec<(i64, i64)> = state
        .trail
        .iter()
        .map(|&(x, y)| (x as i64, y as i64))
        .collect();
    for (i, pair) in points.windows(2).enumerate() {
        let thickness = ((10.0 / (i + 2) as f32).sqrt() * 10.0) as i64;
        shapes::draw_line(target, pair[0], pair[1], thickness, Rgb::WHITE);
    }
}

/// Entities, debris and particles, then the bomb flash
fn draw_scene(
    state: &GameState,
    target: &mut FrameBuffer,
    sprites: &dyn SpriteProvider,
    settings: &Settings,
) {
    for entity in state.entities.iter().chain(state.debris.iter()) {
        draw_entity(state, entity, target, sprites, settings);
    }
    for particle in state.particles.iter().filter(|p| p.is_alive()) {
        shapes::fill_square(target, particle.pos, particle.size, particle.color);
    }
    if state.bomb_flash && settings.effective_bomb_flash() {
        shapes::tint(target, RED, BOMB_FLASH_WEIGHT);
    }
}

/// Sprite when the provider has one, otherwise a coloured disc
fn draw_entity(
    state: &GameState,
    entity: &Entity,
    target: &mut FrameBuffer,
    sprites: &dyn SpriteProvider,
    settings: &Settings,
) {
    if !entity.active {
        return;
    }
    if let Some(sprite) = sprites.lookup(&entity.name) {
        blit(target, sprite, entity.pos.x, entity.pos.y, entity.angle);
        return;
    }

    let center = (entity.pos.x as i64, entity.pos.y as i64);
    let radius = if settings.fallback_matches_hitbox && entity.radius > 0.0 {
        entity.radius as i64
    } else {
        FALLBACK_RADIUS as i64
    };

    match entity.kind {
        EntityKind::Bomb => {
            shapes::fill_circle(target, center, radius, BOMB_BODY);
            shapes::bang_glyph(target, center, RED);
        }
        EntityKind::Fruit => {
            let color = state
                .catalog
                .get(&entity.species)
                .map_or(Rgb::WHITE, |s| s.color);
            shapes::fill_circle(target, center, radius, color);
        }
        // Half names have no catalog entry
        EntityKind::Half(_) => shapes::fill_circle(target, center, radius, Rgb::WHITE),
    }
}

/// Score, lives and the combo banner
fn draw_hud(state: &GameState, target: &mut FrameBuffer, text: &mut Vec<HudText>) {
    text.push(HudText::new(format!("Score: {}", state.score), 30, 60, 1.5, TEXT));

    for i in 0..state.lives.max(0) as i64 {
        let x = state.width as i64 - 50 - i * 60;
        shapes::fill_circle(target, (x, 50), 20, LIFE);
    }

    if let Some(feedback) = state.combo_feedback {
        let (cx, cy) = center(state);
        text.push(
            HudText::new(feedback.text(), cx, cy, feedback.scale, HIGHLIGHT)
                .centered()
                .with_shadow(),
        );
    }
}

/// Menu: darkened frame, instructions, and one icon per species
fn draw_tutorial(
    state: &GameState,
    target: &mut FrameBuffer,
    sprites: &dyn SpriteProvider,
    text: &mut Vec<HudText>,
) {
    shapes::tint(target, Rgb::BLACK, MENU_DARKEN);

    text.push(HudText::new("HOW TO PLAY", 50, 80, 2.0, HIGHLIGHT));
    text.push(HudText::new("1. Use your INDEX FINGER as a blade.", 60, 150, 0.9, Rgb::WHITE));
    text.push(HudText::new("2. Slice fruits to get score.", 60, 190, 0.9, Rgb::WHITE));
    text.push(HudText::new("3. AVOID BOMBS! They reduce 1 LIFE.", 60, 240, 1.0, WARNING));
    text.push(HudText::new("SCORES:", 60, 320, 1.2, HIGHLIGHT));

    for (i, species) in state.catalog.species().iter().enumerate() {
        let x = 80 + (i % 3) as i32 * 220;
        let y = 380 + (i / 3) as i32 * 100;

        let icon_y = y - 15;
        match sprites.lookup(&species.name) {
            Some(sprite) => {
                let icon = sprite.resized(TUTORIAL_ICON, TUTORIAL_ICON);
                blit(target, &icon, x as f32, icon_y as f32, 0.0);
            }
            None => {
                shapes::fill_circle(target, (x as i64, icon_y as i64), TUTORIAL_DISC, species.color)
            }
        }

        text.push(HudText::new(species.label.to_uppercase(), x + 40, y - 5, 0.6, DIM));
        text.push(HudText::new(format!("+{} Pts", species.score), x + 40, y + 20, 0.7, GREEN));
    }

    let (cx, h) = (state.width as i64 / 2, state.height as i64);
    shapes::outline_rect(target, (cx - 200, h - 150), (cx + 200, h - 80), 2, START_BOX);
    text.push(HudText::new(
        "Press 'S' to START",
        cx as i32 - 160,
        h as i32 - 105,
        1.2,
        GREEN,
    ));
}
