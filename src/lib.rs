//! Fruit Slash - slice falling fruit with a tracked fingertip
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, particles, slicing, combo, phases)
//! - `renderer`: Software compositor and scene drawing onto a frame buffer
//! - `catalog`: Fruit species table (size, score, colour, label)
//! - `settings`: Session settings loaded from JSON
//! - `audio`: Fire-and-forget sound events
//! - `pointer`: Pointer sources (the player's blade position)

pub mod audio;
pub mod catalog;
pub mod error;
pub mod pointer;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, Species};
pub use error::{ConfigError, RasterError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default frame dimensions (matches the capture resolution)
    pub const WIDTH: u32 = 1280;
    pub const HEIGHT: u32 = 720;

    /// Simulation rate; countdown and combo display are counted in these ticks
    pub const TICKS_PER_SECOND: u32 = 30;

    /// Downward acceleration for whole fruit and bombs (units/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Extra gravity applied to half-fruit debris
    pub const HALF_GRAVITY_BONUS: f32 = 0.1;
    /// Entities deactivate once they fall this far below the frame
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Horizontal keep-out on both sides when spawning
    pub const SPAWN_MARGIN: u32 = 100;

    /// Bombs
    pub const BOMB_NAME: &str = "bomb";
    pub const BOMB_RADIUS: f32 = 40.0;
    pub const BOMB_CHANCE: f32 = 0.15;

    /// Radius of the placeholder disc drawn when a sprite is missing
    pub const FALLBACK_RADIUS: f32 = 40.0;

    /// Slice effects
    pub const PARTICLES_PER_SLICE: usize = 10;
    pub const PARTICLE_LIFESPAN: i32 = 10;
    pub const HALF_SPLIT_SPEED: f32 = 6.0;
    pub const HALF_SPIN_FACTOR: f32 = 1.5;

    /// Combo window (wall-clock seconds) and banner duration (ticks)
    pub const COMBO_TIMEOUT_SECS: f64 = 2.5;
    pub const COMBO_DISPLAY_TICKS: u32 = 30;

    /// Session
    pub const STARTING_LIVES: i32 = 3;
    pub const COUNTDOWN_TICKS: u32 = 3 * TICKS_PER_SECOND;

    /// Number of pointer samples kept for the blade trail
    pub const TRAIL_LENGTH: usize = 10;
}

/// Convert an integer pointer sample to a simulation point
#[inline]
pub fn pointer_to_vec(point: (i32, i32)) -> Vec2 {
    Vec2::new(point.0 as f32, point.1 as f32)
}
