//! Game session state
//!
//! Everything that changes from tick to tick lives in one [`GameState`]
//! aggregate owned by the frame loop.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::combo::{ComboFeedback, ComboTracker};
use super::entity::Entity;
use super::particle::Particle;
use crate::catalog::Catalog;
use crate::consts::*;
use crate::settings::Settings;

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Tutorial screen, waiting for start input
    Menu,
    /// "Get ready" countdown before play
    Countdown,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
}

/// Spawn pacing derived from the play-time frame counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Increases every 300 frames of play
    pub level: u32,
    /// Frames between spawns, never below 10
    pub spawn_rate: u32,
    /// Added launch speed, never above 5
    pub speed_bonus: f32,
    /// Probability of a second spawn on a spawn frame, never above 0.6
    pub double_spawn_chance: f32,
}

impl Difficulty {
    pub fn at_frame(frame: u64) -> Self {
        let level = (frame / 300).min(u32::MAX as u64) as u32;
        Self {
            level,
            spawn_rate: 35u32.saturating_sub(level.saturating_mul(2)).max(10),
            speed_bonus: (level as f32 * 0.5).min(5.0),
            double_spawn_chance: (level as f32 * 0.05).min(0.6),
        }
    }

    /// Whether `frame` is a spawn frame at this difficulty
    pub fn spawns_on(&self, frame: u64) -> bool {
        frame % self.spawn_rate as u64 == 0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Frame dimensions
    pub width: u32,
    pub height: u32,
    /// Species table, fixed for the session
    pub catalog: Catalog,
    pub phase: GamePhase,
    pub score: u64,
    /// Game ends at zero or below
    pub lives: i32,
    /// Ticks of play; only advances while Playing
    pub frame_counter: u64,
    /// Ticks left in the countdown
    pub countdown: u32,
    pub combo: ComboTracker,
    /// Combo banner to draw this frame
    pub combo_feedback: Option<ComboFeedback>,
    /// Sliceable fruit and bombs
    pub entities: Vec<Entity>,
    /// Half-fruit debris; simulated but never hit-tested
    pub debris: Vec<Entity>,
    pub particles: Vec<Particle>,
    /// Recent pointer samples, oldest first
    pub trail: VecDeque<(i32, i32)>,
    /// Set on the frame a bomb is sliced
    pub bomb_flash: bool,
    /// Particle bursts enabled
    pub spawn_particles: bool,
}

impl GameState {
    /// Create a new session at the menu
    pub fn new(seed: u64, catalog: Catalog, width: u32, height: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            catalog,
            phase: GamePhase::Menu,
            score: 0,
            lives: STARTING_LIVES,
            frame_counter: 0,
            countdown: 0,
            combo: ComboTracker::default(),
            combo_feedback: None,
            entities: Vec::new(),
            debris: Vec::new(),
            particles: Vec::new(),
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            bomb_flash: false,
            spawn_particles: true,
        }
    }

    /// Create a session from settings
    pub fn with_settings(settings: &Settings, seed: u64, catalog: Catalog) -> Self {
        let mut state = Self::new(seed, catalog, settings.width, settings.height);
        state.combo = ComboTracker::new(settings.combo_timeout_secs);
        state.spawn_particles = settings.particles;
        state
    }

    /// Current spawn pacing
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::at_frame(self.frame_counter)
    }

    /// Whole seconds left in the countdown, rounded up
    pub fn countdown_seconds(&self) -> u32 {
        self.countdown.div_ceil(TICKS_PER_SECOND)
    }

    /// Restart the run: score, lives, collections, counters and combo
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.entities.clear();
        self.debris.clear();
        self.particles.clear();
        self.frame_counter = 0;
        self.combo.reset();
        self.combo_feedback = None;
        self.bomb_flash = false;
    }

    /// Add a pointer sample to the blade trail
    pub fn record_trail(&mut self, point: (i32, i32)) {
        self.trail.push_back(point);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Spawn one fruit or bomb
    pub fn spawn_entity(&mut self, speed_bonus: f32) {
        let entity = Entity::spawn(
            &mut self.rng,
            &self.catalog,
            self.width,
            self.height,
            speed_bonus,
        );
        log::debug!(
            "Spawned {} at x={:.0} vy={:.1}",
            entity.name,
            entity.pos.x,
            entity.vel.y
        );
        self.entities.push(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_ramp() {
        let d0 = Difficulty::at_frame(0);
        assert_eq!((d0.level, d0.spawn_rate, d0.speed_bonus), (0, 35, 0.0));
        assert_eq!(d0.double_spawn_chance, 0.0);

        let d3 = Difficulty::at_frame(900);
        assert_eq!((d3.level, d3.spawn_rate, d3.speed_bonus), (3, 29, 1.5));

        let late = Difficulty::at_frame(300 * 40);
        assert_eq!(late.spawn_rate, 10);
        assert_eq!(late.speed_bonus, 5.0);
        assert_eq!(late.double_spawn_chance, 0.6);
    }

    #[test]
    fn test_countdown_seconds() {
        let mut state = GameState::new(1, Catalog::default(), WIDTH, HEIGHT);
        for (ticks, secs) in [(90, 3), (61, 3), (60, 2), (31, 2), (1, 1), (0, 0)] {
            state.countdown = ticks;
            assert_eq!(state.countdown_seconds(), secs);
        }
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut state = GameState::new(1, Catalog::default(), WIDTH, HEIGHT);
        for i in 0..25 {
            state.record_trail((i, i));
        }
        assert_eq!(state.trail.len(), TRAIL_LENGTH);
        assert_eq!(state.trail.front(), Some(&(15, 15)));
        assert_eq!(state.trail.back(), Some(&(24, 24)));
    }

    #[test]
    fn test_reset_run() {
        let mut state = GameState::new(1, Catalog::default(), WIDTH, HEIGHT);
        state.score = 99;
        state.lives = -1;
        state.frame_counter = 1234;
        state.spawn_entity(0.0);
        state.combo.register_slice(0.0);
        state.reset_run();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.frame_counter, 0);
        assert!(state.entities.is_empty());
        assert_eq!(state.combo.count(), 0);
    }
}
