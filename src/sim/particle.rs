//! Slice particles

use glam::Vec2;
use rand::Rng;

use crate::consts::PARTICLE_LIFESPAN;
use crate::renderer::Rgb;

/// A short-lived square spark
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half-width of the drawn square; shrinks each tick
    pub size: f32,
    /// Ticks remaining
    pub life: i32,
    pub color: Rgb,
}

impl Particle {
    pub fn spawn<R: Rng>(rng: &mut R, pos: Vec2, color: Rgb) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-10.0..=10.0), rng.random_range(-10.0..=10.0)),
            size: rng.random_range(4..=10) as f32,
            life: PARTICLE_LIFESPAN,
            color,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.life -= 1;
        self.size = (self.size - 0.5).max(0.0);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}
