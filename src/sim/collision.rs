//! Pointer-versus-entity collision and slice resolution
//!
//! Runs before physics each tick so the hit test sees the positions that
//! were drawn last frame. Debris is never tested.

use glam::Vec2;

use super::entity::{Entity, HalfSide};
use super::particle::Particle;
use super::state::GameState;
use crate::audio::{SoundEvent, SoundTrigger};
use crate::consts::PARTICLES_PER_SLICE;
use crate::renderer::Rgb;

/// Particle colour for an entity whose species is missing from the catalog
pub const PARTICLE_DEFAULT_COLOR: Rgb = Rgb::new(200, 200, 200);

/// What happened during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceReport {
    /// Whole fruit sliced
    pub fruit: u32,
    /// Bombs sliced
    pub bombs: u32,
    /// Points awarded
    pub points: u64,
}

impl SliceReport {
    pub fn is_empty(&self) -> bool {
        self.fruit == 0 && self.bombs == 0
    }
}

/// Indices of entities the pointer is inside, in iteration order
pub fn pointer_hits(entities: &[Entity], pointer: Vec2) -> Vec<usize> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.contains(pointer))
        .map(|(i, _)| i)
        .collect()
}

/// Slice every collidable entity under the pointer.
///
/// Each hit entity is deactivated at once. Bombs cost a life, break the
/// combo and request a red flash. Fruit feed the combo, score
/// `base + streak - 1`, split into two halves and burst into particles.
/// Overlapping entities under one pointer are all sliced.
pub fn resolve_slices(
    state: &mut GameState,
    pointer: Option<Vec2>,
    now: f64,
    sounds: &mut dyn SoundTrigger,
) -> SliceReport {
    let mut report = SliceReport::default();
    let Some(pointer) = pointer else {
        return report;
    };

    let GameState {
        entities,
        debris,
        particles,
        rng,
        catalog,
        combo,
        score,
        lives,
        bomb_flash,
        spawn_particles,
        ..
    } = state;

    for entity in entities.iter_mut() {
        if !entity.contains(pointer) {
            continue;
        }
        entity.active = false;

        if entity.is_bomb() {
            *lives -= 1;
            combo.register_bomb();
            sounds.fire(SoundEvent::Bomb);
            *bomb_flash = true;
            report.bombs += 1;
            log::debug!("Bomb sliced at {:?}, lives left {}", entity.pos, lives);
            continue;
        }

        let streak = combo.register_slice(now);
        let (base, color) = match catalog.get(&entity.species) {
            Some(species) => (species.score, species.color),
            None => {
                log::warn!("Sliced unknown species '{}'", entity.species);
                (0, PARTICLE_DEFAULT_COLOR)
            }
        };
        let points = base as u64 + streak.saturating_sub(1) as u64;
        *score += points;
        report.points += points;
        report.fruit += 1;
        sounds.fire(SoundEvent::Slice);

        debris.push(Entity::split_into(entity, HalfSide::One, rng));
        debris.push(Entity::split_into(entity, HalfSide::Two, rng));

        if *spawn_particles {
            particles.extend(
                (0..PARTICLES_PER_SLICE).map(|_| Particle::spawn(rng, entity.pos, color)),
            );
        }
        log::debug!(
            "Sliced {} for {} points (streak {})",
            entity.name,
            points,
            streak
        );
    }

    report
}
