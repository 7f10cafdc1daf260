//! Pointer sources
//!
//! The blade position comes from outside the core (a fingertip tracker in
//! the full game). A source yields at most one point per frame.

use glam::Vec2;

use crate::consts::BOMB_RADIUS;
use crate::sim::GameState;

/// Produces the pointer position for the coming tick
pub trait PointerSource {
    /// `state` is the session as of the end of the previous tick
    fn poll(&mut self, state: &GameState) -> Option<(i32, i32)>;
}

/// Replays a fixed list of samples, then reports no pointer
#[derive(Debug, Clone, Default)]
pub struct ScriptedPointer {
    samples: Vec<Option<(i32, i32)>>,
    next: usize,
}

impl ScriptedPointer {
    pub fn new(samples: Vec<Option<(i32, i32)>>) -> Self {
        Self { samples, next: 0 }
    }

    /// Samples not yet replayed
    pub fn remaining(&self) -> usize {
        self.samples.len().saturating_sub(self.next)
    }
}

impl PointerSource for ScriptedPointer {
    fn poll(&mut self, _state: &GameState) -> Option<(i32, i32)> {
        let sample = self.samples.get(self.next).copied().flatten();
        self.next = self.next.saturating_add(1);
        sample
    }
}

/// Demo player: chases the lowest fruit, keeping clear of bombs
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl PointerSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> Option<(i32, i32)> {
        autopilot_target(state).map(|p| (p.x as i32, p.y as i32))
    }
}

/// Position of the lowest collidable fruit whose hitbox does not overlap a
/// bomb's, if any
pub fn autopilot_target(state: &GameState) -> Option<Vec2> {
    let bombs: Vec<Vec2> = state
        .entities
        .iter()
        .filter(|e| e.is_collidable() && e.is_bomb())
        .map(|e| e.pos)
        .collect();

    state
        .entities
        .iter()
        .filter(|e| e.is_collidable() && !e.is_bomb())
        .filter(|e| bombs.iter().all(|b| b.distance(e.pos) >= e.radius + BOMB_RADIUS))
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::consts::*;
    use crate::sim::Entity;

    fn session() -> GameState {
        GameState::new(9, Catalog::default(), WIDTH, HEIGHT)
    }

    #[test]
    fn test_scripted_replays_then_stops() {
        let state = session();
        let mut pointer = ScriptedPointer::new(vec![Some((1, 2)), None, Some((3, 4))]);
        assert_eq!(pointer.remaining(), 3);
        assert_eq!(pointer.poll(&state), Some((1, 2)));
        assert_eq!(pointer.poll(&state), None);
        assert_eq!(pointer.poll(&state), Some((3, 4)));
        assert_eq!(pointer.poll(&state), None);
        assert_eq!(pointer.remaining(), 0);
    }

    #[test]
    fn test_autopilot_picks_lowest_fruit() {
        let mut state = session();
        assert_eq!(Autopilot.poll(&state), None);

        let catalog = state.catalog.clone();
        state
            .entities
            .push(Entity::fruit(&catalog, "apple", Vec2::new(100.0, 200.0)).unwrap());
        state
            .entities
            .push(Entity::fruit(&catalog, "banana", Vec2::new(500.0, 600.0)).unwrap());
        state
            .entities
            .push(Entity::bomb(Vec2::new(900.0, 700.0), Vec2::ZERO, 0.0));

        assert_eq!(Autopilot.poll(&state), Some((500, 600)));
    }

    #[test]
    fn test_autopilot_avoids_fruit_next_to_bombs() {
        let mut state = session();
        let catalog = state.catalog.clone();
        state
            .entities
            .push(Entity::fruit(&catalog, "apple", Vec2::new(100.0, 200.0)).unwrap());
        state
            .entities
            .push(Entity::fruit(&catalog, "peach", Vec2::new(500.0, 600.0)).unwrap());
        state
            .entities
            .push(Entity::bomb(Vec2::new(520.0, 620.0), Vec2::ZERO, 0.0));

        assert_eq!(autopilot_target(&state), Some(Vec2::new(100.0, 200.0)));
    }
}
