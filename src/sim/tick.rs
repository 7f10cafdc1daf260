//! Fixed timestep simulation tick
//!
//! One call per frame: phase transitions, spawning, slicing, then physics.

use std::ops::ControlFlow;

use rand::Rng;

use super::collision::resolve_slices;
use super::state::{GamePhase, GameState};
use crate::audio::SoundTrigger;
use crate::consts::COUNTDOWN_TICKS;
use crate::pointer_to_vec;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fingertip position this frame, if one was detected
    pub pointer: Option<(i32, i32)>,
    /// Start from the menu
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    /// Leave the game
    pub quit: bool,
    /// Wall-clock time in seconds (drives the combo window)
    pub now: f64,
}

/// Advance the session by one tick.
///
/// Returns `Break` when the player quits; the state is left as it was.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    sounds: &mut dyn SoundTrigger,
) -> ControlFlow<()> {
    if input.quit {
        log::info!("Quit (score {}, phase {:?})", state.score, state.phase);
        return ControlFlow::Break(());
    }

    // Per-frame flags
    state.bomb_flash = false;
    state.combo_feedback = None;

    if let Some(point) = input.pointer {
        state.record_trail(point);
    }

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.countdown = COUNTDOWN_TICKS;
                state.frame_counter = 0;
                state.combo.reset();
                state.phase = GamePhase::Countdown;
                log::info!("Game starting");
            }
        }

        GamePhase::Countdown => {
            state.countdown = state.countdown.saturating_sub(1);
            if state.countdown_seconds() == 0 {
                state.phase = GamePhase::Playing;
                log::info!("Countdown finished");
            }
        }

        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                log::info!("Paused at frame {}", state.frame_counter);
                return ControlFlow::Continue(());
            }
            play(state, input, sounds);
        }

        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
        }

        GamePhase::GameOver => {
            if input.restart {
                state.reset_run();
                state.phase = GamePhase::Playing;
                log::info!("Restarted");
            }
        }
    }

    ControlFlow::Continue(())
}

/// One tick of active play
fn play(state: &mut GameState, input: &TickInput, sounds: &mut dyn SoundTrigger) {
    state.frame_counter += 1;

    // Spawn
    let difficulty = state.difficulty();
    if difficulty.spawns_on(state.frame_counter) {
        state.spawn_entity(difficulty.speed_bonus);
        if state.rng.random::<f32>() < difficulty.double_spawn_chance {
            state.spawn_entity(difficulty.speed_bonus);
        }
    }

    // Slice against last frame's positions, then move
    let report = resolve_slices(state, input.pointer.map(pointer_to_vec), input.now, sounds);
    if !report.is_empty() {
        log::debug!("Frame {}: {:?}", state.frame_counter, report);
    }

    let height = state.height as f32;
    for entity in state.entities.iter_mut().chain(state.debris.iter_mut()) {
        if entity.active {
            entity.advance(height);
        }
    }
    state.entities.retain(|e| e.active);
    state.debris.retain(|e| e.active);

    for particle in state.particles.iter_mut() {
        particle.advance();
    }
    state.particles.retain(|p| p.is_alive());

    state.combo_feedback = state.combo.frame_feedback();

    if state.lives <= 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score {}", state.score);
    }
}
