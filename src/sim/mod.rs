//! Per-frame simulation
//!
//! All gameplay logic lives here. Given the same seed, the same catalog and
//! the same inputs (including `now`), a session replays identically:
//! - One tick per frame, no variable timestep
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No drawing or device access; sounds go through [`SoundTrigger`](crate::audio::SoundTrigger)

pub mod collision;
pub mod combo;
pub mod entity;
pub mod particle;
pub mod state;
pub mod tick;

pub use collision::{SliceReport, pointer_hits, resolve_slices};
pub use combo::{ComboFeedback, ComboTracker};
pub use entity::{Entity, EntityKind, HalfSide};
pub use particle::Particle;
pub use state::{Difficulty, GamePhase, GameState};
pub use tick::{TickInput, tick};
