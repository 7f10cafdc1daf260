//! Sound events
//!
//! The core only fires named events; decoding and playback belong to the
//! host. Firing never blocks and an unbound event is silently dropped.

use std::collections::HashMap;
use std::fmt;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// Fruit sliced
    Slice,
    /// Bomb sliced
    Bomb,
}

impl SoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Slice => "slice",
            SoundEvent::Bomb => "bomb",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "slice" => Some(SoundEvent::Slice),
            "bomb" => Some(SoundEvent::Bomb),
            _ => None,
        }
    }

    /// Relative volume of the stock sample for this event
    pub fn default_volume(&self) -> f32 {
        match self {
            SoundEvent::Slice => 0.6,
            SoundEvent::Bomb => 1.0,
        }
    }
}

impl fmt::Display for SoundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fire-and-forget sound sink
pub trait SoundTrigger {
    fn fire(&mut self, event: SoundEvent);
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundTrigger for Silent {
    fn fire(&mut self, _event: SoundEvent) {}
}

/// Keeps fired events in order (tests and replays)
#[derive(Debug, Default, Clone)]
pub struct RecordingSounds {
    pub events: Vec<SoundEvent>,
}

impl SoundTrigger for RecordingSounds {
    fn fire(&mut self, event: SoundEvent) {
        self.events.push(event);
    }
}

/// Playback callback: event and effective volume in (0, 1]
pub type PlayFn = Box<dyn FnMut(SoundEvent, f32)>;

/// Routes events to a host playback callback with per-event volumes
pub struct SoundBoard {
    bound: HashMap<SoundEvent, f32>,
    player: PlayFn,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundBoard")
            .field("bound", &self.bound)
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

impl SoundBoard {
    /// Board with no bound events
    pub fn new(player: PlayFn) -> Self {
        Self {
            bound: HashMap::new(),
            player,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Board with volumes taken from settings
    pub fn from_settings(settings: &Settings, player: PlayFn) -> Self {
        let mut board = Self::new(player);
        board.set_master_volume(settings.master_volume);
        board.set_sfx_volume(settings.sfx_volume);
        board.set_muted(settings.muted);
        board
    }

    /// Mark an event as having a loaded sample
    pub fn bind(&mut self, event: SoundEvent, volume: f32) {
        self.bound.insert(event, volume.clamp(0.0, 1.0));
    }

    pub fn unbind(&mut self, event: SoundEvent) {
        self.bound.remove(&event);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl SoundTrigger for SoundBoard {
    fn fire(&mut self, event: SoundEvent) {
        let Some(&event_volume) = self.bound.get(&event) else {
            return;
        };
        let vol = self.effective_volume() * event_volume;
        if vol <= 0.0 {
            return;
        }
        (self.player)(event, vol);
    }
}
