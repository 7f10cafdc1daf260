//! Sprite provider seam
//!
//! Image decoding and scaling happen outside the core; the renderer only
//! needs to ask for a pre-scaled sprite by entity name. A missing sprite is a
//! normal case and selects the fallback primitive.

use std::collections::HashMap;

use super::raster::Sprite;

/// Maps an entity name ("apple", "apple_1", "bomb", ...) to a sprite
pub trait SpriteProvider {
    fn lookup(&self, name: &str) -> Option<&Sprite>;
}

/// Provider with no sprites at all; everything draws as fallback shapes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSprites;

impl SpriteProvider for NoSprites {
    fn lookup(&self, _name: &str) -> Option<&Sprite> {
        None
    }
}

/// In-memory sprite table
#[derive(Debug, Default, Clone)]
pub struct SpriteBank {
    sprites: HashMap<String, Sprite>,
}

impl SpriteBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, sprite: Sprite) {
        self.sprites.insert(name.into(), sprite);
    }

    /// Register a species and its two halves; missing halves reuse the
    /// whole-fruit image
    pub fn insert_species(
        &mut self,
        name: &str,
        whole: Sprite,
        half_1: Option<Sprite>,
        half_2: Option<Sprite>,
    ) {
        let half_1 = half_1.unwrap_or_else(|| whole.clone());
        let half_2 = half_2.unwrap_or_else(|| whole.clone());
        self.sprites.insert(format!("{name}_1"), half_1);
        self.sprites.insert(format!("{name}_2"), half_2);
        self.sprites.insert(name.to_string(), whole);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl SpriteProvider for SpriteBank {
    fn lookup(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }
}
