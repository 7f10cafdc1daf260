//! Fruit species catalog
//!
//! Drives spawn radius, slice score, particle colour, fallback disc colour and
//! the tutorial listing. Immutable for the lifetime of a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::renderer::Rgb;

/// One fruit species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Lookup key, also the sprite name
    pub name: String,
    /// Sprite target dimension in pixels (longest side)
    pub target_size: u32,
    /// Base points for a slice
    pub score: u32,
    /// Particle and fallback colour
    pub color: Rgb,
    /// Display label for the tutorial screen
    pub label: String,
}

impl Species {
    pub fn new(name: &str, target_size: u32, score: u32, color: Rgb, label: &str) -> Self {
        Self {
            name: name.to_string(),
            target_size,
            score,
            color,
            label: label.to_string(),
        }
    }

    /// Collision radius for a whole fruit of this species
    pub fn hit_radius(&self) -> f32 {
        (self.target_size / 2 + 10) as f32
    }
}

/// Ordered species table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    species: Vec<Species>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            species: vec![
                Species::new("apple", 70, 1, Rgb::new(50, 200, 50), "Apple"),
                Species::new("banana", 75, 2, Rgb::new(255, 230, 150), "Banana"),
                Species::new("peach", 70, 3, Rgb::new(255, 150, 150), "Peach"),
                Species::new("watermelon", 90, 4, Rgb::new(50, 200, 50), "Melon"),
                Species::new("strawberry", 50, 5, Rgb::new(200, 50, 50), "Berry"),
            ],
        }
    }
}

impl Catalog {
    /// Build a catalog from a list of species, validating it
    pub fn new(species: Vec<Species>) -> Result<Self, ConfigError> {
        let catalog = Self { species };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a JSON array of species
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a catalog JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        log::info!("Loaded {} species from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.species.is_empty() {
            return Err(ConfigError::Invalid("catalog has no species".into()));
        }
        for (i, species) in self.species.iter().enumerate() {
            if species.target_size == 0 {
                return Err(ConfigError::Invalid(format!(
                    "species '{}' has zero target size",
                    species.name
                )));
            }
            if species.name == crate::consts::BOMB_NAME {
                return Err(ConfigError::Invalid("'bomb' is reserved".into()));
            }
            if self.species[..i].iter().any(|s| s.name == species.name) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate species '{}'",
                    species.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.name == name)
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_radii() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get("apple").unwrap().hit_radius(), 45.0);
        // Integer halving of odd sizes
        assert_eq!(catalog.get("banana").unwrap().hit_radius(), 47.0);
        assert_eq!(catalog.get("strawberry").unwrap().hit_radius(), 35.0);
        assert!(catalog.get("bomb").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "kiwi", "target_size": 40, "score": 7, "color": [10, 20, 30], "label": "Kiwi"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let kiwi = catalog.get("kiwi").unwrap();
        assert_eq!(kiwi.score, 7);
        assert_eq!(kiwi.color, Rgb::new(10, 20, 30));
        assert_eq!(kiwi.hit_radius(), 30.0);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            Catalog::from_json("[]"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        let zero = vec![Species::new("ghost", 0, 1, Rgb::new(0, 0, 0), "Ghost")];
        assert!(Catalog::new(zero).is_err());
        let dup = vec![
            Species::new("fig", 10, 1, Rgb::new(0, 0, 0), "Fig"),
            Species::new("fig", 12, 2, Rgb::new(0, 0, 0), "Fig"),
        ];
        assert!(Catalog::new(dup).is_err());
    }

    #[test]
    fn test_roundtrip_json() {
        let catalog = Catalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), catalog);
    }
}
