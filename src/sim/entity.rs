//! Falling entities: whole fruit, bombs and half-fruit debris
//!
//! One entity type covers all three; the `kind` tag decides whether it can be
//! sliced and what slicing does. Whole fruit and bombs come from [`Entity::spawn`],
//! halves only from [`Entity::split_into`].

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::catalog::Catalog;
use crate::consts::*;

/// Which half of a sliced fruit; side 1 drifts right, side 2 drifts left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfSide {
    One,
    Two,
}

impl HalfSide {
    pub fn index(self) -> u8 {
        match self {
            HalfSide::One => 1,
            HalfSide::Two => 2,
        }
    }

    /// Horizontal kick away from the cut
    fn kick(self) -> f32 {
        match self {
            HalfSide::One => HALF_SPLIT_SPEED,
            HalfSide::Two => -HALF_SPLIT_SPEED,
        }
    }
}

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Whole fruit; sliceable, scores
    Fruit,
    /// Sliceable, costs a life, never splits
    Bomb,
    /// Debris from a sliced fruit; never sliceable
    Half(HalfSide),
}

/// A falling object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    /// Species name, or "bomb"
    pub species: String,
    /// Sprite name: species, or `species_side` for halves
    pub name: String,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Rotation in degrees
    pub angle: f32,
    /// Degrees per tick
    pub spin: f32,
    /// Collision radius; zero for halves
    pub radius: f32,
    pub active: bool,
}

impl Entity {
    /// Spawn a whole fruit or bomb at the bottom edge, launched upward.
    ///
    /// `speed_bonus` is added to the upward launch speed.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        catalog: &Catalog,
        width: u32,
        height: u32,
        speed_bonus: f32,
    ) -> Self {
        let x = rng.random_range(SPAWN_MARGIN..=width.saturating_sub(SPAWN_MARGIN).max(SPAWN_MARGIN));
        let vy = -rng.random_range(18.0..=24.0) - speed_bonus;
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let vx = direction * rng.random_range(3.0..=6.0);
        let spin = *[-8.0, -5.0, 5.0, 8.0].choose(rng).unwrap_or(&5.0);

        let pos = Vec2::new(x as f32, height as f32);
        let vel = Vec2::new(vx, vy);

        if rng.random::<f32>() < BOMB_CHANCE {
            return Self::bomb(pos, vel, spin);
        }

        match catalog.species().choose(rng) {
            Some(species) => Self {
                kind: EntityKind::Fruit,
                species: species.name.clone(),
                name: species.name.clone(),
                pos,
                vel,
                gravity: GRAVITY,
                angle: 0.0,
                spin,
                radius: species.hit_radius(),
                active: true,
            },
            // Validated catalogs are never empty
            None => Self::bomb(pos, vel, spin),
        }
    }

    /// A bomb with the given motion
    pub fn bomb(pos: Vec2, vel: Vec2, spin: f32) -> Self {
        Self {
            kind: EntityKind::Bomb,
            species: BOMB_NAME.to_string(),
            name: BOMB_NAME.to_string(),
            pos,
            vel,
            gravity: GRAVITY,
            angle: 0.0,
            spin,
            radius: BOMB_RADIUS,
            active: true,
        }
    }

    /// A whole fruit of a catalog species at rest
    pub fn fruit(catalog: &Catalog, species: &str, pos: Vec2) -> Option<Self> {
        let spec = catalog.get(species)?;
        Some(Self {
            kind: EntityKind::Fruit,
            species: spec.name.clone(),
            name: spec.name.clone(),
            pos,
            vel: Vec2::ZERO,
            gravity: GRAVITY,
            angle: 0.0,
            spin: 0.0,
            radius: spec.hit_radius(),
            active: true,
        })
    }

    /// Build one half of a sliced fruit.
    ///
    /// The half keeps the parent's position and angle, drifts apart
    /// horizontally, starts falling, spins faster and falls harder.
    pub fn split_into<R: Rng>(parent: &Entity, side: HalfSide, rng: &mut R) -> Self {
        debug_assert!(parent.kind == EntityKind::Fruit, "only whole fruit split");
        Self {
            kind: EntityKind::Half(side),
            species: parent.species.clone(),
            name: format!("{}_{}", parent.species, side.index()),
            pos: parent.pos,
            vel: Vec2::new(parent.vel.x + side.kick(), rng.random_range(2.0..=5.0)),
            gravity: GRAVITY + HALF_GRAVITY_BONUS,
            angle: parent.angle,
            spin: parent.spin * HALF_SPIN_FACTOR,
            radius: 0.0,
            active: true,
        }
    }

    pub fn is_bomb(&self) -> bool {
        self.kind == EntityKind::Bomb
    }

    pub fn is_half(&self) -> bool {
        matches!(self.kind, EntityKind::Half(_))
    }

    /// Active, not debris, and with a hitbox
    pub fn is_collidable(&self) -> bool {
        self.active && !self.is_half() && self.radius > 0.0
    }

    /// Strict hit test: pointer inside the collision radius
    pub fn contains(&self, point: Vec2) -> bool {
        self.is_collidable() && self.pos.distance(point) < self.radius
    }

    /// Advance one tick: move, accelerate, spin; deactivate once well below
    /// the bottom edge
    pub fn advance(&mut self, height: f32) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.angle += self.spin;
        if self.pos.y > height + OFFSCREEN_MARGIN {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_spawn_ranges() {
        let catalog = Catalog::default();
        let mut rng = rng();
        let mut bombs = 0;
        for _ in 0..2000 {
            let e = Entity::spawn(&mut rng, &catalog, WIDTH, HEIGHT, 0.0);
            assert!(e.active);
            assert!((100.0..=1180.0).contains(&e.pos.x));
            assert_eq!(e.pos.y, HEIGHT as f32);
            assert!((-24.0..=-18.0).contains(&e.vel.y));
            assert!((3.0..=6.0).contains(&e.vel.x.abs()));
            assert!([-8.0, -5.0, 5.0, 8.0].contains(&e.spin));
            assert_eq!(e.angle, 0.0);
            match e.kind {
                EntityKind::Bomb => {
                    bombs += 1;
                    assert_eq!(e.radius, BOMB_RADIUS);
                    assert_eq!(e.name, "bomb");
                }
                EntityKind::Fruit => {
                    let species = catalog.get(&e.name).unwrap();
                    assert_eq!(e.radius, (species.target_size / 2 + 10) as f32);
                    assert!(e.radius >= 10.0);
                }
                EntityKind::Half(_) => panic!("spawn produced a half"),
            }
        }
        // 15% nominal
        assert!((200..400).contains(&bombs), "bombs = {bombs}");
    }

    #[test]
    fn test_speed_bonus_launches_faster() {
        let catalog = Catalog::default();
        let e = Entity::spawn(&mut rng(), &catalog, WIDTH, HEIGHT, 5.0);
        assert!((-29.0..=-23.0).contains(&e.vel.y));
    }

    #[test]
    fn test_split_into() {
        let catalog = Catalog::default();
        let mut parent = Entity::fruit(&catalog, "peach", Vec2::new(300.0, 200.0)).unwrap();
        parent.vel = Vec2::new(4.0, -10.0);
        parent.angle = 33.0;
        parent.spin = -8.0;

        let mut rng = rng();
        let one = Entity::split_into(&parent, HalfSide::One, &mut rng);
        let two = Entity::split_into(&parent, HalfSide::Two, &mut rng);

        assert_eq!(one.name, "peach_1");
        assert_eq!(two.name, "peach_2");
        for half in [&one, &two] {
            assert!(half.is_half());
            assert!(!half.is_bomb());
            assert!(!half.is_collidable());
            assert_eq!(half.radius, 0.0);
            assert_eq!(half.pos, parent.pos);
            assert_eq!(half.angle, 33.0);
            assert_eq!(half.spin, -12.0);
            assert!((half.gravity - 0.35).abs() < 1e-6);
            assert!((2.0..=5.0).contains(&half.vel.y));
        }
        assert_eq!(one.vel.x, 10.0);
        assert_eq!(two.vel.x, -2.0);
    }

    #[test]
    fn test_advance_falls_out() {
        let mut e = Entity::bomb(Vec2::new(640.0, 720.0), Vec2::new(0.0, -20.0), 5.0);
        e.advance(720.0);
        assert_eq!(e.pos, Vec2::new(640.0, 700.0));
        assert_eq!(e.vel.y, -19.75);
        assert_eq!(e.angle, 5.0);

        let mut ticks = 0;
        while e.active {
            e.advance(720.0);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(e.pos.y > 820.0);
    }

    #[test]
    fn test_contains_is_strict() {
        let catalog = Catalog::default();
        let apple = Entity::fruit(&catalog, "apple", Vec2::new(100.0, 100.0)).unwrap();
        assert!(apple.contains(Vec2::new(144.0, 100.0)));
        assert!(!apple.contains(Vec2::new(145.0, 100.0)));

        let mut gone = apple.clone();
        gone.active = false;
        assert!(!gone.contains(Vec2::new(100.0, 100.0)));
    }
}
