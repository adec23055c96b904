//! Asteroid field generation.
//!
//! The field is generated once per process and never regenerated. Each
//! asteroid is one entity carrying an [`Obstacle`] (what the simulation
//! reads) and an [`AsteroidLook`] (decoration for the primitive fallback).

use engine_core::{AsteroidLook, Obstacle, SubShape, World};
use glam::Vec3;
use rand::prelude::*;

/// Bounds and counts for a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    /// x and y are drawn from `±xy_extent`.
    pub xy_extent: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Decorative circles per asteroid.
    pub sub_shapes: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            xy_extent: 4000.0,
            min_altitude: 4000.0,
            max_altitude: 24000.0,
            min_size: 100.0,
            max_size: 200.0,
            sub_shapes: 10,
        }
    }
}

/// The immutable obstacle set. Nothing is despawned, so queries over the
/// world yield asteroids in spawn order.
pub struct AsteroidField {
    pub seed: u64,
    world: World,
}

impl std::fmt::Debug for AsteroidField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsteroidField")
            .field("seed", &self.seed)
            .field("len", &self.len())
            .finish()
    }
}

impl AsteroidField {
    /// Generate `config.count` asteroids from `seed`.
    pub fn generate(seed: u64, config: &FieldConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = World::new();

        for _ in 0..config.count {
            let size = rng.gen_range(config.min_size..=config.max_size);
            // Dusty grey with a red cast.
            let color = [
                rng.gen_range(150..=200),
                rng.gen_range(100..=150),
                rng.gen_range(100..=150),
                255,
            ];
            let spread = size / 1.5;
            let sub_shapes = (0..config.sub_shapes)
                .map(|_| SubShape {
                    offset_x: rng.gen_range(-spread..=spread),
                    offset_y: rng.gen_range(-spread..=spread),
                    scale: rng.gen_range(1.0..=1.5),
                })
                .collect();
            let position = Vec3::new(
                rng.gen_range(-config.xy_extent..=config.xy_extent),
                rng.gen_range(-config.xy_extent..=config.xy_extent),
                rng.gen_range(config.min_altitude..=config.max_altitude),
            );

            world.spawn((Obstacle::new(position, size), AsteroidLook { color, sub_shapes }));
        }

        log::info!("Generated asteroid field: {} asteroids (seed {})", config.count, seed);
        Self { seed, world }
    }

    /// Field built from explicit obstacles, with a plain grey look.
    pub fn from_obstacles(obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        let mut world = World::new();
        for o in obstacles {
            world.spawn((o, AsteroidLook { color: [160, 150, 150, 255], sub_shapes: Vec::new() }));
        }
        Self { seed: 0, world }
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backing ECS world. Query `&Obstacle` for simulation, `(&Obstacle, &AsteroidLook)` for drawing.
    pub fn world(&self) -> &World {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacles(field: &AsteroidField) -> Vec<Obstacle> {
        field.world().query::<&Obstacle>().iter().map(|(_, o)| *o).collect()
    }

    #[test]
    fn generates_requested_count_within_bounds() {
        let config = FieldConfig::default();
        let field = AsteroidField::generate(42, &config);
        assert_eq!(field.len(), 2000);

        let mut query = field.world().query::<(&Obstacle, &AsteroidLook)>();
        let mut seen = 0;
        for (_, (o, look)) in query.iter() {
            assert!(o.position.x.abs() <= 4000.0 && o.position.y.abs() <= 4000.0);
            assert!((4000.0..=24000.0).contains(&o.position.z));
            assert!((100.0..=200.0).contains(&o.size));
            assert_eq!(o.radius(), o.size);
            assert_eq!(look.sub_shapes.len(), 10);
            for s in &look.sub_shapes {
                assert!(s.offset_x.abs() <= o.size / 1.5 + 1e-3);
                assert!((1.0..=1.5).contains(&s.scale));
            }
            seen += 1;
        }
        assert_eq!(seen, 2000);
    }

    #[test]
    fn same_seed_same_field() {
        let config = FieldConfig { count: 50, ..Default::default() };
        let a = AsteroidField::generate(9, &config);
        let b = AsteroidField::generate(9, &config);
        assert_eq!(obstacles(&a), obstacles(&b));
        let c = AsteroidField::generate(10, &config);
        assert_ne!(obstacles(&a), obstacles(&c));
    }

    #[test]
    fn from_obstacles_keeps_order() {
        let rocks = vec![
            Obstacle::new(Vec3::new(1.0, 2.0, 3.0), 100.0),
            Obstacle::new(Vec3::new(4.0, 5.0, 6.0), 150.0),
        ];
        let field = AsteroidField::from_obstacles(rocks.clone());
        assert_eq!(field.len(), 2);
        assert_eq!(obstacles(&field), rocks);
    }
}
