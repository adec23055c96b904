//! Common ECS components used across the engine.
//!
//! Obstacles are split in two: [`Obstacle`] is everything the simulation
//! reads, [`AsteroidLook`] is decoration only the renderer touches.

use glam::Vec3;

/// Simulation-relevant part of an asteroid. Immutable after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vec3,
    /// Scalar size. Doubles as the collision radius; there is no separate hitbox.
    pub size: f32,
}

impl Obstacle {
    pub fn new(position: Vec3, size: f32) -> Self {
        Self { position, size }
    }

    /// Collision radius.
    pub fn radius(&self) -> f32 {
        self.size
    }
}

/// One decorative circle drawn when no asteroid sprite is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubShape {
    /// Screen-space offset at unit perspective scale.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Multiplier on the obstacle size for this circle's radius.
    pub scale: f32,
}

/// Rendering-only part of an asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidLook {
    pub color: [u8; 4],
    pub sub_shapes: Vec<SubShape>,
}
