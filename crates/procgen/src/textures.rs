//! Procedural Mars surface, seen from straight above.
//!
//! Stands in for the background image when the asset is missing. Dust and
//! darker basalt are blended by layered Perlin noise, and shallow craters are
//! scattered over a jittered grid.

use glam::Vec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::prelude::*;

/// RGBA8 image data, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl TextureData {
    /// RGBA of one pixel, `None` outside the texture.
    pub fn rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) as usize * 4;
        self.data.get(i..i + 4).and_then(|p| p.try_into().ok())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Colours and feature density for the surface.
#[derive(Debug, Clone)]
pub struct SurfaceTextureConfig {
    pub dust_color: Vec3,
    pub rock_color: Vec3,
    /// Crater grid cells across the texture width.
    pub crater_cells: u32,
    /// Chance a grid cell holds a crater.
    pub crater_density: f64,
}

impl Default for SurfaceTextureConfig {
    fn default() -> Self {
        Self {
            dust_color: Vec3::new(0.76, 0.42, 0.22),
            rock_color: Vec3::new(0.45, 0.22, 0.12),
            crater_cells: 8,
            crater_density: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Crater {
    center: (f64, f64),
    radius: f64,
}

pub struct TextureGenerator {
    seed: u64,
    terrain: Fbm<Perlin>,
    grain: Fbm<Perlin>,
}

impl TextureGenerator {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            seed,
            terrain: Fbm::<Perlin>::new(rng.gen()).set_octaves(4),
            grain: Fbm::<Perlin>::new(rng.gen()).set_octaves(3),
        }
    }

    fn craters(&self, config: &SurfaceTextureConfig, aspect: f64) -> Vec<Crater> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ 0x6372_6174_6572);
        let cols = config.crater_cells.max(1);
        let rows = ((cols as f64 * aspect).ceil() as u32).max(1);
        let cell = 1.0 / cols as f64;

        let mut craters = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                if !rng.gen_bool(config.crater_density.clamp(0.0, 1.0)) {
                    continue;
                }
                let center = (
                    (col as f64 + rng.gen_range(0.2..0.8)) * cell,
                    (row as f64 + rng.gen_range(0.2..0.8)) * cell,
                );
                craters.push(Crater { center, radius: rng.gen_range(0.15..0.4) * cell });
            }
        }
        craters
    }

    /// Brightness multiplier from craters: dark floors, bright rims.
    fn crater_shade(craters: &[Crater], u: f64, v: f64) -> f32 {
        let mut shade = 1.0;
        for c in craters {
            let d = ((u - c.center.0).powi(2) + (v - c.center.1).powi(2)).sqrt() / c.radius;
            if d < 1.0 {
                shade *= 1.0 - (1.0 - d) * 0.35;
            } else if d < 1.2 {
                shade *= 1.15;
            }
        }
        shade as f32
    }

    /// A `width` x `height` surface. Deterministic for a given seed.
    pub fn generate_mars_surface(&self, width: u32, height: u32, config: &SurfaceTextureConfig) -> TextureData {
        let aspect = height as f64 / width.max(1) as f64;
        let craters = self.craters(config, aspect);
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);

        for y in 0..height {
            for x in 0..width {
                let u = x as f64 / width as f64;
                let v = y as f64 / height as f64 * aspect;

                let large = self.terrain.get([u * 3.0, v * 3.0]) * 0.5 + 0.5;
                let fine = self.grain.get([u * 40.0, v * 40.0]) * 0.5 + 0.5;

                let t = ((large - 0.45) / 0.2).clamp(0.0, 1.0);
                let rock = (t * t * (3.0 - 2.0 * t)) as f32;
                let color = config.dust_color.lerp(config.rock_color, rock)
                    * (0.85 + fine as f32 * 0.3)
                    * Self::crater_shade(&craters, u, v);

                let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).to_array();
                data.extend_from_slice(&[c[0] as u8, c[1] as u8, c[2] as u8, 255]);
            }
        }

        TextureData { width, height, data }
    }
}
