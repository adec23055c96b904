//! Prescaled obstacle sprites.
//!
//! Resizing the source image every frame for 2000 obstacles is far too slow,
//! so every size the renderer can ask for is built once up front.

use crate::projection::{MAX_OBSTACLE_SCALE, MIN_OBSTACLE_SCALE};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::collections::BTreeMap;

/// Pixel step between cached sprite sizes.
pub const SCALE_STEP: u32 = 10;

/// Square sprites keyed by side length.
#[derive(Debug, Clone)]
pub struct SpriteCache {
    sprites: BTreeMap<u32, RgbaImage>,
}

impl SpriteCache {
    /// Build sizes [`MIN_OBSTACLE_SCALE`]..=[`MAX_OBSTACLE_SCALE`] in steps of [`SCALE_STEP`].
    pub fn new(source: &RgbaImage) -> Self {
        let min = MIN_OBSTACLE_SCALE as u32;
        let max = MAX_OBSTACLE_SCALE as u32;
        let sprites = (min..=max)
            .step_by(SCALE_STEP as usize)
            .map(|side| (side, imageops::resize(source, side, side, FilterType::Triangle)))
            .collect::<BTreeMap<_, _>>();
        log::debug!("Built {} prescaled sprites", sprites.len());
        Self { sprites }
    }

    /// Side length actually used for a requested scale: truncated, clamped,
    /// then snapped down to a multiple of [`SCALE_STEP`].
    pub fn snap(scale: f32) -> u32 {
        let clamped = (scale as u32).clamp(MIN_OBSTACLE_SCALE as u32, MAX_OBSTACLE_SCALE as u32);
        clamped / SCALE_STEP * SCALE_STEP
    }

    /// Sprite for `scale`, falling back to the smallest size.
    pub fn get(&self, scale: f32) -> Option<&RgbaImage> {
        self.sprites
            .get(&Self::snap(scale))
            .or_else(|| self.sprites.values().next())
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn cache_covers_every_step() {
        let cache = SpriteCache::new(&RgbaImage::from_pixel(64, 64, Rgba([1, 2, 3, 255])));
        assert_eq!(cache.len(), 20);
        for side in (10..=200).step_by(10) {
            let sprite = cache.get(side as f32).map(|s| s.dimensions());
            assert_eq!(sprite, Some((side, side)));
        }
    }

    #[test]
    fn snap_truncates_then_rounds_down() {
        assert_eq!(SpriteCache::snap(4.0), 10);
        assert_eq!(SpriteCache::snap(19.99), 10);
        assert_eq!(SpriteCache::snap(57.3), 50);
        assert_eq!(SpriteCache::snap(200.0), 200);
        assert_eq!(SpriteCache::snap(9000.0), 200);
    }
}
