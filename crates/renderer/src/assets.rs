//! Image asset loading.
//!
//! Every image is optional. A failed load is logged and the caller gets
//! `None`, which selects the primitive or procedural fallback.

use image::RgbaImage;
use std::path::{Path, PathBuf};

pub const ASTEROID_IMAGE: &str = "asteroid.png";
pub const BACKGROUND_IMAGE: &str = "mars_background.jpg";
pub const INTRO_IMAGE: &str = "intro_image.jpg";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Read and decode an image into RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io { path: path.to_path_buf(), source })?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })?;
    Ok(decoded.to_rgba8())
}

/// [`load_image`] that logs failures instead of returning them.
pub fn load_optional_image(path: &Path) -> Option<RgbaImage> {
    match load_image(path) {
        Ok(image) => {
            log::info!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
            Some(image)
        }
        Err(e) => {
            log::warn!("{e}; using fallback");
            None
        }
    }
}

/// Resize `image` to exactly `width` x `height`, ignoring aspect ratio.
pub fn stretch(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    image::imageops::resize(image, width.max(1), height.max(1), image::imageops::FilterType::Triangle)
}

/// The game's images, each possibly missing.
#[derive(Debug, Default)]
pub struct ImageAssets {
    pub asteroid: Option<RgbaImage>,
    pub background: Option<RgbaImage>,
    pub intro: Option<RgbaImage>,
}

impl ImageAssets {
    /// Load everything from `dir`.
    pub fn load(dir: &Path) -> Self {
        Self {
            asteroid: load_optional_image(&dir.join(ASTEROID_IMAGE)),
            background: load_optional_image(&dir.join(BACKGROUND_IMAGE)),
            intro: load_optional_image(&dir.join(INTRO_IMAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("mars-lander-no-such-image.png");
        let err = load_image(&path);
        assert!(matches!(err, Err(AssetError::Io { .. })));
        assert!(load_optional_image(&path).is_none());
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let path = std::env::temp_dir().join(format!("mars-lander-garbage-{}.png", std::process::id()));
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_image(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Err(AssetError::Decode { .. })));
    }

    #[test]
    fn png_round_trips_through_loader() {
        let path = std::env::temp_dir().join(format!("mars-lander-sprite-{}.png", std::process::id()));
        let src = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        src.save(&path).unwrap();
        let loaded = load_image(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.unwrap(), src);
    }

    #[test]
    fn empty_dir_loads_nothing() {
        let dir = std::env::temp_dir().join("mars-lander-empty-assets");
        let assets = ImageAssets::load(&dir);
        assert!(assets.asteroid.is_none() && assets.background.is_none() && assets.intro.is_none());
    }
}
