//! Altitude-dependent background: a sky tint that darkens to black in space,
//! and below [`BACKGROUND_IMAGE_ALTITUDE`] a surface image that zooms in as
//! the lander descends.

use crate::canvas::Canvas;
use crate::color::Color;
use glam::Vec2;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Above this the background is black.
pub const ATMOSPHERE_START: f32 = 10000.0;
/// At and below this the surface image is drawn.
pub const BACKGROUND_IMAGE_ALTITUDE: f32 = 5000.0;
/// The zoom stops increasing below this altitude.
pub const ZOOM_STOP_ALTITUDE: f32 = 500.0;

/// Sky colour at `altitude`: black in space, fading to dusty red by
/// [`BACKGROUND_IMAGE_ALTITUDE`].
pub fn bg_color(altitude: f32) -> Color {
    if altitude > ATMOSPHERE_START {
        return Color::BLACK;
    }
    let t = (ATMOSPHERE_START - altitude) / (ATMOSPHERE_START - BACKGROUND_IMAGE_ALTITUDE);
    Color::MARS_DUST.scaled(t)
}

/// Surface image magnification at `altitude`, `None` above
/// [`BACKGROUND_IMAGE_ALTITUDE`].
pub fn zoom_factor(altitude: f32) -> Option<f32> {
    if altitude > BACKGROUND_IMAGE_ALTITUDE {
        return None;
    }
    Some(BACKGROUND_IMAGE_ALTITUDE / altitude.max(ZOOM_STOP_ALTITUDE).max(1.0))
}

#[derive(Debug)]
struct Scaled {
    zoom: f32,
    viewport: (u32, u32),
    image: RgbaImage,
}

/// Centre-cropped, scaled surface image, rebuilt only when the zoom or the
/// viewport changes.
#[derive(Debug)]
pub struct BackdropCache {
    source: RgbaImage,
    scaled: Option<Scaled>,
    rebuilds: u64,
}

impl BackdropCache {
    pub fn new(source: RgbaImage) -> Self {
        Self { source, scaled: None, rebuilds: 0 }
    }

    /// Drop the memoised image. Called on restart.
    pub fn invalidate(&mut self) {
        self.scaled = None;
    }

    /// How many times the scaled image has been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// The visible part of the source at `zoom`, scaled to screen pixels.
    /// `None` when the crop is empty.
    pub fn scaled(&mut self, zoom: f32, viewport: (u32, u32)) -> Option<&RgbaImage> {
        let fresh = self
            .scaled
            .as_ref()
            .is_some_and(|s| s.zoom == zoom && s.viewport == viewport);
        if !fresh {
            let image = self.build(zoom, viewport)?;
            self.rebuilds += 1;
            self.scaled = Some(Scaled { zoom, viewport, image });
        }
        self.scaled.as_ref().map(|s| &s.image)
    }

    fn build(&self, zoom: f32, (width, height): (u32, u32)) -> Option<RgbaImage> {
        let (orig_w, orig_h) = (self.source.width() as f32, self.source.height() as f32);
        let half_w = width as f32 / 2.0 / zoom;
        let half_h = height as f32 / 2.0 / zoom;
        let left = (orig_w / 2.0 - half_w).max(0.0);
        let top = (orig_h / 2.0 - half_h).max(0.0);
        let right = (orig_w / 2.0 + half_w).min(orig_w);
        let bottom = (orig_h / 2.0 + half_h).min(orig_h);
        let crop_w = (right - left).max(0.0) as u32;
        let crop_h = (bottom - top).max(0.0) as u32;
        if crop_w == 0 || crop_h == 0 {
            return None;
        }
        let out_w = (crop_w as f32 * zoom) as u32;
        let out_h = (crop_h as f32 * zoom) as u32;
        if out_w == 0 || out_h == 0 {
            return None;
        }
        let cropped = imageops::crop_imm(&self.source, left as u32, top as u32, crop_w, crop_h).to_image();
        Some(imageops::resize(&cropped, out_w, out_h, FilterType::Triangle))
    }

    /// Fill with the sky tint, then draw the surface image centred when low enough.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, altitude: f32) {
        canvas.fill(bg_color(altitude));
        let Some(zoom) = zoom_factor(altitude) else {
            return;
        };
        let (w, h) = canvas.size();
        if let Some(image) = self.scaled(zoom, (w, h)) {
            let x = (w as i64 - image.width() as i64).div_euclid(2);
            let y = (h as i64 - image.height() as i64).div_euclid(2);
            canvas.draw_image(image, Vec2::new(x as f32, y as f32));
        }
    }
}
