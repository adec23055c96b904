//! 8-bit RGB colours used by every draw call.

use image::Rgba;

/// Opaque 8-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    /// Dusty red of the lower atmosphere and the surface.
    pub const MARS_DUST: Color = Color::rgb(200, 100, 50);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value on all three channels.
    pub const fn grey(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Every channel multiplied by `t` (clamped to 0..=1) and truncated.
    pub fn scaled(self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgb(
            (self.r as f32 * t) as u8,
            (self.g as f32 * t) as u8,
            (self.b as f32 * t) as u8,
        )
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        c.to_rgba()
    }
}
