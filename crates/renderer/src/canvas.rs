//! The draw surface the game renders into.
//!
//! Everything is expressed in screen pixels with the origin at the top-left.
//! The software [`Framebuffer`](crate::Framebuffer) is the only production
//! implementation; the trait exists so scenes can be drawn into anything.

use crate::color::Color;
use crate::text::{render_text, TextSize};
use glam::Vec2;
use image::RgbaImage;

pub trait Canvas {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Overwrite every pixel.
    fn fill(&mut self, color: Color);

    /// Line of `width` pixels between two points.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: u32);

    /// Closed polygon, filled or outlined with a 1 px edge.
    fn draw_polygon(&mut self, points: &[Vec2], color: Color, filled: bool);

    /// Circle; `stroke_width == 0` fills it.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, stroke_width: u32);

    /// Filled axis-aligned rectangle.
    fn draw_rect(&mut self, top_left: Vec2, size: Vec2, color: Color);

    /// Alpha-blend an image with its top-left corner at `top_left`.
    fn draw_image(&mut self, image: &RgbaImage, top_left: Vec2) {
        self.draw_image_faded(image, top_left, 1.0);
    }

    /// Like [`Canvas::draw_image`] with the image's alpha multiplied by `opacity`.
    fn draw_image_faded(&mut self, image: &RgbaImage, top_left: Vec2, opacity: f32);

    /// Render `text` and blit it at `top_left`. Returns the rendered size.
    fn draw_text(&mut self, text: &str, top_left: Vec2, color: Color, size: TextSize) -> Vec2 {
        let image = render_text(text, color, size);
        let extent = Vec2::new(image.width() as f32, image.height() as f32);
        self.draw_image(&image, top_left);
        extent
    }

    fn width(&self) -> f32 {
        self.size().0 as f32
    }

    fn height(&self) -> f32 {
        self.size().1 as f32
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }
}
