//! CPU framebuffer: a software rasteriser behind [`Canvas`].
//!
//! Coordinates are rounded to the nearest pixel and clipped to the buffer,
//! so callers can pass points that project far off-screen.

use crate::canvas::Canvas;
use crate::color::Color;
use glam::Vec2;
use image::{imageops, Rgba, RgbaImage};

/// An RGBA8 image the game draws into each frame.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    image: RgbaImage,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width.max(1), height.max(1), Color::BLACK.to_rgba()) }
    }

    /// Reallocate for a new window size. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Tightly packed RGBA8 rows, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Colour at a pixel, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|p| Color::rgb(p[0], p[1], p[2]))
    }

    /// Count of pixels exactly equal to `color`.
    pub fn count_color(&self, color: Color) -> usize {
        let target = color.to_rgba();
        self.image.pixels().filter(|p| **p == target).count()
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn fill_span(&mut self, y: i64, x0: i64, x1: i64, color: Rgba<u8>) {
        if y < 0 || y >= self.image.height() as i64 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.image.width() as i64 - 1);
        for x in x0..=x1 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Square brush of side `width` centred on a pixel.
    fn stamp(&mut self, x: i64, y: i64, width: u32, color: Rgba<u8>) {
        if width <= 1 {
            self.put(x, y, color);
            return;
        }
        let lo = -((width as i64 - 1) / 2);
        let hi = lo + width as i64 - 1;
        for dy in lo..=hi {
            self.fill_span(y + dy, x + lo, x + hi, color);
        }
    }
}

fn round(p: Vec2) -> (i64, i64) {
    (p.x.round() as i64, p.y.round() as i64)
}

impl Canvas for Framebuffer {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill(&mut self, color: Color) {
        let c = color.to_rgba();
        self.image.pixels_mut().for_each(|p| *p = c);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: u32) {
        let c = color.to_rgba();
        let (mut x0, mut y0) = round(from);
        let (x1, y1) = round(to);

        // Skip lines whose bounding box misses the buffer entirely.
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        let pad = width as i64;
        if x0.max(x1) < -pad || y0.max(y1) < -pad || x0.min(x1) >= w + pad || y0.min(y1) >= h + pad {
            return;
        }

        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x0, y0, width, c);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Color, filled: bool) {
        if points.len() < 2 {
            return;
        }
        if !filled {
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                self.draw_line(a, b, color, 1);
            }
            return;
        }

        // Even-odd scanline fill, sampling at pixel centres.
        let c = color.to_rgba();
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let y_start = (min_y.floor() as i64).max(0);
        let y_end = (max_y.ceil() as i64).min(self.image.height() as i64 - 1);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in y_start..=y_end {
            let sample = y as f32 + 0.5;
            crossings.clear();
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= sample && b.y > sample) || (b.y <= sample && a.y > sample) {
                    let t = (sample - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil() as i64;
                let x1 = (pair[1] - 0.5).floor() as i64;
                if x1 >= x0 {
                    self.fill_span(y, x0, x1, c);
                }
            }
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, stroke_width: u32) {
        if radius <= 0.0 {
            return;
        }
        let c = color.to_rgba();
        let (cx, cy) = round(center);
        let r = radius.round().max(1.0) as i64;
        let outer = (r * r) as f32 + r as f32 * 0.8;
        let inner = if stroke_width == 0 {
            f32::NEG_INFINITY
        } else {
            let ri = (r - stroke_width as i64).max(0);
            (ri * ri) as f32 + ri as f32 * 0.8
        };

        // Only visit rows and columns inside the buffer.
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        let (dx_lo, dx_hi) = ((-r).max(-cx), r.min(w - 1 - cx));
        let (dy_lo, dy_hi) = ((-r).max(-cy), r.min(h - 1 - cy));
        for dy in dy_lo..=dy_hi {
            for dx in dx_lo..=dx_hi {
                let d2 = (dx * dx + dy * dy) as f32;
                if d2 <= outer && d2 > inner {
                    self.image.put_pixel((cx + dx) as u32, (cy + dy) as u32, c);
                }
            }
        }
    }

    fn draw_rect(&mut self, top_left: Vec2, size: Vec2, color: Color) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let c = color.to_rgba();
        let (x0, y0) = round(top_left);
        let (x1, y1) = round(top_left + size);
        for y in y0.max(0)..y1.min(self.image.height() as i64) {
            self.fill_span(y, x0, x1 - 1, c);
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, top_left: Vec2) {
        let (x, y) = round(top_left);
        imageops::overlay(&mut self.image, image, x, y);
    }

    fn draw_image_faded(&mut self, image: &RgbaImage, top_left: Vec2, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity >= 1.0 {
            self.draw_image(image, top_left);
            return;
        }
        if opacity <= 0.0 {
            return;
        }
        let (ox, oy) = round(top_left);
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        for (sx, sy, src) in image.enumerate_pixels() {
            let (x, y) = (ox + sx as i64, oy + sy as i64);
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            let a = src[3] as f32 / 255.0 * opacity;
            let dst = self.image.get_pixel_mut(x as u32, y as u32);
            for ch in 0..3 {
                dst[ch] = (src[ch] as f32 * a + dst[ch] as f32 * (1.0 - a)).round() as u8;
            }
            dst[3] = 255;
        }
    }
}
