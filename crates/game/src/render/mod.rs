//! Flight rendering: sky and surface backdrop, asteroids, landing pad.
//! The HUD and warnings live in [`overlay`].

pub mod overlay;

use engine_core::{AsteroidLook, Obstacle};
use glam::{Vec2, Vec3};
use physics::LanderState;
use procgen::{AsteroidField, PadGeometry, Segment, SurfaceTextureConfig, TextureGenerator};
use renderer::{
    bg_color, BackdropCache, Canvas, Color, ImageAssets, Projector, RgbaImage, SpriteCache,
};
use std::path::Path;

const PAD_BASE: Color = Color::grey(100);
const PAD_INNER: Color = Color::grey(150);
const PAD_GRID: Color = Color::grey(180);
const PAD_TARGET: Color = Color::grey(200);
const PAD_EDGE: Color = Color::grey(120);
const PAD_MARK: Color = Color::RED;

/// Size of the generated surface texture used when no background image ships.
const FALLBACK_SURFACE_SIZE: (u32, u32) = (640, 480);

/// Optional images and the caches built from them.
#[derive(Debug, Default)]
pub struct Visuals {
    /// Prescaled asteroid sprites; `None` draws primitive asteroids.
    pub sprites: Option<SpriteCache>,
    pub backdrop: Option<BackdropCache>,
    pub intro: Option<RgbaImage>,
}

impl Visuals {
    /// Load images from `dir`. A missing background is replaced by a
    /// procedural surface generated from `seed`.
    pub fn load(dir: &Path, seed: u64) -> Self {
        let assets = ImageAssets::load(dir);
        let background = assets.background.unwrap_or_else(|| {
            log::info!("Generating procedural surface backdrop");
            procedural_surface(seed)
        });
        Self {
            sprites: assets.asteroid.as_ref().map(SpriteCache::new),
            backdrop: Some(BackdropCache::new(background)),
            intro: assets.intro,
        }
    }
}

fn procedural_surface(seed: u64) -> RgbaImage {
    let (w, h) = FALLBACK_SURFACE_SIZE;
    let texture =
        TextureGenerator::new(seed).generate_mars_surface(w, h, &SurfaceTextureConfig::default());
    RgbaImage::from_raw(w, h, texture.into_bytes()).unwrap_or_else(|| RgbaImage::new(w, h))
}

/// Draw the world as seen from `lander`: background, then asteroids, then the pad.
pub fn draw_world(
    canvas: &mut dyn Canvas,
    projector: &Projector,
    lander: &LanderState,
    field: &AsteroidField,
    pad: &PadGeometry,
    visuals: &mut Visuals,
) {
    let altitude = lander.altitude();
    match visuals.backdrop.as_mut() {
        Some(backdrop) => backdrop.draw(canvas, altitude),
        None => canvas.fill(bg_color(altitude)),
    }
    draw_asteroids(canvas, projector, lander, field, visuals.sprites.as_ref());
    draw_pad(canvas, projector, lander, pad);
}

fn draw_asteroids(
    canvas: &mut dyn Canvas,
    projector: &Projector,
    lander: &LanderState,
    field: &AsteroidField,
    sprites: Option<&SpriteCache>,
) {
    let camera = lander.position;
    let mut query = field.world().query::<(&Obstacle, &AsteroidLook)>();
    for (_, (obstacle, look)) in query.iter() {
        let Some(center) = projector.project(obstacle.position, camera) else {
            continue;
        };

        if let Some(sprites) = sprites {
            let Some(scale) = projector.obstacle_scale(obstacle.position, obstacle.size, camera) else {
                continue;
            };
            if let Some(sprite) = sprites.get(scale) {
                let half = SpriteCache::snap(scale) as f32 / 2.0;
                canvas.draw_image(sprite, center - Vec2::splat(half));
            }
            continue;
        }

        let Some(k) = projector.perspective(obstacle.position.z - camera.z) else {
            continue;
        };
        let color = Color::from(look.color);
        for sub in &look.sub_shapes {
            let at = center + Vec2::new(sub.offset_x, sub.offset_y) * k;
            canvas.draw_circle(at, obstacle.size * sub.scale * k, color, 0);
        }
    }
}

fn project_all(projector: &Projector, points: &[Vec3], camera: Vec3) -> Option<Vec<Vec2>> {
    points.iter().map(|&p| projector.project(p, camera)).collect()
}

fn draw_segments(
    canvas: &mut dyn Canvas,
    projector: &Projector,
    camera: Vec3,
    segments: &[Segment],
    color: Color,
    width: u32,
) {
    for &(a, b) in segments {
        if let (Some(p1), Some(p2)) = (projector.project(a, camera), projector.project(b, camera)) {
            canvas.draw_line(p1, p2, color, width);
        }
    }
}

/// Pad details are drawn only when the whole outer square is in view.
fn draw_pad(canvas: &mut dyn Canvas, projector: &Projector, lander: &LanderState, pad: &PadGeometry) {
    let camera = lander.position;
    let Some(base) = project_all(projector, &pad.base, camera) else {
        return;
    };
    canvas.draw_polygon(&base, PAD_BASE, true);
    if let Some(inner) = project_all(projector, &pad.inner, camera) {
        canvas.draw_polygon(&inner, PAD_INNER, true);
    }

    draw_segments(canvas, projector, camera, &pad.grid, PAD_GRID, 1);

    if let Some(center) = projector.project(pad.center(), camera) {
        let k = projector.focal_length / lander.altitude().max(1.0);
        let radius = (k * pad.target_radius).max(2.0);
        canvas.draw_circle(center, radius, PAD_TARGET, 2);
    }

    draw_segments(canvas, projector, camera, &pad.edges, PAD_EDGE, 3);
    draw_segments(canvas, projector, camera, &pad.x_marks, PAD_MARK, 3);
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Framebuffer;

    fn lander_at(x: f32, y: f32, z: f32) -> LanderState {
        LanderState::default().with_position(Vec3::new(x, y, z))
    }

    #[test]
    fn pad_is_drawn_under_the_lander() {
        let projector = Projector::new(800, 600);
        let mut fb = Framebuffer::new(800, 600);
        fb.fill(Color::BLACK);
        draw_pad(&mut fb, &projector, &lander_at(0.0, 0.0, 100.0), &PadGeometry::default());
        // 50 units at 100 below spans 200 px; the red X passes through the centre.
        assert_eq!(fb.pixel(400, 300), Some(PAD_MARK));
        assert_eq!(fb.pixel(400 - 70, 300 + 40), Some(PAD_INNER));
        assert_eq!(fb.pixel(400 - 90, 300 + 40), Some(PAD_BASE));
        assert_eq!(fb.pixel(10, 10), Some(Color::BLACK));
    }

    #[test]
    fn pad_skipped_once_below_surface() {
        let projector = Projector::new(800, 600);
        let mut fb = Framebuffer::new(800, 600);
        draw_pad(&mut fb, &projector, &lander_at(0.0, 0.0, -1.0), &PadGeometry::default());
        assert_eq!(fb.count_color(Color::BLACK), 800 * 600);
    }

    #[test]
    fn primitive_asteroids_use_look_color() {
        let projector = Projector::new(800, 600);
        let field = AsteroidField::generate(3, &procgen::FieldConfig { count: 1, ..Default::default() });
        let rock = field.world().query::<&Obstacle>().iter().map(|(_, o)| *o).next().unwrap();
        let lander = lander_at(rock.position.x, rock.position.y, rock.position.z + 2000.0);
        let mut fb = Framebuffer::new(800, 600);
        draw_asteroids(&mut fb, &projector, &lander, &field, None);

        let mut query = field.world().query::<&AsteroidLook>();
        let color = query.iter().next().map(|(_, look)| Color::from(look.color));
        let painted = color.map(|c| fb.count_color(c)).unwrap_or_default();
        assert!(painted > 0);
    }

    #[test]
    fn sprite_asteroids_are_centred_on_projection() {
        let projector = Projector::new(800, 600);
        let rock = Obstacle::new(Vec3::new(0.0, 0.0, 5000.0), 100.0);
        let field = AsteroidField::from_obstacles([rock]);
        let sprites = SpriteCache::new(&RgbaImage::from_pixel(8, 8, Color::rgb(0, 0, 255).to_rgba()));
        // 400 / 1000 * 100 * 2 = 80 px.
        let lander = lander_at(0.0, 0.0, 6000.0);
        let mut fb = Framebuffer::new(800, 600);
        draw_asteroids(&mut fb, &projector, &lander, &field, Some(&sprites));
        assert_eq!(fb.count_color(Color::rgb(0, 0, 255)), 80 * 80);
        assert_eq!(fb.pixel(360, 260), Some(Color::rgb(0, 0, 255)));
        assert_eq!(fb.pixel(359, 260), Some(Color::BLACK));
    }

    #[test]
    fn backdrop_fallback_without_cache_is_flat_tint() {
        let projector = Projector::new(64, 48);
        let field = AsteroidField::from_obstacles([]);
        let mut visuals = Visuals::default();
        let mut fb = Framebuffer::new(64, 48);
        draw_world(&mut fb, &projector, &lander_at(0.0, 0.0, 7500.0), &field, &PadGeometry::default(), &mut visuals);
        assert_eq!(fb.count_color(Color::rgb(100, 50, 25)), 64 * 48);
    }
}
