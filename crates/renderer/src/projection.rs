//! Pinhole projection from world space to screen pixels.
//!
//! The camera looks straight down the -z axis. A point is visible only when
//! it is strictly below the camera by more than [`MIN_DEPTH`]; everything the
//! game draws in 3D goes through [`Projector::project`].

use glam::{Vec2, Vec3};

/// Focal length in pixels.
pub const FOCAL_LENGTH: f32 = 400.0;
/// Points closer than this along z are culled to avoid blowing up the divide.
pub const MIN_DEPTH: f32 = 0.1;
/// Smallest and largest on-screen obstacle size in pixels.
pub const MIN_OBSTACLE_SCALE: f32 = 10.0;
pub const MAX_OBSTACLE_SCALE: f32 = 200.0;

/// Maps world points to the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub focal_length: f32,
    pub width: f32,
    pub height: f32,
}

impl Projector {
    pub fn new(width: u32, height: u32) -> Self {
        Self { focal_length: FOCAL_LENGTH, width: width as f32, height: height as f32 }
    }

    /// Track a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Screen position of `point` seen from `camera`, or `None` when the point
    /// is level with, above, or within [`MIN_DEPTH`] of the camera.
    pub fn project(&self, point: Vec3, camera: Vec3) -> Option<Vec2> {
        let d = point - camera;
        let k = self.perspective(d.z)?;
        Some(Vec2::new(d.x * k, d.y * k) + self.center())
    }

    /// Pixels per world unit at relative depth `dz` (negative below the camera).
    pub fn perspective(&self, dz: f32) -> Option<f32> {
        if dz >= 0.0 || dz.abs() < MIN_DEPTH {
            return None;
        }
        Some(self.focal_length / -dz)
    }

    /// On-screen size of an obstacle, clamped to
    /// [`MIN_OBSTACLE_SCALE`]..=[`MAX_OBSTACLE_SCALE`].
    pub fn obstacle_scale(&self, position: Vec3, size: f32, camera: Vec3) -> Option<f32> {
        let k = self.perspective(position.z - camera.z)?;
        Some((k * size * 2.0).clamp(MIN_OBSTACLE_SCALE, MAX_OBSTACLE_SCALE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_not_strictly_below_are_culled() {
        let p = Projector::new(800, 600);
        let cam = Vec3::new(0.0, 0.0, 1000.0);
        for dz in [0.0, 0.05, 1.0, 5000.0] {
            assert_eq!(p.project(cam + Vec3::new(10.0, 10.0, dz), cam), None);
        }
        assert_eq!(p.project(Vec3::new(0.0, 0.0, -0.09), Vec3::ZERO), None);
        assert!(p.project(Vec3::new(0.0, 0.0, -0.1), Vec3::ZERO).is_some());
    }

    #[test]
    fn optical_axis_lands_on_viewport_center() {
        let p = Projector::new(800, 600);
        let cam = Vec3::new(123.0, -45.0, 20000.0);
        let hit = p.project(Vec3::new(123.0, -45.0, 0.0), cam);
        assert_eq!(hit, Some(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn doubling_distance_halves_screen_size() {
        let p = Projector::new(800, 600);
        let cam = Vec3::ZERO;
        let span = |depth: f32| {
            let a = p.project(Vec3::new(-5.0, 0.0, -depth), cam).map(|v| v.x);
            let b = p.project(Vec3::new(5.0, 0.0, -depth), cam).map(|v| v.x);
            b.zip(a).map(|(b, a)| b - a)
        };
        let near = span(100.0).unwrap_or_default();
        let far = span(200.0).unwrap_or_default();
        assert!((near - 40.0).abs() < 1e-4);
        assert!((far - near / 2.0).abs() < 1e-4);
    }

    #[test]
    fn obstacle_scale_is_clamped() {
        let p = Projector::new(800, 600);
        let cam = Vec3::new(0.0, 0.0, 10000.0);
        let far = p.obstacle_scale(Vec3::new(0.0, 0.0, 0.0), 100.0, cam);
        assert_eq!(far, Some(MIN_OBSTACLE_SCALE));
        let near = p.obstacle_scale(Vec3::new(0.0, 0.0, 9900.0), 150.0, cam);
        assert_eq!(near, Some(MAX_OBSTACLE_SCALE));
        let mid = p.obstacle_scale(Vec3::new(0.0, 0.0, 8000.0), 100.0, cam);
        assert!(mid.is_some_and(|s| (s - 40.0).abs() < 1e-3));
        assert_eq!(p.obstacle_scale(Vec3::new(0.0, 0.0, 10001.0), 100.0, cam), None);
    }
}
