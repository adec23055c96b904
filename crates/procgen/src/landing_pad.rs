//! Landing pad geometry: a square at the origin on the z = 0 surface.

use glam::Vec3;

/// Side length of the pad in world units.
pub const PAD_SIZE: f32 = 50.0;
/// Inner detail square, relative to the pad.
pub const INNER_PAD_SCALE: f32 = 0.8;
/// Height of the raised rim.
pub const EDGE_HEIGHT: f32 = 2.0;

/// A line segment in world space.
pub type Segment = (Vec3, Vec3);

/// Immutable pad geometry, built once.
#[derive(Debug, Clone, PartialEq)]
pub struct PadGeometry {
    pub size: f32,
    /// Outer square, counter-clockwise from (-h, -h).
    pub base: [Vec3; 4],
    pub inner: [Vec3; 4],
    /// Four vertical rim posts, then the four rim rails along the ±x sides.
    pub edges: Vec<Segment>,
    /// The two diagonals of the red X.
    pub x_marks: [Segment; 2],
    /// Three horizontal then three vertical lines, interleaved.
    pub grid: Vec<Segment>,
    /// Radius of the target circle at the pad centre.
    pub target_radius: f32,
}

impl Default for PadGeometry {
    fn default() -> Self {
        Self::new(PAD_SIZE)
    }
}

fn square(half: f32) -> [Vec3; 4] {
    [
        Vec3::new(-half, -half, 0.0),
        Vec3::new(half, -half, 0.0),
        Vec3::new(half, half, 0.0),
        Vec3::new(-half, half, 0.0),
    ]
}

impl PadGeometry {
    pub fn new(size: f32) -> Self {
        let h = size / 2.0;
        let e = EDGE_HEIGHT;
        let v = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);

        let edges = vec![
            (v(-h, -h, 0.0), v(-h, -h, e)),
            (v(h, -h, 0.0), v(h, -h, e)),
            (v(-h, h, 0.0), v(-h, h, e)),
            (v(h, h, 0.0), v(h, h, e)),
            (v(-h, -h, 0.0), v(-h, h, 0.0)),
            (v(-h, -h, e), v(-h, h, e)),
            (v(h, -h, 0.0), v(h, h, 0.0)),
            (v(h, -h, e), v(h, h, e)),
        ];

        let x_marks = [(v(-h, -h, 0.0), v(h, h, 0.0)), (v(-h, h, 0.0), v(h, -h, 0.0))];

        let spacing = size / 4.0;
        let grid = (-1..=1)
            .flat_map(|i| {
                let o = i as f32 * spacing;
                [(v(-h, o, 0.0), v(h, o, 0.0)), (v(o, -h, 0.0), v(o, h, 0.0))]
            })
            .collect();

        Self {
            size,
            base: square(h),
            inner: square(h * INNER_PAD_SCALE),
            edges,
            x_marks,
            grid,
            target_radius: size / 10.0,
        }
    }

    /// Half the side length; landing requires |x| and |y| strictly inside it.
    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    /// Pad centre, the alignment target for the HUD.
    pub fn center(&self) -> Vec3 {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pad_dimensions() {
        let pad = PadGeometry::default();
        assert_eq!(pad.base[0], Vec3::new(-25.0, -25.0, 0.0));
        assert_eq!(pad.base[2], Vec3::new(25.0, 25.0, 0.0));
        assert_eq!(pad.inner[1], Vec3::new(20.0, -20.0, 0.0));
        assert_eq!(pad.target_radius, 5.0);
        assert_eq!(pad.half_extent(), 25.0);
    }

    #[test]
    fn segment_counts() {
        let pad = PadGeometry::default();
        assert_eq!(pad.edges.len(), 8);
        assert_eq!(pad.grid.len(), 6);
        assert!(pad.edges.iter().take(4).all(|(a, b)| a.z == 0.0 && b.z == EDGE_HEIGHT));
        assert!(pad.grid.iter().all(|(a, b)| a.z == 0.0 && b.z == 0.0));
        assert!(pad.grid.contains(&(Vec3::new(-25.0, 12.5, 0.0), Vec3::new(25.0, 12.5, 0.0))));
    }
}
