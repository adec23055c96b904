//! Obstacle collision, nearest-threat tracking and touchdown evaluation.

use crate::integrator::LanderState;
use engine_core::Obstacle;
use glam::Vec3;

/// Collision radius of the lander itself.
pub const ROVER_RADIUS: f32 = 10.0;

/// Closest obstacle seen during a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestObstacle {
    pub obstacle: Obstacle,
    pub distance: f32,
}

impl NearestObstacle {
    /// Obstacle position relative to the lander.
    pub fn offset_from(&self, lander: Vec3) -> Vec3 {
        self.obstacle.position - lander
    }
}

/// Result of checking the lander against every obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanResult {
    /// First obstacle found within `radius + rover_radius`. The scan stopped there.
    Collision { obstacle: Obstacle, distance: f32 },
    /// No contact. `nearest` is `None` only for an empty field.
    Clear { nearest: Option<NearestObstacle> },
}

impl ScanResult {
    pub fn is_collision(&self) -> bool {
        matches!(self, ScanResult::Collision { .. })
    }
}

/// Walk obstacles in order, stopping at the first contact and otherwise
/// tracking the minimum-distance obstacle.
pub fn scan_obstacles<'a, I>(lander: Vec3, obstacles: I, rover_radius: f32) -> ScanResult
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    let mut nearest: Option<NearestObstacle> = None;
    for obstacle in obstacles {
        let distance = lander.distance(obstacle.position);
        if distance < obstacle.radius() + rover_radius {
            return ScanResult::Collision { obstacle: *obstacle, distance };
        }
        if nearest.map_or(true, |n| distance < n.distance) {
            nearest = Some(NearestObstacle { obstacle: *obstacle, distance });
        }
    }
    ScanResult::Clear { nearest }
}

/// Which touchdown tolerance was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchdownFault {
    LateralSpeed,
    VerticalSpeed,
    OffPad,
}

impl std::fmt::Display for TouchdownFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TouchdownFault::LateralSpeed => "lateral speed too high",
            TouchdownFault::VerticalSpeed => "vertical speed too high",
            TouchdownFault::OffPad => "missed the pad",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touchdown {
    Landed,
    Crashed(TouchdownFault),
}

/// Tolerances for a successful landing. All bounds are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingCriteria {
    /// Bound on |vx| and |vy|.
    pub max_lateral_speed: f32,
    /// Bound on |vz|.
    pub max_vertical_speed: f32,
    /// Bound on |x| and |y|; half the pad side.
    pub pad_half_extent: f32,
}

impl LandingCriteria {
    /// Standard speed bounds over a pad reaching `pad_half_extent` from its centre.
    pub fn for_pad(pad_half_extent: f32) -> Self {
        Self {
            max_lateral_speed: 2.0,
            max_vertical_speed: 5.0,
            pad_half_extent,
        }
    }

    /// `None` while still airborne (altitude > 0).
    pub fn evaluate(&self, lander: &LanderState) -> Option<Touchdown> {
        if lander.altitude() > 0.0 {
            return None;
        }
        let v = lander.velocity;
        let p = lander.position;
        let outcome = if v.x.abs() >= self.max_lateral_speed || v.y.abs() >= self.max_lateral_speed {
            Touchdown::Crashed(TouchdownFault::LateralSpeed)
        } else if v.z.abs() >= self.max_vertical_speed {
            Touchdown::Crashed(TouchdownFault::VerticalSpeed)
        } else if p.x.abs() >= self.pad_half_extent || p.y.abs() >= self.pad_half_extent {
            Touchdown::Crashed(TouchdownFault::OffPad)
        } else {
            Touchdown::Landed
        };
        Some(outcome)
    }
}
