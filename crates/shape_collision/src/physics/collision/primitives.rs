//! Rays, ray hits and the edge helpers shared by the tests

use crate::foundation::math::{self, Vec2};

/// A half-infinite ray starting at `origin` and heading `angle` degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec2,
    /// Heading in degrees, in `[0, 360)`
    pub angle: f32,
    /// Unit direction matching `angle`
    pub direction: Vec2,
}

impl Ray {
    /// Creates a ray; `angle` is assumed to be already range checked
    pub fn new(origin: Vec2, angle: f32) -> Self {
        Self {
            origin,
            angle,
            direction: math::direction_from_angle(angle),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }

    /// Unit vector perpendicular to the ray, the axis used to measure side offsets
    pub fn normal(&self) -> Vec2 {
        math::face_vector(self.direction)
    }
}

/// One intersection between a ray and a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The point of intersection in world space
    pub position: Vec2,
    /// Heading of the surface tangent at the hit, in degrees
    pub angle: f32,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
}

impl RayHit {
    /// Creates a hit, measuring its distance from `origin`
    pub fn new(origin: Vec2, position: Vec2, angle: f32) -> Self {
        Self {
            position,
            angle: math::normalize_angle(angle),
            distance: (position - origin).norm(),
        }
    }
}

/// A hit tagged with the index of the target it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    /// Index of the target in the slice passed to the ray cast
    pub target: usize,
    /// The intersection itself
    pub hit: RayHit,
}

/// Closed loop of edges `(start, end)` over a vertex list
pub fn edges(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Vertex closest to `target`
pub fn nearest_point(points: &[Vec2], target: Vec2) -> Option<Vec2> {
    points.iter().copied().min_by(|a, b| {
        (a - target)
            .norm_squared()
            .total_cmp(&(b - target).norm_squared())
    })
}

/// Sort hits nearest first and drop duplicates reported by adjacent edges
pub fn sort_and_dedup(hits: &mut Vec<RayHit>) {
    const SAME_POINT_EPSILON: f32 = 1e-4;

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.dedup_by(|later, earlier| {
        (later.position - earlier.position).norm_squared() <= SAME_POINT_EPSILON * SAME_POINT_EPSILON
    });
}
