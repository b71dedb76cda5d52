//! Ray casting against every shape kind
//!
//! Each function returns hits nearest first; an empty vector means a miss.
//! Polygons arrive as world-space point lists, like in the overlap tests.

use crate::foundation::math::{angle, face_vector, intersect_angles, to_global, to_local, Vec2};
use super::narrow_phase::POINT_RADIUS;
use super::primitives::{edges, sort_and_dedup, Ray, RayHit};
use super::shape::{Circle, Line, Rectangle};

/// Below this, a side offset from the ray counts as lying on it
const ON_RAY_EPSILON: f32 = 1e-5;

/// Relative band around the radius in which a ray counts as tangent to a circle
const TANGENT_EPSILON: f32 = 1e-5;

/// Ray against a bare point, given the same unit radius as point-point tests
///
/// The hit is reported at the point itself.
pub fn ray_point(ray: &Ray, point: Vec2) -> Vec<RayHit> {
    let local = to_local(point, ray.origin);
    let along = local.dot(&ray.direction);
    let side = local.dot(&ray.normal());

    if along < 0.0 || side.abs() > POINT_RADIUS {
        return Vec::new();
    }
    vec![RayHit::new(ray.origin, point, ray.angle + 90.0)]
}

/// Ray against a single segment
pub fn ray_segment(ray: &Ray, start: Vec2, end: Vec2) -> Option<RayHit> {
    let a = to_local(start, ray.origin);
    let b = to_local(end, ray.origin);
    let surface_angle = angle(end - start);

    // Headings are meaningless when the origin sits on the segment itself
    let touches_origin = a.norm_squared() <= ON_RAY_EPSILON
        || b.norm_squared() <= ON_RAY_EPSILON
        || (a.perp(&b).abs() <= ON_RAY_EPSILON * (b - a).norm() && a.dot(&b) <= 0.0);
    if !touches_origin && !intersect_angles(ray.angle, angle(a), angle(b)) {
        return None;
    }

    let normal = ray.normal();
    let side_a = a.dot(&normal);
    let side_b = b.dot(&normal);

    if (side_a - side_b).abs() <= ON_RAY_EPSILON {
        // Parallel to the ray
        if side_a.abs() > ON_RAY_EPSILON {
            return None;
        }
        let along_a = a.dot(&ray.direction);
        let along_b = b.dot(&ray.direction);
        if along_a.max(along_b) < 0.0 {
            return None;
        }
        let t = along_a.min(along_b).max(0.0);
        return Some(RayHit::new(ray.origin, ray.point_at(t), surface_angle));
    }

    let ratio = side_a / (side_a - side_b);
    if !(0.0..=1.0).contains(&ratio) {
        return None;
    }
    let local_hit = a + (b - a) * ratio;
    if local_hit.dot(&ray.direction) < -ON_RAY_EPSILON {
        return None;
    }

    Some(RayHit::new(ray.origin, to_global(local_hit, ray.origin), surface_angle))
}

/// Ray against a line segment
pub fn ray_line(ray: &Ray, line: &Line) -> Vec<RayHit> {
    ray_segment(ray, line.start, line.end).into_iter().collect()
}

/// Ray against the closed outline through `points`
pub fn ray_outline(ray: &Ray, points: &[Vec2]) -> Vec<RayHit> {
    let mut hits: Vec<RayHit> = edges(points)
        .filter_map(|(start, end)| ray_segment(ray, start, end))
        .collect();
    sort_and_dedup(&mut hits);
    hits
}

/// Ray against an axis-aligned rectangle's four edges
pub fn ray_rectangle(ray: &Ray, rect: &Rectangle) -> Vec<RayHit> {
    ray_outline(ray, &rect.corners())
}

/// Ray against a polygon's edges
pub fn ray_polygon(ray: &Ray, polygon: &[Vec2]) -> Vec<RayHit> {
    ray_outline(ray, polygon)
}

/// Ray against a circle
///
/// Up to two hits: where the ray enters and leaves. A tangent ray yields one.
pub fn ray_circle(ray: &Ray, circle: &Circle) -> Vec<RayHit> {
    let local = to_local(circle.position, ray.origin);
    let along = local.dot(&ray.direction);
    let side = local.dot(&face_vector(ray.direction));
    let radius = circle.radius;

    // Rounding in the ray direction shifts `side` slightly off a true tangent
    let tolerance = TANGENT_EPSILON * radius.max(1.0);
    let gap = side.abs() - radius;
    if gap > tolerance || along < -radius {
        return Vec::new();
    }

    let distances = if gap.abs() <= tolerance {
        vec![along]
    } else {
        let half_chord = (radius * radius - side * side).sqrt();
        vec![along - half_chord, along + half_chord]
    };

    distances
        .into_iter()
        .filter(|&t| t >= 0.0)
        .map(|t| {
            let position = ray.point_at(t);
            let tangent = face_vector(position - circle.position);
            RayHit::new(ray.origin, position, angle(tangent))
        })
        .collect()
}
