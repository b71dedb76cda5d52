//! Narrow-phase overlap tests
//!
//! One exact test per unordered pair of shape kinds. Every test treats
//! touching as overlapping. Polygons arrive as world-space point lists in
//! clockwise screen order (see [`super::shape::Winding`]); the dispatcher in
//! [`crate::physics::CollisionSystem`] takes care of that conversion.

use crate::foundation::math::{face_vector, intersect, normalize, project, Vec2};
use super::primitives::{edges, nearest_point};
use super::shape::{Aabb, Circle, Line, Rectangle};

/// Radius a bare point is given when tested against another point
pub const POINT_RADIUS: f32 = 1.0;

/// How far a point may sit off a line (sideways or past its ends) and still touch it
pub const POINT_PROJECTION_TOLERANCE: f32 = 1.5;

/// Below this, a side offset from a line counts as lying on it
const ON_LINE_EPSILON: f32 = 1e-5;

/// True if `axis` separates the two point sets
fn separates(a: &[Vec2], b: &[Vec2], axis: Vec2) -> bool {
    let (min_a, max_a) = project(a, axis);
    let (min_b, max_b) = project(b, axis);
    !intersect(min_a, max_a, min_b, max_b)
}

/// Separating axis test for a circle against a point set, along the axis
/// from the circle center to the nearest vertex
fn nearest_vertex_axis_overlaps(circle: &Circle, points: &[Vec2]) -> bool {
    let Some(nearest) = nearest_point(points, circle.position) else {
        return false;
    };
    let offset = nearest - circle.position;
    if offset.norm_squared() == 0.0 {
        // Center sits on a vertex
        return true;
    }

    let axis = normalize(offset);
    let (min, max) = project(points, axis);
    let center = circle.position.dot(&axis);
    intersect(center - circle.radius, center + circle.radius, min, max)
}

/// Point against point: points occupy a disc of [`POINT_RADIUS`]
pub fn point_point(a: Vec2, b: Vec2) -> bool {
    (a - b).norm_squared() <= POINT_RADIUS * POINT_RADIUS
}

/// Point against segment, within [`POINT_PROJECTION_TOLERANCE`]
pub fn point_line(point: Vec2, line: &Line) -> bool {
    let length = line.length();
    let along_axis = line.direction() / length;
    let local = point - line.start;

    let side = local.dot(&face_vector(along_axis));
    if side.abs() > POINT_PROJECTION_TOLERANCE {
        return false;
    }

    let along = local.dot(&along_axis);
    along >= -POINT_PROJECTION_TOLERANCE && along <= length + POINT_PROJECTION_TOLERANCE
}

/// Point inside or on an axis-aligned rectangle
pub fn point_rectangle(point: Vec2, rect: &Rectangle) -> bool {
    Aabb::new(rect.min(), rect.max()).contains_point(point)
}

/// Point inside or on a circle
pub fn point_circle(point: Vec2, circle: &Circle) -> bool {
    (point - circle.position).norm_squared() <= circle.radius * circle.radius
}

/// Point inside or on a clockwise convex polygon
///
/// The point must be on the inner side of every edge's face vector.
pub fn point_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    edges(polygon).all(|(start, end)| (point - start).dot(&face_vector(end - start)) >= 0.0)
}

/// Circle against circle
pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    (a.position - b.position).norm_squared() <= reach * reach
}

/// Circle against segment
///
/// Past either end the nearest endpoint decides; otherwise the side distance does.
pub fn circle_line(circle: &Circle, line: &Line) -> bool {
    let direction = line.direction();
    let local = circle.position - line.start;
    let t = local.dot(&direction) / direction.norm_squared();

    if t < 0.0 {
        point_circle(line.start, circle)
    } else if t > 1.0 {
        point_circle(line.end, circle)
    } else {
        local.dot(&normalize(face_vector(direction))).abs() <= circle.radius
    }
}

/// Circle against axis-aligned rectangle
pub fn circle_rectangle(circle: &Circle, rect: &Rectangle) -> bool {
    let center = circle.position;
    let radius = circle.radius;
    let min = rect.min();
    let max = rect.max();

    if !intersect(center.x - radius, center.x + radius, min.x, max.x)
        || !intersect(center.y - radius, center.y + radius, min.y, max.y)
    {
        return false;
    }

    nearest_vertex_axis_overlaps(circle, &rect.corners())
}

/// Circle against clockwise convex polygon
pub fn circle_polygon(circle: &Circle, polygon: &[Vec2]) -> bool {
    for (start, end) in edges(polygon) {
        let inward = normalize(face_vector(end - start));
        if (circle.position - start).dot(&inward) < -circle.radius {
            return false;
        }
    }

    nearest_vertex_axis_overlaps(circle, polygon)
}

/// Axis-aligned rectangle against segment
pub fn rectangle_line(rect: &Rectangle, line: &Line) -> bool {
    let segment = line.points();
    if !Aabb::new(rect.min(), rect.max()).intersects(&Aabb::from_points(&segment)) {
        return false;
    }

    let corners = rect.corners();
    let direction = line.direction();
    [face_vector(direction), direction]
        .into_iter()
        .all(|axis| !separates(&corners, &segment, axis))
}

/// Axis-aligned rectangle against axis-aligned rectangle
pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    intersect(a_min.x, a_max.x, b_min.x, b_max.x) && intersect(a_min.y, a_max.y, b_min.y, b_max.y)
}

/// Axis-aligned rectangle against convex polygon
pub fn rectangle_polygon(rect: &Rectangle, polygon: &[Vec2]) -> bool {
    polygon_polygon(&rect.corners(), polygon)
}

/// Convex polygon against convex polygon (separating axis theorem)
///
/// Overlap is reported only when no edge normal of either polygon separates them.
pub fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> bool {
    if !Aabb::from_points(a).intersects(&Aabb::from_points(b)) {
        return false;
    }

    !edges(a)
        .chain(edges(b))
        .any(|(start, end)| separates(a, b, face_vector(end - start)))
}

/// Clockwise convex polygon against segment
///
/// After the segment-normal check, each polygon edge only needs a one-sided
/// test: the segment is rejected when both endpoints lie outside that edge.
pub fn polygon_line(polygon: &[Vec2], line: &Line) -> bool {
    let normal = face_vector(line.direction());
    let (min, max) = project(polygon, normal);
    let line_root = line.start.dot(&normal);
    if !intersect(min, max, line_root, line_root) {
        return false;
    }

    edges(polygon).all(|(start, end)| {
        let axis = face_vector(end - start);
        let axis_root = start.dot(&axis);
        line.start.dot(&axis).max(line.end.dot(&axis)) >= axis_root
    })
}

/// Side offsets of `other`'s endpoints from `line`, measured along its unit normal
fn side_offsets(line: &Line, other: &Line) -> (f32, f32) {
    let normal = normalize(face_vector(line.direction()));
    let root = line.start.dot(&normal);
    (other.start.dot(&normal) - root, other.end.dot(&normal) - root)
}

fn brackets(a: f32, b: f32) -> bool {
    (a <= ON_LINE_EPSILON && b >= -ON_LINE_EPSILON) || (a >= -ON_LINE_EPSILON && b <= ON_LINE_EPSILON)
}

/// Segment against segment
///
/// Each segment's endpoints must sit on opposite sides of (or on) the other's
/// line. Collinear segments fall back to an interval test along the line.
pub fn line_line(a: &Line, b: &Line) -> bool {
    let (b_start, b_end) = side_offsets(a, b);
    if b_start.abs() <= ON_LINE_EPSILON && b_end.abs() <= ON_LINE_EPSILON {
        let axis = a.direction();
        return !separates(&a.points(), &b.points(), axis);
    }
    if !brackets(b_start, b_end) {
        return false;
    }

    let (a_start, a_end) = side_offsets(b, a);
    brackets(a_start, a_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, size: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x, y),
            Vec2::new(x + size, y),
            Vec2::new(x + size, y + size),
            Vec2::new(x, y + size),
        ]
    }

    /// Clockwise (screen) diamond centered on `center`
    fn diamond(center: Vec2, radius: f32) -> Vec<Vec2> {
        vec![
            center + Vec2::new(radius, 0.0),
            center + Vec2::new(0.0, radius),
            center + Vec2::new(-radius, 0.0),
            center + Vec2::new(0.0, -radius),
        ]
    }

    fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
        Line::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    #[test]
    fn test_point_point_unit_disc() {
        assert!(point_point(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)));
        assert!(point_point(Vec2::new(0.0, 0.0), Vec2::new(0.6, 0.6)));
        assert!(!point_point(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.1)));
    }

    #[test]
    fn test_point_line_tolerance() {
        let segment = line(0.0, 0.0, 10.0, 0.0);

        assert!(point_line(Vec2::new(5.0, 0.0), &segment));
        assert!(point_line(Vec2::new(5.0, 1.5), &segment));
        assert!(!point_line(Vec2::new(5.0, 1.6), &segment));
        assert!(point_line(Vec2::new(-1.4, 0.0), &segment));
        assert!(point_line(Vec2::new(11.5, 0.0), &segment));
        assert!(!point_line(Vec2::new(11.6, 0.0), &segment));
    }

    #[test]
    fn test_point_rectangle_and_circle_boundaries() {
        let rect = Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0));
        assert!(point_rectangle(Vec2::new(10.0, 5.0), &rect));
        assert!(!point_rectangle(Vec2::new(10.0, 5.1), &rect));

        let circle = Circle::new(Vec2::new(0.0, 0.0), 5.0);
        assert!(point_circle(Vec2::new(3.0, 4.0), &circle));
        assert!(!point_circle(Vec2::new(3.0, 4.1), &circle));
    }

    #[test]
    fn test_point_rectangle_every_side() {
        let rect = Rectangle::new(Vec2::new(-2.0, 3.0), Vec2::new(4.0, 6.0));

        for corner in rect.corners() {
            assert!(point_rectangle(corner, &rect));
        }
        assert!(!point_rectangle(Vec2::new(-2.1, 5.0), &rect));
        assert!(!point_rectangle(Vec2::new(2.1, 5.0), &rect));
        assert!(!point_rectangle(Vec2::new(0.0, 2.9), &rect));
        assert!(!point_rectangle(Vec2::new(0.0, 9.1), &rect));
    }

    #[test]
    fn test_point_polygon() {
        let polygon = square(0.0, 0.0, 10.0);

        assert!(point_polygon(Vec2::new(5.0, 5.0), &polygon));
        assert!(point_polygon(Vec2::new(10.0, 5.0), &polygon));
        assert!(!point_polygon(Vec2::new(15.0, 5.0), &polygon));
        assert!(!point_polygon(Vec2::new(5.0, -0.1), &polygon));
    }

    #[test]
    fn test_point_polygon_counter_clockwise_is_wrong() {
        let mut polygon = square(0.0, 0.0, 10.0);
        polygon.reverse();

        // Raw counter-clockwise input puts every face vector outward
        assert!(!point_polygon(Vec2::new(5.0, 5.0), &polygon));
    }

    #[test]
    fn test_circle_circle_boundary() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 5.0);

        assert!(circle_circle(&a, &Circle::new(Vec2::new(8.0, 0.0), 3.0)));
        assert!(!circle_circle(&a, &Circle::new(Vec2::new(8.01, 0.0), 3.0)));
    }

    #[test]
    fn test_circle_line_regions() {
        let segment = line(0.0, 0.0, 10.0, 0.0);

        // Beside the segment
        assert!(circle_line(&Circle::new(Vec2::new(5.0, 2.0), 2.0), &segment));
        assert!(!circle_line(&Circle::new(Vec2::new(5.0, 2.1), 2.0), &segment));
        // Past the end: endpoint distance decides, not the infinite line
        assert!(circle_line(&Circle::new(Vec2::new(12.0, 0.0), 2.0), &segment));
        assert!(!circle_line(&Circle::new(Vec2::new(12.0, 1.0), 2.0), &segment));
        assert!(!circle_line(&Circle::new(Vec2::new(-2.0, 1.5), 2.0), &segment));
    }

    #[test]
    fn test_circle_rectangle_corner_region() {
        let rect = Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        // Axis intervals overlap but the corner is out of reach
        assert!(!circle_rectangle(&Circle::new(Vec2::new(13.0, 13.0), 4.0), &rect));
        assert!(circle_rectangle(&Circle::new(Vec2::new(13.0, 13.0), 5.0), &rect));
        // Edge region
        assert!(circle_rectangle(&Circle::new(Vec2::new(5.0, 13.0), 3.0), &rect));
        assert!(!circle_rectangle(&Circle::new(Vec2::new(5.0, 13.5), 3.0), &rect));
        // Fully inside
        assert!(circle_rectangle(&Circle::new(Vec2::new(5.0, 5.0), 1.0), &rect));
    }

    #[test]
    fn test_circle_polygon() {
        let polygon = diamond(Vec2::new(0.0, 0.0), 10.0);

        assert!(circle_polygon(&Circle::new(Vec2::new(0.0, 0.0), 1.0), &polygon));
        // Facing an edge: distance from (10,10) to x + y = 10 is 10 / sqrt(2)
        assert!(circle_polygon(&Circle::new(Vec2::new(10.0, 10.0), 7.1), &polygon));
        assert!(!circle_polygon(&Circle::new(Vec2::new(10.0, 10.0), 7.0), &polygon));
        // Near a vertex
        assert!(circle_polygon(&Circle::new(Vec2::new(12.0, 0.0), 2.0), &polygon));
        assert!(!circle_polygon(&Circle::new(Vec2::new(12.5, 0.0), 2.0), &polygon));
    }

    #[test]
    fn test_rectangle_line() {
        let rect = Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        assert!(rectangle_line(&rect, &line(-5.0, 5.0, 15.0, 5.0)));
        assert!(rectangle_line(&rect, &line(2.0, 2.0, 3.0, 3.0)));
        // Diagonal that clips the bounding box but misses the corner
        assert!(!rectangle_line(&rect, &line(12.0, 9.0, 9.0, 12.0)));
        assert!(rectangle_line(&rect, &line(12.0, 8.0, 8.0, 12.0)));
        assert!(rectangle_line(&rect, &line(11.0, 8.0, 8.0, 11.0)));
        assert!(!rectangle_line(&rect, &line(11.0, 0.0, 11.0, 10.0)));
    }

    #[test]
    fn test_rectangle_rectangle_axis_separation() {
        let a = Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        assert!(!rectangle_rectangle(&a, &Rectangle::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0))));
        assert!(rectangle_rectangle(&a, &Rectangle::new(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0))));
        assert!(!rectangle_rectangle(&a, &Rectangle::new(Vec2::new(5.0, 11.0), Vec2::new(10.0, 10.0))));
    }

    #[test]
    fn test_polygon_polygon_needs_diagonal_axis() {
        let block = square(0.0, 0.0, 10.0);

        // Bounding boxes overlap, but the diamond's edge x + y = 23 separates
        assert!(!polygon_polygon(&block, &diamond(Vec2::new(14.0, 14.0), 5.0)));
        assert!(polygon_polygon(&block, &diamond(Vec2::new(11.0, 11.0), 5.0)));
        // Left vertex one unit inside the block
        assert!(polygon_polygon(&block, &diamond(Vec2::new(14.0, 5.0), 5.0)));
        assert!(!polygon_polygon(&block, &diamond(Vec2::new(16.0, 5.0), 5.0)));
    }

    #[test]
    fn test_rectangle_polygon_matches_polygon_polygon() {
        let rect = Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let shape = diamond(Vec2::new(14.0, 14.0), 5.0);

        assert_eq!(rectangle_polygon(&rect, &shape), polygon_polygon(&rect.corners(), &shape));
    }

    #[test]
    fn test_polygon_line() {
        let polygon = diamond(Vec2::new(0.0, 0.0), 10.0);

        // Crossing through
        assert!(polygon_line(&polygon, &line(-20.0, 0.0, 20.0, 0.0)));
        // Fully inside
        assert!(polygon_line(&polygon, &line(-1.0, -1.0, 1.0, 1.0)));
        // Parallel to an edge, outside
        assert!(!polygon_line(&polygon, &line(10.0, 5.0, 5.0, 10.0)));
        // On the supporting line of an edge, but past the vertex
        assert!(!polygon_line(&polygon, &line(5.0, 15.0, 10.0, 20.0)));
        // Beyond a vertex
        assert!(!polygon_line(&polygon, &line(12.0, -3.0, 12.0, 3.0)));
        // Touching a vertex
        assert!(polygon_line(&polygon, &line(10.0, -3.0, 10.0, 3.0)));
    }

    #[test]
    fn test_line_line() {
        let a = line(0.0, 0.0, 10.0, 10.0);

        assert!(line_line(&a, &line(0.0, 10.0, 10.0, 0.0)));
        assert!(!line_line(&a, &line(0.0, 10.0, 4.0, 6.5)));
        // T-junction touch
        assert!(line_line(&a, &line(5.0, 5.0, 10.0, 0.0)));
        // Parallel
        assert!(!line_line(&a, &line(0.0, 1.0, 10.0, 11.0)));
    }

    #[test]
    fn test_line_line_collinear() {
        let a = line(0.0, 0.0, 10.0, 0.0);

        assert!(line_line(&a, &line(5.0, 0.0, 15.0, 0.0)));
        assert!(line_line(&a, &line(10.0, 0.0, 15.0, 0.0)));
        assert!(!line_line(&a, &line(11.0, 0.0, 15.0, 0.0)));
    }
}
