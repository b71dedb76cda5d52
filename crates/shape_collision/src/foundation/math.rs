//! Math utilities and types
//!
//! Vector algebra shared by the overlap tests and the ray caster. Every helper
//! is a pure function over `Vec2` values; none of them allocate.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// A full turn in degrees
pub const FULL_TURN_DEGREES: f32 = 360.0;

/// Re-express `point` relative to `origin`
#[inline]
pub fn to_local(point: Vec2, origin: Vec2) -> Vec2 {
    point - origin
}

/// Inverse of [`to_local`]: convert a point relative to `origin` back to world space
#[inline]
pub fn to_global(local_point: Vec2, origin: Vec2) -> Vec2 {
    local_point + origin
}

/// Dot product of two vectors
#[inline]
pub fn dot_product(a: Vec2, b: Vec2) -> f32 {
    a.dot(&b)
}

/// Squared length of a vector
#[inline]
pub fn length_squared(a: Vec2) -> f32 {
    a.norm_squared()
}

/// Unit vector pointing along `a`
///
/// A zero-length input yields NaN components; callers guarantee non-degenerate input.
#[inline]
pub fn normalize(a: Vec2) -> Vec2 {
    a / a.norm()
}

/// Perpendicular of `a`, rotated a quarter turn: `(-y, x)`
///
/// For an edge walked with positive screen-space winding (see
/// [`crate::physics::Winding`]) this points towards the polygon interior.
#[inline]
pub fn face_vector(a: Vec2) -> Vec2 {
    Vec2::new(-a.y, a.x)
}

/// Wrap any angle in degrees into `[0, 360)`
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}

/// Heading of `a` in degrees, in `[0, 360)`
pub fn angle(a: Vec2) -> f32 {
    normalize_angle(a.y.atan2(a.x).to_degrees())
}

/// Unit vector for a heading given in degrees
///
/// Quarter turns come back exact, so axis-aligned rays carry no sideways drift.
#[allow(clippy::float_cmp)]
pub fn direction_from_angle(degrees: f32) -> Vec2 {
    let heading = normalize_angle(degrees);
    if heading == 0.0 {
        Vec2::new(1.0, 0.0)
    } else if heading == 90.0 {
        Vec2::new(0.0, 1.0)
    } else if heading == 180.0 {
        Vec2::new(-1.0, 0.0)
    } else if heading == 270.0 {
        Vec2::new(0.0, -1.0)
    } else {
        let (sin, cos) = heading.to_radians().sin_cos();
        Vec2::new(cos, sin)
    }
}

/// Rotate `a` about the origin by `degrees`
pub fn rotate(a: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(a.x * cos - a.y * sin, a.x * sin + a.y * cos)
}

/// One-dimensional overlap test between `[min_a, max_a]` and `[min_b, max_b]`
///
/// Intervals are closed, so touching intervals overlap.
#[inline]
pub fn intersect(min_a: f32, max_a: f32, min_b: f32, max_b: f32) -> bool {
    if min_a < min_b {
        max_a >= min_b
    } else {
        max_b >= min_a
    }
}

/// True if heading `target` lies on the arc spanned by headings `a` and `b`
///
/// The shorter arc is used when the span is at most 180 degrees, otherwise
/// the complementary arc. A segment seen from a point off its line always
/// subtends less than a half turn, so this is the arc the segment covers.
pub fn intersect_angles(target: f32, a: f32, b: f32) -> bool {
    let target = normalize_angle(target);
    let low = normalize_angle(a.min(b));
    let high = normalize_angle(a.max(b));
    let (low, high) = (low.min(high), low.max(high));

    if high - low <= FULL_TURN_DEGREES / 2.0 {
        target >= low && target <= high
    } else {
        target <= low || target >= high
    }
}

/// Project every point onto `axis`, returning the `(min, max)` interval
pub fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    points.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), point| {
        let q = point.dot(&axis);
        (min.min(q), max.max(q))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_local_global_round_trip() {
        let origin = Vec2::new(12.5, -3.0);
        let local = Vec2::new(-4.25, 7.75);

        let back = to_local(to_global(local, origin), origin);
        assert_relative_eq!(back, local, epsilon = EPSILON);
    }

    #[test]
    fn test_face_vector_is_perpendicular() {
        let edge = Vec2::new(3.0, 4.0);
        let face = face_vector(edge);

        assert_eq!(face, Vec2::new(-4.0, 3.0));
        assert_relative_eq!(dot_product(edge, face), 0.0);
        assert_relative_eq!(length_squared(face), length_squared(edge));
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let unit = normalize(Vec2::new(0.0, 5.0));
        assert_relative_eq!(unit, Vec2::new(0.0, 1.0), epsilon = EPSILON);

        let degenerate = normalize(Vec2::zeros());
        assert!(degenerate.x.is_nan() && degenerate.y.is_nan());
    }

    #[test]
    fn test_angle_quadrants() {
        assert_relative_eq!(angle(Vec2::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(angle(Vec2::new(0.0, 1.0)), 90.0, epsilon = EPSILON);
        assert_relative_eq!(angle(Vec2::new(-1.0, 0.0)), 180.0, epsilon = EPSILON);
        assert_relative_eq!(angle(Vec2::new(0.0, -1.0)), 270.0, epsilon = EPSILON);
        assert_relative_eq!(angle(Vec2::new(1.0, -1.0)), 315.0, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert_relative_eq!(normalize_angle(-90.0), 270.0);
        assert_relative_eq!(normalize_angle(720.0), 0.0);
        assert!(normalize_angle(-1e-9) < FULL_TURN_DEGREES);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate(Vec2::new(1.0, 0.0), 90.0);
        assert_relative_eq!(rotated, Vec2::new(0.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(direction_from_angle(180.0), Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_direction_from_angle_quarter_turns_are_exact() {
        assert_eq!(direction_from_angle(0.0), Vec2::new(1.0, 0.0));
        assert_eq!(direction_from_angle(90.0), Vec2::new(0.0, 1.0));
        assert_eq!(direction_from_angle(180.0), Vec2::new(-1.0, 0.0));
        assert_eq!(direction_from_angle(270.0), Vec2::new(0.0, -1.0));
        assert_eq!(direction_from_angle(-90.0), Vec2::new(0.0, -1.0));

        let diagonal = direction_from_angle(45.0);
        assert_relative_eq!(diagonal.norm(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(diagonal.x, diagonal.y, epsilon = EPSILON);
    }

    #[test]
    fn test_intersect_closed_intervals() {
        assert!(intersect(0.0, 10.0, 5.0, 15.0));
        assert!(intersect(5.0, 15.0, 0.0, 10.0));
        assert!(intersect(0.0, 10.0, 10.0, 20.0)); // touching
        assert!(!intersect(0.0, 10.0, 10.5, 20.0));
        assert!(!intersect(20.0, 30.0, 0.0, 10.0));
    }

    #[test]
    fn test_intersect_angles_short_and_wrapped_arcs() {
        assert!(intersect_angles(45.0, 10.0, 80.0));
        assert!(!intersect_angles(100.0, 10.0, 80.0));

        // Span of 340 degrees means the segment covers the arc through 0
        assert!(intersect_angles(0.0, 350.0, 10.0));
        assert!(intersect_angles(355.0, 10.0, 350.0));
        assert!(!intersect_angles(180.0, 350.0, 10.0));
    }

    #[test]
    fn test_project_interval() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0), Vec2::new(-1.0, 3.0)];
        let (min, max) = project(&points, Vec2::new(1.0, 0.0));

        assert_relative_eq!(min, -1.0);
        assert_relative_eq!(max, 4.0);
    }
}
