//! Collision shape value types
//!
//! Shapes are plain values owned by whoever built them. The collision system
//! only ever borrows them for the duration of one call.
//!
//! Coordinate convention: circles and rectangles carry a world-space
//! `position` directly, lines carry world-space endpoints, and polygons keep
//! their points relative to `position`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{self, Vec2};
use crate::physics::collision_system::{CollisionError, CollisionSystem};
use super::primitives::RayHit;

/// The closed set of collidable shape families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A bare point
    Point,
    /// A line segment
    Line,
    /// A circle
    Circle,
    /// An axis-aligned rectangle
    Rectangle,
    /// A convex polygon
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// A line segment between two world-space points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// First endpoint
    pub start: Vec2,
    /// Second endpoint
    pub end: Vec2,
}

impl Line {
    /// Creates a segment from `start` to `end`
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Length of the segment
    pub fn length(&self) -> f32 {
        self.direction().norm()
    }

    /// Both endpoints
    pub fn points(&self) -> [Vec2; 2] {
        [self.start, self.end]
    }
}

/// A circle with a world-space center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center of the circle
    pub position: Vec2,
    /// Radius, expected to be non-negative
    pub radius: f32,
}

impl Circle {
    /// Creates a circle
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// An axis-aligned rectangle; rotation is not supported
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner in world space (Y grows downward)
    pub position: Vec2,
    /// Width and height, expected to be non-negative
    pub size: Vec2,
}

impl Rectangle {
    /// Creates a rectangle from its top-left corner and size
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Smallest corner
    pub fn min(&self) -> Vec2 {
        self.position
    }

    /// Largest corner
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Corners in clockwise screen order, starting at the top-left
    pub fn corners(&self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]
    }
}

/// Vertex order of a polygon as seen on screen (Y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Positive shoelace area; the order every test expects
    Clockwise,
    /// Negative shoelace area
    CounterClockwise,
    /// Zero area: collinear or repeated points
    Degenerate,
}

/// A convex polygon whose points are stored relative to `position`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Origin offset applied to every point
    pub position: Vec2,
    /// Vertices in local space, clockwise on screen
    pub points: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon from an origin and local-space vertices
    pub fn new(position: Vec2, points: Vec<Vec2>) -> Self {
        Self { position, points }
    }

    /// Regular polygon centered on `position`, first vertex at `rotation` degrees
    pub fn regular(position: Vec2, radius: f32, sides: usize, rotation: f32) -> Self {
        let step = math::FULL_TURN_DEGREES / sides as f32;
        let points = (0..sides)
            .map(|i| math::direction_from_angle(rotation + step * i as f32) * radius)
            .collect();
        Self { position, points }
    }

    /// Vertices converted to world space
    pub fn world_points(&self) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|&point| math::to_global(point, self.position))
            .collect()
    }

    /// Shoelace area, positive for clockwise screen order
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        let twice_area: f32 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice_area * 0.5
    }

    /// Winding of the vertex list
    pub fn winding(&self) -> Winding {
        let area = self.signed_area();
        if area > 0.0 {
            Winding::Clockwise
        } else if area < 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Degenerate
        }
    }
}

/// Axis-aligned bounds used by the cheap pre-checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec2,
    /// Maximum corner of the bounding box
    pub max: Vec2,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point
    pub fn from_points(points: &[Vec2]) -> Self {
        let init = Self::new(
            Vec2::new(f32::INFINITY, f32::INFINITY),
            Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        );
        points.iter().fold(init, |bounds, point| Self {
            min: bounds.min.inf(point),
            max: bounds.max.sup(point),
        })
    }

    /// Check if this AABB contains a point (boundary inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if this AABB intersects another AABB (touching counts)
    pub fn intersects(&self, other: &Aabb) -> bool {
        math::intersect(self.min.x, self.max.x, other.min.x, other.max.x)
            && math::intersect(self.min.y, self.max.y, other.min.y, other.max.y)
    }
}

/// Borrowed view of a shape's geometry
///
/// This is the closed sum every dispatch site matches on.
#[derive(Debug, Clone, Copy)]
pub enum Geometry<'a> {
    /// A bare point
    Point(Vec2),
    /// A line segment
    Line(&'a Line),
    /// A circle
    Circle(&'a Circle),
    /// An axis-aligned rectangle
    Rectangle(&'a Rectangle),
    /// A convex polygon
    Polygon(&'a Polygon),
}

impl Geometry<'_> {
    /// Kind of the carried geometry
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Line(_) => ShapeKind::Line,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }
}

/// Anything that can take part in a collision test
///
/// Entities implement this to expose their resolved world geometry. The
/// reported kind must agree with the geometry; a mismatch is treated as a
/// malformed shape by [`CollisionSystem`].
pub trait CollisionShape {
    /// Kind this shape claims to be
    fn shape_kind(&self) -> ShapeKind;

    /// Geometry used by the tests
    fn geometry(&self) -> Geometry<'_>;

    /// Test whether this shape overlaps `other`
    fn collides_with(
        &self,
        other: &dyn CollisionShape,
        system: &CollisionSystem,
    ) -> Result<bool, CollisionError>
    where
        Self: Sized,
    {
        system.overlaps(self, other)
    }

    /// Cast a ray at this shape
    fn raycast(
        &self,
        origin: Vec2,
        angle_degrees: f32,
        system: &CollisionSystem,
    ) -> Result<Vec<RayHit>, CollisionError>
    where
        Self: Sized,
    {
        system.raycast(origin, angle_degrees, self)
    }
}

impl CollisionShape for Vec2 {
    fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn geometry(&self) -> Geometry<'_> {
        Geometry::Point(*self)
    }
}

impl CollisionShape for Line {
    fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn geometry(&self) -> Geometry<'_> {
        Geometry::Line(self)
    }
}

impl CollisionShape for Circle {
    fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn geometry(&self) -> Geometry<'_> {
        Geometry::Circle(self)
    }
}

impl CollisionShape for Rectangle {
    fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn geometry(&self) -> Geometry<'_> {
        Geometry::Rectangle(self)
    }
}

impl CollisionShape for Polygon {
    fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn geometry(&self) -> Geometry<'_> {
        Geometry::Polygon(self)
    }
}

/// Owned shape of any kind, for callers that store heterogeneous geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A bare point
    Point(Vec2),
    /// A line segment
    Line(Line),
    /// A circle
    Circle(Circle),
    /// An axis-aligned rectangle
    Rectangle(Rectangle),
    /// A convex polygon
    Polygon(Polygon),
}

impl CollisionShape for Shape {
    fn shape_kind(&self) -> ShapeKind {
        self.geometry().kind()
    }

    fn geometry(&self) -> Geometry<'_> {
        match self {
            Self::Point(point) => Geometry::Point(*point),
            Self::Line(line) => Geometry::Line(line),
            Self::Circle(circle) => Geometry::Circle(circle),
            Self::Rectangle(rect) => Geometry::Rectangle(rect),
            Self::Polygon(polygon) => Geometry::Polygon(polygon),
        }
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Self::Rectangle(rect)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}
