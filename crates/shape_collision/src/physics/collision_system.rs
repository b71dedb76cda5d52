//! Core collision system
//!
//! Maps a pair of shapes onto the matching narrow-phase test and applies the
//! failure policy for malformed input. The system keeps no state between
//! calls: its configuration and log sink are read-only, so one instance can
//! be shared across threads as long as callers don't mutate shapes mid-call.

use std::fmt;

use thiserror::Error;

use crate::config::{CollisionConfig, WindingPolicy};
use crate::foundation::logging::{trace, CollisionLog, LogFacade, LOG_TARGET};
use crate::foundation::math::{Vec2, FULL_TURN_DEGREES};
use crate::physics::collision::narrow_phase as overlap;
use crate::physics::collision::primitives::{Ray, RayHit, TargetHit};
use crate::physics::collision::raycast;
use crate::physics::collision::shape::{
    Circle, CollisionShape, Geometry, Line, Polygon, Rectangle, ShapeKind, Winding,
};

/// Collision errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// A shape could not be tested (kind mismatch or degenerate geometry)
    #[error("Invalid collision shape: {0}")]
    InvalidShape(String),

    /// Ray heading outside `[0, 360)` degrees
    #[error("Ray angle {0} is outside [0, 360) degrees")]
    AngleOutOfRange(f32),
}

/// A shape resolved into the form the tests consume
enum Resolved<'a> {
    Point(Vec2),
    Line(&'a Line),
    Circle(&'a Circle),
    Rectangle(&'a Rectangle),
    /// World-space vertices in clockwise screen order
    Polygon(Vec<Vec2>),
}

/// Stateless narrow-phase collision system
///
/// ```
/// use shape_collision::prelude::*;
///
/// let system = CollisionSystem::new(CollisionConfig::default());
/// let rect = Rectangle::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
///
/// assert!(system.point_overlaps(Vec2::new(5.0, 5.0), &rect).unwrap());
/// ```
pub struct CollisionSystem {
    config: CollisionConfig,
    log: Box<dyn CollisionLog>,
}

impl fmt::Debug for CollisionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionSystem")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

impl CollisionSystem {
    /// Create a collision system reporting through the `log` crate
    pub fn new(config: CollisionConfig) -> Self {
        Self::with_log(config, Box::new(LogFacade))
    }

    /// Create a collision system reporting malformed input to `log`
    pub fn with_log(config: CollisionConfig, log: Box<dyn CollisionLog>) -> Self {
        Self { config, log }
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Test whether two shapes overlap or touch
    ///
    /// Malformed shapes are logged; they produce `Ok(false)`, or
    /// `Err(CollisionError::InvalidShape)` when exceptions are raised.
    pub fn overlaps(
        &self,
        a: &dyn CollisionShape,
        b: &dyn CollisionShape,
    ) -> Result<bool, CollisionError> {
        let (a, b) = match (self.resolve(a), self.resolve(b)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(reason), _) | (_, Err(reason)) => return self.malformed(reason, false),
        };
        Ok(Self::dispatch(&a, &b))
    }

    /// Test whether a point lies on or inside a shape
    pub fn point_overlaps(
        &self,
        point: Vec2,
        shape: &dyn CollisionShape,
    ) -> Result<bool, CollisionError> {
        self.overlaps(&point, shape)
    }

    /// Cast a ray from `origin` heading `angle_degrees` at `target`
    ///
    /// Returns every intersection, nearest first. The heading must lie in
    /// `[0, 360)`; anything else fails regardless of configuration.
    pub fn raycast(
        &self,
        origin: Vec2,
        angle_degrees: f32,
        target: &dyn CollisionShape,
    ) -> Result<Vec<RayHit>, CollisionError> {
        let ray = Self::ray(origin, angle_degrees)?;
        match self.resolve(target) {
            Ok(target) => Ok(Self::cast(&ray, &target)),
            Err(reason) => self.malformed(reason, Vec::new()),
        }
    }

    /// Cast a ray and return only the closest hit
    pub fn raycast_first(
        &self,
        origin: Vec2,
        angle_degrees: f32,
        target: &dyn CollisionShape,
    ) -> Result<Option<RayHit>, CollisionError> {
        Ok(self.raycast(origin, angle_degrees, target)?.into_iter().next())
    }

    /// Cast one ray at many targets
    ///
    /// Hits from every target are merged nearest first and tagged with the
    /// target's index. Malformed targets contribute no hits unless exceptions
    /// are raised, in which case the first one fails the whole call.
    pub fn raycast_all(
        &self,
        origin: Vec2,
        angle_degrees: f32,
        targets: &[&dyn CollisionShape],
    ) -> Result<Vec<TargetHit>, CollisionError> {
        let ray = Self::ray(origin, angle_degrees)?;

        let mut hits = Vec::new();
        for (index, target) in targets.iter().enumerate() {
            let target_hits = match self.resolve(*target) {
                Ok(resolved) => Self::cast(&ray, &resolved),
                Err(reason) => self.malformed(reason, Vec::new())?,
            };
            hits.extend(target_hits.into_iter().map(|hit| TargetHit { target: index, hit }));
        }

        hits.sort_by(|a, b| a.hit.distance.total_cmp(&b.hit.distance));
        Ok(hits)
    }

    fn ray(origin: Vec2, angle_degrees: f32) -> Result<Ray, CollisionError> {
        if (0.0..FULL_TURN_DEGREES).contains(&angle_degrees) {
            Ok(Ray::new(origin, angle_degrees))
        } else {
            Err(CollisionError::AngleOutOfRange(angle_degrees))
        }
    }

    /// Apply the failure policy: log, then either raise or fall back
    fn malformed<T>(&self, reason: String, fallback: T) -> Result<T, CollisionError> {
        self.log.error(&format!("invalid collision shape: {reason}"));
        if self.config.raise_collision_exceptions {
            Err(CollisionError::InvalidShape(reason))
        } else {
            Ok(fallback)
        }
    }

    /// Check a shape and convert it into the form the tests consume
    fn resolve<'a>(&self, shape: &'a dyn CollisionShape) -> Result<Resolved<'a>, String> {
        let geometry = shape.geometry();
        let claimed = shape.shape_kind();
        if geometry.kind() != claimed {
            return Err(format!(
                "shape reports kind {claimed} but carries {} geometry",
                geometry.kind()
            ));
        }

        if self.config.validate_geometry {
            Self::check_geometry(&geometry)?;
        }

        Ok(match geometry {
            Geometry::Point(point) => Resolved::Point(point),
            Geometry::Line(line) => Resolved::Line(line),
            Geometry::Circle(circle) => Resolved::Circle(circle),
            Geometry::Rectangle(rect) => Resolved::Rectangle(rect),
            Geometry::Polygon(polygon) => Resolved::Polygon(self.clockwise_points(polygon)?),
        })
    }

    /// World-space vertices in the order the tests expect
    fn clockwise_points(&self, polygon: &Polygon) -> Result<Vec<Vec2>, String> {
        let mut points = polygon.world_points();
        if self.config.winding == WindingPolicy::Trust {
            return Ok(points);
        }

        match polygon.winding() {
            Winding::Clockwise | Winding::Degenerate => Ok(points),
            Winding::CounterClockwise => match self.config.winding {
                WindingPolicy::Reject => Err("polygon points are counter-clockwise".to_string()),
                _ => {
                    self.log.warning("counter-clockwise polygon reversed before testing");
                    points.reverse();
                    Ok(points)
                }
            },
        }
    }

    /// Reject geometry the tests cannot give a meaningful answer for
    fn check_geometry(geometry: &Geometry<'_>) -> Result<(), String> {
        fn finite(points: &[Vec2]) -> bool {
            points.iter().all(|point| point.x.is_finite() && point.y.is_finite())
        }

        match geometry {
            Geometry::Point(point) => {
                if !finite(&[*point]) {
                    return Err("point has non-finite coordinates".to_string());
                }
            }
            Geometry::Line(line) => {
                if !finite(&line.points()) {
                    return Err("line has non-finite endpoints".to_string());
                }
                if line.direction().norm_squared() == 0.0 {
                    return Err("line has zero length".to_string());
                }
            }
            Geometry::Circle(circle) => {
                if !finite(&[circle.position]) || !circle.radius.is_finite() {
                    return Err("circle has non-finite position or radius".to_string());
                }
                if circle.radius < 0.0 {
                    return Err(format!("circle has negative radius {}", circle.radius));
                }
            }
            Geometry::Rectangle(rect) => {
                if !finite(&[rect.position, rect.size]) {
                    return Err("rectangle has non-finite position or size".to_string());
                }
                if rect.size.x < 0.0 || rect.size.y < 0.0 {
                    return Err(format!(
                        "rectangle has negative size ({}, {})",
                        rect.size.x, rect.size.y
                    ));
                }
            }
            Geometry::Polygon(polygon) => {
                if polygon.points.len() < 3 {
                    return Err(format!(
                        "polygon needs at least 3 points, got {}",
                        polygon.points.len()
                    ));
                }
                if !finite(&[polygon.position]) || !finite(&polygon.points) {
                    return Err("polygon has non-finite points".to_string());
                }
                let n = polygon.points.len();
                if (0..n).any(|i| polygon.points[i] == polygon.points[(i + 1) % n]) {
                    return Err("polygon has a zero-length edge".to_string());
                }
                if polygon.winding() == Winding::Degenerate {
                    return Err("polygon has zero area".to_string());
                }
            }
        }
        Ok(())
    }

    /// Route a resolved pair to its narrow-phase test
    fn dispatch(a: &Resolved<'_>, b: &Resolved<'_>) -> bool {
        trace!(target: LOG_TARGET, "overlap test: {} vs {}", a.kind(), b.kind());

        match (a, b) {
            (Resolved::Point(p), Resolved::Point(q)) => overlap::point_point(*p, *q),
            (Resolved::Point(p), Resolved::Line(line))
            | (Resolved::Line(line), Resolved::Point(p)) => overlap::point_line(*p, line),
            (Resolved::Point(p), Resolved::Circle(circle))
            | (Resolved::Circle(circle), Resolved::Point(p)) => overlap::point_circle(*p, circle),
            (Resolved::Point(p), Resolved::Rectangle(rect))
            | (Resolved::Rectangle(rect), Resolved::Point(p)) => overlap::point_rectangle(*p, rect),
            (Resolved::Point(p), Resolved::Polygon(polygon))
            | (Resolved::Polygon(polygon), Resolved::Point(p)) => overlap::point_polygon(*p, polygon),

            (Resolved::Line(a), Resolved::Line(b)) => overlap::line_line(a, b),
            (Resolved::Line(line), Resolved::Circle(circle))
            | (Resolved::Circle(circle), Resolved::Line(line)) => overlap::circle_line(circle, line),
            (Resolved::Line(line), Resolved::Rectangle(rect))
            | (Resolved::Rectangle(rect), Resolved::Line(line)) => overlap::rectangle_line(rect, line),
            (Resolved::Line(line), Resolved::Polygon(polygon))
            | (Resolved::Polygon(polygon), Resolved::Line(line)) => overlap::polygon_line(polygon, line),

            (Resolved::Circle(a), Resolved::Circle(b)) => overlap::circle_circle(a, b),
            (Resolved::Circle(circle), Resolved::Rectangle(rect))
            | (Resolved::Rectangle(rect), Resolved::Circle(circle)) => overlap::circle_rectangle(circle, rect),
            (Resolved::Circle(circle), Resolved::Polygon(polygon))
            | (Resolved::Polygon(polygon), Resolved::Circle(circle)) => overlap::circle_polygon(circle, polygon),

            (Resolved::Rectangle(a), Resolved::Rectangle(b)) => overlap::rectangle_rectangle(a, b),
            (Resolved::Rectangle(rect), Resolved::Polygon(polygon))
            | (Resolved::Polygon(polygon), Resolved::Rectangle(rect)) => overlap::rectangle_polygon(rect, polygon),

            (Resolved::Polygon(a), Resolved::Polygon(b)) => overlap::polygon_polygon(a, b),
        }
    }

    /// Route a ray to the test for the target's kind
    fn cast(ray: &Ray, target: &Resolved<'_>) -> Vec<RayHit> {
        trace!(target: LOG_TARGET, "ray cast at {} heading {}", target.kind(), ray.angle);

        match target {
            Resolved::Point(point) => raycast::ray_point(ray, *point),
            Resolved::Line(line) => raycast::ray_line(ray, line),
            Resolved::Circle(circle) => raycast::ray_circle(ray, circle),
            Resolved::Rectangle(rect) => raycast::ray_rectangle(ray, rect),
            Resolved::Polygon(polygon) => raycast::ray_polygon(ray, polygon),
        }
    }
}

impl Resolved<'_> {
    fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Line(_) => ShapeKind::Line,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }
}
