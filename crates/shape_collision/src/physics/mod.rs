//! Physics module for collision detection
//!
//! Provides exact narrow-phase overlap tests and ray casting for points,
//! line segments, circles, axis-aligned rectangles and convex polygons.

pub mod collision;
pub mod collision_system;

pub use collision::{
    Aabb,
    Circle,
    CollisionShape,
    Geometry,
    Line,
    Polygon,
    Ray,
    RayHit,
    Rectangle,
    Shape,
    ShapeKind,
    TargetHit,
    Winding,
};
pub use collision_system::{CollisionError, CollisionSystem};
