//! Narrow-phase collision detection between 2D shapes
//!
//! Every test is a pure function of its two inputs. Shapes are borrowed,
//! converted to world-space point sets where needed, tested, and dropped.
//!
//! # Module Organization
//!
//! - [`shape`] - Shape value types, the [`CollisionShape`] capability and bounds
//! - [`primitives`] - Rays, ray hits and edge helpers
//! - [`narrow_phase`] - Exact overlap tests for every pair of shape kinds
//! - [`raycast`] - Ray casting against every shape kind
//!
//! # Key Types
//!
//! - [`CollisionShape`] - Implemented by anything that can be tested
//! - [`Geometry`] - Borrowed view matched exhaustively at every dispatch site
//! - [`Ray`], [`RayHit`] - Ray casting inputs and results

pub mod shape;
pub mod primitives;
pub mod narrow_phase;
pub mod raycast;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use shape::{Aabb, Circle, CollisionShape, Geometry, Line, Polygon, Rectangle, Shape, ShapeKind, Winding};
pub use primitives::{Ray, RayHit, TargetHit};
pub use narrow_phase::{POINT_PROJECTION_TOLERANCE, POINT_RADIUS};
