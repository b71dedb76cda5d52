//! # Shape Collision
//!
//! Narrow-phase 2D collision detection and ray casting between five shape
//! families: points, line segments, circles, axis-aligned rectangles and
//! convex polygons.
//!
//! ## Features
//!
//! - **Exact Overlap Tests**: Every pair of shape kinds, closed-interval
//!   ("collide on contact") semantics
//! - **Separating Axis Theorem**: Rectangle and polygon tests project onto edge normals
//! - **Ray Casting**: Nearest-first intersection points against every kind
//! - **Stateless**: Pure functions over borrowed geometry, safe to call from many threads
//! - **Configurable Failure Policy**: Malformed shapes either raise or return `false`
//!
//! ## Quick Start
//!
//! ```rust
//! use shape_collision::prelude::*;
//!
//! let system = CollisionSystem::new(CollisionConfig::default());
//!
//! let a = Circle::new(Vec2::new(0.0, 0.0), 5.0);
//! let b = Circle::new(Vec2::new(8.0, 0.0), 3.0);
//! assert!(system.overlaps(&a, &b).unwrap());
//!
//! let hits = system.raycast(Vec2::new(-20.0, 0.0), 0.0, &a).unwrap();
//! assert_eq!(hits.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError, WindingPolicy},
        foundation::{
            logging::{CollisionLog, LogFacade},
            math::Vec2,
        },
        physics::{
            Aabb, Circle, CollisionError, CollisionShape, CollisionSystem, Geometry, Line,
            Polygon, Ray, RayHit, Rectangle, Shape, ShapeKind, TargetHit, Winding,
        },
    };
}
