//! # Geometry
//!
//! Bounding-volume math shared by the normalizer, the picker and the camera.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use cicerone::gfx::geometry::Aabb;
//!
//! let a = Aabb::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 1.0));
//! let b = Aabb::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(4.0, 3.0, 1.0));
//! assert_eq!(a.union(&b).max_extent(), 4.0);
//! ```

pub mod bounds;

pub use bounds::Aabb;
