//! # Scene Module
//!
//! The addressable part set of a loaded asset, kept separate from the host
//! engine's own node objects.
//!
//! ## Key Components
//!
//! - [`SceneNode`] - The graph handed over by the external asset loader
//! - [`SceneNormalizer`] - Names, classifies and fits the loaded graph
//! - [`Scene`] - Arena of [`Part`]s addressed by [`PartId`] or unique name
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use cicerone::config::FitConfig;
//! use cicerone::gfx::geometry::Aabb;
//! use cicerone::gfx::scene::{MeshHandle, SceneNode, SceneNormalizer};
//!
//! let body = Aabb::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(4.0, 1.0, 2.0));
//! let root = SceneNode::group(Some("car"))
//!     .with_child(SceneNode::mesh(Some("Body"), MeshHandle(1), body));
//! let scene = SceneNormalizer::new(FitConfig::default()).normalize(&root);
//! assert_eq!(scene.get_object_names(), vec!["Body".to_string()]);
//! ```

pub mod graph;
pub mod normalizer;
pub mod part;
pub mod scene;

// Re-export main types
pub use graph::{MeshHandle, MeshSource, SceneNode, RESERVED_GROUND_NAME};
pub use normalizer::{FitTransform, SceneNormalizer};
pub use part::{Part, PartId};
pub use scene::{Scene, SceneStatistics};
