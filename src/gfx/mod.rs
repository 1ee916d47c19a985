//! # Graphics Module
//!
//! Everything that deals with space: the normalized scene, the camera and its
//! choreography, picking, and projection back to the screen.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Axis-aligned bounds and ray tests
//! - **Scene** ([`scene`]) - Input scene graph, part registry and normalizer
//! - **Camera System** ([`camera`]) - Orbit camera, manual controls, cinematic
//!   transitions and the autonomous tour
//! - **Picking** ([`picking`]) - Pointer-to-part hit testing
//! - **HUD** ([`hud`]) - Anchor projection for annotation overlays
//!
//! Rendering itself belongs to the host; this module only hands it matrices
//! and screen positions.

pub mod camera;
pub mod geometry;
pub mod hud;
pub mod picking;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use geometry::Aabb;
pub use hud::{HudProjector, ScreenPoint};
pub use scene::Scene;
