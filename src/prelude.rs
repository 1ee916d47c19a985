//! # Cicerone Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use cicerone::prelude::*;
//! use std::time::Instant;
//!
//! let mut viewer = cicerone::default();
//! let root = SceneNode::group(Some("Empty"));
//! viewer.load_asset("demo", &root);
//! viewer.frame(Instant::now());
//! for event in viewer.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

pub use crate::app::Viewer;
pub use crate::config::{CameraConfig, FitConfig, FitProfile, PatternSelection, TourConfig, ViewerConfig};
pub use crate::default;

pub use crate::editor::{
    Annotation, EditorStore, Environment, EnvironmentPatch, Group, MaterialOverride, MaterialProperty,
    TextureHandle, TextureSettings, TransformOverride,
};
pub use crate::error::{ConfigError, EditorError, StoreError, TextureError};
pub use crate::events::ViewerEvent;
pub use crate::gfx::camera::{ApproachPattern, CameraMode};
pub use crate::gfx::geometry::Aabb;
pub use crate::gfx::hud::ScreenPoint;
pub use crate::gfx::picking::{HitTester, PointerHit};
pub use crate::gfx::scene::{MeshHandle, Scene, SceneNode};
pub use crate::input::{InteractionEvent, KeyCommand};
pub use crate::store::{Datastore, JsonFileStore, MemoryStore};
