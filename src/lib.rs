// src/lib.rs
//! Cicerone
//!
//! Scene interaction and camera choreography for product-viewer style
//! applications: normalizes a loaded asset, maps pointer hits to selections
//! and annotations, records undoable edits and flies a cinematic camera
//! between points of interest. Rendering stays with the host.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod events;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod store;

// Re-export main types for convenience
pub use app::Viewer;
pub use config::ViewerConfig;

/// Creates a viewer with the default configuration
pub fn default() -> Viewer {
    Viewer::default()
}
