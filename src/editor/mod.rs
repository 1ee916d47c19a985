//! Editing state around the loaded asset: selection, groups, annotations and
//! the undoable material/transform/environment overrides.

pub mod annotations;
pub mod groups;
pub mod history;
pub mod selection;
pub mod state;
pub mod store;
pub mod texture_cache;

pub use annotations::{ActiveAnnotation, Annotation, AnnotationBook};
pub use groups::{Group, GroupRegistry};
pub use history::HistoryStore;
pub use selection::{resolve_hit, SelectionManager};
pub use state::{
    Background, EditorSnapshot, Environment, EnvironmentPatch, Fog, Grid, Lighting, MaterialOverride,
    MaterialProperty, TextureSettings, TransformOverride,
};
pub use store::EditorStore;
pub use texture_cache::{TextureCache, TextureHandle, TextureLoader};
