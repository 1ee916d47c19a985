//! Error types shared across the engine.
//!
//! Boundary conditions that the viewer treats as non-events (undo with an empty
//! history, a stale group member, a click on the reserved ground) never surface
//! as errors. Only conditions a caller can act on are represented here.

use thiserror::Error;

/// Failures reported by a [`crate::store::Datastore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no {kind} record with id '{id}'")]
    NotFound { kind: &'static str, id: String },
    #[error("datastore unavailable: {0}")]
    Unavailable(String),
}

/// Failures while loading or validating a [`crate::config::ViewerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures of explicit editing commands (rename, group, annotate).
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("unknown part '{0}'")]
    UnknownPart(String),
    #[error("name '{0}' is already in use")]
    NameTaken(String),
    #[error("name must not be empty")]
    EmptyName,
    #[error("group '{0}' would have no resolvable members")]
    EmptyGroup(String),
    #[error("no annotation is active")]
    NoActiveAnnotation,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while resolving a texture through the host loader.
#[derive(Debug, Clone, Error)]
#[error("failed to load texture '{url}': {reason}")]
pub struct TextureError {
    pub url: String,
    pub reason: String,
}
