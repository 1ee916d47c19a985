use crate::gfx::geometry::Aabb;

use super::graph::MeshHandle;

/// Stable index of a part inside its [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub(crate) u32);

impl PartId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An addressable piece of the loaded asset (roughly one mesh).
///
/// Identity is the name; the mesh handle is only a reference back into the
/// host engine. Group membership lives in [`crate::editor::GroupRegistry`].
#[derive(Debug, Clone)]
pub struct Part {
    pub id: PartId,
    pub(crate) name: String,
    pub mesh: MeshHandle,
    /// Ground-like surface detected from bounds flatness or name
    pub plane_like: bool,
    /// Bounds in the fitted (canonical) frame
    pub world_bounds: Aabb,
}

impl Part {
    pub fn name(&self) -> &str {
        &self.name
    }
}

const PLANE_NAME_HINTS: [&str; 3] = ["floor", "ground", "plane"];

/// Whether a name marks a ground-like surface (case-insensitive).
pub fn name_suggests_plane(name: &str) -> bool {
    let lower = name.to_lowercase();
    PLANE_NAME_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Whether local bounds are flat along any axis.
///
/// An axis counts as flat when its extent is below `epsilon` or below
/// `ratio` times the largest extent.
pub fn bounds_suggest_plane(local: &Aabb, epsilon: f32, ratio: f32) -> bool {
    if local.is_empty() {
        return false;
    }
    let threshold = epsilon.max(local.max_extent() * ratio);
    local.min_extent() <= threshold
}
