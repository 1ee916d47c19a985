//! Scene graph handed over by the external asset loader.
//!
//! The loader owns file formats and GPU resources; the engine only sees names,
//! hierarchy, local transforms, local bounds and an opaque handle per mesh.

use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::geometry::Aabb;

/// Opaque reference to a renderable owned by the host engine.
///
/// The engine never derives identity from it; parts are addressed by name or
/// [`super::PartId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Name of the engine-managed infinite ground surface.
///
/// Never becomes a part and is ignored by selection and camera requests.
pub const RESERVED_GROUND_NAME: &str = "__infinite_ground__";

/// Geometry attached to a scene node.
#[derive(Debug, Clone)]
pub struct MeshSource {
    pub handle: MeshHandle,
    /// Bounds of the geometry in the node's local space
    pub local_bounds: Aabb,
}

/// One node of the loaded scene graph.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: Option<String>,
    pub local_transform: Matrix4<f32>,
    pub mesh: Option<MeshSource>,
    pub children: Vec<SceneNode>,
    /// Set by the host for engine-managed helpers such as the infinite ground.
    pub engine_managed: bool,
}

impl SceneNode {
    /// Empty transform node with identity transform
    pub fn group(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            local_transform: Matrix4::identity(),
            mesh: None,
            children: Vec::new(),
            engine_managed: false,
        }
    }

    /// Leaf node carrying a mesh
    pub fn mesh(name: Option<&str>, handle: MeshHandle, local_bounds: Aabb) -> Self {
        Self {
            mesh: Some(MeshSource {
                handle,
                local_bounds,
            }),
            ..Self::group(name)
        }
    }

    /// The host's infinite ground helper
    pub fn reserved_ground(handle: MeshHandle, local_bounds: Aabb) -> Self {
        Self {
            engine_managed: true,
            ..Self::mesh(Some(RESERVED_GROUND_NAME), handle, local_bounds)
        }
    }

    /// Builder pattern: set the local transform
    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.local_transform = transform;
        self
    }

    /// Builder pattern: append a child
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_reserved(&self) -> bool {
        self.engine_managed || self.name.as_deref() == Some(RESERVED_GROUND_NAME)
    }
}
