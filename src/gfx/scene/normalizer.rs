//! # Scene Normalizer
//!
//! Turns whatever the asset loader produced into a stable, addressable part set
//! in a canonical viewing frame:
//!
//! 1. **Walk** the graph depth-first, accumulating world transforms
//! 2. **Name** every mesh node (generated `Mesh_<n>` / `Plane_<n>` when absent,
//!    `_<k>` suffixes for duplicates)
//! 3. **Classify** plane-like parts from bounds flatness or name
//! 4. **Fit** the whole asset: scale so the largest extent equals the target
//!    size, center horizontally, rest the bottom on `y = 0`
//!
//! The reserved infinite ground never becomes a part and never influences the fit.

use std::collections::HashSet;

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::config::FitConfig;
use crate::gfx::geometry::Aabb;

use super::graph::SceneNode;
use super::part::{bounds_suggest_plane, name_suggests_plane, Part, PartId};
use super::scene::Scene;

/// Uniform scale followed by translation, mapping raw asset space into the
/// canonical frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f32,
    pub translation: Vector3<f32>,
}

impl FitTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translation: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// Computes the fit for raw bounds and a target size.
    ///
    /// Degenerate bounds (empty or zero-sized) keep unit scale and only get
    /// re-centered.
    pub fn for_bounds(bounds: &Aabb, target_size: f32) -> Self {
        if bounds.is_empty() {
            return Self::identity();
        }
        let max_dim = bounds.max_extent();
        let scale = if max_dim > f32::EPSILON {
            target_size / max_dim
        } else {
            1.0
        };
        let center = bounds.center();
        Self {
            scale,
            translation: Vector3::new(-center.x * scale, -bounds.min.y * scale, -center.z * scale),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation) * Matrix4::from_scale(self.scale)
    }

    pub fn apply_point(&self, p: Vector3<f32>) -> Vector3<f32> {
        p * self.scale + self.translation
    }
}

pub struct SceneNormalizer {
    config: FitConfig,
}

struct RawPart {
    name: Option<String>,
    mesh: super::graph::MeshHandle,
    local_bounds: Aabb,
    world_bounds: Aabb,
}

impl SceneNormalizer {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, root: &SceneNode) -> Scene {
        let mut raw = Vec::new();
        collect_parts(root, Matrix4::identity(), &mut raw);

        let mut used: HashSet<String> = HashSet::new();
        let mut parts = Vec::with_capacity(raw.len());
        for (index, raw_part) in raw.into_iter().enumerate() {
            let flat = bounds_suggest_plane(
                &raw_part.local_bounds,
                self.config.plane_epsilon,
                self.config.plane_ratio,
            );
            let given = raw_part
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty());
            let plane_like = flat || given.map(name_suggests_plane).unwrap_or(false);
            let base = match given {
                Some(name) => name.to_string(),
                None if plane_like => format!("Plane_{}", index + 1),
                None => format!("Mesh_{}", index + 1),
            };
            let name = dedupe(&base, &used);
            used.insert(name.clone());

            parts.push(Part {
                id: PartId(index as u32),
                name,
                mesh: raw_part.mesh,
                plane_like,
                world_bounds: raw_part.world_bounds,
            });
        }

        // Ground-like parts would dominate the fit; fall back to them only when
        // the asset has nothing else.
        let solid = parts
            .iter()
            .filter(|p| !p.plane_like)
            .fold(Aabb::empty(), |acc, p| acc.union(&p.world_bounds));
        let raw_bounds = if solid.is_empty() {
            parts
                .iter()
                .fold(Aabb::empty(), |acc, p| acc.union(&p.world_bounds))
        } else {
            solid
        };

        let fit = FitTransform::for_bounds(&raw_bounds, self.config.target_size());
        let fit_matrix = fit.matrix();
        for part in &mut parts {
            part.world_bounds = part.world_bounds.transform(&fit_matrix);
        }
        let model_bounds = raw_bounds.transform(&fit_matrix);

        let scene = Scene::from_parts(parts, fit, model_bounds);
        let stats = scene.get_statistics();
        log::info!(
            "normalized asset: {} parts ({} plane-like), scale {:.4}, max extent {:.3}",
            stats.part_count,
            stats.plane_like_count,
            stats.scale,
            stats.max_extent
        );
        scene
    }
}

fn collect_parts(node: &SceneNode, parent: Matrix4<f32>, out: &mut Vec<RawPart>) {
    if node.is_reserved() {
        return;
    }
    let world = parent * node.local_transform;
    if let Some(mesh) = &node.mesh {
        out.push(RawPart {
            name: node.name.clone(),
            mesh: mesh.handle,
            local_bounds: mesh.local_bounds,
            world_bounds: mesh.local_bounds.transform(&world),
        });
    }
    for child in &node.children {
        collect_parts(child, world, out);
    }
}

fn dedupe(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{}_{}", base, counter);
        if !used.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::graph::MeshHandle;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn cube(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vector3::from(min), Vector3::from(max))
    }

    fn normalizer() -> SceneNormalizer {
        SceneNormalizer::new(FitConfig::default())
    }

    #[test]
    fn duplicate_and_missing_names_become_unique() {
        let unit = cube([0.0; 3], [1.0; 3]);
        let root = SceneNode::group(Some("root"))
            .with_child(SceneNode::mesh(Some("Body"), MeshHandle(1), unit))
            .with_child(SceneNode::mesh(Some("Body"), MeshHandle(2), unit))
            .with_child(SceneNode::mesh(None, MeshHandle(3), unit))
            .with_child(SceneNode::mesh(Some(""), MeshHandle(4), unit))
            .with_child(SceneNode::mesh(Some("Body"), MeshHandle(5), unit));
        let scene = normalizer().normalize(&root);

        let names = scene.get_object_names();
        assert_eq!(names.len(), 5);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), 5);
        assert_eq!(names[0], "Body");
        assert_eq!(names[1], "Body_1");
        assert_eq!(names[2], "Mesh_3");
        assert_eq!(names[4], "Body_2");
    }

    #[test]
    fn unnamed_flat_mesh_is_named_plane() {
        let slab = cube([-5.0, 0.0, -5.0], [5.0, 0.0, 5.0]);
        let root = SceneNode::group(None)
            .with_child(SceneNode::mesh(None, MeshHandle(1), cube([0.0; 3], [1.0; 3])))
            .with_child(SceneNode::mesh(None, MeshHandle(2), slab));
        let scene = normalizer().normalize(&root);
        let plane = scene.part_by_handle(MeshHandle(2)).unwrap();
        assert_eq!(plane.name(), "Plane_2");
        assert!(plane.plane_like);
        assert!(!scene.part_by_name("Mesh_1").unwrap().plane_like);
    }

    #[test]
    fn fit_matches_target_size_and_rests_on_ground() {
        let raw = cube([-100.0, 20.0, -40.0], [100.0, 70.0, 40.0]);
        let root = SceneNode::group(None).with_child(SceneNode::mesh(
            Some("Hull"),
            MeshHandle(1),
            raw,
        ));
        let scene = normalizer().normalize(&root);

        assert_relative_eq!(scene.fit().scale, 20.0 / 200.0);
        let bounds = scene.model_bounds();
        assert_relative_eq!(bounds.max_extent(), 20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(bounds.min.y, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(bounds.center().x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(bounds.center().z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn transforms_are_accumulated_through_hierarchy() {
        let unit = cube([0.0; 3], [1.0; 3]);
        let root = SceneNode::group(None)
            .with_transform(Matrix4::from_scale(2.0))
            .with_child(
                SceneNode::group(None)
                    .with_transform(Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0)))
                    .with_child(SceneNode::mesh(Some("A"), MeshHandle(1), unit)),
            )
            .with_child(SceneNode::mesh(Some("B"), MeshHandle(2), unit));
        let scene = normalizer().normalize(&root);
        // raw union spans x in [0, 22], so scale = 20 / 22
        assert_relative_eq!(scene.fit().scale, 20.0 / 22.0, epsilon = 1e-5);
    }

    #[test]
    fn reserved_ground_is_never_a_part() {
        let root = SceneNode::group(None)
            .with_child(SceneNode::reserved_ground(
                MeshHandle(99),
                cube([-1000.0, 0.0, -1000.0], [1000.0, 0.0, 1000.0]),
            ))
            .with_child(SceneNode::mesh(Some("Box"), MeshHandle(1), cube([0.0; 3], [2.0; 3])));
        let scene = normalizer().normalize(&root);
        assert_eq!(scene.get_object_count(), 1);
        assert!(scene.part_by_handle(MeshHandle(99)).is_none());
        assert_relative_eq!(scene.fit().scale, 10.0);
    }

    #[test]
    fn floor_does_not_dominate_fit() {
        let root = SceneNode::group(None)
            .with_child(SceneNode::mesh(
                Some("Floor"),
                MeshHandle(1),
                cube([-50.0, -0.5, -50.0], [50.0, 0.0, 50.0]),
            ))
            .with_child(SceneNode::mesh(Some("Statue"), MeshHandle(2), cube([0.0; 3], [4.0; 3])));
        let scene = normalizer().normalize(&root);
        assert_relative_eq!(scene.fit().scale, 5.0);
        assert!(scene.part_by_name("Floor").unwrap().plane_like);
    }

    #[test]
    fn empty_scene_keeps_identity_fit() {
        let scene = normalizer().normalize(&SceneNode::group(None));
        assert_eq!(scene.get_object_count(), 0);
        assert_eq!(*scene.fit(), FitTransform::identity());
    }
}
