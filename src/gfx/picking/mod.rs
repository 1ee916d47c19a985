//! # Object Picking
//!
//! Turns a pointer position into an ordered list of part hits.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Convert mouse coordinates to a 3D ray in world space
//! 2. **Ray-Part Intersection**: Test the ray against each part's fitted bounds
//! 3. **Ordering**: Return every hit, closest first
//!
//! Hosts with a precise mesh hit test implement [`HitTester`] themselves and
//! feed their hits straight to [`crate::app::Viewer::pointer_hits`]; the
//! bounds-based [`ObjectPicker`] is the built-in fallback.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cicerone::gfx::camera::OrbitCamera;
//! use cicerone::gfx::picking::{HitTester, ObjectPicker};
//! use cicerone::gfx::scene::Scene;
//!
//! # fn demo(camera: &OrbitCamera, scene: &Scene) {
//! let picker = ObjectPicker::new();
//! if let Some(hit) = picker.hit_test((400.0, 300.0), (800.0, 600.0), camera, scene).first() {
//!     println!("Selected part: {}", hit.part_name);
//! }
//! # }
//! ```

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::camera::{Camera, OrbitCamera};
use crate::gfx::scene::Scene;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// One part under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerHit {
    pub part_name: String,
    /// World space intersection point
    pub point: Vector3<f32>,
    /// Distance from the ray origin
    pub distance: f32,
}

impl PointerHit {
    pub fn new(part_name: impl Into<String>, point: Vector3<f32>, distance: f32) -> Self {
        Self {
            part_name: part_name.into(),
            point,
            distance,
        }
    }
}

/// Hit-test capability supplied by the host rendering engine.
pub trait HitTester {
    /// All parts under `screen_pos`, closest first
    fn hit_test(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &OrbitCamera,
        scene: &Scene,
    ) -> Vec<PointerHit>;
}

/// Ray-vs-bounds picker over the fitted part bounds.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectPicker;

impl ObjectPicker {
    pub fn new() -> Self {
        Self
    }

    /// Convert screen coordinates to a world-space ray
    pub fn screen_to_ray(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &OrbitCamera,
    ) -> Option<Ray> {
        let (mouse_x, mouse_y) = screen_pos;
        let (screen_width, screen_height) = screen_size;
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

        let inv_view_proj: Matrix4<f32> = camera.build_view_projection_matrix().invert()?;

        let world_near = inv_view_proj * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
        let world_far = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        if world_near.w.abs() <= f32::EPSILON || world_far.w.abs() <= f32::EPSILON {
            return None;
        }

        let near_3d = world_near.truncate() / world_near.w;
        let far_3d = world_far.truncate() / world_far.w;
        Some(Ray::new(near_3d, far_3d - near_3d))
    }
}

impl HitTester for ObjectPicker {
    fn hit_test(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &OrbitCamera,
        scene: &Scene,
    ) -> Vec<PointerHit> {
        let Some(ray) = self.screen_to_ray(screen_pos, screen_size, camera) else {
            return Vec::new();
        };

        let mut hits: Vec<PointerHit> = scene
            .parts()
            .iter()
            .filter_map(|part| {
                part.world_bounds
                    .intersect_ray(&ray)
                    .map(|distance| PointerHit::new(part.name(), ray.point_at(distance), distance))
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FitConfig;
    use crate::gfx::geometry::Aabb;
    use crate::gfx::scene::{MeshHandle, SceneNode, SceneNormalizer};

    fn two_box_scene() -> Scene {
        let root = SceneNode::group(None)
            .with_child(SceneNode::mesh(
                Some("Near"),
                MeshHandle(1),
                Aabb::new(Vector3::new(-1.0, 0.0, 2.0), Vector3::new(1.0, 2.0, 4.0)),
            ))
            .with_child(SceneNode::mesh(
                Some("Far"),
                MeshHandle(2),
                Aabb::new(Vector3::new(-1.0, 0.0, -4.0), Vector3::new(1.0, 2.0, -2.0)),
            ));
        SceneNormalizer::new(FitConfig::default()).normalize(&root)
    }

    fn camera_on_axis() -> OrbitCamera {
        let mut camera = OrbitCamera::new(30.0, 0.0, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        camera.set_pose(Vector3::new(0.0, 2.5, 40.0), Vector3::new(0.0, 2.5, 0.0));
        camera
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = camera_on_axis();
        let ray = ObjectPicker::new()
            .screen_to_ray((50.0, 50.0), (100.0, 100.0), &camera)
            .unwrap();
        assert!(ray.direction.z < -0.99);
    }

    #[test]
    fn hits_are_sorted_closest_first() {
        let scene = two_box_scene();
        let hits = ObjectPicker::new().hit_test((50.0, 50.0), (100.0, 100.0), &camera_on_axis(), &scene);
        let names: Vec<_> = hits.iter().map(|h| h.part_name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Far"]);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn miss_returns_nothing() {
        let scene = two_box_scene();
        let hits = ObjectPicker::new().hit_test((0.0, 0.0), (100.0, 100.0), &camera_on_axis(), &scene);
        assert!(hits.is_empty());
    }

    #[test]
    fn degenerate_viewport_yields_no_ray() {
        assert!(ObjectPicker::new()
            .screen_to_ray((0.0, 0.0), (0.0, 0.0), &camera_on_axis())
            .is_none());
    }
}
