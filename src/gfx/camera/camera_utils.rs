use cgmath::{Matrix4, Vector3, Vector4};

/// Anything that can produce view and projection matrices.
///
/// Projection follows the OpenGL convention: NDC spans `[-1, 1]` on every axis.
pub trait Camera {
    fn view_matrix(&self) -> Matrix4<f32>;

    fn projection_matrix(&self) -> Matrix4<f32>;

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Projects a world-space point to normalized device coordinates.
///
/// Returns `None` for points on or behind the camera plane, where the
/// perspective divide would flip or explode the result.
pub fn world_to_ndc<C: Camera + ?Sized>(camera: &C, point: Vector3<f32>) -> Option<Vector3<f32>> {
    let clip = camera.build_view_projection_matrix() * Vector4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = Vector3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
    if ndc.x.is_finite() && ndc.y.is_finite() && ndc.z.is_finite() {
        Some(ndc)
    } else {
        None
    }
}

/// Linear interpolation between two points
pub fn lerp(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}

/// Quadratic Bézier through `control`, from `start` (t = 0) to `end` (t = 1)
pub fn quadratic_bezier(
    start: Vector3<f32>,
    control: Vector3<f32>,
    end: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let u = 1.0 - t;
    start * (u * u) + control * (2.0 * u * t) + end * (t * t)
}
