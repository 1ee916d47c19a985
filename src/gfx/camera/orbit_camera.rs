use cgmath::*;

use super::camera_utils::Camera;
use crate::config::CameraConfig;

/// Y-up perspective camera described both as an orbit (distance, pitch, yaw
/// around `target`) and as an explicit pose (`eye`, `target`).
///
/// Both descriptions are kept in sync: orbit edits recompute `eye`, pose edits
/// recompute the orbit parameters. Every update enforces the minimum height.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for OrbitCamera {
    fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(Point3::from_vec(self.eye), Point3::from_vec(self.target), self.up)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
        };
        camera.update();
        camera
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.max_distance * 0.5, 0.4, 0.6, Vector3::zero(), aspect);
        camera.fovy = Deg(config.fov_degrees).into();
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        camera.bounds.min_distance = Some(config.min_distance * 0.5);
        camera.bounds.max_distance = Some(config.max_distance * 2.0);
        camera.bounds.min_height = config.min_height;
        camera.update();
        camera
    }

    pub fn reset_to_default(&mut self) {
        self.distance = 20.0;
        self.pitch = 0.4; // Slight downward angle
        self.yaw = 0.6;
        self.target = Vector3::zero(); // Look at origin

        self.update(); // Recalculate eye position
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.0 + f32::EPSILON)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize(); // True "up" relative to camera

        // Scale pan movement by distance for consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let total_movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        // Move both eye and target to maintain the view direction
        self.eye += total_movement;
        self.target += total_movement;
        self.enforce_min_height();
    }

    /// Places the camera at an explicit pose and re-derives the orbit
    /// parameters from it.
    pub fn set_pose(&mut self, eye: Vector3<f32>, target: Vector3<f32>) {
        self.eye = eye;
        self.target = target;
        self.enforce_min_height();

        let offset = self.eye - self.target;
        let distance = offset.magnitude();
        if distance > f32::EPSILON {
            self.distance = distance;
            self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
            self.yaw = offset.x.atan2(offset.z);
        }
    }

    /// Offset from the target to the eye, on the horizontal plane
    pub fn horizontal_offset(&self) -> Vector2<f32> {
        Vector2::new(self.eye.x - self.target.x, self.eye.z - self.target.z)
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
        self.enforce_min_height();
    }

    fn enforce_min_height(&mut self) {
        if self.eye.y < self.bounds.min_height {
            self.eye.y = self.bounds.min_height;
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Floor for the eye's y coordinate
    pub min_height: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(80.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
            min_height: 0.3,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn set_pose_round_trips_orbit_parameters() {
        let mut camera = OrbitCamera::new(5.0, 0.3, 1.2, Vector3::new(1.0, 2.0, 3.0), 1.5);
        let (eye, target) = (camera.eye, camera.target);
        camera.set_pose(eye, target);
        assert_relative_eq!(camera.distance, 5.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch, 0.3, epsilon = 1e-4);
        assert_relative_eq!(camera.yaw, 1.2, epsilon = 1e-4);
    }

    #[test]
    fn eye_never_goes_below_min_height() {
        let mut camera = OrbitCamera::new(10.0, -1.2, 0.0, Vector3::zero(), 1.0);
        assert!(camera.eye.y >= camera.bounds.min_height);
        camera.set_pose(Vector3::new(0.0, -5.0, 10.0), Vector3::zero());
        assert_relative_eq!(camera.eye.y, camera.bounds.min_height);
        camera.pan((0.0, -100.0));
        assert!(camera.eye.y >= camera.bounds.min_height);
    }

    #[test]
    fn distance_is_bounded() {
        let mut camera = OrbitCamera::new(10.0, 0.4, 0.2, Vector3::zero(), 1.0);
        camera.bounds.min_distance = Some(1.1);
        camera.set_distance(0.0);
        assert_relative_eq!(camera.distance, 1.1);
        camera.set_distance(1.0e6);
        assert_relative_eq!(camera.distance, 80.0);
    }
}
