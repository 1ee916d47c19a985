use crate::config::CameraConfig;
use crate::input::{InteractionEvent, KeyCommand};

use super::orbit_camera::OrbitCamera;

/// Manual orbit controls: drag to rotate, shift-drag to pan, wheel to zoom.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_drag_rotate: bool,
    is_panning: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_drag_rotate: false,
            is_panning: false,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut controller = Self::new(config.rotate_speed, config.zoom_speed);
        controller.pan_speed = config.pan_speed;
        controller
    }

    /// Applies one interaction to the camera. Returns `true` if the camera moved.
    pub fn process_event(&mut self, event: &InteractionEvent, camera: &mut OrbitCamera) -> bool {
        match *event {
            InteractionEvent::Drag { dx, dy, pan } => {
                self.is_panning = pan;
                self.is_drag_rotate = !pan;
                if pan {
                    // SHIFT + DRAG = PAN (move focus point)
                    camera.pan((-dx * self.pan_speed, dy * self.pan_speed));
                } else {
                    // NORMAL DRAG = ROTATE (orbit around focus)
                    camera.add_yaw(-dx * self.rotate_speed);
                    camera.add_pitch(dy * self.rotate_speed);
                }
                true
            }
            InteractionEvent::Wheel { delta } => {
                camera.add_distance(delta * self.zoom_speed * 10.0);
                true
            }
            InteractionEvent::Key(KeyCommand::ResetCamera) => {
                log::debug!("resetting camera to default position");
                camera.reset_to_default();
                true
            }
            InteractionEvent::Click { .. } => {
                self.is_drag_rotate = false;
                self.is_panning = false;
                false
            }
            InteractionEvent::Key(_) => false,
        }
    }

    /// Returns true if the last drag panned
    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    /// Returns true if the last drag rotated
    pub fn is_rotating(&self) -> bool {
        self.is_drag_rotate
    }

    /// Adjust panning sensitivity
    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}
