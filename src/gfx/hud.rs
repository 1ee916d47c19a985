//! Screen-space tracking for annotation overlays.

use cgmath::Vector3;

use crate::gfx::camera::{world_to_ndc, Camera};

/// Pixel position of a projected anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Normalized depth in `[-1, 1]` when inside the view volume
    pub depth: f32,
    /// Whether the point falls inside the viewport
    pub on_screen: bool,
}

/// Projects the active anchor to pixels every frame.
///
/// Only the last result is kept. A frame without an anchor, a camera or a
/// usable viewport reports `None` and clears it, so an overlay never sticks
/// to a stale position.
#[derive(Debug, Default)]
pub struct HudProjector {
    last: Option<ScreenPoint>,
}

impl HudProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<ScreenPoint> {
        self.last
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn project<C: Camera + ?Sized>(
        &mut self,
        anchor: Option<Vector3<f32>>,
        camera: Option<&C>,
        viewport: (u32, u32),
    ) -> Option<ScreenPoint> {
        self.last = match (anchor, camera) {
            (Some(anchor), Some(camera)) => project_point(camera, anchor, viewport),
            _ => None,
        };
        self.last
    }
}

/// Maps a world point to pixel coordinates (origin top-left, y down).
pub fn project_point<C: Camera + ?Sized>(
    camera: &C,
    point: Vector3<f32>,
    viewport: (u32, u32),
) -> Option<ScreenPoint> {
    let (width, height) = viewport;
    if width == 0 || height == 0 {
        return None;
    }
    let ndc = world_to_ndc(camera, point)?;
    let (w, h) = (width as f32, height as f32);
    let x = (ndc.x + 1.0) * 0.5 * w;
    let y = (1.0 - ndc.y) * 0.5 * h;
    let on_screen = (0.0..=w).contains(&x) && (0.0..=h).contains(&y) && (-1.0..=1.0).contains(&ndc.z);
    Some(ScreenPoint {
        x,
        y,
        depth: ndc.z,
        on_screen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::OrbitCamera;
    use approx::assert_relative_eq;

    fn camera() -> OrbitCamera {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::new(0.0, 0.0, 0.0), 2.0);
        camera.set_pose(Vector3::new(0.0, 1.0, 10.0), Vector3::new(0.0, 1.0, 0.0));
        camera
    }

    #[test]
    fn look_at_point_lands_in_viewport_center() {
        let mut hud = HudProjector::new();
        let p = hud
            .project(Some(Vector3::new(0.0, 1.0, 0.0)), Some(&camera()), (800, 400))
            .unwrap();
        assert_relative_eq!(p.x, 400.0, epsilon = 1e-2);
        assert_relative_eq!(p.y, 200.0, epsilon = 1e-2);
        assert!(p.on_screen);
    }

    #[test]
    fn higher_points_move_up_the_screen() {
        let cam = camera();
        let low = project_point(&cam, Vector3::new(0.0, 1.0, 0.0), (800, 400)).unwrap();
        let high = project_point(&cam, Vector3::new(0.0, 2.0, 0.0), (800, 400)).unwrap();
        assert!(high.y < low.y);
    }

    #[test]
    fn point_behind_camera_has_no_position() {
        let cam = camera();
        assert!(project_point(&cam, Vector3::new(0.0, 1.0, 20.0), (800, 400)).is_none());
    }

    #[test]
    fn missing_inputs_clear_the_last_position() {
        let mut hud = HudProjector::new();
        let cam = camera();
        hud.project(Some(Vector3::new(0.0, 1.0, 0.0)), Some(&cam), (800, 400));
        assert!(hud.last().is_some());

        assert!(hud.project(None, Some(&cam), (800, 400)).is_none());
        assert!(hud.last().is_none());

        hud.project(Some(Vector3::new(0.0, 1.0, 0.0)), Some(&cam), (800, 400));
        assert!(hud.project::<OrbitCamera>(Some(Vector3::new(0.0, 1.0, 0.0)), None, (800, 400)).is_none());
        assert!(hud.last().is_none());
    }
}
