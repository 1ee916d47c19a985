//! # Cinematic Camera
//!
//! State machine driving the [`OrbitCamera`] through curved, eased moves.
//!
//! ## Modes
//!
//! - **Manual**: nothing in flight, the user's controller owns the camera
//! - **Directed**: a single transition plays along a quadratic Bézier path
//! - **Tour**: the [`TourPlayer`] schedules directed transitions on its own
//!
//! A new transition request while one is in flight supersedes it: the old
//! animation is dropped and the new one starts from the camera's current,
//! partially interpolated pose.
//!
//! Time never advances on its own; every step receives the frame's `Instant`.

use std::time::{Duration, Instant};

use cgmath::Vector3;

use super::camera_utils::{lerp, quadratic_bezier};
use super::orbit_camera::OrbitCamera;
use super::patterns::{ApproachPattern, PatternSelector};
use super::tour::{TourPlayer, TourSignal, TourStop};
use crate::config::{CameraConfig, TourConfig};
use crate::gfx::geometry::Aabb;
use crate::gfx::scene::RESERVED_GROUND_NAME;

/// Camera distance for an object of the given size.
///
/// Linear in `object_size` up to the small-object threshold, logarithmic past
/// it, then clamped to `[min_distance, max_distance]`. Non-decreasing in
/// `object_size` for every valid config.
pub fn compute_distance(object_size: f32, config: &CameraConfig) -> f32 {
    let (min, max) = (config.min_distance, config.max_distance.max(config.min_distance));
    if object_size.is_nan() || object_size <= 0.0 {
        return min;
    }
    if object_size.is_infinite() {
        return max;
    }
    let threshold = config.small_object_threshold;
    let factor = config.distance_factor;
    let base = if object_size <= threshold {
        object_size * factor
    } else {
        threshold * factor * (1.0 + (object_size / threshold).ln())
    };
    base.clamp(min, max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Manual,
    Directed,
    Tour,
}

/// Where a directed transition should go.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    /// Point the camera looks at when the move ends
    pub target_point: Vector3<f32>,
    /// Bounds of the targeted part or group; sizes the approach distance
    pub target_bounds: Aabb,
    /// Part or group name, if the request targets one
    pub object_name: Option<String>,
}

impl TransitionRequest {
    pub fn new(target_point: Vector3<f32>, target_bounds: Aabb) -> Self {
        Self {
            target_point,
            target_bounds,
            object_name: None,
        }
    }

    pub fn for_object(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionOutcome {
    Started {
        pattern: ApproachPattern,
        duration: Duration,
    },
    Ignored,
}

/// One in-flight transition.
#[derive(Debug, Clone)]
pub struct CameraAnimation {
    pub start_eye: Vector3<f32>,
    pub control: Vector3<f32>,
    pub end_eye: Vector3<f32>,
    pub start_look: Vector3<f32>,
    pub end_look: Vector3<f32>,
    pub pattern: ApproachPattern,
    pub duration: Duration,
    pub started_at: Instant,
}

/// Pose sampled from an animation at some instant.
#[derive(Debug, Clone, Copy)]
pub struct AnimationSample {
    pub eye: Vector3<f32>,
    pub look: Vector3<f32>,
    /// Raw (un-eased) progress in `[0, 1]`
    pub progress: f32,
    pub finished: bool,
}

impl CameraAnimation {
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
        let total = self.duration.as_secs_f32();
        if total <= f32::EPSILON {
            1.0
        } else {
            (elapsed / total).clamp(0.0, 1.0)
        }
    }

    pub fn sample(&self, now: Instant) -> AnimationSample {
        let progress = self.progress(now);
        let t = self.pattern.easing().apply(progress);
        AnimationSample {
            eye: quadratic_bezier(self.start_eye, self.control, self.end_eye, t),
            look: lerp(self.start_look, self.end_look, t),
            progress,
            finished: progress >= 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationProgress {
    pub pattern: ApproachPattern,
    pub progress: f32,
    pub finished: bool,
}

/// Everything that happened during one [`CinematicCamera::update`].
#[derive(Debug, Default)]
pub struct CameraFrame {
    pub progress: Option<AnimationProgress>,
    pub tour: Vec<TourSignal>,
}

pub struct CinematicCamera {
    config: CameraConfig,
    tour_config: TourConfig,
    selector: PatternSelector,
    animation: Option<CameraAnimation>,
    tour: Option<TourPlayer>,
}

impl CinematicCamera {
    pub fn new(config: CameraConfig, tour_config: TourConfig, seed: Option<u64>) -> Self {
        let selector = PatternSelector::new(config.pattern_selection, config.overhead_chance, seed);
        Self {
            config,
            tour_config,
            selector,
            animation: None,
            tour: None,
        }
    }

    pub fn mode(&self) -> CameraMode {
        if self.tour.is_some() {
            CameraMode::Tour
        } else if self.animation.is_some() {
            CameraMode::Directed
        } else {
            CameraMode::Manual
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&CameraAnimation> {
        self.animation.as_ref()
    }

    pub fn tour(&self) -> Option<&TourPlayer> {
        self.tour.as_ref()
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Starts a directed transition from the camera's current pose.
    ///
    /// Requests aimed at the reserved ground surface, or at a non-finite
    /// point, are ignored without error.
    pub fn request_transition(
        &mut self,
        camera: &OrbitCamera,
        request: TransitionRequest,
        now: Instant,
    ) -> TransitionOutcome {
        if request.object_name.as_deref() == Some(RESERVED_GROUND_NAME) {
            log::debug!("ignoring transition to the reserved ground surface");
            return TransitionOutcome::Ignored;
        }
        let target = request.target_point;
        if !(target.x.is_finite() && target.y.is_finite() && target.z.is_finite()) {
            log::warn!("ignoring transition to non-finite point {:?}", target);
            return TransitionOutcome::Ignored;
        }

        let object_size = if request.target_bounds.is_empty() {
            0.0
        } else {
            request.target_bounds.max_extent()
        };
        let distance = compute_distance(object_size, &self.config);
        let pattern = self.selector.choose(camera.eye, target);

        let mut end_eye = pattern.end_position(camera.eye, target, distance);
        end_eye.y = end_eye.y.max(self.config.min_height);
        let mut control = pattern.control_point(camera.eye, target, distance);
        control.y = control.y.max(self.config.min_height);

        if self.animation.is_some() {
            log::debug!("superseding in-flight camera transition");
        }
        let duration = pattern.duration();
        self.animation = Some(CameraAnimation {
            start_eye: camera.eye,
            control,
            end_eye,
            start_look: camera.target,
            end_look: target,
            pattern,
            duration,
            started_at: now,
        });
        log::info!(
            "camera transition '{}' to {:?} over {:.1}s (distance {:.2})",
            pattern.name(),
            request.object_name.as_deref().unwrap_or("<point>"),
            duration.as_secs_f32(),
            distance
        );
        TransitionOutcome::Started { pattern, duration }
    }

    /// Drops any in-flight transition, leaving the camera where it is.
    pub fn cancel(&mut self) {
        self.animation = None;
    }

    /// Enters tour mode. Returns the signals for the initial stop.
    pub fn start_tour(&mut self, camera: &OrbitCamera, stops: Vec<TourStop>, now: Instant) -> Vec<TourSignal> {
        self.animation = None;
        let (player, step) = TourPlayer::start(stops, &self.tour_config, camera.eye, now);
        self.tour = Some(player);
        if let Some(stop) = &step.travel_to {
            self.request_transition(camera, stop_request(stop), now);
        }
        step.signals
    }

    /// Leaves tour mode and hands the camera back to manual control.
    ///
    /// Returns `true` if a tour was running.
    pub fn stop_tour(&mut self) -> bool {
        self.animation = None;
        let was_running = self.tour.take().is_some();
        if was_running {
            log::info!("tour stopped");
        }
        was_running
    }

    /// Advances the in-flight animation and the tour by one frame.
    pub fn update(&mut self, camera: &mut OrbitCamera, now: Instant) -> CameraFrame {
        let mut frame = CameraFrame::default();

        if let Some(animation) = &self.animation {
            let sample = animation.sample(now);
            let mut eye = sample.eye;
            eye.y = eye.y.max(self.config.min_height);
            camera.set_pose(eye, sample.look);
            frame.progress = Some(AnimationProgress {
                pattern: animation.pattern,
                progress: sample.progress,
                finished: sample.finished,
            });
            if sample.finished {
                self.animation = None;
            }
        }

        let arrived = self.animation.is_none();
        let step = match self.tour.as_mut() {
            Some(tour) => tour.step(now, arrived),
            None => return frame,
        };
        if let Some((eye, look)) = step.orbit_pose {
            camera.set_pose(eye, look);
        }
        if let Some(stop) = step.travel_to {
            self.request_transition(camera, stop_request(&stop), now);
        }
        frame.tour = step.signals;
        frame
    }
}

fn stop_request(stop: &TourStop) -> TransitionRequest {
    TransitionRequest::new(stop.anchor, stop.bounds).for_object(stop.object_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::InnerSpace;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), 1.5)
    }

    fn cinematic() -> CinematicCamera {
        let config = CameraConfig {
            overhead_chance: 0.0,
            ..CameraConfig::default()
        };
        CinematicCamera::new(config, TourConfig::default(), Some(42))
    }

    fn unit_box_at(center: Vector3<f32>) -> Aabb {
        let half = Vector3::new(0.5, 0.5, 0.5);
        Aabb::new(center - half, center + half)
    }

    #[test]
    fn distance_is_monotonic_and_bounded() {
        let config = CameraConfig::default();
        let mut last = 0.0;
        for i in 0..2000 {
            let size = i as f32 * 0.25;
            let d = compute_distance(size, &config);
            assert!(d >= config.min_distance && d <= config.max_distance);
            assert!(d >= last, "distance dropped at size {}", size);
            last = d;
        }
        assert_eq!(compute_distance(f32::NAN, &config), config.min_distance);
        assert_eq!(compute_distance(-4.0, &config), config.min_distance);
        assert_eq!(compute_distance(f32::INFINITY, &config), config.max_distance);
    }

    #[test]
    fn large_objects_grow_sub_linearly() {
        let config = CameraConfig {
            max_distance: 1.0e6,
            ..CameraConfig::default()
        };
        let d10 = compute_distance(10.0, &config);
        let d100 = compute_distance(100.0, &config);
        assert!(d100 < d10 * 10.0 * 0.5);
    }

    #[test]
    fn transition_ends_at_target_pose() {
        let mut cam = camera();
        let mut cinematic = cinematic();
        let target = Vector3::new(2.0, 1.0, -1.0);
        let t0 = Instant::now();
        let outcome = cinematic.request_transition(&cam, TransitionRequest::new(target, unit_box_at(target)), t0);
        let duration = match outcome {
            TransitionOutcome::Started { duration, .. } => duration,
            TransitionOutcome::Ignored => panic!("transition was ignored"),
        };
        assert_eq!(cinematic.mode(), CameraMode::Directed);

        let mid = cinematic.update(&mut cam, t0 + duration / 2);
        assert!(!mid.progress.unwrap().finished);

        let end = cinematic.update(&mut cam, t0 + duration);
        assert!(end.progress.unwrap().finished);
        assert_eq!(cinematic.mode(), CameraMode::Manual);
        assert_relative_eq!(cam.target.x, target.x, epsilon = 1e-4);
        assert_relative_eq!(cam.target.y, target.y, epsilon = 1e-4);
        assert_relative_eq!(cam.target.z, target.z, epsilon = 1e-4);
        let expected = compute_distance(1.0, cinematic.config());
        assert_relative_eq!((cam.eye - target).magnitude(), expected, epsilon = 1e-3);
    }

    #[test]
    fn camera_stays_above_ground_for_the_whole_move() {
        let mut cam = camera();
        let mut cinematic = cinematic();
        let target = Vector3::new(0.0, -6.0, 0.0);
        let t0 = Instant::now();
        cinematic.request_transition(&cam, TransitionRequest::new(target, unit_box_at(target)), t0);
        for ms in (0..=3000).step_by(50) {
            cinematic.update(&mut cam, t0 + Duration::from_millis(ms));
            assert!(cam.eye.y >= cinematic.config().min_height - 1e-6);
        }
    }

    #[test]
    fn new_request_supersedes_in_flight_transition() {
        let mut cam = camera();
        let mut cinematic = cinematic();
        let t0 = Instant::now();
        let first = Vector3::new(5.0, 0.0, 5.0);
        cinematic.request_transition(&cam, TransitionRequest::new(first, unit_box_at(first)), t0);
        let t1 = t0 + Duration::from_millis(500);
        cinematic.update(&mut cam, t1);
        let mid_eye = cam.eye;

        let second = Vector3::new(-5.0, 0.0, -5.0);
        cinematic.request_transition(&cam, TransitionRequest::new(second, unit_box_at(second)), t1);
        let animation = cinematic.animation().unwrap();
        assert_eq!(animation.start_eye, mid_eye);
        assert_eq!(animation.end_look, second);
        assert_eq!(animation.started_at, t1);
    }

    #[test]
    fn reserved_ground_is_ignored() {
        let cam = camera();
        let mut cinematic = cinematic();
        let request = TransitionRequest::new(Vector3::new(0.0, 0.0, 0.0), Aabb::empty())
            .for_object(RESERVED_GROUND_NAME);
        assert_eq!(
            cinematic.request_transition(&cam, request, Instant::now()),
            TransitionOutcome::Ignored
        );
        assert_eq!(cinematic.mode(), CameraMode::Manual);
    }

    #[test]
    fn stop_tour_returns_to_manual() {
        let mut cam = camera();
        let mut cinematic = cinematic();
        let t0 = Instant::now();
        let stop = TourStop {
            annotation_id: None,
            object_name: "Body".to_string(),
            anchor: Vector3::new(1.0, 1.0, 1.0),
            bounds: unit_box_at(Vector3::new(1.0, 1.0, 1.0)),
        };
        let signals = cinematic.start_tour(&cam, vec![stop], t0);
        assert!(signals.is_empty());
        assert_eq!(cinematic.mode(), CameraMode::Tour);
        assert!(cinematic.is_animating());
        let frame = cinematic.update(&mut cam, t0 + Duration::from_millis(100));
        assert!(frame.tour.is_empty());

        let arrived = cinematic.update(&mut cam, t0 + Duration::from_secs(3));
        assert!(matches!(arrived.tour[0], TourSignal::Show { index: 0, .. }));

        assert!(cinematic.stop_tour());
        assert_eq!(cinematic.mode(), CameraMode::Manual);
        assert!(!cinematic.stop_tour());
    }
}
