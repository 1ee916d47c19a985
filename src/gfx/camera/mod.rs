pub mod camera_controller;
pub mod camera_utils;
pub mod cinematic;
pub mod easing;
pub mod orbit_camera;
pub mod patterns;
pub mod tour;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{world_to_ndc, Camera};
pub use cinematic::{
    compute_distance, AnimationProgress, CameraAnimation, CameraFrame, CameraMode, CinematicCamera,
    TransitionOutcome, TransitionRequest,
};
pub use easing::Easing;
pub use orbit_camera::OrbitCamera;
pub use patterns::{ApproachPattern, PatternSelector};
pub use tour::{TourPlayer, TourSignal, TourStop};
