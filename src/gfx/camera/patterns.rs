//! Named approach patterns for directed camera transitions.
//!
//! Each pattern describes, in a target-local frame, where the camera ends up,
//! which control point bends its Bézier path, how long the move takes and which
//! easing curve shapes it. The local frame's `+z` axis points from the target
//! towards the camera's current horizontal position, so patterns approach from
//! the side the viewer is already on.

use cgmath::{InnerSpace, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

use super::easing::Easing;
use crate::config::PatternSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApproachPattern {
    CornerHigh,
    FrontElevated,
    Overhead,
    SideSweep,
}

impl ApproachPattern {
    pub const ALL: [ApproachPattern; 4] = [
        ApproachPattern::CornerHigh,
        ApproachPattern::FrontElevated,
        ApproachPattern::Overhead,
        ApproachPattern::SideSweep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ApproachPattern::CornerHigh => "corner-high",
            ApproachPattern::FrontElevated => "front-elevated",
            ApproachPattern::Overhead => "overhead",
            ApproachPattern::SideSweep => "side-sweep",
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            ApproachPattern::CornerHigh => Duration::from_millis(2000),
            ApproachPattern::FrontElevated => Duration::from_millis(1600),
            ApproachPattern::Overhead => Duration::from_millis(2500),
            ApproachPattern::SideSweep => Duration::from_millis(2200),
        }
    }

    pub fn easing(self) -> Easing {
        match self {
            ApproachPattern::Overhead | ApproachPattern::SideSweep => Easing::CubicInOut,
            ApproachPattern::CornerHigh | ApproachPattern::FrontElevated => Easing::QuadInOut,
        }
    }

    /// Unit direction from the target to the final camera position (local frame)
    fn local_end_direction(self) -> Vector3<f32> {
        let v = match self {
            ApproachPattern::CornerHigh => Vector3::new(0.7, 0.6, 0.7),
            ApproachPattern::FrontElevated => Vector3::new(0.0, 0.35, 1.0),
            // Not exactly vertical, so look-at keeps a usable up vector
            ApproachPattern::Overhead => Vector3::new(0.0, 1.0, 0.15),
            ApproachPattern::SideSweep => Vector3::new(1.0, 0.2, 0.25),
        };
        v.normalize()
    }

    /// Control point offset in units of approach distance (local frame)
    fn local_control_offset(self) -> Vector3<f32> {
        match self {
            ApproachPattern::CornerHigh => Vector3::new(1.0, 1.2, 0.4),
            ApproachPattern::FrontElevated => Vector3::new(0.0, 0.8, 1.4),
            ApproachPattern::Overhead => Vector3::new(0.0, 1.8, 0.5),
            ApproachPattern::SideSweep => Vector3::new(1.5, 0.4, -0.5),
        }
    }

    /// Final camera position for a target seen from `eye`
    pub fn end_position(self, eye: Vector3<f32>, target: Vector3<f32>, distance: f32) -> Vector3<f32> {
        target + LocalFrame::facing(eye, target).to_world(self.local_end_direction()) * distance
    }

    /// Bézier control point for a target seen from `eye`
    pub fn control_point(self, eye: Vector3<f32>, target: Vector3<f32>, distance: f32) -> Vector3<f32> {
        target + LocalFrame::facing(eye, target).to_world(self.local_control_offset()) * distance
    }
}

/// Horizontal frame around a target: `forward` points at the viewer.
struct LocalFrame {
    right: Vector3<f32>,
    up: Vector3<f32>,
    forward: Vector3<f32>,
}

impl LocalFrame {
    fn facing(eye: Vector3<f32>, target: Vector3<f32>) -> Self {
        let flat = Vector3::new(eye.x - target.x, 0.0, eye.z - target.z);
        let forward = if flat.magnitude2() > 1e-8 {
            flat.normalize()
        } else {
            Vector3::unit_z()
        };
        let up = Vector3::unit_y();
        Self {
            right: up.cross(forward),
            up,
            forward,
        }
    }

    fn to_world(&self, local: Vector3<f32>) -> Vector3<f32> {
        self.right * local.x + self.up * local.y + self.forward * local.z
    }
}

/// Picks the approach pattern for each new transition.
pub struct PatternSelector {
    mode: PatternSelection,
    overhead_chance: f64,
    next: usize,
    rng: StdRng,
}

const CYCLE: [ApproachPattern; 4] = ApproachPattern::ALL;

/// Pattern per quadrant of the viewer's bearing around the target
const QUADRANTS: [ApproachPattern; 4] = [
    ApproachPattern::FrontElevated,
    ApproachPattern::CornerHigh,
    ApproachPattern::SideSweep,
    ApproachPattern::CornerHigh,
];

impl PatternSelector {
    pub fn new(mode: PatternSelection, overhead_chance: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            mode,
            overhead_chance: overhead_chance.clamp(0.0, 1.0),
            next: 0,
            rng,
        }
    }

    pub fn choose(&mut self, eye: Vector3<f32>, target: Vector3<f32>) -> ApproachPattern {
        if self.overhead_chance > 0.0 && self.rng.random_bool(self.overhead_chance) {
            return ApproachPattern::Overhead;
        }
        match self.mode {
            PatternSelection::Cycle => {
                let pattern = CYCLE[self.next % CYCLE.len()];
                self.next = (self.next + 1) % CYCLE.len();
                pattern
            }
            PatternSelection::Quadrant => QUADRANTS[quadrant(eye, target)],
        }
    }
}

/// Quadrant (0..4) of the viewer's horizontal bearing around the target.
pub fn quadrant(eye: Vector3<f32>, target: Vector3<f32>) -> usize {
    let angle = (eye.x - target.x).atan2(eye.z - target.z); // (-PI, PI]
    let turns = (angle + std::f32::consts::PI) / std::f32::consts::FRAC_PI_2;
    (turns.floor() as i64).rem_euclid(4) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn end_position_is_at_requested_distance() {
        let eye = Vector3::new(3.0, 4.0, 10.0);
        let target = Vector3::new(1.0, 1.0, 1.0);
        for pattern in ApproachPattern::ALL {
            let end = pattern.end_position(eye, target, 7.5);
            assert_relative_eq!((end - target).magnitude(), 7.5, epsilon = 1e-4);
            assert!(end.y > target.y, "{} should end above the target", pattern.name());
        }
    }

    #[test]
    fn front_elevated_approaches_from_viewer_side() {
        let target = Vector3::new(0.0, 0.0, 0.0);
        let end = ApproachPattern::FrontElevated.end_position(Vector3::new(-10.0, 2.0, 0.0), target, 5.0);
        assert!(end.x < 0.0);
        assert_relative_eq!(end.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn durations_are_in_cinematic_range() {
        for pattern in ApproachPattern::ALL {
            let secs = pattern.duration().as_secs_f32();
            assert!((1.5..=2.5).contains(&secs));
        }
    }

    #[test]
    fn cycle_mode_is_round_robin_without_overhead_chance() {
        let mut selector = PatternSelector::new(PatternSelection::Cycle, 0.0, Some(7));
        let eye = Vector3::new(0.0, 5.0, 10.0);
        let picks: Vec<_> = (0..5).map(|_| selector.choose(eye, Vector3::new(0.0, 0.0, 0.0))).collect();
        assert_eq!(&picks[..4], &ApproachPattern::ALL);
        assert_eq!(picks[4], ApproachPattern::CornerHigh);
    }

    #[test]
    fn certain_overhead_chance_always_forces_overhead() {
        let mut selector = PatternSelector::new(PatternSelection::Quadrant, 1.0, Some(1));
        for _ in 0..10 {
            assert_eq!(
                selector.choose(Vector3::new(4.0, 1.0, 4.0), Vector3::new(0.0, 0.0, 0.0)),
                ApproachPattern::Overhead
            );
        }
    }

    #[test]
    fn quadrants_cover_all_bearings() {
        let target = Vector3::new(0.0, 0.0, 0.0);
        let mut seen = [false; 4];
        for i in 0..16 {
            let a = i as f32 * std::f32::consts::PI / 8.0 + 0.01;
            let q = quadrant(Vector3::new(a.sin(), 0.0, a.cos()), target);
            assert!(q < 4);
            seen[q] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
