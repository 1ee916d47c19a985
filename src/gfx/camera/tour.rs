//! Autonomous tour playback.
//!
//! The tour alternates between dwelling on an annotation (overlay shown) and
//! travelling to the next one. With no eligible annotations it sweeps around
//! the origin at a constant radius instead of idling.
//!
//! ```text
//!   start --> Travelling(0) --arrived--> Dwelling(0)
//!   Dwelling(i) --dwell elapsed--> Travelling(i+1) --arrived--> Dwelling(i+1)
//! ```
//!
//! The dwell clock only runs once the camera has arrived, so a short dwell
//! never skips a stop.
//!
//! The player only decides *what* happens; the cinematic camera performs the
//! actual transitions.

use std::time::{Duration, Instant};

use cgmath::Vector3;

use crate::config::TourConfig;
use crate::gfx::geometry::Aabb;

/// One annotation the tour visits.
#[derive(Debug, Clone, PartialEq)]
pub struct TourStop {
    pub annotation_id: Option<String>,
    pub object_name: String,
    pub anchor: Vector3<f32>,
    /// Bounds of the bound part or group, used to size the approach
    pub bounds: Aabb,
}

/// Notifications produced while the tour runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TourSignal {
    /// The overlay for `stop` should become visible
    Show { index: usize, stop: TourStop },
    /// The current overlay should be hidden before moving on
    Hide,
    /// The tour moved its index to `index` and is travelling there
    Advanced { index: usize },
}

#[derive(Debug, Clone, Copy)]
enum TourPhase {
    Dwelling { since: Instant },
    Travelling,
    Orbiting { started_at: Instant, start_angle: f32 },
}

/// What the cinematic camera should do after a tour step.
#[derive(Debug, Default)]
pub struct TourStep {
    pub signals: Vec<TourSignal>,
    /// Start a directed transition to this stop
    pub travel_to: Option<TourStop>,
    /// Place the camera directly at this (eye, look-at) pose
    pub orbit_pose: Option<(Vector3<f32>, Vector3<f32>)>,
}

#[derive(Debug)]
pub struct TourPlayer {
    stops: Vec<TourStop>,
    index: usize,
    phase: TourPhase,
    dwell: Duration,
    orbit_radius: f32,
    orbit_height: f32,
    orbit_speed: f32,
}

impl TourPlayer {
    /// Starts travelling to the first stop, or an orbit sweep when `stops` is empty.
    ///
    /// `eye` seeds the sweep angle so the orbit starts where the camera is.
    pub fn start(stops: Vec<TourStop>, config: &TourConfig, eye: Vector3<f32>, now: Instant) -> (Self, TourStep) {
        let mut step = TourStep::default();
        let phase = if let Some(first) = stops.first() {
            step.travel_to = Some(first.clone());
            TourPhase::Travelling
        } else {
            TourPhase::Orbiting {
                started_at: now,
                start_angle: eye.x.atan2(eye.z),
            }
        };
        let player = Self {
            stops,
            index: 0,
            phase,
            dwell: Duration::from_secs_f32(config.dwell_secs.max(0.0)),
            orbit_radius: config.orbit_radius,
            orbit_height: config.orbit_height,
            orbit_speed: config.orbit_speed,
        };
        if player.is_orbiting() {
            log::info!("tour started with no eligible annotations, orbiting");
        } else {
            log::info!("tour started with {} stops", player.stops.len());
        }
        (player, step)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn stops(&self) -> &[TourStop] {
        &self.stops
    }

    pub fn current(&self) -> Option<&TourStop> {
        self.stops.get(self.index)
    }

    pub fn is_orbiting(&self) -> bool {
        matches!(self.phase, TourPhase::Orbiting { .. })
    }

    pub fn is_dwelling(&self) -> bool {
        matches!(self.phase, TourPhase::Dwelling { .. })
    }

    /// Advances the tour by one frame.
    ///
    /// `arrived` tells the player that no transition is in flight any more.
    pub fn step(&mut self, now: Instant, arrived: bool) -> TourStep {
        let mut step = TourStep::default();
        match self.phase {
            TourPhase::Dwelling { since } => {
                if now.saturating_duration_since(since) >= self.dwell {
                    self.index = (self.index + 1) % self.stops.len();
                    self.phase = TourPhase::Travelling;
                    step.signals.push(TourSignal::Hide);
                    step.signals.push(TourSignal::Advanced { index: self.index });
                    step.travel_to = Some(self.stops[self.index].clone());
                }
            }
            TourPhase::Travelling => {
                if arrived {
                    self.phase = TourPhase::Dwelling { since: now };
                    step.signals.push(TourSignal::Show {
                        index: self.index,
                        stop: self.stops[self.index].clone(),
                    });
                }
            }
            TourPhase::Orbiting {
                started_at,
                start_angle,
            } => {
                let elapsed = now.saturating_duration_since(started_at).as_secs_f32();
                let angle = start_angle + self.orbit_speed * elapsed;
                let eye = Vector3::new(
                    self.orbit_radius * angle.sin(),
                    self.orbit_height,
                    self.orbit_radius * angle.cos(),
                );
                step.orbit_pose = Some((eye, Vector3::new(0.0, 0.0, 0.0)));
            }
        }
        step
    }
}
