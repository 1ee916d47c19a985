//! # Viewer Configuration
//!
//! Every tunable of the engine in one serde-friendly tree. Missing fields fall
//! back to their defaults, so a config file only needs the values it changes:
//!
//! ```json
//! { "fit": { "profile": "showroom" }, "tour": { "dwell_secs": 6.0 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Canonical viewing-frame sizes for fitted assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitProfile {
    Compact,
    #[default]
    Standard,
    Showroom,
}

impl FitProfile {
    pub fn target_size(self) -> f32 {
        match self {
            FitProfile::Compact => 10.0,
            FitProfile::Standard => 20.0,
            FitProfile::Showroom => 30.0,
        }
    }
}

/// Scene normalizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub profile: FitProfile,
    /// Overrides the profile's target size when set
    pub target_size: Option<f32>,
    /// Absolute local extent under which an axis counts as flat
    pub plane_epsilon: f32,
    /// Extent relative to the largest axis under which an axis counts as flat
    pub plane_ratio: f32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            profile: FitProfile::Standard,
            target_size: None,
            plane_epsilon: 1e-3,
            plane_ratio: 0.01,
        }
    }
}

impl FitConfig {
    pub fn target_size(&self) -> f32 {
        self.target_size.unwrap_or_else(|| self.profile.target_size())
    }
}

/// How the cinematic camera picks an approach pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSelection {
    /// Round-robin through the pattern list
    Cycle,
    /// Based on where the camera sits relative to the target
    #[default]
    Quadrant,
}

/// Camera framing, animation and manual-control settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Object size above which distance grows logarithmically
    pub small_object_threshold: f32,
    /// Distance per unit of object size below the threshold
    pub distance_factor: f32,
    /// Lowest camera height allowed at any time
    pub min_height: f32,
    /// Probability of forcing the overhead pattern
    pub overhead_chance: f64,
    pub pattern_selection: PatternSelection,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 40.0,
            small_object_threshold: 2.0,
            distance_factor: 2.5,
            min_height: 0.3,
            overhead_chance: 0.15,
            pattern_selection: PatternSelection::Quadrant,
            fov_degrees: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.01,
        }
    }
}

/// Autonomous tour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Time an annotation stays on screen before moving on
    pub dwell_secs: f32,
    /// Orbit sweep used when no annotation is eligible
    pub orbit_radius: f32,
    pub orbit_height: f32,
    /// Radians per second
    pub orbit_speed: f32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            dwell_secs: 4.0,
            orbit_radius: 18.0,
            orbit_height: 6.0,
            orbit_speed: 0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub fit: FitConfig,
    pub camera: CameraConfig,
    pub tour: TourConfig,
    pub history_capacity: usize,
    pub texture_cache_capacity: usize,
    /// Seconds between plane-part self-healing passes
    pub self_heal_interval_secs: f32,
    /// Fixed RNG seed for reproducible pattern choice
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fit: FitConfig::default(),
            camera: CameraConfig::default(),
            tour: TourConfig::default(),
            history_capacity: 50,
            texture_cache_capacity: 32,
            self_heal_interval_secs: 2.0,
            seed: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}", value),
                })
            }
        }

        positive("fit.target_size", self.fit.target_size())?;
        positive("camera.min_distance", self.camera.min_distance)?;
        positive("camera.small_object_threshold", self.camera.small_object_threshold)?;
        positive("camera.distance_factor", self.camera.distance_factor)?;
        positive("tour.dwell_secs", self.tour.dwell_secs)?;
        if self.camera.max_distance < self.camera.min_distance {
            return Err(ConfigError::Invalid {
                field: "camera.max_distance",
                reason: "must not be below camera.min_distance".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.camera.overhead_chance) {
            return Err(ConfigError::Invalid {
                field: "camera.overhead_chance",
                reason: "must be within [0, 1]".to_string(),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: "must hold at least one snapshot".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            ViewerConfig::from_json_str(r#"{ "fit": { "profile": "showroom" } }"#).unwrap();
        assert_eq!(config.fit.target_size(), 30.0);
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.tour.dwell_secs, 4.0);
    }

    #[test]
    fn explicit_target_size_wins_over_profile() {
        let config = ViewerConfig::from_json_str(
            r#"{ "fit": { "profile": "compact", "target_size": 12.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.fit.target_size(), 12.5);
    }

    #[test]
    fn inverted_distance_range_is_rejected() {
        let err = ViewerConfig::from_json_str(
            r#"{ "camera": { "min_distance": 10.0, "max_distance": 5.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "camera.max_distance",
                ..
            }
        ));
    }

    #[test]
    fn zero_history_is_rejected() {
        assert!(ViewerConfig::from_json_str(r#"{ "history_capacity": 0 }"#).is_err());
    }
}
