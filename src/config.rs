//! Core configuration
//!
//! Tunables for stroke capture and animation timing. Serialized as JSON;
//! fields use `#[serde(default)]` so that adding new settings won't break
//! existing config files.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configurable parameters of the drawing core
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Anti-jitter filter: minimum distance between accepted stroke points
    pub min_point_spacing: f64,
    /// Strokes with fewer accepted points than this are discarded
    pub min_stroke_points: usize,
    /// Period of the entry transition (center and scale), in seconds
    pub transition_period: f64,
    /// Rotation period is drawn uniformly from this range, in seconds
    pub rotation_period_min: f64,
    pub rotation_period_max: f64,
    /// Fixed per-shape scale jitter is drawn uniformly from this range
    pub scale_jitter_min: f64,
    pub scale_jitter_max: f64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            min_point_spacing: 8.0,
            min_stroke_points: 5,
            transition_period: 3.0,
            rotation_period_min: 5.0,
            rotation_period_max: 20.0,
            scale_jitter_min: 0.85,
            scale_jitter_max: 1.0,
        }
    }
}

impl CoreConfig {
    /// Load a config from disk, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No config file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save the config to disk as pretty JSON
    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to write config: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize config: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let c = CoreConfig::default();
        assert!(c.min_point_spacing > 0.0);
        assert!(c.min_stroke_points >= 2);
        assert!(c.rotation_period_min < c.rotation_period_max);
        assert!(c.scale_jitter_min < c.scale_jitter_max);
        assert!(c.scale_jitter_max <= 1.0);
    }

    #[test]
    fn test_round_trip_through_json() {
        let c = CoreConfig {
            min_point_spacing: 4.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: CoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.min_point_spacing, 4.0);
        assert_eq!(back.min_stroke_points, c.min_stroke_points);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: CoreConfig = serde_json::from_str(r#"{"transition_period": 1.5}"#).unwrap();
        assert_eq!(back.transition_period, 1.5);
        assert_eq!(
            back.min_point_spacing,
            CoreConfig::default().min_point_spacing
        );
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let c = CoreConfig::load(Path::new("/nonexistent/quiggle/config.json"));
        assert_eq!(c.min_stroke_points, CoreConfig::default().min_stroke_points);
    }
}
