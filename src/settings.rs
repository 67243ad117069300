//! Physics and session settings
//!
//! Every tunable number of the toy lives here. Defaults reproduce the
//! constants in [`crate::consts`]; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ball ===
    pub ball_start_x: f64,
    pub ball_start_y: f64,
    pub ball_radius: f64,
    /// Carried on the ball but unused by the dynamics
    pub ball_mass: f64,
    /// Base per-frame gravity
    pub gravity: f64,
    /// Gravity added while accelerating in the air
    pub fall_boost: f64,
    /// Impulse along the heading while accelerating on the ground
    pub roll_boost: f64,
    /// Fraction of velocity kept on each contact frame, in (0, 1]
    pub friction: f64,

    // === Terrain ===
    pub wave_count: usize,
    pub amplitude_min: f64,
    pub amplitude_max: f64,
    pub frequency_min: f64,
    pub frequency_max: f64,
    pub terrain_baseline: f64,

    // === Contact ===
    pub arc_samples: usize,
    pub tangent_epsilon: f64,

    // === Host ===
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub terrain_segments: usize,
    /// 0 selects requestAnimationFrame, anything else a fixed interval
    pub frame_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_start_x: BALL_START_X,
            ball_start_y: BALL_START_Y,
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            gravity: GRAVITY,
            fall_boost: FALL_BOOST,
            roll_boost: ROLL_BOOST,
            friction: FRICTION,

            wave_count: WAVE_COUNT,
            amplitude_min: AMPLITUDE_MIN,
            amplitude_max: AMPLITUDE_MAX,
            frequency_min: FREQUENCY_MIN,
            frequency_max: FREQUENCY_MAX,
            terrain_baseline: TERRAIN_BASELINE,

            arc_samples: ARC_SAMPLES,
            tangent_epsilon: TANGENT_EPSILON,

            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            terrain_segments: TERRAIN_SEGMENTS,
            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dune_roller_settings";
    /// Largest canvas side accepted (pixels)
    pub const MAX_CANVAS_SIZE: f64 = 16384.0;
    /// Slowest fixed frame interval accepted
    pub const MAX_FRAME_INTERVAL_MS: u32 = 60_000;

    /// Parse settings from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on.
    pub fn validate(&self) -> Result<()> {
        let all_finite = [
            self.ball_start_x,
            self.ball_start_y,
            self.ball_radius,
            self.ball_mass,
            self.gravity,
            self.fall_boost,
            self.roll_boost,
            self.friction,
            self.amplitude_min,
            self.amplitude_max,
            self.frequency_min,
            self.frequency_max,
            self.terrain_baseline,
            self.tangent_epsilon,
            self.canvas_width,
            self.canvas_height,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::invalid("*", "all numbers must be finite"));
        }

        if self.ball_radius <= 0.0 {
            return Err(ConfigError::invalid(
                "ball_radius",
                format!("must be positive, got {}", self.ball_radius),
            ));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::invalid(
                "friction",
                format!("must lie in (0, 1], got {}", self.friction),
            ));
        }
        if self.gravity < 0.0 {
            return Err(ConfigError::invalid("gravity", "must not be negative"));
        }
        if self.fall_boost < 0.0 {
            return Err(ConfigError::invalid("fall_boost", "must not be negative"));
        }
        if self.roll_boost < 0.0 {
            return Err(ConfigError::invalid("roll_boost", "must not be negative"));
        }
        if self.amplitude_min > self.amplitude_max {
            return Err(ConfigError::invalid(
                "amplitude_min",
                format!("{} exceeds amplitude_max {}", self.amplitude_min, self.amplitude_max),
            ));
        }
        if self.frequency_min > self.frequency_max {
            return Err(ConfigError::invalid(
                "frequency_min",
                format!("{} exceeds frequency_max {}", self.frequency_min, self.frequency_max),
            ));
        }
        if self.arc_samples == 0 {
            return Err(ConfigError::invalid("arc_samples", "must be at least 1"));
        }
        if self.tangent_epsilon <= 0.0 {
            return Err(ConfigError::invalid("tangent_epsilon", "must be positive"));
        }
        if self.terrain_segments == 0 {
            return Err(ConfigError::invalid("terrain_segments", "must be at least 1"));
        }
        let canvas = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ];
        for (field, size) in canvas {
            if !(1.0..=Self::MAX_CANVAS_SIZE).contains(&size) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must lie in [1, {}], got {}", Self::MAX_CANVAS_SIZE, size),
                ));
            }
        }
        if self.frame_interval_ms > Self::MAX_FRAME_INTERVAL_MS {
            return Err(ConfigError::invalid(
                "frame_interval_ms",
                format!(
                    "must be at most {}, got {}",
                    Self::MAX_FRAME_INTERVAL_MS,
                    self.frame_interval_ms
                ),
            ));
        }
        Ok(())
    }

    /// Canvas size in whole pixels, clamped to the accepted range
    pub fn canvas_pixels(&self) -> (u32, u32) {
        let px = |size: f64| size.clamp(1.0, Self::MAX_CANVAS_SIZE).round() as u32;
        (px(self.canvas_width), px(self.canvas_height))
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "gravity": 0.25, "wave_count": 3 }"#).unwrap();
        assert_eq!(settings.gravity, 0.25);
        assert_eq!(settings.wave_count, 3);
        assert_eq!(settings.ball_radius, BALL_RADIUS);
        assert_eq!(settings.arc_samples, ARC_SAMPLES);
    }

    #[test]
    fn test_friction_out_of_range_rejected() {
        for bad in ["0.0", "1.5", "-0.2"] {
            let json = format!(r#"{{ "friction": {bad} }}"#);
            match Settings::from_json(&json) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "friction"),
                other => panic!("expected friction error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let err = Settings::from_json(r#"{ "ball_radius": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ball_radius", .. }));
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let err =
            Settings::from_json(r#"{ "amplitude_min": 40, "amplitude_max": 30 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "amplitude_min", .. }));

        let err =
            Settings::from_json(r#"{ "frequency_min": 0.1, "frequency_max": 0.01 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "frequency_min", .. }));
    }

    #[test]
    fn test_canvas_and_interval_bounds() {
        let err = Settings::from_json(r#"{ "canvas_height": 0.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "canvas_height", .. }));

        let err = Settings::from_json(r#"{ "canvas_width": 1e12 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "canvas_width", .. }));

        let err = Settings::from_json(r#"{ "frame_interval_ms": 4000000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "frame_interval_ms", .. }));
    }

    #[test]
    fn test_canvas_pixels_clamps_instead_of_wrapping() {
        assert_eq!(Settings::default().canvas_pixels(), (1000, 800));

        let huge = Settings {
            canvas_width: 1e12,
            canvas_height: -5.0,
            ..Settings::default()
        };
        assert_eq!(huge.canvas_pixels(), (16384, 1));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = Settings::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_round_trip_preserves_values() {
        let mut settings = Settings::default();
        settings.roll_boost = 0.125;
        settings.frame_interval_ms = 0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
