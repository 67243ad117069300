//! Dune Roller - a ball rolling over sinusoidal dunes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (height field, collisions, ball state)
//! - `renderer`: Read-only render queries (terrain silhouette, ball, contact markers)
//! - `settings`: Data-driven physics constants, loadable from JSON
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Number of sine components summed into the terrain
    pub const WAVE_COUNT: usize = 10;
    /// Wave amplitude range (pixels)
    pub const AMPLITUDE_MIN: f64 = 10.0;
    pub const AMPLITUDE_MAX: f64 = 30.0;
    /// Wave frequency range (radians per pixel)
    pub const FREQUENCY_MIN: f64 = 0.001;
    pub const FREQUENCY_MAX: f64 = 0.01;
    /// Vertical baseline of the dunes (screen y grows downward)
    pub const TERRAIN_BASELINE: f64 = 600.0;

    /// Ball defaults
    pub const BALL_START_X: f64 = 100.0;
    pub const BALL_START_Y: f64 = 50.0;
    pub const BALL_RADIUS: f64 = 30.0;
    /// Reserved, not used by the dynamics
    pub const BALL_MASS: f64 = 5.0;
    /// Per-frame gravity
    pub const GRAVITY: f64 = 0.1;
    /// Extra gravity while accelerating in the air
    pub const FALL_BOOST: f64 = 0.3;
    /// Per-frame impulse along the heading while accelerating on the ground
    pub const ROLL_BOOST: f64 = 0.05;
    /// Velocity retained per contact frame (1.0 = frictionless)
    pub const FRICTION: f64 = 1.0;

    /// Points sampled on the lower half of the ball
    pub const ARC_SAMPLES: usize = 10;
    /// Horizontal offset of the slope probes around the contact point
    pub const TANGENT_EPSILON: f64 = 0.001;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f64 = 1000.0;
    pub const CANVAS_HEIGHT: f64 = 800.0;
    /// Terrain polygon resolution across the canvas
    pub const TERRAIN_SEGMENTS: usize = 100;
    /// Fixed-interval frame driver period (ms); 0 means requestAnimationFrame
    pub const FRAME_INTERVAL_MS: u32 = 1;
}

/// Direction of a vector as an angle in radians, in (-π, π]
///
/// A zero vector yields 0 rather than NaN.
#[inline]
pub fn heading_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn unit_at(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_of_zero_vector() {
        assert_eq!(heading_of(DVec2::ZERO), 0.0);
    }

    #[test]
    fn test_heading_of_down_is_positive_half_pi() {
        // Screen space: +y points down
        assert!((heading_of(DVec2::new(0.0, 3.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((heading_of(DVec2::new(-1.0, 0.0)) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_unit_at() {
        let v = unit_at(PI);
        assert!((v.x + 1.0).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
        assert!((v.length() - 1.0).abs() < 1e-12);
    }
}
