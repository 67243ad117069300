//! Ball, viewport and session state
//!
//! Everything one run of the toy owns lives in a [`Session`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use super::tick::{TickInput, tick};
use crate::heading_of;
use crate::settings::Settings;

/// How the ball is currently interacting with the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionMode {
    /// Airborne
    #[default]
    Falling,
    /// First contact frame after a fall
    Landing,
    /// Continued contact
    Rolling,
}

impl MotionMode {
    /// Next mode when the ball touches the ground this frame
    pub fn on_contact(self) -> Self {
        match self {
            MotionMode::Falling => MotionMode::Landing,
            MotionMode::Landing | MotionMode::Rolling => MotionMode::Rolling,
        }
    }

    /// Next mode when the ball is clear of the ground this frame
    pub fn on_miss(self) -> Self {
        MotionMode::Falling
    }

    pub fn is_grounded(self) -> bool {
        !matches!(self, MotionMode::Falling)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Not used by the dynamics
    pub mass: f64,
    /// Gravity when no input is held
    pub gravity_base: f64,
    /// Gravity applied this frame
    pub gravity: f64,
    /// Fraction of velocity kept per contact frame
    pub friction: f64,
    pub mode: MotionMode,
    /// Direction of travel (radians), refreshed after each velocity change
    pub heading: f64,
}

impl Ball {
    /// A ball at rest at the configured start position
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            pos: DVec2::new(settings.ball_start_x, settings.ball_start_y),
            vel: DVec2::ZERO,
            radius: settings.ball_radius,
            mass: settings.ball_mass,
            gravity_base: settings.gravity,
            gravity: settings.gravity,
            friction: settings.friction,
            mode: MotionMode::Falling,
            heading: 0.0,
        }
    }

    /// Recompute heading from the current velocity
    #[inline]
    pub fn refresh_heading(&mut self) {
        self.heading = heading_of(self.vel);
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Lowest point of the ball (largest y)
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.radius
    }
}

/// Horizontal scroll of the camera; follows the ball's horizontal travel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
}

impl Viewport {
    /// World x to screen x
    #[inline]
    pub fn to_screen(&self, world_x: f64) -> f64 {
        world_x - self.x
    }

    /// Screen x to world x
    #[inline]
    pub fn to_world(&self, screen_x: f64) -> f64 {
        screen_x + self.x
    }
}

/// One run of the toy: terrain, ball, viewport and the held-input flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub settings: Settings,
    pub terrain: Terrain,
    pub ball: Ball,
    pub viewport: Viewport,
    /// Frames stepped so far
    pub frame: u64,
    /// Polled at the start of every step
    #[serde(skip)]
    input: TickInput,
}

impl Session {
    /// Create a session over the given terrain
    pub fn new(settings: Settings, terrain: Terrain) -> Self {
        log::info!(
            "Session created: {} waves, baseline {}, ball r={} at ({}, {})",
            terrain.waves().len(),
            terrain.baseline(),
            settings.ball_radius,
            settings.ball_start_x,
            settings.ball_start_y
        );
        Self {
            ball: Ball::from_settings(&settings),
            settings,
            terrain,
            viewport: Viewport::default(),
            frame: 0,
            input: TickInput::default(),
        }
    }

    /// Create a session with dunes generated from `seed`
    pub fn seeded(seed: u64, settings: Settings) -> Self {
        log::info!("Generating terrain with seed: {}", seed);
        let terrain = Terrain::generate(seed, &settings);
        Self::new(settings, terrain)
    }

    /// Create a session on the literal fixture dunes
    pub fn fixture(settings: Settings) -> Self {
        let terrain = Terrain::fixture(settings.terrain_baseline);
        Self::new(settings, terrain)
    }

    /// Record whether the accelerate input is held; read at the next step
    pub fn set_accelerate(&mut self, held: bool) {
        self.input.accelerate = held;
    }

    pub fn press(&mut self) {
        self.set_accelerate(true);
    }

    pub fn release(&mut self) {
        self.set_accelerate(false);
    }

    pub fn accelerate_held(&self) -> bool {
        self.input.accelerate
    }

    /// Advance one frame
    pub fn step(&mut self) {
        let input = self.input.clone();
        tick(self, &input);
    }

    /// Terrain height for renderers
    #[inline]
    pub fn height_at(&self, x: f64) -> f64 {
        self.terrain.height_at(x)
    }
}
