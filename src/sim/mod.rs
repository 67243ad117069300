//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock time
//! - Seeded RNG only (terrain generation)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod velocity;

pub use collision::{
    CollisionOutcome, ContactProbe, ContactSample, arc_samples, deepest_sample, out_of_reach, resolve,
};
pub use state::{Ball, MotionMode, Session, Viewport};
pub use terrain::{FIXTURE_WAVES, Terrain, WaveComponent};
pub use tick::{TickInput, tick};
pub use velocity::update_velocity;
