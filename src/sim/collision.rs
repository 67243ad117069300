//! Ball-terrain collision detection
//!
//! The terrain is an analytic height field, so instead of a shape-vs-shape
//! test we sample points along the underside of the ball and compare each
//! against the surface height at its x. Heights grow downward: a sample is
//! under the ground when its y exceeds the terrain height.
//!
//! Height fields are passed as `Fn(f64) -> f64` so tests can substitute
//! synthetic or instrumented terrain.

use glam::DVec2;
use std::f64::consts::PI;

use super::state::{Ball, MotionMode};
use crate::consts::{ARC_SAMPLES, TANGENT_EPSILON};
use crate::settings::Settings;
use crate::unit_at;

/// A sampled point of the ball and how far below the surface it sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSample {
    pub point: DVec2,
    /// `point.y - terrain height`, positive when under the surface
    pub penetration: f64,
}

/// Result of a collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    NoContact,
    Contact {
        /// Deepest overlapping sample, measured before correction
        deepest: ContactSample,
        /// Surface points just left and right of the contact, for the slope
        tangents: (DVec2, DVec2),
    },
}

impl CollisionOutcome {
    pub fn is_contact(&self) -> bool {
        matches!(self, CollisionOutcome::Contact { .. })
    }
}

/// Sampling parameters for a collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactProbe {
    /// Points spread over the lower half of the ball
    pub samples: usize,
    /// Horizontal offset of the two slope probes
    pub tangent_epsilon: f64,
}

impl Default for ContactProbe {
    fn default() -> Self {
        Self {
            samples: ARC_SAMPLES,
            tangent_epsilon: TANGENT_EPSILON,
        }
    }
}

impl ContactProbe {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            samples: settings.arc_samples,
            tangent_epsilon: settings.tangent_epsilon,
        }
    }
}

/// True when the terrain at both horizontal edges of the ball is more than
/// a diameter away from its center, so no sample can touch.
pub fn out_of_reach<F>(ball: &Ball, height: &F) -> bool
where
    F: Fn(f64) -> f64,
{
    let reach = ball.radius * 2.0;
    (height(ball.pos.x - ball.radius) - ball.pos.y).abs() > reach
        && (height(ball.pos.x + ball.radius) - ball.pos.y).abs() > reach
}

/// Points on the underside of the ball at angles `n * π / count`, n in 0..count
pub fn arc_samples(ball: &Ball, count: usize) -> impl Iterator<Item = DVec2> + '_ {
    let step = PI / count as f64;
    (0..count).map(move |n| ball.pos + unit_at(step * n as f64) * ball.radius)
}

/// The overlapping sample with the greatest penetration, if any overlaps.
///
/// Ties keep the first sample in angle order.
pub fn deepest_sample<F>(ball: &Ball, count: usize, height: &F) -> Option<ContactSample>
where
    F: Fn(f64) -> f64,
{
    let mut deepest: Option<ContactSample> = None;
    for point in arc_samples(ball, count) {
        let penetration = point.y - height(point.x);
        if penetration > 0.0 && deepest.is_none_or(|d| penetration > d.penetration) {
            deepest = Some(ContactSample { point, penetration });
        }
    }
    deepest
}

fn set_mode(ball: &mut Ball, next: MotionMode) {
    if ball.mode != next {
        log::debug!("Motion mode {:?} -> {:?} at x={:.1}", ball.mode, next, ball.pos.x);
    }
    ball.mode = next;
}

/// Detect contact with the terrain and push the ball out of it.
///
/// On contact the motion mode advances, the ball is lifted vertically by the
/// deepest penetration, and one frame of gravity is taken back out of the
/// vertical velocity. Other samples may still overlap after the lift.
pub fn resolve<F>(ball: &mut Ball, probe: &ContactProbe, height: F) -> CollisionOutcome
where
    F: Fn(f64) -> f64,
{
    if out_of_reach(ball, &height) {
        set_mode(ball, ball.mode.on_miss());
        return CollisionOutcome::NoContact;
    }

    let Some(deepest) = deepest_sample(ball, probe.samples, &height) else {
        set_mode(ball, ball.mode.on_miss());
        return CollisionOutcome::NoContact;
    };

    set_mode(ball, ball.mode.on_contact());
    ball.pos.y -= deepest.penetration;
    ball.vel.y -= ball.gravity;

    let eps = probe.tangent_epsilon;
    let x = deepest.point.x;
    let tangents = (
        DVec2::new(x - eps, height(x - eps)),
        DVec2::new(x + eps, height(x + eps)),
    );

    log::trace!(
        "Contact at ({:.2}, {:.2}), depth {:.3}",
        deepest.point.x,
        deepest.point.y,
        deepest.penetration
    );

    CollisionOutcome::Contact { deepest, tangents }
}
