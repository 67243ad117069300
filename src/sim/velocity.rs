//! Contact velocity response
//!
//! On contact the ball's velocity is redirected along the local slope. A
//! landing keeps only the part of its speed that lines up with the slope,
//! so a head-on impact is absorbed while a grazing one carries on. Rolling
//! keeps its full speed. Gravity projected onto the slope is then added,
//! pulling the ball downhill.

use glam::DVec2;
use std::f64::consts::PI;

use super::state::{Ball, MotionMode};
use crate::unit_at;

/// Direction of the surface between two probe points, pointing the way the
/// ball travels.
///
/// With no horizontal velocity the downhill direction is chosen.
pub fn slope_angle(left: DVec2, right: DVec2, vx: f64) -> f64 {
    let d = right - left;
    let angle = d.y.atan2(d.x);
    let direction = if vx != 0.0 { vx } else { d.y };
    if direction > 0.0 { angle } else { angle + PI }
}

/// Fraction of speed kept through this contact frame
pub fn retention(mode: MotionMode, slope: f64, heading: f64) -> f64 {
    match mode {
        MotionMode::Landing => (slope - heading).abs().cos(),
        // Falling never reaches the response; treat it like rolling
        MotionMode::Rolling | MotionMode::Falling => 1.0,
    }
}

/// Redirect the ball's velocity along the slope between the tangent probes
pub fn update_velocity(ball: &mut Ball, left: DVec2, right: DVec2) {
    let slope = slope_angle(left, right, ball.vel.x);
    let speed = ball.speed() * retention(ball.mode, slope, ball.heading);
    let along = unit_at(slope);

    ball.vel = along * speed * ball.friction;

    let slope_accel = ball.gravity * slope.sin();
    ball.vel += along * slope_accel;

    ball.refresh_heading();
}
