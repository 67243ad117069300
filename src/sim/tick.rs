//! Per-frame simulation step
//!
//! One frame: apply held input, integrate the ball, resolve terrain contact,
//! then redirect velocity along the slope if the ball touched down.

use super::collision::{CollisionOutcome, ContactProbe, resolve};
use super::state::{Ball, Session, Viewport};
use super::velocity::update_velocity;
use crate::unit_at;

/// Input sampled at the start of a frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Accelerate button (mouse/touch) is held
    pub accelerate: bool,
}

/// Held-input effect: heavier fall in the air, a push along the heading on
/// the ground.
pub fn speed_up(ball: &mut Ball, fall_boost: f64, roll_boost: f64) {
    if ball.mode.is_grounded() {
        ball.gravity = ball.gravity_base;
        ball.vel += unit_at(ball.heading) * roll_boost;
    } else {
        ball.gravity = ball.gravity_base + fall_boost;
    }
}

/// Input released: back to base gravity
pub fn release(ball: &mut Ball) {
    ball.gravity = ball.gravity_base;
}

/// Apply gravity, move the ball and scroll the viewport with it
pub fn integrate(ball: &mut Ball, viewport: &mut Viewport) {
    ball.vel.y += ball.gravity;
    ball.pos += ball.vel;
    viewport.x += ball.vel.x;
    ball.refresh_heading();
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &TickInput) {
    let Session {
        settings,
        terrain,
        ball,
        viewport,
        frame,
        ..
    } = session;

    *frame += 1;

    if input.accelerate {
        speed_up(ball, settings.fall_boost, settings.roll_boost);
    } else {
        release(ball);
    }

    integrate(ball, viewport);

    let probe = ContactProbe::from_settings(settings);
    if let CollisionOutcome::Contact {
        tangents: (left, right),
        ..
    } = resolve(ball, &probe, |x| terrain.height_at(x))
    {
        update_velocity(ball, left, right);
    }
}
