//! Semi-implicit Euler integration for orbiting bodies.
//!
//! Velocity is updated from the net force first, then position from the
//! new velocity. This is first order but symplectic, which keeps springy
//! orbits from gaining energy over long sessions at frame-rate timesteps.

use bevy::math::DVec2;

use crate::types::Body;

/// Clamp a frame delta into `[0, max_dt]`.
///
/// Negative or non-finite deltas integrate nothing.
#[inline]
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max_dt)
    } else {
        0.0
    }
}

/// Advance one body by `dt` under `net_force`.
///
/// `trail_length` is `None` when trails are disabled, in which case any
/// existing trail is dropped. Otherwise the new position is pushed to the
/// front of the trail and the trail is truncated to the given length. A
/// zero `dt` does not move the body and records no trail point.
pub fn step(body: &mut Body, net_force: DVec2, dt: f64, trail_length: Option<usize>) {
    body.velocity += net_force / body.mass * dt;
    body.position += body.velocity * dt;

    match trail_length {
        Some(len) if dt > 0.0 => record_trail(body, len),
        Some(len) => body.trail.truncate(len),
        None => body.trail.clear(),
    }
}

/// Push the current position onto the trail, most recent first.
pub fn record_trail(body: &mut Body, max_len: usize) {
    if max_len == 0 {
        body.trail.clear();
        return;
    }
    body.trail.push_front(body.position);
    body.trail.truncate(max_len);
}

/// Advance the circular-mode orbit angle.
#[inline]
pub fn advance_angle(body: &mut Body, dt: f64) {
    body.angle += body.angular_velocity * dt;
}
