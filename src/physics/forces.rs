//! Force model for orbiting bodies.
//!
//! The net force on a body is the linear sum of independent terms:
//! - convergence spring toward the origin (replaces every term but drag)
//! - orbital-restoring spring toward the body's orbit target
//! - softened central gravity, scaled by drive intensity
//! - repulsion away from a live click point
//! - a constant lift while hovered
//! - linear drag, in every mode, so transients settle

use bevy::math::DVec2;

use crate::config::ForceConstants;
use crate::types::Body;

/// Per-body inputs to the force model for one tick.
#[derive(Clone, Copy, Debug)]
pub struct ForceContext<'a> {
    /// All bodies are being pulled to the origin.
    pub convergence_active: bool,
    /// Live click point, if any has not yet expired.
    pub click: Option<DVec2>,
    /// Drive-state multiplier on the central mass.
    pub gravity_multiplier: f64,
    /// Whether this body is hovered.
    pub hovered: bool,
    pub constants: &'a ForceConstants,
}

/// Net force on `body` given its orbit target.
///
/// Always finite for finite inputs: the gravity and repulsion terms are
/// softened, and a zero-length direction contributes nothing.
pub fn compute_forces(body: &Body, target: DVec2, ctx: &ForceContext) -> DVec2 {
    let k = ctx.constants;

    let drag = drag_force(body.velocity, k.damping);

    if ctx.convergence_active {
        return spring_force(body.position, DVec2::ZERO, k.convergence_spring) + drag;
    }

    let mut force = drag;

    if !ctx.hovered {
        force += spring_force(body.position, target, k.orbital_spring);
    }

    force += gravity_force(
        body.position,
        body.mass,
        k.central_gravity * ctx.gravity_multiplier,
        k.gravity_softening,
    );

    if let Some(click) = ctx.click {
        force += repulsion_force(
            body.position,
            click,
            k.repulsion_strength,
            k.repulsion_softening,
        );
    }

    if ctx.hovered {
        force += DVec2::Y * k.hover_lift;
    }

    force
}

/// Hookean spring: F = k · (target − position).
#[inline]
pub fn spring_force(position: DVec2, target: DVec2, k: f64) -> DVec2 {
    (target - position) * k
}

/// Linear drag: F = −c · v.
#[inline]
pub fn drag_force(velocity: DVec2, damping: f64) -> DVec2 {
    -velocity * damping
}

/// Softened attraction toward the origin:
/// F = G·m_center·m_body / (d² + ε) in the direction of the origin.
#[inline]
pub fn gravity_force(position: DVec2, body_mass: f64, central_gravity: f64, softening: f64) -> DVec2 {
    let toward = -position;
    let d_squared = toward.length_squared();
    let magnitude = central_gravity * body_mass / (d_squared + softening);
    toward.normalize_or_zero() * magnitude
}

/// Inverse-distance push away from `source`: F = R / (d + ε).
#[inline]
pub fn repulsion_force(position: DVec2, source: DVec2, strength: f64, softening: f64) -> DVec2 {
    let away = position - source;
    let magnitude = strength / (away.length() + softening);
    away.normalize_or_zero() * magnitude
}
