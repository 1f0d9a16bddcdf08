//! Test utilities for the orbital simulation.
//!
//! Provides fixtures for building bodies and assertion helpers for
//! checking physical quantities.

use std::collections::VecDeque;

use bevy::math::DVec2;

use crate::types::{Body, BodyId};

/// Fixtures for creating test bodies.
pub mod fixtures {
    use super::*;

    /// A unit-mass body with id 0 at `position` moving at `velocity`.
    pub fn body_at(position: DVec2, velocity: DVec2) -> Body {
        body_with_id(0, position, velocity)
    }

    /// A unit-mass body with the given slot id.
    pub fn body_with_id(id: usize, position: DVec2, velocity: DVec2) -> Body {
        Body {
            id: BodyId(id),
            position,
            velocity,
            angle: 0.0,
            angular_velocity: 0.0,
            orbit_radius: 180.0,
            orbit_eccentricity: 0.0,
            orbit_speed: 0.0,
            phase_offset: 0.0,
            mass: 1.0,
            is_hovered: false,
            is_clicked: false,
            click_cooldown: 0.0,
            trail: VecDeque::new(),
        }
    }
}

/// Assertion helpers for physical quantities.
pub mod assertions {
    use super::*;
    use std::f64::consts::TAU;

    /// Kinetic energy ½·m·v².
    pub fn kinetic_energy(mass: f64, velocity: DVec2) -> f64 {
        0.5 * mass * velocity.length_squared()
    }

    /// Total linear momentum of a set of bodies.
    pub fn total_momentum(bodies: &[Body]) -> DVec2 {
        bodies.iter().map(Body::momentum).sum()
    }

    /// Counter-clockwise angle from `a` to `b`, in [0, 2π).
    pub fn angle_between(a: DVec2, b: DVec2) -> f64 {
        let angle = a.angle_to(b);
        if angle < 0.0 { angle + TAU } else { angle }
    }
}
