//! Orbital parameter generation and target-curve evaluation.
//!
//! Orbital parameters are a pure function of a body's slot index and the
//! total body count; they are never stored or mutated. The simulation
//! re-evaluates the target point on each body's orbit every tick and the
//! force model pulls the body toward it.

use std::f64::consts::TAU;

use bevy::math::DVec2;

/// Shape and phase of one body's orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalParams {
    /// Semi-major axis, always positive.
    pub semi_major_axis: f64,
    /// Eccentricity in [0, 1).
    pub eccentricity: f64,
    /// Starting angle around the orbit (radians).
    pub phase_offset: f64,
}

/// Compute the orbit of body `index` out of `total`.
///
/// Phase offsets are spread evenly around a full revolution. Defined for
/// `total > 0` and `index < total`; callers guarantee this through the
/// validated configuration.
pub fn generate(index: usize, total: usize, base_radius: f64, eccentricity: f64) -> OrbitalParams {
    debug_assert!(total > 0 && index < total);
    OrbitalParams {
        semi_major_axis: base_radius,
        eccentricity,
        phase_offset: index as f64 * TAU / total as f64,
    }
}

impl OrbitalParams {
    /// Orbit angle at orbit-clock time `t` for the given angular speed.
    #[inline]
    pub fn angle_at(&self, t: f64, speed: f64) -> f64 {
        self.phase_offset + t * speed
    }

    /// Point on the ellipse at angle `theta`, scaled by `scale`.
    ///
    /// `scale` below 1 tightens the ellipse (stronger central pull).
    #[inline]
    pub fn point_at_angle(&self, theta: f64, scale: f64) -> DVec2 {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        DVec2::new(a * (1.0 + e) * theta.cos(), a * (1.0 - e) * theta.sin()) * scale
    }

    /// Target position at orbit-clock time `t`.
    #[inline]
    pub fn target_at(&self, t: f64, speed: f64, scale: f64) -> DVec2 {
        self.point_at_angle(self.angle_at(t, speed), scale)
    }

    /// Initial seed: on the circle of radius `semi_major_axis` at the phase
    /// offset, moving tangentially at the orbit's angular speed.
    pub fn seed(&self, speed: f64) -> (DVec2, DVec2) {
        let direction = DVec2::from_angle(self.phase_offset);
        let position = direction * self.semi_major_axis;
        let velocity = direction.perp() * (self.semi_major_axis * speed);
        (position, velocity)
    }
}

/// Target on a circle of `radius` at `angle`, used in circular mode.
#[inline]
pub fn circular_target(radius: f64, angle: f64, scale: f64) -> DVec2 {
    DVec2::from_angle(angle) * (radius * scale)
}
