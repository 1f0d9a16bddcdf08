//! Core body types and constants for the orbital simulation.

use std::collections::VecDeque;
use std::fmt;

use bevy::math::DVec2;

/// Largest time step (seconds) the integrator will ever take in one tick.
///
/// Frames longer than this (tab resume, debugger stalls) are clamped so the
/// springs cannot overshoot and blow up.
pub const DEFAULT_MAX_DT: f64 = 0.1;

/// Number of bodies in the default layout.
pub const DEFAULT_BODY_COUNT: usize = 7;

/// Orbit radius of the default layout (world units).
pub const DEFAULT_BASE_RADIUS: f64 = 180.0;

/// Stable identifier of a body. Equal to its slot index in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub usize);

impl BodyId {
    /// Slot index of this body.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// How bodies follow their orbit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrbitMode {
    /// Track a point moving along an ellipse (re-evaluated every tick).
    #[default]
    Elliptical,
    /// Track a point on a circle whose angle is integrated per body.
    Circular,
}

/// A single simulated orbiting body.
///
/// Position and velocity are only written by the integrator (and by the
/// collision resolver for velocity). Hover/click flags are set by the host.
#[derive(Clone, Debug)]
pub struct Body {
    pub id: BodyId,
    /// Position in world units, origin at the orbit centre.
    pub position: DVec2,
    /// Velocity in world units per second.
    pub velocity: DVec2,
    /// Orbit angle (radians), integrated in circular mode only.
    pub angle: f64,
    /// Angular velocity (radians per second) used in circular mode.
    pub angular_velocity: f64,
    /// Cached semi-major axis of this body's orbit.
    pub orbit_radius: f64,
    /// Cached eccentricity of this body's orbit.
    pub orbit_eccentricity: f64,
    /// Base angular speed (radians per second) before drive multipliers.
    pub orbit_speed: f64,
    /// Phase offset of this body around the orbit.
    pub phase_offset: f64,
    /// Mass, always positive.
    pub mass: f64,
    /// Set while the pointer hovers this body; releases it from its orbit.
    pub is_hovered: bool,
    /// Set while the body is in click cooldown; excludes it from collisions.
    pub is_clicked: bool,
    /// Remaining click cooldown in seconds (0 when not clicked).
    pub click_cooldown: f64,
    /// Past positions, most recent first. Capped by the quality settings.
    pub trail: VecDeque<DVec2>,
}

impl Body {
    /// Distance from the orbit centre.
    pub fn distance_from_origin(&self) -> f64 {
        self.position.length()
    }

    /// Whether position and velocity are both finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Momentum vector (mass times velocity).
    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }
}
