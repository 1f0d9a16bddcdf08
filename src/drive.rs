//! External drive and pointer inputs read at the start of every tick.
//!
//! These are supplied by the host (interaction state machine, gesture
//! capture). The core never queues them: the most recent value wins.

use bevy::math::DVec2;
use bevy::prelude::Resource;

use crate::types::BodyId;

/// Intensity level of the external drive state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DriveIntensity {
    #[default]
    Idle,
    Attention,
    Ready,
    Active,
}

impl DriveIntensity {
    pub const ALL: [DriveIntensity; 4] = [
        DriveIntensity::Idle,
        DriveIntensity::Attention,
        DriveIntensity::Ready,
        DriveIntensity::Active,
    ];

    /// Multiplier on the central mass (×1 idle up to ×2 active).
    pub fn gravity_multiplier(self) -> f64 {
        match self {
            DriveIntensity::Idle => 1.0,
            DriveIntensity::Attention => 4.0 / 3.0,
            DriveIntensity::Ready => 5.0 / 3.0,
            DriveIntensity::Active => 2.0,
        }
    }

    /// Multiplier on every body's orbit speed.
    pub fn speed_multiplier(self) -> f64 {
        match self {
            DriveIntensity::Idle => 1.0,
            DriveIntensity::Attention => 1.2,
            DriveIntensity::Ready => 1.5,
            DriveIntensity::Active => 2.0,
        }
    }

    /// Scale applied to the target ellipse; higher intensity pulls it tighter.
    pub fn orbit_scale(self) -> f64 {
        match self {
            DriveIntensity::Idle => 1.0,
            DriveIntensity::Attention => 0.95,
            DriveIntensity::Ready => 0.9,
            DriveIntensity::Active => 0.85,
        }
    }
}

/// Drive state from the interaction state machine.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveState {
    pub intensity: DriveIntensity,
    /// All bodies are pulled to the centre instead of following orbits.
    pub convergence_active: bool,
}

impl DriveState {
    pub fn new(intensity: DriveIntensity) -> Self {
        Self {
            intensity,
            convergence_active: false,
        }
    }

    pub fn converging(intensity: DriveIntensity) -> Self {
        Self {
            intensity,
            convergence_active: true,
        }
    }
}

/// Pointer state from gesture capture.
///
/// `click` is a new click delivered this frame; the simulation consumes it
/// and tracks its time-to-live itself.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub hovered: Option<BodyId>,
    pub click: Option<DVec2>,
}

/// A click point that is still repelling bodies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveClick {
    pub point: DVec2,
    /// Seconds until the click stops repelling.
    pub remaining: f64,
}

impl ActiveClick {
    pub fn new(point: DVec2, ttl: f64) -> Self {
        Self {
            point,
            remaining: ttl,
        }
    }

    /// Count down by `dt`. Returns `false` once expired.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.remaining -= dt;
        self.is_live()
    }

    pub fn is_live(&self) -> bool {
        self.remaining > 0.0
    }
}
