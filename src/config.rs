//! Simulation configuration and structural validation.
//!
//! Configuration is plain data with sensible defaults; use struct-update
//! syntax to override individual fields:
//!
//! ```
//! use rendezvous::config::SimulationConfig;
//!
//! let config = SimulationConfig {
//!     body_count: 5,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::collision::CollisionModel;
use crate::quality::QualityConfig;
use crate::types::{DEFAULT_BASE_RADIUS, DEFAULT_BODY_COUNT, DEFAULT_MAX_DT, OrbitMode};

/// Structural configuration errors. Raised only at construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("body count must be at least 1")]
    NoBodies,

    #[error("mass of body {index} must be positive and finite (got {mass})")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("mass list has {got} entries but body count is {expected}")]
    MassCountMismatch { expected: usize, got: usize },

    #[error("{name} must be positive and finite (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },

    #[error("eccentricity must be in [0, 1) (got {0})")]
    InvalidEccentricity(f64),

    #[error("quality low threshold {low} must be below high threshold {high}")]
    InvertedQualityThresholds { low: f64, high: f64 },

    #[error("quality {name} window must be at least one sample")]
    EmptyQualityWindow { name: &'static str },
}

/// Force constants used by the force model.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceConstants {
    /// Spring constant pulling a body toward its orbit target.
    pub orbital_spring: f64,
    /// Spring constant pulling every body to the origin in convergence mode.
    pub convergence_spring: f64,
    /// Gravitational constant times the central mass (G·m_center).
    pub central_gravity: f64,
    /// Softening added to d² in the gravity term.
    pub gravity_softening: f64,
    /// Repulsion magnitude constant around an active click point.
    pub repulsion_strength: f64,
    /// Softening added to d in the repulsion term.
    pub repulsion_softening: f64,
    /// How long a click keeps repelling (seconds).
    pub click_ttl: f64,
    /// Upward force applied to a hovered body.
    pub hover_lift: f64,
    /// Linear drag coefficient (force = -damping · velocity).
    pub damping: f64,
}

impl Default for ForceConstants {
    fn default() -> Self {
        Self {
            orbital_spring: 0.1,
            convergence_spring: 0.3,
            central_gravity: 2000.0,
            gravity_softening: 100.0,
            repulsion_strength: 100.0,
            repulsion_softening: 1.0,
            click_ttl: 0.5,
            hover_lift: 2.0,
            damping: 0.5,
        }
    }
}

/// Full configuration of a simulation instance.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Number of bodies (fixed for the lifetime of the simulation).
    pub body_count: usize,
    /// Semi-major axis of every orbit.
    pub base_radius: f64,
    /// Eccentricity of every orbit, in [0, 1).
    pub eccentricity: f64,
    /// Visual radius of a body, used for collision only.
    pub body_radius: f64,
    /// Base angular speed around the orbit (radians per second).
    pub base_orbit_speed: f64,
    /// Mass used for every body when `masses` is `None`.
    pub default_mass: f64,
    /// Optional per-body masses (length must equal `body_count`).
    pub masses: Option<Vec<f64>>,
    pub orbit_mode: OrbitMode,
    pub collision_model: CollisionModel,
    /// Spatial grid cell size. `None` uses the body diameter.
    pub cell_size: Option<f64>,
    /// Largest dt integrated in one tick (seconds).
    pub max_dt: f64,
    /// Every body must be closer than this to the origin for convergence.
    pub convergence_threshold: f64,
    pub forces: ForceConstants,
    pub quality: QualityConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            body_count: DEFAULT_BODY_COUNT,
            base_radius: DEFAULT_BASE_RADIUS,
            eccentricity: 0.15,
            body_radius: 24.0,
            base_orbit_speed: 0.2,
            default_mass: 1.0,
            masses: None,
            orbit_mode: OrbitMode::Elliptical,
            collision_model: CollisionModel::default(),
            cell_size: None,
            max_dt: DEFAULT_MAX_DT,
            convergence_threshold: 20.0,
            forces: ForceConstants::default(),
            quality: QualityConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Check every structural parameter. Never substitutes defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.body_count == 0 {
            return Err(ConfigError::NoBodies);
        }

        positive("base_radius", self.base_radius)?;
        positive("body_radius", self.body_radius)?;
        positive("max_dt", self.max_dt)?;
        positive("convergence_threshold", self.convergence_threshold)?;
        finite("base_orbit_speed", self.base_orbit_speed)?;

        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(ConfigError::InvalidEccentricity(self.eccentricity));
        }

        if let Some(cell_size) = self.cell_size {
            positive("cell_size", cell_size)?;
        }

        match &self.masses {
            Some(masses) => {
                if masses.len() != self.body_count {
                    return Err(ConfigError::MassCountMismatch {
                        expected: self.body_count,
                        got: masses.len(),
                    });
                }
                for (index, &mass) in masses.iter().enumerate() {
                    if !(mass > 0.0 && mass.is_finite()) {
                        return Err(ConfigError::NonPositiveMass { index, mass });
                    }
                }
            }
            None => {
                if !(self.default_mass > 0.0 && self.default_mass.is_finite()) {
                    return Err(ConfigError::NonPositiveMass {
                        index: 0,
                        mass: self.default_mass,
                    });
                }
            }
        }

        let f = &self.forces;
        finite("orbital_spring", f.orbital_spring)?;
        finite("convergence_spring", f.convergence_spring)?;
        finite("central_gravity", f.central_gravity)?;
        positive("gravity_softening", f.gravity_softening)?;
        finite("repulsion_strength", f.repulsion_strength)?;
        positive("repulsion_softening", f.repulsion_softening)?;
        finite("click_ttl", f.click_ttl)?;
        finite("hover_lift", f.hover_lift)?;
        finite("damping", f.damping)?;
        if f.damping < 0.0 {
            return Err(ConfigError::Negative {
                name: "damping",
                value: f.damping,
            });
        }

        self.quality.validate()
    }

    /// Mass of the body in slot `index`.
    pub fn mass_of(&self, index: usize) -> f64 {
        self.masses
            .as_ref()
            .and_then(|m| m.get(index).copied())
            .unwrap_or(self.default_mass)
    }

    /// Effective grid cell size.
    pub fn effective_cell_size(&self) -> f64 {
        self.cell_size.unwrap_or(self.body_radius * 2.0)
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}
