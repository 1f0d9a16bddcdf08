//! The simulation object: owns the bodies and runs one tick of the
//! pipeline (targets, forces, integration, collisions, quality).
//!
//! Bodies live in a preallocated slice and are mutated in place. The
//! simulation holds no global state; independent instances can coexist.

use std::collections::VecDeque;

use bevy::log::{info, warn};
use bevy::math::DVec2;
use bevy::prelude::Resource;

use crate::collision::{SpatialGrid, resolve_collisions};
use crate::config::{ConfigError, SimulationConfig};
use crate::drive::{ActiveClick, DriveState, PointerState};
use crate::orbit::{self, OrbitalParams};
use crate::physics::{self, ForceContext};
use crate::quality::{PerformanceSample, QualityController, QualitySettings, QualityTier};
use crate::types::{Body, BodyId, OrbitMode};

/// Inputs for one scheduler callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickInput {
    /// Seconds since the previous callback.
    pub elapsed: f64,
    pub drive: DriveState,
    pub pointer: PointerState,
    /// Performance sample measured for this cycle, if any.
    pub performance: Option<PerformanceSample>,
}

/// Result of one scheduler callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutput {
    /// Whether forces and integration ran (false on skipped callbacks).
    pub executed: bool,
    /// Every body is near the origin while convergence is active.
    pub convergence_reached: bool,
    /// Pairs whose velocities were exchanged this tick.
    pub collisions: usize,
    /// Quality in effect for the next tick.
    pub quality: QualitySettings,
}

#[derive(Resource, Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    bodies: Vec<Body>,
    grid: SpatialGrid,
    quality: QualityController,
    /// Orbit-clock time driving the elliptical targets.
    orbit_clock: f64,
    /// Time from skipped callbacks not yet integrated.
    pending_dt: f64,
    active_click: Option<ActiveClick>,
    convergence_reached: bool,
}

impl Simulation {
    /// Validate `config` and seed every body on its orbit.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = SpatialGrid::new(config.effective_cell_size());
        let quality = QualityController::new(config.quality.clone());
        let bodies = seed_bodies(&config);

        Ok(Self {
            config,
            bodies,
            grid,
            quality,
            orbit_clock: 0.0,
            pending_dt: 0.0,
            active_click: None,
            convergence_reached: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read-only snapshot for drawing.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Direct mutable access for hosts that reposition bodies (e.g. drag).
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    /// Orbit parameters of slot `index`, recomputed on demand.
    pub fn orbital_params(&self, index: usize) -> OrbitalParams {
        orbit::generate(
            index,
            self.bodies.len(),
            self.config.base_radius,
            self.config.eccentricity,
        )
    }

    pub fn quality(&self) -> QualitySettings {
        self.quality.settings()
    }

    pub fn quality_tier(&self) -> QualityTier {
        self.quality.tier()
    }

    /// Force a quality tier by level (clamped), or `None` to adapt again.
    pub fn set_quality_override(&mut self, level: Option<i64>) {
        self.quality.set_override(level);
        self.apply_trail_cap();
    }

    pub fn orbit_clock(&self) -> f64 {
        self.orbit_clock
    }

    pub fn active_click(&self) -> Option<ActiveClick> {
        self.active_click
    }

    /// Result of the most recent convergence check.
    pub fn convergence_reached(&self) -> bool {
        self.convergence_reached
    }

    /// Whether every body lies within the convergence threshold of the origin.
    pub fn all_within_threshold(&self) -> bool {
        let threshold = self.config.convergence_threshold;
        self.bodies
            .iter()
            .all(|b| b.distance_from_origin() < threshold)
    }

    /// Mark a body hovered (clearing any previous hover), or clear hover.
    pub fn set_hovered(&mut self, id: Option<BodyId>) {
        for body in &mut self.bodies {
            body.is_hovered = Some(body.id) == id;
        }
    }

    /// Put a body into (or take it out of) click cooldown.
    pub fn set_clicked(&mut self, id: BodyId, clicked: bool) {
        let ttl = self.config.forces.click_ttl;
        if let Some(body) = self.bodies.get_mut(id.index()) {
            body.is_clicked = clicked;
            body.click_cooldown = if clicked { ttl } else { 0.0 };
        }
    }

    /// Register a click: repels for the configured TTL and puts bodies
    /// under the click point into cooldown.
    pub fn click(&mut self, point: DVec2) {
        let ttl = self.config.forces.click_ttl;
        let radius = self.config.body_radius;
        self.active_click = Some(ActiveClick::new(point, ttl));
        for body in &mut self.bodies {
            if body.position.distance(point) < radius {
                body.is_clicked = true;
                body.click_cooldown = ttl;
            }
        }
    }

    /// Re-seed all bodies and clocks. Quality state is kept.
    pub fn reset(&mut self) {
        self.bodies = seed_bodies(&self.config);
        self.grid.clear();
        self.orbit_clock = 0.0;
        self.pending_dt = 0.0;
        self.active_click = None;
        self.convergence_reached = false;
        self.quality.reset_tick_counter();
        self.apply_trail_cap();
    }

    /// Run one scheduler callback.
    pub fn tick(&mut self, input: TickInput) -> TickOutput {
        let wall_dt = physics::clamp_dt(input.elapsed, f64::INFINITY);

        self.set_hovered(input.pointer.hovered);
        if let Some(point) = input.pointer.click {
            self.click(point);
        }

        let mut executed = false;
        let mut collisions = 0;

        self.pending_dt += wall_dt;
        if self.quality.should_execute() {
            let dt = physics::clamp_dt(self.pending_dt, self.config.max_dt);
            self.pending_dt = 0.0;
            collisions = self.step(dt, &input.drive);
            executed = true;
        }

        self.expire_clicks(wall_dt);
        self.update_convergence(input.drive.convergence_active);

        if let Some(sample) = input.performance
            && self.quality.observe(sample).is_some()
        {
            self.apply_trail_cap();
        }

        TickOutput {
            executed,
            convergence_reached: self.convergence_reached,
            collisions,
            quality: self.quality.settings(),
        }
    }

    /// Forces, integration and collisions for one executed tick.
    fn step(&mut self, dt: f64, drive: &DriveState) -> usize {
        let settings = self.quality.settings();
        let intensity = drive.intensity;
        let converging = drive.convergence_active;
        let speed_multiplier = intensity.speed_multiplier();
        let scale = intensity.orbit_scale();
        let total = self.bodies.len();

        self.orbit_clock += dt * speed_multiplier;

        let click = self.active_click.filter(ActiveClick::is_live).map(|c| c.point);
        let constants = &self.config.forces;

        for (index, body) in self.bodies.iter_mut().enumerate() {
            let params = orbit::generate(index, total, self.config.base_radius, self.config.eccentricity);

            body.orbit_radius = params.semi_major_axis;
            body.orbit_eccentricity = params.eccentricity;
            body.angular_velocity = body.orbit_speed * speed_multiplier;

            let target = match self.config.orbit_mode {
                OrbitMode::Elliptical => params.target_at(self.orbit_clock, body.orbit_speed, scale),
                OrbitMode::Circular => orbit::circular_target(params.semi_major_axis, body.angle, scale),
            };

            let ctx = ForceContext {
                convergence_active: converging,
                click,
                gravity_multiplier: intensity.gravity_multiplier(),
                hovered: body.is_hovered,
                constants,
            };
            let force = physics::compute_forces(body, target, &ctx);

            physics::step(body, force, dt, settings.trail_cap());

            if self.config.orbit_mode == OrbitMode::Circular && !body.is_hovered && !converging {
                physics::advance_angle(body, dt);
            }

            if !body.is_finite() {
                warn!("{} reached a non-finite state, returning it to its orbit", body.id);
                body.position = target;
                body.velocity = DVec2::ZERO;
                body.trail.clear();
            }
        }

        if settings.enable_collisions && !converging {
            resolve_collisions(
                &mut self.bodies,
                &mut self.grid,
                self.config.body_radius * 2.0,
                self.config.collision_model,
            )
        } else {
            0
        }
    }

    fn expire_clicks(&mut self, dt: f64) {
        if let Some(click) = &mut self.active_click
            && !click.advance(dt)
        {
            self.active_click = None;
        }

        for body in &mut self.bodies {
            if body.is_clicked {
                body.click_cooldown -= dt;
                if body.click_cooldown <= 0.0 {
                    body.is_clicked = false;
                    body.click_cooldown = 0.0;
                }
            }
        }
    }

    fn update_convergence(&mut self, convergence_active: bool) {
        let reached = convergence_active && self.all_within_threshold();
        if reached && !self.convergence_reached {
            info!("All {} bodies converged on the centre", self.bodies.len());
        }
        self.convergence_reached = reached;
    }

    /// Bring existing trails in line with the current quality settings.
    fn apply_trail_cap(&mut self) {
        let cap = self.quality.settings().trail_cap().unwrap_or(0);
        for body in &mut self.bodies {
            body.trail.truncate(cap);
        }
    }
}

fn seed_bodies(config: &SimulationConfig) -> Vec<Body> {
    let total = config.body_count;
    (0..total)
        .map(|index| {
            let params = orbit::generate(index, total, config.base_radius, config.eccentricity);
            let speed = config.base_orbit_speed;
            let (position, velocity) = params.seed(speed);
            Body {
                id: BodyId(index),
                position,
                velocity,
                angle: params.phase_offset,
                angular_velocity: speed,
                orbit_radius: params.semi_major_axis,
                orbit_eccentricity: params.eccentricity,
                orbit_speed: speed,
                phase_offset: params.phase_offset,
                mass: config.mass_of(index),
                is_hovered: false,
                is_clicked: false,
                click_cooldown: 0.0,
                trail: VecDeque::new(),
            }
        })
        .collect()
}
