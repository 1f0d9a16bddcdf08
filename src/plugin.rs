//! Bevy integration: runs the simulation from the host's frame loop.
//!
//! The host writes [`DriveState`], [`PointerState`] and
//! [`PerformanceMonitor`] (or sends [`PointerClicked`]) and reads the
//! [`Simulation`] resource for drawing. Presentation is up to the host;
//! order drawing systems after [`SimulationSet::Advance`].

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::config::{ConfigError, SimulationConfig};
use crate::drive::{DriveState, PointerState};
use crate::quality::PerformanceSample;
use crate::simulation::{Simulation, TickInput};

/// System set containing the per-frame simulation step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Advance,
}

/// A click delivered by gesture capture. The last one in a frame wins.
#[derive(Message, Clone, Copy, Debug)]
pub struct PointerClicked {
    pub position: DVec2,
}

/// Sent once when every body reaches the centre during convergence.
#[derive(Message, Clone, Copy, Debug)]
pub struct ConvergenceReached;

/// Latest performance sample from the host's frame-time measurement.
///
/// Consumed by the simulation once per frame so each sample counts once.
#[derive(Resource, Default, Debug)]
pub struct PerformanceMonitor {
    pub latest: Option<PerformanceSample>,
}

impl PerformanceMonitor {
    pub fn record(&mut self, sample: PerformanceSample) {
        self.latest = Some(sample);
    }
}

/// Convergence flag from the most recent frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct ConvergenceStatus {
    pub reached: bool,
}

/// Plugin that owns a [`Simulation`] and advances it every `Update`.
pub struct RendezvousPlugin {
    simulation: Simulation,
}

impl RendezvousPlugin {
    /// Validate `config` up front so a bad setup fails before the app runs.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            simulation: Simulation::new(config)?,
        })
    }
}

impl Plugin for RendezvousPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.simulation.clone())
            .init_resource::<DriveState>()
            .init_resource::<PointerState>()
            .init_resource::<PerformanceMonitor>()
            .init_resource::<ConvergenceStatus>()
            .add_message::<PointerClicked>()
            .add_message::<ConvergenceReached>()
            .add_systems(Update, advance_simulation.in_set(SimulationSet::Advance));
    }
}

/// Feed this frame's inputs to the simulation.
///
/// A click sent as a message takes precedence over one written into
/// [`PointerState`]; the pointer click is cleared once consumed.
fn advance_simulation(
    time: Res<Time>,
    drive: Res<DriveState>,
    mut pointer: ResMut<PointerState>,
    mut clicks: MessageReader<PointerClicked>,
    mut monitor: ResMut<PerformanceMonitor>,
    mut simulation: ResMut<Simulation>,
    mut status: ResMut<ConvergenceStatus>,
    mut converged: MessageWriter<ConvergenceReached>,
) {
    let click = clicks.read().last().map(|c| c.position).or(pointer.click);

    let output = simulation.tick(TickInput {
        elapsed: time.delta_secs_f64(),
        drive: *drive,
        pointer: PointerState {
            hovered: pointer.hovered,
            click,
        },
        performance: monitor.latest.take(),
    });

    if pointer.click.is_some() {
        pointer.click = None;
    }

    if output.convergence_reached && !status.reached {
        converged.write(ConvergenceReached);
    }
    status.reached = output.convergence_reached;
}
