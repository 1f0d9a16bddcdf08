//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec2;
use rendezvous::config::SimulationConfig;
use rendezvous::drive::DriveState;
use rendezvous::quality::PerformanceSample;
use rendezvous::simulation::{Simulation, TickInput, TickOutput};
use rendezvous::types::BodyId;

/// One frame at 60 FPS.
pub const FRAME: f64 = 1.0 / 60.0;

/// Simulation with the default seven-body layout.
pub fn default_simulation() -> Simulation {
    Simulation::new(SimulationConfig::default()).expect("default config is valid")
}

/// Run `frames` ticks at 60 FPS under a fixed drive state.
pub fn run_frames(sim: &mut Simulation, drive: DriveState, frames: usize) -> TickOutput {
    let mut last = None;
    for _ in 0..frames {
        last = Some(sim.tick(TickInput {
            elapsed: FRAME,
            drive,
            ..Default::default()
        }));
    }
    last.expect("at least one frame")
}

/// Feed one performance score per frame.
pub fn feed_scores(sim: &mut Simulation, scores: &[f64]) -> Vec<TickOutput> {
    scores
        .iter()
        .map(|&score| {
            sim.tick(TickInput {
                elapsed: FRAME,
                performance: Some(PerformanceSample::from_score(score)),
                ..Default::default()
            })
        })
        .collect()
}

/// Place every body on a circle of `radius` at rest.
pub fn gather_bodies(sim: &mut Simulation, radius: f64) {
    let count = sim.bodies().len();
    for i in 0..count {
        let body = sim.body_mut(BodyId(i)).expect("slot exists");
        body.position = DVec2::from_angle(i as f64) * radius;
        body.velocity = DVec2::ZERO;
    }
}

/// Counter-clockwise angle from `a` to `b`, in [0, 2π).
pub fn ccw_angle(a: DVec2, b: DVec2) -> f64 {
    let angle = a.angle_to(b);
    if angle < 0.0 {
        angle + std::f64::consts::TAU
    } else {
        angle
    }
}

/// Total kinetic energy of all bodies.
pub fn kinetic_energy(sim: &Simulation) -> f64 {
    sim.bodies()
        .iter()
        .map(|b| 0.5 * b.mass * b.velocity.length_squared())
        .sum()
}
